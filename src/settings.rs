use crate::{normalize, IgnoreOptions};

/// Dictionary-wide configuration, read from the `**` block of a dictionary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DictionarySettings {
    /// The grammar generation, for example `S` or `7.2`. Picks the inflection suggester and
    /// the pronouncer.
    pub version: String,
    /// Every letter of the language in collation order.
    pub alphabet_rule: String,
    pub revisions: Revisions,
}

/// A recorded spelling change from `before_name` to `after_name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Revision {
    pub date: Option<u32>,
    pub before_name: String,
    pub after_name: String,
}

/// The ordered spelling revision history of a dictionary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Revisions(Vec<Revision>);

impl Revisions {
    pub fn new(revisions: Vec<Revision>) -> Self {
        Self(revisions)
    }

    pub fn push(&mut self, revision: Revision) {
        self.0.push(revision);
    }

    pub fn iter(&self) -> core::slice::Iter<'_, Revision> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Every name `name` was revised into, directly or through a chain of revisions, in
    /// depth-first order.
    ///
    /// Names are compared after normalizing with `ignore_options`. A revision leading back
    /// to a name already on the current chain is not followed, so cycles end the walk.
    /// Names reachable along several chains are returned once per chain.
    pub fn resolve(&self, name: &str, ignore_options: IgnoreOptions) -> Vec<String> {
        let mut names = Vec::new();
        let mut path = vec![name.to_string()];
        self.resolve_from(&mut path, ignore_options, &mut names);
        names
    }

    fn resolve_from(&self, path: &mut Vec<String>, ignore_options: IgnoreOptions, names: &mut Vec<String>) {
        let current = match path.last() {
            Some(current) => normalize(current, ignore_options),
            None => return,
        };
        for revision in &self.0 {
            if normalize(&revision.before_name, ignore_options) != current {
                continue;
            }
            if path.contains(&revision.after_name) {
                continue;
            }
            names.push(revision.after_name.clone());
            path.push(revision.after_name.clone());
            self.resolve_from(path, ignore_options, names);
            path.pop();
        }
    }
}

impl FromIterator<Revision> for Revisions {
    fn from_iter<T: IntoIterator<Item = Revision>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Revisions {
    type Item = &'a Revision;
    type IntoIter = core::slice::Iter<'a, Revision>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn revision(before_name: &str, after_name: &str) -> Revision {
        Revision {
            date: None,
            before_name: before_name.to_string(),
            after_name: after_name.to_string(),
        }
    }

    #[test]
    fn resolve_follows_chains() {
        let revisions = Revisions::new(vec![
            revision("a", "b"),
            revision("b", "c"),
            revision("a", "d"),
            revision("x", "y"),
        ]);
        assert_eq!(revisions.resolve("a", IgnoreOptions::NONE), ["b", "c", "d"]);
        assert_eq!(revisions.resolve("c", IgnoreOptions::NONE), Vec::<String>::new());
    }

    #[test]
    fn resolve_stops_at_cycles() {
        let revisions = Revisions::new(vec![revision("a", "b"), revision("b", "a")]);
        assert_eq!(revisions.resolve("a", IgnoreOptions::NONE), ["b"]);
    }

    #[test]
    fn resolve_does_not_deduplicate() {
        let revisions = Revisions::new(vec![
            revision("a", "b"),
            revision("a", "c"),
            revision("b", "d"),
            revision("c", "d"),
        ]);
        assert_eq!(revisions.resolve("a", IgnoreOptions::NONE), ["b", "d", "c", "d"]);
    }

    #[test]
    fn resolve_normalizes_names() {
        let revisions = Revisions::new(vec![revision("Sâkil", "sakel")]);
        let options = IgnoreOptions {
            case: true,
            diacritic: true,
            ..IgnoreOptions::NONE
        };
        assert_eq!(revisions.resolve("sakil", options), ["sakel"]);
        assert!(revisions.resolve("sakil", IgnoreOptions::NONE).is_empty());
    }

    #[test]
    fn default_settings_are_empty() {
        let settings = DictionarySettings::default();
        assert_eq!(settings.version, "");
        assert_eq!(settings.alphabet_rule, "");
        assert!(settings.revisions.is_empty());
    }
}
