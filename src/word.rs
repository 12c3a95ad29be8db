pub(crate) mod parser;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::{HashMap, Parser};

static UNIQUE_NAME_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\+)?((?:\p{L}|-|')+?)(\+)?(~*)$").unwrap());

static COMPARISON_MODIFIER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\+)?(')?(.+?)(')?(\+)?(~*)$").unwrap());

/// The raw contents of a word keyed by 2-letter language code.
///
/// Languages keep the order in which they were inserted, which is also the order they are
/// written back to disk in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Contents {
    entries: Vec<(String, String)>,
}

impl Contents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, language: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key == language)
            .map(|(_, content)| content.as_str())
    }

    /// Sets the content for `language`, keeping its position if it was already present.
    pub fn insert(&mut self, language: impl Into<String>, content: impl Into<String>) -> Option<String> {
        let language = language.into();
        let content = content.into();
        match self.entries.iter_mut().find(|(key, _)| *key == language) {
            Some((_, existing)) => Some(core::mem::replace(existing, content)),
            None => {
                self.entries.push((language, content));
                None
            }
        }
    }

    pub fn remove(&mut self, language: &str) -> Option<String> {
        let index = self.entries.iter().position(|(key, _)| key == language)?;
        Some(self.entries.remove(index).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(language, content)| (language.as_str(), content.as_str()))
    }

    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(language, _)| language.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn trimmed(self) -> Self {
        let entries = self
            .entries
            .into_iter()
            .map(|(language, content)| (language, content.trim().to_string()))
            .collect();
        Self { entries }
    }
}

impl<L: Into<String>, C: Into<String>> FromIterator<(L, C)> for Contents {
    fn from_iter<T: IntoIterator<Item = (L, C)>>(iter: T) -> Self {
        let mut contents = Self::new();
        for (language, content) in iter {
            contents.insert(language, content);
        }
        contents
    }
}

/// A headword and its per-language contents.
///
/// The `uid` identifies the word for its whole life. The `unique_name` is the spelling the
/// author chose, which may change on edit but is unique within a dictionary.
///
/// A word's name and equivalent names are derived from its unique name and contents. Its
/// comparison string additionally needs the alphabet of the dictionary which owns it and is
/// `None` until the word is added to one.
#[derive(Debug, Clone)]
pub struct Word {
    uid: String,
    unique_name: String,
    name: String,
    date: u32,
    contents: Contents,
    equivalent_names: HashMap<String, Vec<String>>,
    comparison_string: Option<String>,
}

impl Word {
    pub fn new(unique_name: impl Into<String>, date: u32, contents: Contents) -> Self {
        Self::with_uid(uuid::Uuid::new_v4().to_string(), unique_name, date, contents)
    }

    /// Creates a word with a known uid, for example when restoring one from elsewhere.
    pub fn with_uid(
        uid: impl Into<String>,
        unique_name: impl Into<String>,
        date: u32,
        contents: Contents,
    ) -> Self {
        let mut word = Self {
            uid: uid.into(),
            unique_name: unique_name.into(),
            name: String::new(),
            date,
            contents,
            equivalent_names: HashMap::default(),
            comparison_string: None,
        };
        word.update();
        word
    }

    pub fn uid(&self) -> &str {
        &self.uid
    }

    pub fn unique_name(&self) -> &str {
        &self.unique_name
    }

    /// The unique name with its `~` disambiguators removed.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn date(&self) -> u32 {
        self.date
    }

    pub fn contents(&self) -> &Contents {
        &self.contents
    }

    /// Equivalent names and phrase equivalent names in `language`, markup stripped.
    pub fn equivalent_names(&self, language: &str) -> &[String] {
        self.equivalent_names
            .get(language)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn comparison_string(&self) -> Option<&str> {
        self.comparison_string.as_deref()
    }

    pub fn is_valid_unique_name(unique_name: &str) -> bool {
        UNIQUE_NAME_REGEX.is_match(unique_name)
    }

    /// Sorts words by their comparison strings.
    pub fn sort_words(words: &mut [&Word]) {
        words.sort_by(|first, second| first.comparison_string.cmp(&second.comparison_string));
    }

    pub(crate) fn reissue_uid(&mut self) {
        self.uid = uuid::Uuid::new_v4().to_string();
    }

    /// Overwrites everything but the uid. Contents are trimmed.
    pub(crate) fn edit(&mut self, unique_name: String, date: u32, contents: Contents, alphabet_rule: &str) {
        self.unique_name = unique_name;
        self.date = date;
        self.contents = contents.trimmed();
        self.update();
        self.attach(alphabet_rule);
    }

    /// Computes the comparison string against the alphabet of the owning dictionary.
    pub(crate) fn attach(&mut self, alphabet_rule: &str) {
        self.comparison_string = Some(comparison_string(&self.unique_name, alphabet_rule));
    }

    fn update(&mut self) {
        self.name = self.unique_name.replace('~', "");
        let parser = Parser::simple();
        let mut equivalent_names = HashMap::default();
        for language in self.contents.languages() {
            let mut names = parser
                .lookup_equivalent_names(self, language, false)
                .unwrap_or_default();
            names.extend(
                parser
                    .lookup_phrase_equivalent_names(self, language, false)
                    .unwrap_or_default(),
            );
            equivalent_names.insert(language.to_string(), names);
        }
        self.equivalent_names = equivalent_names;
    }
}

/// Maps each letter to its position in the alphabet, offset so that the modifier markers
/// appended afterwards sort before any letter.
fn comparison_string(unique_name: &str, alphabet_rule: &str) -> String {
    let apostrophe = alphabet_rule.contains('\'');
    let mut string = String::new();
    for ch in unique_name.chars() {
        if (!apostrophe && ch == '\'') || matches!(ch, '-' | '+' | '~') {
            continue;
        }
        let code = match alphabet_rule.chars().position(|letter| letter == ch) {
            Some(position) => position as u32 + 200,
            None => 1000,
        };
        string.extend(char::from_u32(code));
    }
    if let Some(captures) = COMPARISON_MODIFIER_REGEX.captures(unique_name) {
        let markers = [(2, 150), (4, 151), (1, 160), (5, 161)];
        for (group, code) in markers {
            if captures.get(group).is_some() {
                string.extend(char::from_u32(code));
            }
        }
        let tildes = captures.get(6).map_or(0, |tildes| tildes.as_str().len());
        if tildes > 0 {
            string.extend(char::from_u32(tildes as u32 + 100));
        }
    }
    string
}

#[cfg(test)]
mod test {
    use super::*;

    const ALPHABET: &str = "sztdkgfvpbcqxjlrnmyhaâáàeêéèiîíìoôòuûù";

    fn word(unique_name: &str) -> Word {
        let mut word = Word::new(unique_name, 1000, Contents::new());
        word.attach(ALPHABET);
        word
    }

    #[test]
    fn name_drops_tildes() {
        assert_eq!(word("lic+~~").name(), "lic+");
        assert_eq!(word("sakil").name(), "sakil");
    }

    #[test]
    fn unique_name_validity() {
        assert!(Word::is_valid_unique_name("sakil"));
        assert!(Word::is_valid_unique_name("+lic+~~"));
        assert!(Word::is_valid_unique_name("'s"));
        assert!(Word::is_valid_unique_name("a-b"));
        assert!(!Word::is_valid_unique_name(""));
        assert!(!Word::is_valid_unique_name("sa kil"));
        assert!(!Word::is_valid_unique_name("~sakil"));
        assert!(!Word::is_valid_unique_name("sak1l"));
    }

    #[test]
    fn comparison_order() {
        let words = ["tel", "sakil", "sakil~", "+sakil", "sakil+", "sâkil", "xoq", "zaz"]
            .map(word);
        let mut refs: Vec<&Word> = words.iter().collect();
        Word::sort_words(&mut refs);
        let names: Vec<&str> = refs.iter().map(|word| word.unique_name()).collect();
        assert_eq!(
            names,
            ["sakil", "sakil~", "+sakil", "sakil+", "sâkil", "zaz", "tel", "xoq"]
        );
    }

    #[test]
    fn apostrophe_depends_on_alphabet() {
        let without = comparison_string("'s", ALPHABET);
        assert_eq!(without, "\u{c8}\u{96}");
        let with = comparison_string("'s", "'s");
        assert_eq!(with, "\u{c8}\u{c9}\u{96}");
    }

    #[test]
    fn equivalent_names_include_phrases() {
        let contents = Contents::from_iter([(
            "ja",
            "+ <名>\n= <名> {リンゴ}, 林檎\n=? りんご\nP: {fi qelar} → 声に出して, 声を出して | 説明",
        )]);
        let word = Word::new("sakil", 1000, contents);
        assert_eq!(
            word.equivalent_names("ja"),
            ["リンゴ", "林檎", "りんご", "声に出して", "声を出して"]
        );
        assert!(word.equivalent_names("en").is_empty());
        assert_eq!(word.comparison_string(), None);
    }

    #[test]
    fn contents_keep_insertion_order() {
        let mut contents = Contents::new();
        contents.insert("ja", "a");
        contents.insert("en", "b");
        assert_eq!(contents.insert("ja", "c"), Some("a".to_string()));
        assert_eq!(contents.languages().collect::<Vec<_>>(), ["ja", "en"]);
        assert_eq!(contents.remove("ja"), Some("c".to_string()));
        assert_eq!(contents.get("en"), Some("b"));
        assert_eq!(contents.len(), 1);
    }
}
