use std::{
    path::{Path, PathBuf},
    time::Instant,
};

use crate::{
    Contents, DictionarySettings, HashMap, HashSet, Marker, Markers, Parameter, SearchResult,
    ValidationError, Word,
};

/// Unique names changed or deleted since the dictionary was last saved.
///
/// A name is never both changed and deleted: recording one removes the other.
#[derive(Debug, Clone, Default)]
pub struct MutationManager {
    changed: HashSet<String>,
    deleted: HashSet<String>,
}

impl MutationManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn change(&mut self, name: &str) {
        self.deleted.remove(name);
        self.changed.insert(name.to_string());
    }

    pub fn delete(&mut self, name: &str) {
        self.changed.remove(name);
        self.deleted.insert(name.to_string());
    }

    /// Records that the word named `old_name` is now named `new_name`.
    pub fn rename(&mut self, old_name: &str, new_name: &str) {
        if old_name != new_name {
            self.delete(old_name);
        }
        self.change(new_name);
    }

    pub fn reset(&mut self) {
        self.changed.clear();
        self.deleted.clear();
    }

    pub fn changed_names(&self) -> impl Iterator<Item = &str> {
        self.changed.iter().map(String::as_str)
    }

    pub fn deleted_names(&self) -> impl Iterator<Item = &str> {
        self.deleted.iter().map(String::as_str)
    }

    pub fn is_changed(&self, name: &str) -> bool {
        self.changed.contains(name)
    }

    pub fn is_deleted(&self, name: &str) -> bool {
        self.deleted.contains(name)
    }

    pub fn is_empty(&self) -> bool {
        self.changed.is_empty() && self.deleted.is_empty()
    }
}

/// A collection of words together with the settings and markers they are read with.
///
/// Every word in a dictionary has its comparison string computed against the dictionary's
/// alphabet. Edits go through the dictionary so that unique names stay unique and valid, and
/// so that the [`MutationManager`] knows which files an incremental save has to touch.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    words: Vec<Word>,
    /// Position of each word in `words` by uid.
    uids: HashMap<String, usize>,
    settings: DictionarySettings,
    markers: Markers,
    path: Option<PathBuf>,
    mutations: MutationManager,
}

impl Dictionary {
    pub fn new(
        words: Vec<Word>,
        settings: DictionarySettings,
        markers: Markers,
        path: Option<PathBuf>,
    ) -> Self {
        let mut dictionary = Self {
            words,
            uids: HashMap::default(),
            settings,
            markers,
            path,
            mutations: MutationManager::new(),
        };
        for word in &mut dictionary.words {
            word.attach(&dictionary.settings.alphabet_rule);
        }
        dictionary.reindex();
        dictionary
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn settings(&self) -> &DictionarySettings {
        &self.settings
    }

    pub fn markers(&self) -> &Markers {
        &self.markers
    }

    /// The file or directory the dictionary was loaded from or last saved to.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn set_path(&mut self, path: Option<PathBuf>) {
        self.path = path;
    }

    pub fn mutations(&self) -> &MutationManager {
        &self.mutations
    }

    pub(crate) fn mutations_mut(&mut self) -> &mut MutationManager {
        &mut self.mutations
    }

    /// Runs `parameter` over every word.
    ///
    /// Matched words are sorted by comparison string. Suggestions come in the order the
    /// parameter produced them: word-independent ones first, then per word in dictionary
    /// order.
    pub fn search<P: Parameter + ?Sized>(&self, parameter: &mut P) -> SearchResult<'_> {
        let start = Instant::now();
        parameter.prepare(self);
        let mut suggestions = parameter.presuggest(self);
        let mut words = Vec::new();
        for word in &self.words {
            if parameter.matches(word) {
                words.push(word);
            }
            suggestions.extend(parameter.suggest(word, self));
        }
        Word::sort_words(&mut words);
        let elapsed = start.elapsed();
        log::debug!(
            "searched {} words in {elapsed:?}: {} hits, {} suggestions",
            self.words.len(),
            words.len(),
            suggestions.len()
        );
        SearchResult::new(words, suggestions, elapsed)
    }

    pub fn find_by_uid(&self, uid: &str) -> Option<&Word> {
        self.uids.get(uid).map(|&index| &self.words[index])
    }

    pub fn find_by_unique_name(&self, unique_name: &str) -> Option<&Word> {
        self.words
            .iter()
            .find(|word| word.unique_name() == unique_name)
    }

    /// Adds a new word. The word gets a fresh uid if its uid is already taken.
    pub fn add_word(&mut self, mut word: Word) -> Result<&Word, ValidationError> {
        self.validate_unique_name(word.unique_name(), None)?;
        while self.uids.contains_key(word.uid()) {
            word.reissue_uid();
        }
        word.attach(&self.settings.alphabet_rule);
        self.mutations.change(word.unique_name());
        let index = self.words.len();
        self.uids.insert(word.uid().to_string(), index);
        self.words.push(word);
        Ok(&self.words[index])
    }

    /// Overwrites the word with the given uid. Its contents are trimmed.
    pub fn edit_word(
        &mut self,
        uid: &str,
        unique_name: impl Into<String>,
        date: u32,
        contents: Contents,
    ) -> Result<&Word, ValidationError> {
        let unique_name = unique_name.into();
        let index = *self
            .uids
            .get(uid)
            .ok_or_else(|| ValidationError::NoSuchWord(uid.to_string()))?;
        let old_name = self.words[index].unique_name().to_string();
        self.validate_unique_name(&unique_name, Some(&old_name))?;
        let word = &mut self.words[index];
        word.edit(unique_name, date, contents, &self.settings.alphabet_rule);
        self.mutations.rename(&old_name, word.unique_name());
        Ok(&self.words[index])
    }

    pub fn delete_word(&mut self, uid: &str) -> Result<Word, ValidationError> {
        let index = self
            .uids
            .get(uid)
            .copied()
            .ok_or_else(|| ValidationError::NoSuchWord(uid.to_string()))?;
        let word = self.words.remove(index);
        self.mutations.delete(word.unique_name());
        self.reindex();
        Ok(word)
    }

    /// Replaces the settings and recomputes every word's comparison string.
    pub fn change_settings(&mut self, settings: DictionarySettings) {
        self.settings = settings;
        for word in &mut self.words {
            word.attach(&self.settings.alphabet_rule);
        }
    }

    pub fn word_markers(&self, unique_name: &str) -> &[Marker] {
        self.markers.get(unique_name)
    }

    pub fn toggle_marker(&mut self, unique_name: &str, marker: Marker) {
        self.markers.toggle(unique_name, marker);
    }

    pub fn set_markers(&mut self, unique_name: &str, markers: Vec<Marker>) {
        self.markers.set(unique_name, markers);
    }

    /// Checks a unique name for a new word, or for an edit of the word now named `old_name`.
    fn validate_unique_name(&self, unique_name: &str, old_name: Option<&str>) -> Result<(), ValidationError> {
        let duplicate = self
            .words
            .iter()
            .filter(|word| Some(word.unique_name()) != old_name)
            .any(|word| word.unique_name() == unique_name);
        if duplicate {
            return Err(ValidationError::DuplicateUniqueName(unique_name.to_string()));
        }
        if !Word::is_valid_unique_name(unique_name) {
            return Err(ValidationError::InvalidUniqueName(unique_name.to_string()));
        }
        Ok(())
    }

    fn reindex(&mut self) {
        self.uids = self
            .words
            .iter()
            .enumerate()
            .map(|(index, word)| (word.uid().to_string(), index))
            .collect();
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{NormalParameter, WordMode, WordType};

    fn settings() -> DictionarySettings {
        DictionarySettings {
            version: "S".to_string(),
            alphabet_rule: "sztdkgfvpbcqxjlrnmyhaâáàeêéèiîíìoôòuûù".to_string(),
            ..DictionarySettings::default()
        }
    }

    fn dictionary(names: &[&str]) -> Dictionary {
        let words = names
            .iter()
            .map(|name| Word::new(*name, 1000, Contents::from_iter([("ja", "+ <名>\n= 単語")])))
            .collect();
        Dictionary::new(words, settings(), Markers::new(), None)
    }

    fn sorted<'a>(names: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
        let mut names: Vec<_> = names.collect();
        names.sort_unstable();
        names
    }

    #[test]
    fn mutation_changes_and_deletes() {
        let mut manager = MutationManager::new();
        manager.change("A");
        manager.change("B");
        manager.delete("C");
        assert_eq!(sorted(manager.changed_names()), ["A", "B"]);
        assert_eq!(sorted(manager.deleted_names()), ["C"]);

        let mut manager = MutationManager::new();
        manager.change("A");
        manager.change("B");
        manager.delete("A");
        manager.delete("C");
        manager.change("C");
        manager.change("B");
        manager.delete("D");
        manager.change("C");
        assert_eq!(sorted(manager.changed_names()), ["B", "C"]);
        assert_eq!(sorted(manager.deleted_names()), ["A", "D"]);
        manager.reset();
        assert!(manager.is_empty());
    }

    #[test]
    fn mutation_renames() {
        let mut manager = MutationManager::new();
        manager.rename("A", "B");
        manager.change("C");
        manager.change("B");
        assert_eq!(sorted(manager.changed_names()), ["B", "C"]);
        assert_eq!(sorted(manager.deleted_names()), ["A"]);

        let mut manager = MutationManager::new();
        manager.rename("A", "B");
        manager.rename("B", "C");
        manager.rename("X", "Y");
        manager.change("X");
        assert_eq!(sorted(manager.changed_names()), ["C", "X", "Y"]);
        assert_eq!(sorted(manager.deleted_names()), ["A", "B"]);

        let mut manager = MutationManager::new();
        manager.rename("A", "A");
        assert!(manager.is_changed("A"));
        assert!(!manager.is_deleted("A"));
    }

    #[test]
    fn words_get_comparison_strings() {
        let dictionary = dictionary(&["sakil", "tel"]);
        assert!(dictionary
            .words()
            .iter()
            .all(|word| word.comparison_string().is_some()));
    }

    #[test]
    fn add_word_validates() {
        let mut dictionary = dictionary(&["sakil"]);
        let err = dictionary
            .add_word(Word::new("sakil", 1001, Contents::new()))
            .unwrap_err();
        assert_eq!(err, ValidationError::DuplicateUniqueName("sakil".to_string()));
        let err = dictionary
            .add_word(Word::new("sa kil", 1001, Contents::new()))
            .unwrap_err();
        assert_eq!(err, ValidationError::InvalidUniqueName("sa kil".to_string()));

        let word = dictionary
            .add_word(Word::new("sakil~", 1001, Contents::new()))
            .unwrap();
        assert!(word.comparison_string().is_some());
        assert_eq!(dictionary.len(), 2);
        assert!(dictionary.mutations().is_changed("sakil~"));
    }

    #[test]
    fn add_word_reissues_taken_uid() {
        let mut dictionary = dictionary(&["sakil"]);
        let uid = dictionary.words()[0].uid().to_string();
        let word = dictionary
            .add_word(Word::with_uid(uid.clone(), "tel", 1000, Contents::new()))
            .unwrap();
        assert_ne!(word.uid(), uid);
        assert_eq!(dictionary.find_by_uid(&uid).unwrap().unique_name(), "sakil");
    }

    #[test]
    fn edit_word_keeps_uid() {
        let mut dictionary = dictionary(&["sakil", "tel"]);
        let uid = dictionary.words()[0].uid().to_string();
        let contents = Contents::from_iter([("ja", "  + <動>\n= 歩く  ")]);
        let word = dictionary.edit_word(&uid, "sakel", 1002, contents).unwrap();
        assert_eq!(word.uid(), uid);
        assert_eq!(word.unique_name(), "sakel");
        assert_eq!(word.contents().get("ja"), Some("+ <動>\n= 歩く"));
        assert_eq!(word.equivalent_names("ja"), ["歩く"]);
        assert!(dictionary.find_by_unique_name("sakil").is_none());
        assert!(dictionary.mutations().is_deleted("sakil"));
        assert!(dictionary.mutations().is_changed("sakel"));
    }

    #[test]
    fn edit_word_validates() {
        let mut dictionary = dictionary(&["sakil", "tel"]);
        let uid = dictionary.words()[0].uid().to_string();
        let err = dictionary
            .edit_word(&uid, "tel", 1000, Contents::new())
            .unwrap_err();
        assert_eq!(err, ValidationError::DuplicateUniqueName("tel".to_string()));
        let err = dictionary
            .edit_word("missing", "xoq", 1000, Contents::new())
            .unwrap_err();
        assert_eq!(err, ValidationError::NoSuchWord("missing".to_string()));
        let err = dictionary
            .edit_word(&uid, "~", 1000, Contents::new())
            .unwrap_err();
        assert_eq!(err, ValidationError::InvalidUniqueName("~".to_string()));
        // Keeping the old name is not a duplicate.
        assert!(dictionary.edit_word(&uid, "sakil", 1001, Contents::new()).is_ok());
    }

    #[test]
    fn delete_word_reindexes() {
        let mut dictionary = dictionary(&["sakil", "tel", "xoq"]);
        let uid = dictionary.words()[0].uid().to_string();
        let last = dictionary.words()[2].uid().to_string();
        let word = dictionary.delete_word(&uid).unwrap();
        assert_eq!(word.unique_name(), "sakil");
        assert!(dictionary.find_by_uid(&uid).is_none());
        assert_eq!(dictionary.find_by_uid(&last).unwrap().unique_name(), "xoq");
        assert!(dictionary.mutations().is_deleted("sakil"));
        assert!(dictionary.delete_word(&uid).is_err());
    }

    #[test]
    fn change_settings_reattaches() {
        let mut dictionary = dictionary(&["sakil"]);
        let before = dictionary.words()[0].comparison_string().map(str::to_string);
        dictionary.change_settings(DictionarySettings {
            alphabet_rule: "lkisa".to_string(),
            ..settings()
        });
        let after = dictionary.words()[0].comparison_string().map(str::to_string);
        assert_ne!(before, after);
    }

    #[test]
    fn search_sorts_hits() {
        let dictionary = dictionary(&["tel", "sakil", "zaz", "sâkil"]);
        let mut parameter = NormalParameter::new("", WordMode::Name, WordType::Prefix, "ja");
        let result = dictionary.search(&mut parameter);
        let names: Vec<_> = result.words.iter().map(|word| word.unique_name()).collect();
        assert_eq!(names, ["sakil", "sâkil", "zaz", "tel"]);
    }

    #[test]
    fn markers() {
        let mut dictionary = dictionary(&["sakil"]);
        dictionary.toggle_marker("sakil", Marker::Square);
        dictionary.toggle_marker("sakil", Marker::Circle);
        assert_eq!(dictionary.word_markers("sakil"), [Marker::Circle, Marker::Square]);
        dictionary.set_markers("sakil", Vec::new());
        assert!(dictionary.markers().is_empty());
    }
}
