use core::time::Duration;

use regex::{Regex, RegexBuilder};

use crate::{
    normalize,
    suggest::{create_inflection_suggester, RevisionSuggester, Suggester, Suggestion},
    Dictionary, IgnoreOptions, Word,
};

/// Which parts of a word a search looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordMode {
    Name,
    Equivalent,
    /// The name and the equivalents.
    Both,
    /// The raw content in the search language.
    Content,
}

/// How the search text is compared with each candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordType {
    Exact,
    Prefix,
    Suffix,
    Part,
    /// Equal except for at most one character.
    Pair,
    /// The search text is a regular expression.
    Regular,
}

impl WordMode {
    pub const ALL: [Self; 4] = [Self::Name, Self::Equivalent, Self::Both, Self::Content];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Equivalent => "equivalent",
            Self::Both => "both",
            Self::Content => "content",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|mode| mode.as_str() == name)
    }
}

impl WordType {
    pub const ALL: [Self; 6] = [
        Self::Exact,
        Self::Prefix,
        Self::Suffix,
        Self::Part,
        Self::Pair,
        Self::Regular,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Prefix => "prefix",
            Self::Suffix => "suffix",
            Self::Part => "part",
            Self::Pair => "pair",
            Self::Regular => "regular",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|type_| type_.as_str() == name)
    }
}

/// A search over a [`Dictionary`].
///
/// [`Dictionary::search`] calls `prepare` and `presuggest` once, then `matches` and
/// `suggest` for every word. A parameter is meant for one search.
pub trait Parameter {
    fn prepare(&mut self, dictionary: &Dictionary);

    fn presuggest(&self, dictionary: &Dictionary) -> Vec<Suggestion>;

    fn matches(&self, word: &Word) -> bool;

    fn suggest(&self, word: &Word, dictionary: &Dictionary) -> Vec<Suggestion>;
}

/// The search text matched by a [`WordMode`] and a [`WordType`].
pub struct NormalParameter {
    text: String,
    mode: WordMode,
    type_: WordType,
    language: String,
    ignore_options: IgnoreOptions,
    normalized_text: String,
    /// Only for [`WordType::Regular`]. `None` if the text is not a valid pattern.
    regex: Option<Regex>,
    suggesters: Vec<Box<dyn Suggester>>,
}

impl NormalParameter {
    /// Creates a parameter with the default ignore options for `mode` and `type_`.
    ///
    /// Case is always ignored. Diacritics are ignored too, unless `mode` is
    /// [`WordMode::Content`] or `type_` is [`WordType::Pair`] or [`WordType::Regular`].
    pub fn new(text: &str, mode: WordMode, type_: WordType, language: &str) -> Self {
        let ignore_options = Self::default_ignore_options(mode, type_);
        Self::with_ignore_options(text, mode, type_, language, ignore_options)
    }

    pub fn with_ignore_options(
        text: &str,
        mode: WordMode,
        type_: WordType,
        language: &str,
        ignore_options: IgnoreOptions,
    ) -> Self {
        let normalized_text = normalize(text, ignore_options);
        // Candidates are folded before matching, so the pattern is folded the same way.
        let regex = match type_ {
            WordType::Regular => compile(&normalized_text, ignore_options),
            _ => None,
        };
        Self {
            text: text.to_string(),
            mode,
            type_,
            language: language.to_string(),
            ignore_options,
            normalized_text,
            regex,
            suggesters: Vec::new(),
        }
    }

    pub fn default_ignore_options(mode: WordMode, type_: WordType) -> IgnoreOptions {
        let diacritic = mode != WordMode::Content && !matches!(type_, WordType::Pair | WordType::Regular);
        IgnoreOptions {
            case: true,
            diacritic,
            space: false,
            wave: false,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn mode(&self) -> WordMode {
        self.mode
    }

    pub fn type_(&self) -> WordType {
        self.type_
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn ignore_options(&self) -> IgnoreOptions {
        self.ignore_options
    }

    fn candidates<'w>(&self, word: &'w Word) -> Vec<&'w str> {
        let language = self.language.as_str();
        match self.mode {
            WordMode::Name => vec![word.name()],
            WordMode::Equivalent => word
                .equivalent_names(language)
                .iter()
                .map(String::as_str)
                .collect(),
            WordMode::Both => core::iter::once(word.name())
                .chain(word.equivalent_names(language).iter().map(String::as_str))
                .collect(),
            WordMode::Content => vec![word.contents().get(language).unwrap_or_default()],
        }
    }

    fn matches_candidate(&self, candidate: &str) -> bool {
        let text = self.normalized_text.as_str();
        match self.type_ {
            WordType::Exact => candidate == text,
            WordType::Prefix => candidate.starts_with(text),
            WordType::Suffix => candidate.ends_with(text),
            WordType::Part => candidate.contains(text),
            WordType::Pair => matches_pair(text, candidate),
            WordType::Regular => self
                .regex
                .as_ref()
                .map_or(false, |regex| regex.is_match(candidate)),
        }
    }
}

impl Parameter for NormalParameter {
    /// Sets up the revision and inflection suggesters. Only name searches for an exact word
    /// or a prefix get suggestions.
    fn prepare(&mut self, dictionary: &Dictionary) {
        self.suggesters.clear();
        let named = matches!(self.mode, WordMode::Name | WordMode::Both);
        let literal = matches!(self.type_, WordType::Exact | WordType::Prefix);
        if named && literal {
            self.suggesters
                .push(Box::new(RevisionSuggester::new(&self.text, self.ignore_options)));
            let version = &dictionary.settings().version;
            if let Some(suggester) = create_inflection_suggester(version, &self.text, self.ignore_options) {
                self.suggesters.push(suggester);
            }
        }
        for suggester in &mut self.suggesters {
            suggester.prepare();
        }
    }

    fn presuggest(&self, dictionary: &Dictionary) -> Vec<Suggestion> {
        self.suggesters
            .iter()
            .flat_map(|suggester| suggester.presuggest(dictionary))
            .collect()
    }

    fn matches(&self, word: &Word) -> bool {
        self.candidates(word).into_iter().any(|candidate| {
            let candidate = normalize(candidate, self.ignore_options);
            self.matches_candidate(&candidate)
        })
    }

    fn suggest(&self, word: &Word, dictionary: &Dictionary) -> Vec<Suggestion> {
        self.suggesters
            .iter()
            .flat_map(|suggester| suggester.suggest(word, dictionary))
            .collect()
    }
}

fn compile(text: &str, ignore_options: IgnoreOptions) -> Option<Regex> {
    let regex = RegexBuilder::new(text)
        .multi_line(true)
        .case_insensitive(ignore_options.case)
        .build();
    match regex {
        Ok(regex) => Some(regex),
        Err(error) => {
            log::debug!("search text is not a valid regex, nothing will match: {error}");
            None
        }
    }
}

/// Whether `candidate` equals `text` after replacing at most one character of `text` with a
/// wildcard. The wildcard does not match line terminators. Texts longer than 10 characters
/// never match.
fn matches_pair(text: &str, candidate: &str) -> bool {
    let text: Vec<char> = text.chars().collect();
    let candidate: Vec<char> = candidate.chars().collect();
    if text.is_empty() || text.len() > 10 || text.len() != candidate.len() {
        return false;
    }
    (0..text.len()).any(|wildcard| {
        !is_line_terminator(candidate[wildcard])
            && text
                .iter()
                .zip(&candidate)
                .enumerate()
                .all(|(index, (expected, actual))| index == wildcard || expected == actual)
    })
}

fn is_line_terminator(ch: char) -> bool {
    matches!(ch, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

/// Matched words and suggestions of one search.
#[derive(Debug, Clone)]
pub struct SearchResult<'a> {
    /// Sorted by comparison string.
    pub words: Vec<&'a Word>,
    pub suggestions: Vec<Suggestion>,
    pub elapsed: Duration,
    pub size_per_page: usize,
}

impl<'a> SearchResult<'a> {
    pub const DEFAULT_SIZE_PER_PAGE: usize = 30;

    pub fn new(words: Vec<&'a Word>, suggestions: Vec<Suggestion>, elapsed: Duration) -> Self {
        Self {
            words,
            suggestions,
            elapsed,
            size_per_page: Self::DEFAULT_SIZE_PER_PAGE,
        }
    }

    pub fn min_page(&self) -> usize {
        0
    }

    pub fn max_page(&self) -> usize {
        if self.size_per_page == 0 {
            return 0;
        }
        let pages = (self.words.len() + self.size_per_page - 1) / self.size_per_page;
        pages.saturating_sub(1)
    }

    /// The words on `page`, counting from 0. Pages past the end are empty.
    pub fn slice_words(&self, page: usize) -> &[&'a Word] {
        let start = page.saturating_mul(self.size_per_page).min(self.words.len());
        let end = start.saturating_add(self.size_per_page).min(self.words.len());
        &self.words[start..end]
    }
}
