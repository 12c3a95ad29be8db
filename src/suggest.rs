//! Suggestions shown next to search results: spelling revisions and inflected forms.
//!
//! A [`Suggester`] lives for a single search. It is told the search text when built,
//! enumerates whatever it can from the text alone in [`Suggester::prepare`], and is then
//! consulted once for the whole dictionary and once per word.

pub mod shal;
pub mod stable;

use crate::{
    normalize,
    version::{Grammar, Version},
    Dictionary, IgnoreOptions, Parser, Word,
};

/// A localized pair of display strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Names {
    pub ja: &'static str,
    pub en: &'static str,
}

impl Names {
    pub fn get(&self, language: &str) -> Option<&'static str> {
        match language {
            "ja" => Some(self.ja),
            "en" => Some(self.en),
            _ => None,
        }
    }
}

/// One grammatical facet of an inflection, such as `{kind: "tense", type: "past"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuggestionDescription {
    pub kind: &'static str,
    pub type_: &'static str,
}

impl SuggestionDescription {
    pub(crate) const fn new(kind: &'static str, type_: &'static str) -> Self {
        Self { kind, type_ }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestionKind {
    Revision,
    StableInflection(stable::InflectionKind),
    ShalInflection(shal::InflectionKind),
}

/// A hint that the search text may refer to other words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    kind: SuggestionKind,
    descriptions: Vec<SuggestionDescription>,
    names: Vec<String>,
}

const REVISION_NAMES: Names = Names {
    ja: "綴り改定",
    en: "Spelling revision",
};

impl Suggestion {
    pub fn new(kind: SuggestionKind, descriptions: Vec<SuggestionDescription>, names: Vec<String>) -> Self {
        Self {
            kind,
            descriptions,
            names,
        }
    }

    pub fn kind(&self) -> SuggestionKind {
        self.kind
    }

    pub fn descriptions(&self) -> &[SuggestionDescription] {
        &self.descriptions
    }

    /// The words the search text may refer to.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn kind_name(&self, language: &str) -> Option<&'static str> {
        match self.kind {
            SuggestionKind::Revision => REVISION_NAMES.get(language),
            SuggestionKind::StableInflection(kind) => kind.names().get(language),
            SuggestionKind::ShalInflection(kind) => kind.names().get(language),
        }
    }

    /// Display names of the descriptions, in order. A facet without a name in `language`
    /// yields `None`.
    pub fn description_names(&self, language: &str) -> Vec<Option<&'static str>> {
        self.descriptions
            .iter()
            .map(|description| match self.kind {
                SuggestionKind::Revision => None,
                SuggestionKind::StableInflection(_) => stable::description_name(*description, language),
                SuggestionKind::ShalInflection(_) => shal::description_name(*description, language),
            })
            .collect()
    }
}

pub trait Suggester {
    /// Does the work that depends only on the search text.
    fn prepare(&mut self);

    /// Suggestions which do not depend on any particular word.
    fn presuggest(&self, dictionary: &Dictionary) -> Vec<Suggestion>;

    fn suggest(&self, word: &Word, dictionary: &Dictionary) -> Vec<Suggestion>;
}

/// Suggests the current spellings of a name which has been revised.
#[derive(Debug, Clone)]
pub struct RevisionSuggester {
    text: String,
    ignore_options: IgnoreOptions,
}

impl RevisionSuggester {
    pub fn new(text: &str, ignore_options: IgnoreOptions) -> Self {
        Self {
            text: text.to_string(),
            ignore_options,
        }
    }
}

impl Suggester for RevisionSuggester {
    fn prepare(&mut self) {}

    fn presuggest(&self, dictionary: &Dictionary) -> Vec<Suggestion> {
        let names = dictionary
            .settings()
            .revisions
            .resolve(&self.text, self.ignore_options);
        if names.is_empty() {
            Vec::new()
        } else {
            vec![Suggestion::new(SuggestionKind::Revision, Vec::new(), names)]
        }
    }

    fn suggest(&self, _word: &Word, _dictionary: &Dictionary) -> Vec<Suggestion> {
        Vec::new()
    }
}

/// Picks the inflection suggester for a dictionary version, or `None` if the version has
/// none.
pub fn create_inflection_suggester(
    version: &str,
    text: &str,
    ignore_options: IgnoreOptions,
) -> Option<Box<dyn Suggester>> {
    let grammar = Version::inflection_grammar_of(version)?;
    log::debug!("using the {grammar:?} inflection suggester for version '{version}'");
    let suggester: Box<dyn Suggester> = match grammar {
        Grammar::Stable => Box::new(stable::InflectionSuggester::new(text, ignore_options)),
        Grammar::Shal => Box::new(shal::InflectionSuggester::new(text, ignore_options)),
    };
    Some(suggester)
}

/// A row of an affix table: a facet type, its display names and the affix marking it.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Facet {
    pub type_: &'static str,
    pub names: Names,
    pub affix: &'static str,
}

impl Facet {
    pub const fn new(type_: &'static str, ja: &'static str, en: &'static str, affix: &'static str) -> Self {
        Self {
            type_,
            names: Names { ja, en },
            affix,
        }
    }
}

pub(crate) fn facet_name<'a>(
    facets: impl IntoIterator<Item = &'a Facet>,
    type_: &str,
    language: &str,
) -> Option<&'static str> {
    facets
        .into_iter()
        .find(|facet| facet.type_ == type_)
        .and_then(|facet| facet.names.get(language))
}

/// A possible decomposition of the search text into an affix pattern and a base name.
#[derive(Debug, Clone)]
pub(crate) struct Candidate<K> {
    pub kind: K,
    /// The Japanese abbreviation a word's sort has to start with.
    pub sort: &'static str,
    pub descriptions: Vec<SuggestionDescription>,
    pub name: String,
}

/// The text with `prefix` and `suffix` removed, if it has both.
pub(crate) fn strip_affixes(text: &str, prefix: &str, suffix: &str) -> Option<String> {
    if !text.starts_with(prefix) || !text.ends_with(suffix) {
        return None;
    }
    let rest = &text[prefix.len()..];
    let rest = rest.strip_suffix(suffix).unwrap_or(rest);
    Some(rest.to_string())
}

/// Emits a suggestion for every candidate whose base name is the word's name and whose sort
/// the word has.
pub(crate) fn suggest_candidates<K: Copy>(
    candidates: &[Candidate<K>],
    word: &Word,
    ignore_options: IgnoreOptions,
    wrap: fn(K) -> SuggestionKind,
) -> Vec<Suggestion> {
    if candidates.is_empty() {
        return Vec::new();
    }
    let name = normalize(word.name(), ignore_options);
    let parser = Parser::keep();
    let sort = parser.lookup_sort(word, "ja").flatten();
    candidates
        .iter()
        .filter(|candidate| candidate.name == name)
        .filter(|candidate| sort.map_or(false, |sort| sort.starts_with(candidate.sort)))
        .map(|candidate| {
            Suggestion::new(
                wrap(candidate.kind),
                candidate.descriptions.clone(),
                vec![word.name().to_string()],
            )
        })
        .collect()
}
