//! Structured views of a word's contents, as produced by the block [`Parser`](crate::Parser).
//!
//! Everything here is derived from [`Word`](crate::Word) contents on demand and never stored.
//! `S` is the output type of the markup resolver the parser was built with.

use crate::HashMap;

/// A word with every language of its contents parsed.
#[derive(Debug, Clone)]
pub struct ParsedWord<S> {
    pub name: String,
    pub unique_name: String,
    pub date: u32,
    /// The IPA transcription of `name`, when the dictionary's version has a pronouncer.
    pub pronunciation: Option<String>,
    pub(crate) parts: HashMap<String, Part<S>>,
}

impl<S> ParsedWord<S> {
    pub fn part(&self, language: &str) -> Option<&Part<S>> {
        self.parts.get(language)
    }

    pub fn parts(&self) -> impl Iterator<Item = (&str, &Part<S>)> {
        self.parts
            .iter()
            .map(|(language, part)| (language.as_str(), part))
    }
}

/// The contents of a word in one language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Part<S> {
    pub sections: Vec<Section<S>>,
}

impl<S> Part<S> {
    /// The sort of the first section.
    pub fn sort(&self) -> Option<&str> {
        self.sections.first().and_then(|section| section.sort.as_deref())
    }
}

/// A run of fields under one `+ <sort>` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section<S> {
    pub sort: Option<String>,
    pub equivalents: Vec<Equivalent<S>>,
    pub informations: Vec<Information<S>>,
    pub relations: Vec<Relation<S>>,
}

impl<S> Section<S> {
    pub fn equivalents(&self, only_visible: bool) -> impl Iterator<Item = &Equivalent<S>> {
        self.equivalents
            .iter()
            .filter(move |equivalent| !only_visible || !equivalent.hidden)
    }

    pub fn informations(&self, only_visible: bool) -> impl Iterator<Item = &Information<S>> {
        self.informations
            .iter()
            .filter(move |information| !only_visible || !information.hidden())
    }

    /// Informations which are neither phrases nor examples.
    pub fn normal_informations(&self, only_visible: bool) -> impl Iterator<Item = &Information<S>> {
        self.informations(only_visible)
            .filter(|information| matches!(information, Information::Normal { .. }))
    }

    pub fn phrase_informations(&self, only_visible: bool) -> impl Iterator<Item = &Information<S>> {
        self.informations(only_visible)
            .filter(|information| matches!(information, Information::Phrase { .. }))
    }

    pub fn example_informations(&self, only_visible: bool) -> impl Iterator<Item = &Information<S>> {
        self.informations(only_visible)
            .filter(|information| matches!(information, Information::Example { .. }))
    }

    /// Equivalents, then informations, then relations. Relations are never hidden.
    pub fn fields(&self, only_visible: bool) -> Vec<Field<'_, S>> {
        let equivalents = self.equivalents(only_visible).map(Field::Equivalent);
        let informations = self.informations(only_visible).map(Field::Information);
        let relations = self.relations.iter().map(Field::Relation);
        equivalents.chain(informations).chain(relations).collect()
    }
}

/// A borrowed field of a [`Section`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field<'a, S> {
    Equivalent(&'a Equivalent<S>),
    Information(&'a Information<S>),
    Relation(&'a Relation<S>),
}

/// A `=` line: translations of the word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Equivalent<S> {
    /// The grammatical category in `<...>`, kept raw.
    pub category: Option<String>,
    /// The usage frame in `(...)`.
    pub frame: Option<S>,
    pub names: Vec<S>,
    /// Set by `=?`.
    pub hidden: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InformationKind {
    Meaning,
    Etymology,
    Usage,
    Task,
    Note,
    History,
    Phrase,
    Example,
}

impl InformationKind {
    pub const ALL: [Self; 8] = [
        Self::Meaning,
        Self::Etymology,
        Self::Usage,
        Self::Task,
        Self::Note,
        Self::History,
        Self::Phrase,
        Self::Example,
    ];

    pub fn from_tag(tag: char) -> Option<Self> {
        let kind = match tag {
            'M' => Self::Meaning,
            'E' => Self::Etymology,
            'U' => Self::Usage,
            'O' => Self::Task,
            'N' => Self::Note,
            'H' => Self::History,
            'P' => Self::Phrase,
            'S' => Self::Example,
            _ => return None,
        };
        Some(kind)
    }

    pub fn tag(self) -> char {
        match self {
            Self::Meaning => 'M',
            Self::Etymology => 'E',
            Self::Usage => 'U',
            Self::Task => 'O',
            Self::Note => 'N',
            Self::History => 'H',
            Self::Phrase => 'P',
            Self::Example => 'S',
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Meaning => "meaning",
            Self::Etymology => "etymology",
            Self::Usage => "usage",
            Self::Task => "task",
            Self::Note => "note",
            Self::History => "history",
            Self::Phrase => "phrase",
            Self::Example => "example",
        }
    }
}

/// A tagged `X:` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Information<S> {
    /// Meaning, etymology, usage, task, note or history.
    Normal {
        kind: InformationKind,
        text: S,
        date: Option<u32>,
        hidden: bool,
    },
    /// `P: expression → name, name | text`
    Phrase {
        expression: S,
        equivalent_names: Vec<S>,
        text: Option<S>,
        date: Option<u32>,
        hidden: bool,
    },
    /// `S: sentence → translation`
    Example {
        sentence: S,
        translation: S,
        date: Option<u32>,
        hidden: bool,
    },
}

impl<S> Information<S> {
    pub fn kind(&self) -> InformationKind {
        match self {
            Self::Normal { kind, .. } => *kind,
            Self::Phrase { .. } => InformationKind::Phrase,
            Self::Example { .. } => InformationKind::Example,
        }
    }

    pub fn date(&self) -> Option<u32> {
        match self {
            Self::Normal { date, .. } | Self::Phrase { date, .. } | Self::Example { date, .. } => {
                *date
            }
        }
    }

    pub fn hidden(&self) -> bool {
        match self {
            Self::Normal { hidden, .. }
            | Self::Phrase { hidden, .. }
            | Self::Example { hidden, .. } => *hidden,
        }
    }
}

/// A `-` line: cross references to other words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relation<S> {
    pub title: Option<String>,
    pub entries: Vec<RelationEntry<S>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationEntry<S> {
    pub name: S,
    /// The entry was written with a trailing `*`: see that word's own relations.
    pub refer: bool,
}
