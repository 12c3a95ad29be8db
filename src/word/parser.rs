//! The block parser: turns a word's raw contents into [`Part`]s and [`Section`]s.
//!
//! Contents are line oriented. Each field occupies exactly one line:
//!
//! ```text
//! + <sort>                          starts a new section
//! =? <category> (frame) name, name  an equivalent; `?` hides it
//! M?: @date text                    an information; the letter picks the kind
//! P: expression → name, name | text a phrase
//! S: sentence → translation         an example
//! - <title> name, name*             a relation; `*` marks a referral
//! ```
//!
//! Lines matching none of these are ignored. Fields before the first `+` line belong to no
//! section and are dropped.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::{
    create_pronouncer,
    entry::{
        Equivalent, Information, InformationKind, ParsedWord, Part, Relation, RelationEntry,
        Section,
    },
    markup::{KeepResolver, MarkupParser, Resolver, SimpleResolver},
    HashMap, PronouncerOptions, Word,
};

static LINE_BREAK_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\r\n|\r|\n").unwrap());
static NAME_SEPARATOR_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*,\s*").unwrap());

static SORT_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+\s*(?:<(.*?)>)").unwrap());
static SORT_LOOKUP_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\+\s*(?:<(.*?)>)").unwrap());
static EQUIVALENT_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^=(\?)?\s*(?:<(.*?)>\s*)?(?:\((.*?)\)\s*)?(.*)$").unwrap()
});
static INFORMATION_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9A-Za-z_])(\?)?:\s*(?:@([0-9]+)\s*)?(.*)$").unwrap()
});
static PHRASE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.*?)\s*→\s*(.*?)(?:\s*\|\s*(.*))?$").unwrap());
static PHRASE_LOOKUP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^P(\?)?:\s*(?:@[0-9]+\s*)?(.*?)\s*→\s*(.*?)(?:\s*\|\s*(.*))?$").unwrap()
});
static EXAMPLE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(.*?)\s*→\s*(.*?)$").unwrap());
static RELATION_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\-\s*(?:<(.*?)>\s*)?(.*)$").unwrap());

pub(crate) fn split_lines(text: &str) -> regex::Split<'static, '_> {
    LINE_BREAK_REGEX.split(text)
}

/// Parses word contents, resolving every markup span with `R`.
///
/// Parsing a whole word is comparatively expensive. The `lookup_*` methods scan only for
/// what they need.
#[derive(Debug, Clone, Default)]
pub struct Parser<R> {
    markup: MarkupParser<R>,
}

impl Parser<SimpleResolver> {
    pub fn simple() -> Self {
        Self::new(SimpleResolver::default())
    }
}

impl Parser<KeepResolver> {
    pub fn keep() -> Self {
        Self::new(KeepResolver)
    }
}

impl<R: Resolver> Parser<R> {
    pub fn new(resolver: R) -> Self {
        Self {
            markup: MarkupParser::new(resolver),
        }
    }

    /// Parses every language of `word`. `version` is the dictionary version, which decides
    /// the pronouncer used for [`ParsedWord::pronunciation`].
    pub fn parse(&self, word: &Word, version: &str) -> ParsedWord<R::Output> {
        let pronunciation = create_pronouncer(version, PronouncerOptions::default())
            .map(|pronouncer| pronouncer.convert(word.name()));
        let mut parts = HashMap::default();
        for (language, content) in word.contents().iter() {
            parts.insert(language.to_string(), self.parse_part(content));
        }
        ParsedWord {
            name: word.name().to_string(),
            unique_name: word.unique_name().to_string(),
            date: word.date(),
            pronunciation,
            parts,
        }
    }

    pub fn parse_part(&self, content: &str) -> Part<R::Output> {
        let mut sections = Vec::new();
        let mut current: Option<Section<R::Output>> = None;
        for line in split_lines(content) {
            if let Some(captures) = SORT_REGEX.captures(line) {
                sections.extend(current.take());
                let sort = captures
                    .get(1)
                    .map(|sort| sort.as_str())
                    .filter(|sort| !sort.is_empty())
                    .map(str::to_string);
                current = Some(Section {
                    sort,
                    equivalents: Vec::new(),
                    informations: Vec::new(),
                    relations: Vec::new(),
                });
            }
            // Fields before the first sort header are parsed but have nowhere to go.
            let field = self.parse_field(line);
            if let (Some(section), Some(field)) = (current.as_mut(), field) {
                match field {
                    ParsedField::Equivalent(equivalent) => section.equivalents.push(equivalent),
                    ParsedField::Information(information) => {
                        section.informations.push(information)
                    }
                    ParsedField::Relation(relation) => section.relations.push(relation),
                }
            }
        }
        sections.extend(current);
        Part { sections }
    }

    fn parse_field(&self, line: &str) -> Option<ParsedField<R::Output>> {
        if line.starts_with('=') {
            self.parse_equivalent(line).map(ParsedField::Equivalent)
        } else if INFORMATION_REGEX.is_match(line) {
            self.parse_information(line).map(ParsedField::Information)
        } else if line.starts_with('-') {
            self.parse_relation(line).map(ParsedField::Relation)
        } else {
            None
        }
    }

    fn parse_equivalent(&self, line: &str) -> Option<Equivalent<R::Output>> {
        let captures = EQUIVALENT_REGEX.captures(line)?;
        let hidden = captures.get(1).is_some();
        let category = non_empty(captures.get(2)).map(str::to_string);
        let frame = non_empty(captures.get(3)).map(|frame| self.markup.parse(frame));
        let names = self.parse_names(captures.get(4).map_or("", |names| names.as_str()));
        Some(Equivalent {
            category,
            frame,
            names,
            hidden,
        })
    }

    fn parse_information(&self, line: &str) -> Option<Information<R::Output>> {
        let captures = INFORMATION_REGEX.captures(line)?;
        let tag = captures.get(1)?.as_str().chars().next()?;
        let kind = InformationKind::from_tag(tag)?;
        let hidden = captures.get(2).is_some();
        let date = captures.get(3).and_then(|date| date.as_str().parse().ok());
        let text = captures.get(4).map_or("", |text| text.as_str());
        let information = match kind {
            InformationKind::Phrase => {
                let captures = PHRASE_REGEX.captures(text)?;
                Information::Phrase {
                    expression: self.markup.parse(&captures[1]),
                    equivalent_names: self.parse_names(&captures[2]),
                    text: non_empty(captures.get(3)).map(|text| self.markup.parse(text)),
                    date,
                    hidden,
                }
            }
            InformationKind::Example => {
                let captures = EXAMPLE_REGEX.captures(text)?;
                Information::Example {
                    sentence: self.markup.parse(&captures[1]),
                    translation: self.markup.parse(&captures[2]),
                    date,
                    hidden,
                }
            }
            _ => Information::Normal {
                kind,
                text: self.markup.parse(text),
                date,
                hidden,
            },
        };
        Some(information)
    }

    fn parse_relation(&self, line: &str) -> Option<Relation<R::Output>> {
        let captures = RELATION_REGEX.captures(line)?;
        let title = non_empty(captures.get(1)).map(str::to_string);
        let entries = NAME_SEPARATOR_REGEX
            .split(captures.get(2).map_or("", |entries| entries.as_str()))
            .map(|raw_name| match raw_name.strip_suffix('*') {
                Some(name) => RelationEntry {
                    name: self.markup.parse(name),
                    refer: true,
                },
                None => RelationEntry {
                    name: self.markup.parse(raw_name),
                    refer: false,
                },
            })
            .collect();
        Some(Relation { title, entries })
    }

    fn parse_names(&self, names: &str) -> Vec<R::Output> {
        NAME_SEPARATOR_REGEX
            .split(names)
            .map(|name| self.markup.parse(name))
            .collect()
    }

    /// Finds the sort of the first section of `word` in `language` without parsing the rest.
    ///
    /// Returns `None` if the word has no content in `language` and `Some(None)` if the
    /// content has no sort header.
    pub fn lookup_sort<'w>(&self, word: &'w Word, language: &str) -> Option<Option<&'w str>> {
        let content = word.contents().get(language)?;
        let sort = SORT_LOOKUP_REGEX
            .captures(content)
            .map(|captures| captures.get(1).map_or("", |sort| sort.as_str()));
        Some(sort)
    }

    /// Collects the names of every equivalent of `word` in `language`, across sections.
    pub fn lookup_equivalent_names(
        &self,
        word: &Word,
        language: &str,
        only_visible: bool,
    ) -> Option<Vec<R::Output>> {
        let content = word.contents().get(language)?;
        let mut names = Vec::new();
        for line in split_lines(content) {
            if let Some(captures) = EQUIVALENT_REGEX.captures(line) {
                if !only_visible || captures.get(1).is_none() {
                    names.extend(self.parse_names(&captures[4]));
                }
            }
        }
        Some(names)
    }

    /// Collects the equivalent names of every phrase of `word` in `language`.
    pub fn lookup_phrase_equivalent_names(
        &self,
        word: &Word,
        language: &str,
        only_visible: bool,
    ) -> Option<Vec<R::Output>> {
        let content = word.contents().get(language)?;
        let mut names = Vec::new();
        for line in split_lines(content) {
            if let Some(captures) = PHRASE_LOOKUP_REGEX.captures(line) {
                if !only_visible || captures.get(1).is_none() {
                    names.extend(self.parse_names(&captures[3]));
                }
            }
        }
        Some(names)
    }
}

enum ParsedField<S> {
    Equivalent(Equivalent<S>),
    Information(Information<S>),
    Relation(Relation<S>),
}

fn non_empty(capture: Option<regex::Match<'_>>) -> Option<&str> {
    capture
        .map(|capture| capture.as_str())
        .filter(|text| !text.is_empty())
}
