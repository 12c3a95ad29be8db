use core::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

static VERSION_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\w+)(?:\.(\w+))?$").unwrap());

/// A dictionary version such as `S`, `6` or `7.2`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Version {
    pub generation: String,
    pub subgeneration: Option<String>,
}

/// The grammars the engine knows how to inflect and pronounce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grammar {
    Stable,
    Shal,
}

impl Version {
    pub fn parse(version: &str) -> Option<Self> {
        let captures = VERSION_REGEX.captures(version)?;
        Some(Self {
            generation: captures[1].to_string(),
            subgeneration: captures.get(2).map(|sub| sub.as_str().to_string()),
        })
    }

    /// The grammar headwords of this version are pronounced in. `None` for versions the
    /// engine predates or does not know.
    pub fn grammar(&self) -> Option<Grammar> {
        let subgeneration = match &self.subgeneration {
            Some(sub) => sub.parse::<u32>().ok(),
            None => Some(0),
        };
        match (self.generation.as_str(), subgeneration) {
            ("6" | "S", _) => Some(Grammar::Stable),
            ("7", Some(0 | 1)) => Some(Grammar::Stable),
            ("7", Some(_)) => Some(Grammar::Shal),
            _ => None,
        }
    }

    /// The grammar words of this version inflect in. Every numbered `7` version already
    /// inflects like shal, and numbered versions need a numeric subgeneration.
    pub fn inflection_grammar(&self) -> Option<Grammar> {
        let numeric = self
            .subgeneration
            .as_deref()
            .map_or(true, |sub| !sub.is_empty() && sub.bytes().all(|byte| byte.is_ascii_digit()));
        match (self.generation.as_str(), &self.subgeneration) {
            ("S", None) => Some(Grammar::Stable),
            ("6", _) if numeric => Some(Grammar::Stable),
            ("7", _) if numeric => Some(Grammar::Shal),
            _ => None,
        }
    }

    /// Parses `version` and finds its pronunciation grammar in one step.
    pub(crate) fn grammar_of(version: &str) -> Option<Grammar> {
        let grammar = Self::parse(version).and_then(|version| version.grammar());
        if grammar.is_none() {
            log::debug!("no pronunciation grammar for dictionary version '{version}'");
        }
        grammar
    }

    /// Parses `version` and finds its inflection grammar in one step.
    pub(crate) fn inflection_grammar_of(version: &str) -> Option<Grammar> {
        let grammar = Self::parse(version).and_then(|version| version.inflection_grammar());
        if grammar.is_none() {
            log::debug!("no inflection grammar for dictionary version '{version}'");
        }
        grammar
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.generation)?;
        if let Some(sub) = &self.subgeneration {
            write!(f, ".{sub}")?;
        }
        Ok(())
    }
}
