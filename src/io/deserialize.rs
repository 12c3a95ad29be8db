//! Reading words, settings and markers from their text form.
//!
//! Line numbers in the returned errors are 1-based and count from the start of the text
//! handed in.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::{
    settings::Revision, word::parser::split_lines, Contents, DictionarySettings, Marker, Markers,
    ParseError, ParseErrorKind, Revisions, Word,
};

type Result<T> = core::result::Result<T, ParseError>;

static WORD_HEADER_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\*\s*@(\d+)\s*(.+)").unwrap());
static LANGUAGE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^!(\w{2})").unwrap());
static SECTION_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^!(\w+)").unwrap());
static VALUE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-\s*(.*)$").unwrap());
static REVISION_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^-\s*(?:@(\d+)\s*)?\{(.*?)\}\s*→\s*\{(.*?)\}\s*$").unwrap()
});
static MARKER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-\s*(?:\{(.*?)\}|(.*?))\s*:\s*(.*?)\s*$").unwrap());
static MARKER_SEPARATOR_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*,\s*").unwrap());

/// Whether `line` starts a word block in a single-file dictionary.
pub(crate) fn is_word_header(line: &str) -> bool {
    WORD_HEADER_REGEX.is_match(line)
}

/// Whether `line` starts the `**` block in a single-file dictionary.
pub(crate) fn is_others_header(line: &str) -> bool {
    line.starts_with("**")
}

/// Reads a word block: a `* @<date> <unique name>` header followed by `!XX` language
/// sections. Contents are trimmed and text before the first section is dropped.
pub fn deserialize_word(text: &str) -> Result<Word> {
    let mut lines = numbered_lines(text).skip_while(|(_, line)| line.trim().is_empty());
    let (number, header) = lines
        .next()
        .ok_or_else(|| ParseError::new(ParseErrorKind::NoHeader, None))?;
    let captures = WORD_HEADER_REGEX
        .captures(header.trim_start())
        .ok_or_else(|| ParseError::new(ParseErrorKind::NoHeader, Some(number)))?;
    let date = parse_date(&captures[1], number)?;
    let unique_name = captures[2].trim_end().to_string();

    let mut contents = Contents::new();
    let mut current: Option<(String, String)> = None;
    for (_, line) in lines {
        if let Some(captures) = LANGUAGE_REGEX.captures(line) {
            if let Some((language, content)) = current.take() {
                contents.insert(language, content.trim());
            }
            current = Some((captures[1].to_lowercase(), String::new()));
        } else if let Some((_, content)) = &mut current {
            content.push_str(line);
            content.push('\n');
        }
    }
    if let Some((language, content)) = current {
        contents.insert(language, content.trim());
    }
    Ok(Word::new(unique_name, date, contents))
}

/// Reads the `**` block of a single-file dictionary, which holds both the settings and the
/// markers.
///
/// A block without any of `!VERSION`, `!ALPHABET` and `!REVISION` yields the default
/// settings. A block with only some of them is an error.
pub fn deserialize_others(text: &str) -> Result<(DictionarySettings, Markers)> {
    let lines: Vec<_> = numbered_lines(text).collect();
    let rest = skip_header(&lines, "**")?;
    let mut settings = PartialSettings::default();
    let mut markers = Markers::new();
    for block in blocks(rest) {
        if block.header == "MARKER" {
            markers = marker_lines(&block.lines)?;
        } else {
            settings.apply(&block)?;
        }
    }
    let settings = if settings.is_empty() {
        DictionarySettings::default()
    } else {
        settings.finish()?
    };
    Ok((settings, markers))
}

/// Reads a standalone settings file, which has to contain all of `!VERSION`, `!ALPHABET` and
/// `!REVISION`.
pub fn deserialize_settings(text: &str) -> Result<DictionarySettings> {
    let lines: Vec<_> = numbered_lines(text)
        .skip_while(|(_, line)| line.trim().is_empty())
        .collect();
    match lines.first() {
        Some((_, line)) if is_others_header(line.trim_start()) => {}
        Some((number, _)) => {
            return Err(ParseError::new(ParseErrorKind::NoDictionarySettingsHeader, Some(*number)))
        }
        None => return Err(ParseError::new(ParseErrorKind::NoDictionarySettingsHeader, None)),
    }
    let mut settings = PartialSettings::default();
    for block in blocks(&lines[1..]) {
        settings.apply(&block)?;
    }
    settings.finish()
}

/// Reads a standalone markers file: a `**` header, a `!MARKER` header and one
/// `- <name>: <marker>, <marker>` line per word.
pub fn deserialize_markers(text: &str) -> Result<Markers> {
    let lines: Vec<_> = numbered_lines(text).collect();
    let rest = skip_header(&lines, "**")?;
    let rest = skip_header(rest, "!MARKER")?;
    marker_lines(rest)
}

/// Reads `- [@<date> ]{<before>} → {<after>}` lines. Blank lines are skipped.
pub fn deserialize_revisions(text: &str) -> Result<Revisions> {
    let lines: Vec<_> = numbered_lines(text).collect();
    revision_lines(&lines)
}

fn numbered_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    split_lines(text).enumerate().map(|(index, line)| (index + 1, line))
}

fn parse_date(date: &str, line_number: usize) -> Result<u32> {
    date.parse()
        .map_err(|_| ParseError::new(ParseErrorKind::InvalidDate(date.to_string()), Some(line_number)))
}

/// Returns the lines after `header`, which has to be the first non-blank line.
fn skip_header<'l, 'a>(lines: &'l [(usize, &'a str)], header: &str) -> Result<&'l [(usize, &'a str)]> {
    for (index, &(number, line)) in lines.iter().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == header {
            return Ok(&lines[index + 1..]);
        }
        return Err(ParseError::new(
            ParseErrorKind::InvalidHeader(line.to_string()),
            Some(number),
        ));
    }
    Err(ParseError::new(ParseErrorKind::NoHeader, None))
}

/// A `!XXX` section and the lines under it.
struct Block<'a> {
    header: &'a str,
    lines: Vec<(usize, &'a str)>,
}

/// Splits lines into sections. Lines before the first section header are dropped.
fn blocks<'a>(lines: &[(usize, &'a str)]) -> Vec<Block<'a>> {
    let mut blocks: Vec<Block<'a>> = Vec::new();
    for &(number, line) in lines {
        match SECTION_REGEX.captures(line).and_then(|captures| captures.get(1)) {
            Some(header) => blocks.push(Block {
                header: header.as_str(),
                lines: Vec::new(),
            }),
            None => {
                if let Some(block) = blocks.last_mut() {
                    block.lines.push((number, line));
                }
            }
        }
    }
    blocks
}

#[derive(Default)]
struct PartialSettings {
    version: Option<String>,
    alphabet_rule: Option<String>,
    revisions: Option<Revisions>,
}

impl PartialSettings {
    /// Takes in a settings section. Other sections are ignored.
    fn apply(&mut self, block: &Block<'_>) -> Result<()> {
        match block.header {
            "VERSION" => {
                if let Some(value) = first_value(&block.lines) {
                    self.version = Some(value);
                }
            }
            "ALPHABET" => {
                if let Some(value) = first_value(&block.lines) {
                    self.alphabet_rule = Some(value);
                }
            }
            "REVISION" => self.revisions = Some(revision_lines(&block.lines)?),
            _ => {}
        }
        Ok(())
    }

    fn is_empty(&self) -> bool {
        self.version.is_none() && self.alphabet_rule.is_none() && self.revisions.is_none()
    }

    fn finish(self) -> Result<DictionarySettings> {
        match (self.version, self.alphabet_rule, self.revisions) {
            (Some(version), Some(alphabet_rule), Some(revisions)) => Ok(DictionarySettings {
                version,
                alphabet_rule,
                revisions,
            }),
            _ => Err(ParseError::new(ParseErrorKind::InsufficientDictionarySettings, None)),
        }
    }
}

fn first_value(lines: &[(usize, &str)]) -> Option<String> {
    lines
        .iter()
        .find_map(|(_, line)| VALUE_REGEX.captures(line))
        .map(|captures| captures[1].to_string())
}

fn revision_lines(lines: &[(usize, &str)]) -> Result<Revisions> {
    let mut revisions = Revisions::default();
    for &(number, line) in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let captures = REVISION_REGEX.captures(line).ok_or_else(|| {
            ParseError::new(ParseErrorKind::InvalidRevisionLine(line.to_string()), Some(number))
        })?;
        let date = match captures.get(1) {
            Some(date) => Some(parse_date(date.as_str(), number)?),
            None => None,
        };
        revisions.push(Revision {
            date,
            before_name: captures[2].to_string(),
            after_name: captures[3].to_string(),
        });
    }
    Ok(revisions)
}

fn marker_lines(lines: &[(usize, &str)]) -> Result<Markers> {
    let mut markers = Markers::new();
    for &(number, line) in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let captures = MARKER_REGEX.captures(line).ok_or_else(|| {
            ParseError::new(ParseErrorKind::InvalidMarkerLine(line.to_string()), Some(number))
        })?;
        let name = captures
            .get(1)
            .or_else(|| captures.get(2))
            .map_or("", |name| name.as_str());
        let list = MARKER_SEPARATOR_REGEX
            .split(&captures[3])
            .filter(|value| !value.is_empty())
            .map(|value| {
                Marker::from_name(value).ok_or_else(|| {
                    ParseError::new(ParseErrorKind::NoSuchMarker(value.to_string()), Some(number))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        markers.set(name, list);
    }
    Ok(markers)
}
