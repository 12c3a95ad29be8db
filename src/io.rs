//! Loading and saving dictionaries.
//!
//! A dictionary is stored either as a single `.xdn` file, or as a directory with one `.xdnw`
//! file per word plus `#SETTINGS.xdns` and `#MARKERS.xdns`. Both formats share the text
//! forms in [`serialize`] and [`deserialize`].

pub mod deserialize;
pub mod serialize;

use std::{
    fs,
    path::{Path, PathBuf},
};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::{
    word::parser::split_lines, Dictionary, DictionarySettings, Error, Markers, ParseError, Word,
};

pub use deserialize::{
    deserialize_markers, deserialize_others, deserialize_revisions, deserialize_settings,
    deserialize_word,
};
pub use serialize::{serialize_markers, serialize_revisions, serialize_settings, serialize_word};

static FILE_NAME_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\+)?(.+?)(\+)?(~*)$").unwrap());

const WORD_EXTENSION: &str = "xdnw";
const OTHERS_EXTENSION: &str = "xdns";
const SINGLE_EXTENSION: &str = "xdn";

/// Names the files of a directory dictionary.
#[derive(Debug, Clone)]
pub struct FileNameResolver {
    word_base_name: fn(&str) -> String,
    pub settings_base_name: String,
    pub markers_base_name: String,
}

impl FileNameResolver {
    pub fn new(
        word_base_name: fn(&str) -> String,
        settings_base_name: impl Into<String>,
        markers_base_name: impl Into<String>,
    ) -> Self {
        Self {
            word_base_name,
            settings_base_name: settings_base_name.into(),
            markers_base_name: markers_base_name.into(),
        }
    }

    pub fn word_base_name(&self, unique_name: &str) -> String {
        (self.word_base_name)(unique_name)
    }

    fn word_file_name(&self, unique_name: &str) -> String {
        format!("{}.{WORD_EXTENSION}", self.word_base_name(unique_name))
    }

    fn settings_file_name(&self) -> String {
        format!("{}.{OTHERS_EXTENSION}", self.settings_base_name)
    }

    fn markers_file_name(&self) -> String {
        format!("{}.{OTHERS_EXTENSION}", self.markers_base_name)
    }
}

impl Default for FileNameResolver {
    fn default() -> Self {
        Self::new(default_word_base_name, "#SETTINGS", "#MARKERS")
    }
}

/// Drops the `+` and `~` modifiers of a unique name, which many file systems handle badly,
/// and appends them as a suffix instead.
///
/// A leading `+` becomes `S`, a trailing `+` becomes `P` and `n` tildes become `n + 1`. The
/// suffix is separated by `_`:
///
/// ```
/// use xdn::io::default_word_base_name;
///
/// assert_eq!(default_word_base_name("sakil"), "sakil");
/// assert_eq!(default_word_base_name("+sakil+~"), "sakil_SP2");
/// ```
pub fn default_word_base_name(unique_name: &str) -> String {
    let unique_name = unique_name.replace('\u{2019}', "'");
    let Some(captures) = FILE_NAME_REGEX.captures(&unique_name) else {
        return unique_name;
    };
    let mut modifier = String::new();
    if captures.get(1).is_some() {
        modifier.push('S');
    }
    if captures.get(3).is_some() {
        modifier.push('P');
    }
    let tildes = captures.get(4).map_or(0, |tildes| tildes.as_str().len());
    if tildes > 0 {
        modifier.push_str(&(tildes + 1).to_string());
    }
    if modifier.is_empty() {
        captures[2].to_string()
    } else {
        format!("{}_{modifier}", &captures[2])
    }
}

/// Loads a directory dictionary if `path` is a directory, and a single-file dictionary
/// otherwise.
pub fn load(path: impl AsRef<Path>) -> Result<Dictionary, Error> {
    let path = path.as_ref();
    if path.is_dir() {
        load_directory(path)
    } else {
        load_single(path)
    }
}

/// Saves a single-file dictionary if `path` has the `.xdn` extension, and a directory
/// dictionary otherwise.
pub fn save(dictionary: &Dictionary, path: impl AsRef<Path>) -> Result<(), Error> {
    let path = path.as_ref();
    if path.extension().map_or(false, |extension| extension == SINGLE_EXTENSION) {
        save_single(dictionary, path)
    } else {
        save_directory(dictionary, path, &FileNameResolver::default())
    }
}

pub fn load_single(path: impl AsRef<Path>) -> Result<Dictionary, Error> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let dictionary = parse_single(&text, Some(path.to_path_buf()))?;
    log::trace!("loaded {} words from {}", dictionary.len(), path.display());
    Ok(dictionary)
}

/// Parses the contents of a single-file dictionary.
///
/// The file is a run of word blocks, each starting with a `* @<date> <name>` line, and a
/// `**` block with the settings and markers. Lines before the first block are ignored.
pub fn parse_single(text: &str, path: Option<PathBuf>) -> Result<Dictionary, ParseError> {
    let lines: Vec<&str> = split_lines(text).collect();
    let mut words = Vec::new();
    let mut settings = DictionarySettings::default();
    let mut markers = Markers::new();

    let starts: Vec<usize> = lines
        .iter()
        .enumerate()
        .filter(|(_, line)| deserialize::is_word_header(line) || deserialize::is_others_header(line))
        .map(|(index, _)| index)
        .collect();
    for (position, &start) in starts.iter().enumerate() {
        let end = starts.get(position + 1).copied().unwrap_or(lines.len());
        let chunk = lines[start..end].join("\n");
        if deserialize::is_others_header(lines[start]) {
            (settings, markers) =
                deserialize_others(&chunk).map_err(|err| err.offset(start))?;
        } else {
            words.push(deserialize_word(&chunk).map_err(|err| err.offset(start))?);
        }
    }
    Ok(Dictionary::new(words, settings, markers, path))
}

/// Writes every word followed by a blank line, then one `**` block holding the settings and
/// the markers.
pub fn write_single(dictionary: &Dictionary) -> String {
    let mut string = String::new();
    for word in dictionary.words() {
        string.push_str(&serialize_word(word));
        string.push('\n');
    }
    string.push_str("**\n\n");
    string.push_str(&serialize_settings(dictionary.settings(), false));
    string.push('\n');
    string.push_str(&serialize_markers(dictionary.markers(), false));
    string
}

pub fn save_single(dictionary: &Dictionary, path: impl AsRef<Path>) -> Result<(), Error> {
    let path = path.as_ref();
    fs::write(path, write_single(dictionary))?;
    log::trace!("saved {} words to {}", dictionary.len(), path.display());
    Ok(())
}

/// Loads a directory dictionary.
///
/// Every `.xdnw` file is a word. An `.xdns` file with a `!VERSION` section holds the settings
/// and one with a `!MARKER` section holds the markers. Files which are not UTF-8 are skipped
/// with a warning.
pub fn load_directory(path: impl AsRef<Path>) -> Result<Dictionary, Error> {
    let path = path.as_ref();
    let mut entries: Vec<PathBuf> = fs::read_dir(path)?
        .map(|entry| entry.map(|entry| entry.path()))
        .collect::<Result<_, _>>()?;
    entries.sort();

    let mut words = Vec::new();
    let mut settings = None;
    let mut markers = None;
    for entry in entries {
        let is_word = has_extension(&entry, WORD_EXTENSION);
        if !is_word && !has_extension(&entry, OTHERS_EXTENSION) {
            continue;
        }
        let Some(text) = read_utf8(&entry)? else {
            continue;
        };
        if is_word {
            words.push(deserialize_word(&text)?);
            log::trace!("loaded word file {}", entry.display());
            continue;
        }
        let has_line = |prefix: &str| split_lines(&text).any(|line| line.starts_with(prefix));
        if !has_line("**") {
            log::trace!("skipping {} without a '**' header", entry.display());
        } else if has_line("!VERSION") {
            settings = Some(deserialize_settings(&text)?);
            log::trace!("loaded settings file {}", entry.display());
        } else if has_line("!MARKER") {
            markers = Some(deserialize_markers(&text)?);
            log::trace!("loaded markers file {}", entry.display());
        }
    }
    Ok(Dictionary::new(
        words,
        settings.unwrap_or_default(),
        markers.unwrap_or_default(),
        Some(path.to_path_buf()),
    ))
}

/// Saves a directory dictionary, replacing every `.xdnw` and `.xdns` file already in the
/// directory.
pub fn save_directory(
    dictionary: &Dictionary,
    path: impl AsRef<Path>,
    resolver: &FileNameResolver,
) -> Result<(), Error> {
    let path = path.as_ref();
    fs::create_dir_all(path)?;
    for entry in fs::read_dir(path)? {
        let entry = entry?.path();
        if has_extension(&entry, WORD_EXTENSION) || has_extension(&entry, OTHERS_EXTENSION) {
            fs::remove_file(&entry)?;
        }
    }
    for word in dictionary.words() {
        write_word(path, word, resolver)?;
    }
    write_others(dictionary, path, resolver)?;
    log::trace!("saved {} words to {}", dictionary.len(), path.display());
    Ok(())
}

/// Saves only what changed since the last save into the directory the dictionary lives in,
/// then clears the record of changes.
///
/// `path` has to be the dictionary's own [`path`](Dictionary::path), otherwise nothing is
/// written and [`Error::ForeignLocation`] is returned. Files of deleted words are removed
/// before changed words are written. The settings and markers are always rewritten.
pub fn save_directory_diff(
    dictionary: &mut Dictionary,
    path: impl AsRef<Path>,
    resolver: &FileNameResolver,
) -> Result<(), Error> {
    let path = path.as_ref();
    if dictionary.path() != Some(path) {
        return Err(Error::ForeignLocation(path.to_path_buf()));
    }
    let mutations = dictionary.mutations();
    for name in mutations.deleted_names() {
        let file = path.join(resolver.word_file_name(name));
        match fs::remove_file(&file) {
            Ok(()) => log::trace!("deleted word file {}", file.display()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => return Err(err.into()),
        }
    }
    for name in mutations.changed_names() {
        if let Some(word) = dictionary.find_by_unique_name(name) {
            write_word(path, word, resolver)?;
        }
    }
    write_others(dictionary, path, resolver)?;
    dictionary.mutations_mut().reset();
    Ok(())
}

fn write_word(directory: &Path, word: &Word, resolver: &FileNameResolver) -> Result<(), Error> {
    let file = directory.join(resolver.word_file_name(word.unique_name()));
    fs::write(&file, serialize_word(word))?;
    log::trace!("wrote word file {}", file.display());
    Ok(())
}

fn write_others(dictionary: &Dictionary, directory: &Path, resolver: &FileNameResolver) -> Result<(), Error> {
    fs::write(
        directory.join(resolver.settings_file_name()),
        serialize_settings(dictionary.settings(), true),
    )?;
    fs::write(
        directory.join(resolver.markers_file_name()),
        serialize_markers(dictionary.markers(), true),
    )?;
    Ok(())
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension().map_or(false, |actual| actual == extension)
}

fn read_utf8(path: &Path) -> Result<Option<String>, Error> {
    match String::from_utf8(fs::read(path)?) {
        Ok(text) => Ok(Some(text)),
        Err(err) => {
            log::warn!("skipping {} which is not valid UTF-8: {err}", path.display());
            Ok(None)
        }
    }
}
