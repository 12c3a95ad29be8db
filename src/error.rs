use core::fmt;
use std::path::PathBuf;

/// An error raised while reading the on-disk dictionary format.
///
/// Only the outer file grammar (word headers, the `**` settings block and its
/// `!VERSION`/`!ALPHABET`/`!REVISION`/`!MARKER` subsections) raises these. Word contents
/// are parsed leniently and never fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    /// The 1-based line on which the error was found, when known.
    pub line_number: Option<usize>,
}

impl ParseError {
    pub(crate) fn new(kind: ParseErrorKind, line_number: Option<usize>) -> Self {
        Self { kind, line_number }
    }

    /// Shifts the line number by `offset` lines. Used by loaders which hand the deserializer
    /// one chunk of a larger file at a time.
    pub(crate) fn offset(mut self, offset: usize) -> Self {
        self.line_number = self.line_number.map(|line| line + offset);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// A word or settings chunk did not start with its `*`/`**` header.
    NoHeader,
    /// A non-blank line appeared where a `**` or `!XXX` header was required.
    InvalidHeader(String),
    /// A standalone settings file did not start with `**`.
    NoDictionarySettingsHeader,
    /// Some but not all of `!VERSION`, `!ALPHABET` and `!REVISION` were present.
    InsufficientDictionarySettings,
    InvalidRevisionLine(String),
    InvalidMarkerLine(String),
    NoSuchMarker(String),
    /// A date did not fit into the hairia range.
    InvalidDate(String),
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoHeader => f.write_str("no header"),
            Self::InvalidHeader(line) => write!(f, "invalid header: '{line}'"),
            Self::NoDictionarySettingsHeader => f.write_str("no dictionary settings header"),
            Self::InsufficientDictionarySettings => {
                f.write_str("there are not enough sections in the dictionary settings")
            }
            Self::InvalidRevisionLine(line) => write!(f, "invalid revision line: '{line}'"),
            Self::InvalidMarkerLine(line) => write!(f, "invalid marker line: '{line}'"),
            Self::NoSuchMarker(name) => write!(f, "no such marker with name '{name}'"),
            Self::InvalidDate(date) => write!(f, "invalid date '{date}'"),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line_number {
            Some(line) => write!(f, "failed to parse dictionary on line {line}: {}", self.kind),
            None => write!(f, "failed to parse dictionary: {}", self.kind),
        }
    }
}

impl std::error::Error for ParseError {}

/// A rejected edit to a [`Dictionary`](crate::Dictionary).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Another word already uses this unique name.
    DuplicateUniqueName(String),
    /// The unique name contains characters other than letters, `-` and `'`, or misplaces the
    /// `+` and `~` modifiers.
    InvalidUniqueName(String),
    /// No word has the given uid.
    NoSuchWord(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateUniqueName(name) => write!(f, "duplicate unique name '{name}'"),
            Self::InvalidUniqueName(name) => write!(f, "invalid unique name '{name}'"),
            Self::NoSuchWord(uid) => write!(f, "no word with uid '{uid}'"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Errors raised by the loaders and savers in [`io`](crate::io).
#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
    Parse(ParseError),
    /// An incremental save targeted a directory other than the one the dictionary was
    /// loaded from or last saved to.
    ForeignLocation(PathBuf),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "i/o error: {err}"),
            Self::Parse(err) => err.fmt(f),
            Self::ForeignLocation(path) => write!(
                f,
                "cannot save incrementally to {}, which is not where the dictionary lives",
                path.display()
            ),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
            Self::ForeignLocation(_) => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<ParseError> for Error {
    fn from(err: ParseError) -> Self {
        Self::Parse(err)
    }
}
