//! A dictionary engine for constructed languages.
//!
//! A [`Dictionary`] holds [`Word`]s. Each word has a headword, a date and free-form contents
//! per language, written in a small markup language (see [`markup`]). On top of that this
//! crate provides:
//!
//! * a block parser turning contents into sections of equivalents, informations and
//!   relations ([`Parser`], [`ParsedWord`]),
//! * searches over names, equivalents or raw contents ([`NormalParameter`]), with
//!   suggestions for revised spellings and inflected forms ([`suggest`]),
//! * IPA conversion of headwords ([`create_pronouncer`]),
//! * the `.xdn` single-file and directory formats ([`io`]).
//!
//! ```
//! use xdn::{io, NormalParameter, WordMode, WordType};
//!
//! let text = "* @1000 sakil\n\n!JA\n+ <名>\n= リンゴ\n\n**\n\n!VERSION\n- S\n\n!ALPHABET\n- sakil\n\n!REVISION\n\n!MARKER\n";
//! let dictionary = io::parse_single(text, None).unwrap();
//!
//! let mut parameter = NormalParameter::new("リンゴ", WordMode::Equivalent, WordType::Exact, "ja");
//! let result = dictionary.search(&mut parameter);
//! assert_eq!(result.words[0].name(), "sakil");
//! ```
//!
//! The library logs through the [`log`] facade and never installs a logger.

mod dictionary;
mod entry;
mod error;
pub mod io;
mod marker;
pub mod markup;
mod normalize;
mod pronounce;
mod search;
mod settings;
pub mod suggest;
mod version;
mod word;

pub use dictionary::{Dictionary, MutationManager};
pub use entry::{
    Equivalent, Field, Information, InformationKind, ParsedWord, Part, Relation, RelationEntry,
    Section,
};
pub use error::{Error, ParseError, ParseErrorKind, ValidationError};
pub use marker::{Marker, Markers};
pub use normalize::{normalize, IgnoreOptions};
pub use pronounce::{create_pronouncer, Pronouncer, PronouncerOptions, ShalPronouncer, StablePronouncer};
pub use search::{NormalParameter, Parameter, SearchResult, WordMode, WordType};
pub use settings::{DictionarySettings, Revision, Revisions};
pub use version::{Grammar, Version};
pub use word::{parser::Parser, Contents, Word};

/// Hasher used by the maps and sets in this crate.
#[cfg(feature = "default-hasher")]
pub(crate) type DefaultHashBuilder = ahash::RandomState;
#[cfg(not(feature = "default-hasher"))]
pub(crate) type DefaultHashBuilder = std::collections::hash_map::RandomState;

pub(crate) type HashMap<K, V> = hashbrown::HashMap<K, V, DefaultHashBuilder>;
pub(crate) type HashSet<K> = hashbrown::HashSet<K, DefaultHashBuilder>;
