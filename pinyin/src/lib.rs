//! namedex-pinyin crate root
//!
//! Pinyin transliteration and a highlightable search index for Chinese
//! names, built on the language-agnostic pieces in `namedex-core`.
//!
//! Public API exported here:
//! - `PinyinTable` from `table` (character -> readings, shared instance)
//! - `Transliterator` and `ReadingHint` from `transliterator`
//! - `PersonRecord` from `person`
//! - `ContactIndex` and `search` for querying a contact list

pub mod config;
pub mod format;
pub mod index;
pub mod person;
pub mod search;
pub mod surnames;
pub mod table;
pub mod transliterator;

// Re-export the core pieces callers need alongside records.
pub use namedex_core::{
    section_titles, sections, Config, Error, MatchKind, MatchResult, Matcher, PositionIndex,
    Result, Searchable, Section, SpellingView,
};

// Convenience re-exports for common types used by callers.
pub use config::PinyinIndexConfig;
pub use format::{CaseType, OutputFormat, ToneType, VCharType};
pub use index::ContactIndex;
pub use person::{PersonEntry, PersonRecord};
pub use search::{search, SearchHit};
pub use surnames::surname_reading;
pub use table::{LoadStats, PinyinTable, BUNDLED_RESOURCE};
pub use transliterator::{ReadingHint, Spelling, Transliteration, Transliterator};
