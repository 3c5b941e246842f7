//! Searchable person records.
//!
//! A `PersonRecord` is built once from a name and is immutable afterwards,
//! apart from the per-query scratch fields (`highlight_range`, `match_kind`)
//! that a search pass rewrites.

use std::ops::Range;

use namedex_core::{Error, MatchKind, MatchResult, PositionIndex, Result, Searchable, SpellingView};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::table::PinyinTable;
use crate::transliterator::{ReadingHint, Transliteration, Transliterator};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StoredRecord")]
pub struct PersonRecord {
    id: String,
    name: String,
    sub: Option<String>,
    full_spelling: String,
    initials: String,
    full_spelling_positions: PositionIndex,
    initials_positions: PositionIndex,
    contains_polyphone: bool,
    alt_full_spelling: Option<String>,
    alt_initials: Option<String>,
    alt_full_spelling_positions: Option<PositionIndex>,

    // Scratch state, rewritten per query
    highlight_range: Option<Range<usize>>,
    match_kind: Option<MatchKind>,
}

/// Serialized form of a `PersonRecord`, checked before it becomes one.
#[derive(Deserialize)]
struct StoredRecord {
    id: String,
    name: String,
    sub: Option<String>,
    full_spelling: String,
    initials: String,
    full_spelling_positions: PositionIndex,
    initials_positions: PositionIndex,
    contains_polyphone: bool,
    alt_full_spelling: Option<String>,
    alt_initials: Option<String>,
    alt_full_spelling_positions: Option<PositionIndex>,
    #[serde(default)]
    highlight_range: Option<Range<usize>>,
    #[serde(default)]
    match_kind: Option<MatchKind>,
}

impl TryFrom<StoredRecord> for PersonRecord {
    type Error = Error;

    fn try_from(stored: StoredRecord) -> Result<Self> {
        let source_len = stored.name.chars().count();
        let initials_len = stored.initials.chars().count();
        stored
            .full_spelling_positions
            .validate(source_len, stored.full_spelling.chars().count())?;
        stored.initials_positions.validate(source_len, initials_len)?;

        match (
            &stored.alt_full_spelling,
            &stored.alt_full_spelling_positions,
            &stored.alt_initials,
        ) {
            (Some(full), Some(positions), Some(initials)) => {
                positions.validate(source_len, full.chars().count())?;
                let alt_initials_len = initials.chars().count();
                if alt_initials_len != initials_len {
                    return Err(Error::inconsistent("alternate initials", initials_len, alt_initials_len));
                }
            }
            (None, None, None) => {}
            _ => return Err(Error::inconsistent("alternate spelling parts", 3, 0)),
        }

        Ok(Self {
            id: stored.id,
            name: stored.name,
            sub: stored.sub,
            full_spelling: stored.full_spelling,
            initials: stored.initials,
            full_spelling_positions: stored.full_spelling_positions,
            initials_positions: stored.initials_positions,
            contains_polyphone: stored.contains_polyphone,
            alt_full_spelling: stored.alt_full_spelling,
            alt_initials: stored.alt_initials,
            alt_full_spelling_positions: stored.alt_full_spelling_positions,
            highlight_range: stored.highlight_range,
            match_kind: stored.match_kind,
        })
    }
}

/// Input for batch construction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonEntry {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub sub: Option<String>,
    #[serde(default)]
    pub hint: ReadingHint,
}

impl PersonEntry {
    pub fn new<I: Into<String>, N: Into<String>>(id: I, name: N) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            sub: None,
            hint: ReadingHint::None,
        }
    }
}

impl PersonRecord {
    /// Build from id and name using the shared table and preferred readings.
    pub fn new<I: Into<String>, N: Into<String>>(id: I, name: N) -> Result<Self> {
        let table = PinyinTable::global()?;
        Self::build(&Transliterator::new(table), id, name, None, &ReadingHint::None)
    }

    /// Build with a secondary display text and a reading hint.
    pub fn with_hint<I: Into<String>, N: Into<String>>(
        id: I,
        name: N,
        sub: Option<String>,
        hint: &ReadingHint,
    ) -> Result<Self> {
        let table = PinyinTable::global()?;
        Self::build(&Transliterator::new(table), id, name, sub, hint)
    }

    /// Build with an explicit transliterator (and therefore table).
    pub fn build<I: Into<String>, N: Into<String>>(
        transliterator: &Transliterator<'_>,
        id: I,
        name: N,
        sub: Option<String>,
        hint: &ReadingHint,
    ) -> Result<Self> {
        let name = name.into();
        let t = transliterator.transliterate_with(&name, hint)?;
        Ok(Self::from_transliteration(id.into(), name, sub, t))
    }

    pub fn from_entry(transliterator: &Transliterator<'_>, entry: &PersonEntry) -> Result<Self> {
        Self::build(
            transliterator,
            entry.id.clone(),
            entry.name.clone(),
            entry.sub.clone(),
            &entry.hint,
        )
    }

    /// Build many records in parallel. Output order follows `entries`; the
    /// first failure is returned.
    pub fn build_batch(
        transliterator: &Transliterator<'_>,
        entries: &[PersonEntry],
    ) -> Result<Vec<Self>> {
        entries
            .par_iter()
            .map(|entry| Self::from_entry(transliterator, entry))
            .collect()
    }

    fn from_transliteration(id: String, name: String, sub: Option<String>, t: Transliteration) -> Self {
        let (alt_full_spelling, alt_initials, alt_full_spelling_positions) = match t.alternate {
            Some(alt) => (Some(alt.full), Some(alt.initials), Some(alt.full_positions)),
            None => (None, None, None),
        };
        Self {
            id,
            name,
            sub,
            full_spelling: t.primary.full,
            initials: t.primary.initials,
            full_spelling_positions: t.primary.full_positions,
            initials_positions: t.primary.initials_positions,
            contains_polyphone: t.contains_polyphone,
            alt_full_spelling,
            alt_initials,
            alt_full_spelling_positions,
            highlight_range: None,
            match_kind: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sub(&self) -> Option<&str> {
        self.sub.as_deref()
    }

    /// Lowercase concatenated pinyin, e.g. `wangpengfei`.
    pub fn full_spelling(&self) -> &str {
        &self.full_spelling
    }

    /// Lowercase first letters, e.g. `wpf`.
    pub fn initials(&self) -> &str {
        &self.initials
    }

    pub fn full_spelling_positions(&self) -> &PositionIndex {
        &self.full_spelling_positions
    }

    pub fn initials_positions(&self) -> &PositionIndex {
        &self.initials_positions
    }

    pub fn contains_polyphone(&self) -> bool {
        self.contains_polyphone
    }

    pub fn alt_full_spelling(&self) -> Option<&str> {
        self.alt_full_spelling.as_deref()
    }

    pub fn alt_initials(&self) -> Option<&str> {
        self.alt_initials.as_deref()
    }

    pub fn alt_full_spelling_positions(&self) -> Option<&PositionIndex> {
        self.alt_full_spelling_positions.as_ref()
    }

    /// `"0,0,0,0,1,1,1,1,2,2,2"` form of the full spelling positions.
    pub fn pinyin_location_string(&self) -> String {
        self.full_spelling_positions.to_location_string()
    }

    /// `"0,1,2"` form of the initials positions.
    pub fn initial_location_string(&self) -> String {
        self.initials_positions.to_location_string()
    }

    pub fn highlight_range(&self) -> Option<Range<usize>> {
        self.highlight_range.clone()
    }

    pub fn match_kind(&self) -> Option<MatchKind> {
        self.match_kind
    }

    /// Store the outcome of evaluating a query against this record.
    pub fn apply_match(&mut self, result: Option<&MatchResult>) {
        self.highlight_range = result.map(|m| m.highlight.clone());
        self.match_kind = result.map(|m| m.kind);
    }

    pub fn clear_match(&mut self) {
        self.apply_match(None);
    }
}

impl Searchable for PersonRecord {
    fn display_name(&self) -> &str {
        &self.name
    }

    fn primary_spelling(&self) -> SpellingView<'_> {
        SpellingView {
            full: &self.full_spelling,
            full_positions: &self.full_spelling_positions,
            initials: &self.initials,
        }
    }

    fn alternate_spelling(&self) -> Option<SpellingView<'_>> {
        match (
            &self.alt_full_spelling,
            &self.alt_full_spelling_positions,
            &self.alt_initials,
        ) {
            (Some(full), Some(positions), Some(initials)) => Some(SpellingView {
                full,
                full_positions: positions,
                initials,
            }),
            _ => None,
        }
    }
}
