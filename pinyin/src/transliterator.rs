// namedex/pinyin/src/transliterator.rs
//
// Name -> full spelling + initials, with polyphone branching.
//
// Every source character yields exactly one segment: its preferred pinyin
// reading, or the character itself (lowercased) when the table has no
// entry. The primary spelling takes the preferred reading everywhere. When
// some character has two or more distinct readings, an alternate spelling
// substitutes the second reading at the first such character only.

use namedex_core::{PositionIndex, Result};
use serde::{Deserialize, Serialize};

use crate::format::OutputFormat;
use crate::surnames::surname_reading;
use crate::table::PinyinTable;

/// Caller-supplied override for which reading a character should prefer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadingHint {
    /// Table order only.
    #[default]
    None,
    /// The first character is a family name; use its surname reading.
    Surname,
    /// Explicit preferred reading per character index.
    Readings(Vec<(usize, String)>),
}

impl ReadingHint {
    fn preferences(&self, chars: &[char]) -> Vec<(usize, String)> {
        match self {
            ReadingHint::None => Vec::new(),
            ReadingHint::Surname => chars
                .first()
                .and_then(|&ch| surname_reading(ch))
                .map(|reading| vec![(0, reading.to_string())])
                .unwrap_or_default(),
            ReadingHint::Readings(list) => list
                .iter()
                .map(|(index, reading)| (*index, OutputFormat::SEARCH.format(reading)))
                .collect(),
        }
    }
}

/// One spelling of a name with its position indexes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spelling {
    pub segments: Vec<String>,
    pub full: String,
    pub initials: String,
    pub full_positions: PositionIndex,
    pub initials_positions: PositionIndex,
}

impl Spelling {
    /// Assemble a spelling from per-character segments, checking that the
    /// position indexes agree with the strings they describe.
    pub fn from_segments(segments: Vec<String>) -> Result<Self> {
        let source_len = segments.len();
        let full: String = segments.concat();
        let initials: String = segments.iter().filter_map(|s| s.chars().next()).collect();
        let full_positions = PositionIndex::build(source_len, &segments, &full)?;
        let initials_positions = PositionIndex::for_initials(source_len, &initials)?;
        Ok(Self {
            segments,
            full,
            initials,
            full_positions,
            initials_positions,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transliteration {
    pub primary: Spelling,
    pub alternate: Option<Spelling>,
    /// Index of the character the alternate spelling branches on.
    pub polyphone_at: Option<usize>,
    /// True if any character had two or more distinct readings.
    pub contains_polyphone: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct Transliterator<'t> {
    table: &'t PinyinTable,
    polyphone_variants: bool,
}

impl<'t> Transliterator<'t> {
    pub fn new(table: &'t PinyinTable) -> Self {
        Self {
            table,
            polyphone_variants: true,
        }
    }

    /// Enable or disable building the alternate spelling.
    pub fn with_polyphone_variants(mut self, enabled: bool) -> Self {
        self.polyphone_variants = enabled;
        self
    }

    pub fn table(&self) -> &'t PinyinTable {
        self.table
    }

    /// Readings of a single character in `format`; empty if not in the table.
    pub fn readings_for(&self, ch: char, format: &OutputFormat) -> Vec<String> {
        self.table.formatted_readings(ch, format)
    }

    /// Search-format candidates; a single passthrough segment for
    /// characters the table does not know.
    fn candidates(&self, ch: char) -> Vec<String> {
        let readings = self.table.formatted_readings(ch, &OutputFormat::SEARCH);
        if readings.is_empty() {
            vec![ch.to_lowercase().collect()]
        } else {
            readings
        }
    }

    pub fn transliterate(&self, name: &str) -> Result<Transliteration> {
        self.transliterate_with(name, &ReadingHint::None)
    }

    pub fn transliterate_with(&self, name: &str, hint: &ReadingHint) -> Result<Transliteration> {
        let chars: Vec<char> = name.chars().collect();
        let mut choices: Vec<Vec<String>> = chars.iter().map(|&ch| self.candidates(ch)).collect();

        for (index, reading) in hint.preferences(&chars) {
            let Some(candidates) = choices.get_mut(index) else {
                tracing::warn!(index, name, "reading hint points past the end of the name");
                continue;
            };
            match candidates.iter().position(|c| *c == reading) {
                Some(pos) => {
                    let preferred = candidates.remove(pos);
                    candidates.insert(0, preferred);
                }
                None => {
                    tracing::warn!(index, reading = %reading, name, "hinted reading is not a candidate, ignoring");
                }
            }
        }

        let primary_segments: Vec<String> = choices.iter().map(|c| c[0].clone()).collect();
        let polyphone_index = choices.iter().position(|c| c.len() > 1);
        let polyphone_at = polyphone_index.filter(|_| self.polyphone_variants);

        let alternate = match polyphone_at {
            Some(index) => {
                let mut segments = primary_segments.clone();
                segments[index] = choices[index][1].clone();
                Some(Spelling::from_segments(segments)?)
            }
            None => None,
        };

        Ok(Transliteration {
            primary: Spelling::from_segments(primary_segments)?,
            alternate,
            polyphone_at,
            contains_polyphone: polyphone_index.is_some(),
        })
    }
}
