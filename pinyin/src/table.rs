// namedex/pinyin/src/table.rs
//
// Character -> pinyin readings table.
//
// The table is loaded from a line-oriented resource:
//
//     91CD (zhong4,chong2)
//     674E (li3)
//
// one code point per line, readings in preference order. Records that do
// not pass `is_valid_record` (including the `(none0)` placeholder) are
// skipped with a warning. A process-wide instance is initialized once,
// either lazily from the bundled resource or explicitly by the caller, and
// is read-only afterwards.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use ahash::AHashMap;
use namedex_core::{Error, Result};
use once_cell::sync::{Lazy, OnceCell};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::format::OutputFormat;

/// Resource shipped with the crate.
pub const BUNDLED_RESOURCE: &str = include_str!("../data/unicode_to_hanyu_pinyin.txt");

static LINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9A-Fa-f]{4,6})\s+(\(.*\))\s*$").expect("static regex is valid")
});

static GLOBAL: OnceCell<PinyinTable> = OnceCell::new();

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinyinTable {
    entries: AHashMap<char, Vec<String>>,
}

/// Counters collected while parsing a resource.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoadStats {
    pub entries: usize,
    pub skipped: usize,
    pub duplicates: usize,
}

impl PinyinTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a resource, returning the table and what was skipped.
    pub fn parse_with_stats(content: &str) -> Result<(Self, LoadStats)> {
        let mut table = Self::new();
        let mut stats = LoadStats::default();

        for (lineno, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let caps = LINE_RE
                .captures(line)
                .ok_or_else(|| Error::resource(format!("line {}: malformed entry {:?}", lineno + 1, line)))?;

            let code = u32::from_str_radix(&caps[1], 16).map_err(|e| {
                Error::resource_with(format!("line {}: bad code point", lineno + 1), e)
            })?;
            let ch = char::from_u32(code).ok_or_else(|| {
                Error::resource(format!("line {}: {:X} is not a scalar value", lineno + 1, code))
            })?;

            let record = &caps[2];
            if !Self::is_valid_record(record) {
                tracing::warn!(line = lineno + 1, record, "skipping invalid pinyin record");
                stats.skipped += 1;
                continue;
            }
            if table.entries.contains_key(&ch) {
                tracing::warn!(line = lineno + 1, %ch, "duplicate pinyin record, keeping first");
                stats.duplicates += 1;
                continue;
            }

            let readings = record_readings(record)
                .map(|r| r.to_ascii_lowercase())
                .collect();
            table.entries.insert(ch, readings);
        }

        if table.entries.is_empty() {
            return Err(Error::resource("resource contains no valid records"));
        }
        stats.entries = table.entries.len();
        tracing::debug!(
            entries = stats.entries,
            skipped = stats.skipped,
            duplicates = stats.duplicates,
            "loaded pinyin table"
        );
        Ok((table, stats))
    }

    pub fn parse(content: &str) -> Result<Self> {
        Self::parse_with_stats(content).map(|(table, _)| table)
    }

    /// Load the resource bundled with the crate.
    pub fn bundled() -> Result<Self> {
        Self::parse(BUNDLED_RESOURCE)
    }

    /// Load a resource file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::resource_with(format!("read {}", path.display()), e))?;
        Self::parse(&content)
    }

    /// True if `record` (the parenthesised part of a line) encodes at least
    /// one legal reading: ASCII letters, optional `u:`, optional tone digit.
    pub fn is_valid_record(record: &str) -> bool {
        let Some(inner) = record
            .trim()
            .strip_prefix('(')
            .and_then(|r| r.strip_suffix(')'))
        else {
            return false;
        };
        if inner.trim().is_empty() || inner.trim() == "none0" {
            return false;
        }
        inner.split(',').all(is_valid_reading)
    }

    /// Insert or replace the readings of one character.
    pub fn insert<I, S>(&mut self, ch: char, readings: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let readings: Vec<String> = readings.into_iter().map(Into::into).collect();
        if readings.is_empty() {
            self.entries.remove(&ch);
        } else {
            self.entries.insert(ch, readings);
        }
    }

    /// Search readings of `ch` in preference order: lowercase ASCII, tones
    /// stripped, duplicates removed. Empty if the character is not in the
    /// table, meaning "pass it through".
    pub fn readings(&self, ch: char) -> Vec<String> {
        self.formatted_readings(ch, &OutputFormat::SEARCH)
    }

    /// Readings of `ch` as stored in the resource (tone digits kept).
    pub fn raw_readings(&self, ch: char) -> &[String] {
        self.entries.get(&ch).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Readings of `ch` in `format`, with duplicates removed (`hao3,hao4`
    /// both format to `hao` without tones).
    pub fn formatted_readings(&self, ch: char, format: &OutputFormat) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for raw in self.raw_readings(ch) {
            let formatted = format.format(raw);
            if !formatted.is_empty() && !out.contains(&formatted) {
                out.push(formatted);
            }
        }
        out
    }

    /// The record for `ch` in resource form, e.g. `(zhong4,chong2)`.
    pub fn record_for(&self, ch: char) -> Option<String> {
        self.entries
            .get(&ch)
            .map(|readings| format!("({})", readings.join(",")))
    }

    pub fn contains(&self, ch: char) -> bool {
        self.entries.contains_key(&ch)
    }

    /// True if `ch` has two or more distinct search readings.
    pub fn is_polyphone(&self, ch: char) -> bool {
        self.formatted_readings(ch, &OutputFormat::SEARCH).len() > 1
    }

    pub fn polyphone_count(&self) -> usize {
        self.entries.keys().filter(|&&ch| self.is_polyphone(ch)).count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Save the compiled table using bincode serialization.
    pub fn save_bincode<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path)
            .map_err(|e| Error::io(format!("create {}", path.display()), e))?;
        bincode::serialize_into(BufWriter::new(file), self)
            .map_err(|e| Error::resource_with(format!("serialize {}", path.display()), e))
    }

    /// Load a table produced by `save_bincode`.
    pub fn load_bincode<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| Error::resource_with(format!("open {}", path.display()), e))?;
        let table: Self = bincode::deserialize_from(BufReader::new(file))
            .map_err(|e| Error::resource_with(format!("deserialize {}", path.display()), e))?;
        if table.is_empty() {
            return Err(Error::resource(format!("{} holds an empty table", path.display())));
        }
        Ok(table)
    }

    /// Load a table file: a compiled table written by `save_bincode` when the
    /// extension is `.bin`, otherwise a text resource.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("bin") => Self::load_bincode(path),
            _ => Self::from_path(path),
        }
    }

    // ========== Process-wide instance ==========

    /// The shared table, loading the bundled resource on first use.
    ///
    /// Concurrent first callers race safely: exactly one load wins. A load
    /// failure is returned to the caller and the next call tries again.
    pub fn global() -> Result<&'static PinyinTable> {
        GLOBAL.get_or_try_init(Self::bundled)
    }

    /// Install `table` as the shared table. Fails if one is already set.
    pub fn install_global(table: PinyinTable) -> Result<&'static PinyinTable> {
        GLOBAL.set(table).map_err(|_| Error::AlreadyInitialized)?;
        GLOBAL.get().ok_or(Error::AlreadyInitialized)
    }

    /// Load a table file (see [`PinyinTable::load`]) and install it as the
    /// shared table.
    pub fn init_global_from_path<P: AsRef<Path>>(path: P) -> Result<&'static PinyinTable> {
        Self::install_global(Self::load(path)?)
    }

    pub fn is_global_initialized() -> bool {
        GLOBAL.get().is_some()
    }
}

fn record_readings(record: &str) -> impl Iterator<Item = &str> {
    record
        .trim()
        .trim_start_matches('(')
        .trim_end_matches(')')
        .split(',')
        .map(str::trim)
}

fn is_valid_reading(reading: &str) -> bool {
    let (body, _) = crate::format::split_tone(reading.trim());
    let letters = body.replace("u:", "u");
    !letters.is_empty() && letters.chars().all(|c| c.is_ascii_alphabetic())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_records() {
        assert!(PinyinTable::is_valid_record("(zhong4,chong2)"));
        assert!(PinyinTable::is_valid_record("(lu:3)"));
        assert!(PinyinTable::is_valid_record("(ng)"));
        assert!(!PinyinTable::is_valid_record("(none0)"));
        assert!(!PinyinTable::is_valid_record("()"));
        assert!(!PinyinTable::is_valid_record("zhong4"));
        assert!(!PinyinTable::is_valid_record("(zhong4,)"));
        assert!(!PinyinTable::is_valid_record("(zh0ng)"));
        assert!(!PinyinTable::is_valid_record("(中)"));
    }

    #[test]
    fn parse_skips_invalid_and_duplicate_records() {
        let src = "# comment\n\n91CD (zhong4,chong2)\n4E28 (none0)\n91CD (chong2)\n5E86 (qing4)\n";
        let (table, stats) = PinyinTable::parse_with_stats(src).unwrap();
        assert_eq!(stats.entries, 2);
        assert_eq!(stats.skipped, 1);
        assert_eq!(stats.duplicates, 1);
        assert_eq!(table.readings('重'), vec!["zhong", "chong"]);
        assert_eq!(table.raw_readings('重'), &["zhong4".to_string(), "chong2".to_string()]);
        assert!(table.readings('丨').is_empty());
        assert!(table.raw_readings('丨').is_empty());
    }

    #[test]
    fn malformed_line_is_resource_error() {
        let err = PinyinTable::parse("91CD zhong4\n").unwrap_err();
        assert!(matches!(err, Error::ResourceLoad { .. }));
        assert!(err.to_string().contains("line 1"));
        assert!(PinyinTable::parse("D800 (a1)\n").is_err());
    }

    #[test]
    fn empty_resource_is_resource_error() {
        assert!(PinyinTable::parse("# nothing\n").is_err());
        assert!(PinyinTable::parse("4E28 (none0)\n").is_err());
    }

    #[test]
    fn formatted_readings_collapse_tones() {
        let mut table = PinyinTable::new();
        table.insert('好', ["hao3", "hao4"]);
        table.insert('重', ["zhong4", "chong2"]);
        assert_eq!(table.formatted_readings('好', &OutputFormat::SEARCH), vec!["hao"]);
        assert_eq!(table.readings('好'), vec!["hao"]);
        assert!(!table.is_polyphone('好'));
        assert!(table.is_polyphone('重'));
        assert_eq!(table.polyphone_count(), 1);
        assert!(table.readings('a').is_empty());
    }

    #[test]
    fn record_for_matches_resource_form() {
        let table = PinyinTable::parse("91CD (zhong4,chong2)\n").unwrap();
        assert_eq!(table.record_for('重').as_deref(), Some("(zhong4,chong2)"));
        assert_eq!(table.record_for('x'), None);
    }

    #[test]
    fn bundled_resource_loads() {
        let table = PinyinTable::bundled().unwrap();
        assert!(table.len() > 200);
        assert!(table.contains('李'));
        assert!(table.is_polyphone('重'));
    }

    #[test]
    fn bincode_roundtrip() {
        let tmp = std::env::temp_dir().join(format!("namedex_table_{}.bin", std::process::id()));
        let table = PinyinTable::parse("91CD (zhong4,chong2)\n674E (li3)\n").unwrap();
        table.save_bincode(&tmp).unwrap();
        let loaded = PinyinTable::load_bincode(&tmp).unwrap();
        assert_eq!(loaded, table);
        let _ = std::fs::remove_file(tmp);
    }

    #[test]
    fn load_dispatches_on_extension() {
        let dir = std::env::temp_dir();
        let text = dir.join(format!("namedex_load_{}.txt", std::process::id()));
        let compiled = dir.join(format!("namedex_load_{}.bin", std::process::id()));
        std::fs::write(&text, "674E (li3)\n").unwrap();
        PinyinTable::parse("91CD (zhong4,chong2)\n").unwrap().save_bincode(&compiled).unwrap();

        assert!(PinyinTable::load(&text).unwrap().contains('李'));
        let loaded = PinyinTable::load(&compiled).unwrap();
        assert!(loaded.contains('重'));
        assert!(!loaded.contains('李'));
        // A compiled table is not a valid text resource.
        assert!(PinyinTable::from_path(&compiled).is_err());

        let _ = std::fs::remove_file(text);
        let _ = std::fs::remove_file(compiled);
    }

    #[test]
    fn global_is_initialized_once() {
        let first = PinyinTable::global().unwrap();
        let second = PinyinTable::global().unwrap();
        assert!(std::ptr::eq(first, second));
        assert!(PinyinTable::is_global_initialized());
        let err = PinyinTable::install_global(PinyinTable::new()).unwrap_err();
        assert!(matches!(err, Error::AlreadyInitialized));
    }
}
