//! Contact index: owns the records of a contact list and answers queries.
//!
//! This wraps table selection, record construction, search and sectioning
//! behind one type configured by `PinyinIndexConfig`.

use std::sync::Arc;

use namedex_core::{sections, Matcher, Result, Section};

use crate::config::PinyinIndexConfig;
use crate::person::{PersonEntry, PersonRecord};
use crate::search::{search, SearchHit};
use crate::table::PinyinTable;
use crate::transliterator::{ReadingHint, Transliterator};

#[derive(Debug, Clone)]
enum TableSource {
    Global(&'static PinyinTable),
    Owned(Arc<PinyinTable>),
}

impl TableSource {
    fn get(&self) -> &PinyinTable {
        match self {
            TableSource::Global(table) => table,
            TableSource::Owned(table) => table,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ContactIndex {
    table: TableSource,
    config: PinyinIndexConfig,
    matcher: Matcher,
    records: Vec<PersonRecord>,
}

impl ContactIndex {
    /// Create an index. Loads `config.resource_path` if set (a compiled
    /// `.bin` table or a text resource), otherwise uses the shared table.
    pub fn new(config: PinyinIndexConfig) -> Result<Self> {
        let table = match &config.resource_path {
            Some(path) => TableSource::Owned(Arc::new(PinyinTable::load(path)?)),
            None => TableSource::Global(PinyinTable::global()?),
        };
        Ok(Self::with_source(table, config))
    }

    /// Create an index over an explicit table.
    pub fn with_table(table: Arc<PinyinTable>, config: PinyinIndexConfig) -> Self {
        Self::with_source(TableSource::Owned(table), config)
    }

    fn with_source(table: TableSource, config: PinyinIndexConfig) -> Self {
        let matcher = Matcher::from_config(config.base());
        Self {
            table,
            config,
            matcher,
            records: Vec::new(),
        }
    }

    pub fn config(&self) -> &PinyinIndexConfig {
        &self.config
    }

    pub fn table(&self) -> &PinyinTable {
        self.table.get()
    }

    pub fn transliterator(&self) -> Transliterator<'_> {
        Transliterator::new(self.table.get())
            .with_polyphone_variants(self.config.base().polyphone_variants)
    }

    /// Surname hints from the config apply only to entries without a hint.
    fn effective(&self, entry: &PersonEntry) -> PersonEntry {
        let mut entry = entry.clone();
        if self.config.surname_hints && entry.hint == ReadingHint::None {
            entry.hint = ReadingHint::Surname;
        }
        entry
    }

    /// Add one entry and return its record.
    pub fn insert(&mut self, entry: PersonEntry) -> Result<&PersonRecord> {
        let entry = self.effective(&entry);
        let record = PersonRecord::from_entry(&self.transliterator(), &entry)?;
        self.records.push(record);
        Ok(&self.records[self.records.len() - 1])
    }

    /// Add many entries, transliterating in parallel.
    pub fn extend(&mut self, entries: &[PersonEntry]) -> Result<usize> {
        let entries: Vec<PersonEntry> = entries.iter().map(|e| self.effective(e)).collect();
        let built = PersonRecord::build_batch(&self.transliterator(), &entries)?;
        let added = built.len();
        self.records.extend(built);
        tracing::debug!(added, total = self.records.len(), "extended contact index");
        Ok(added)
    }

    pub fn records(&self) -> &[PersonRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Run a query, updating every record's match fields.
    pub fn search(&mut self, query: &str) -> Vec<SearchHit> {
        search(&mut self.records, query, &self.matcher)
    }

    /// Alphabetical sections over all records.
    pub fn sections(&self) -> Vec<Section<'_, PersonRecord>> {
        sections(&self.records, &self.config.base().section_other_label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use namedex_core::section_titles;

    #[test]
    fn surname_hints_from_config() {
        let config = PinyinIndexConfig {
            surname_hints: true,
            ..PinyinIndexConfig::default()
        };
        let mut index = ContactIndex::new(config).unwrap();
        let record = index.insert(PersonEntry::new("1", "单丽")).unwrap();
        assert_eq!(record.full_spelling(), "shanli");
    }

    #[test]
    fn compiled_table_from_config() {
        let path = std::env::temp_dir().join(format!("namedex_index_{}.bin", std::process::id()));
        PinyinTable::parse("91CD (zhong4,chong2)\n5E86 (qing4)\n")
            .unwrap()
            .save_bincode(&path)
            .unwrap();
        let config = PinyinIndexConfig {
            resource_path: Some(path.clone()),
            ..PinyinIndexConfig::default()
        };
        let mut index = ContactIndex::new(config).unwrap();
        assert_eq!(index.table().len(), 2);
        let record = index.insert(PersonEntry::new("1", "重庆")).unwrap();
        assert_eq!(record.full_spelling(), "zhongqing");
        let hits = index.search("cq");
        assert_eq!(hits.len(), 1);
        assert!(hits[0].result.alternate);
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn owned_table_and_sections() {
        let table = Arc::new(PinyinTable::parse("674E (li3)\n738B (wang2)\n").unwrap());
        let mut index = ContactIndex::with_table(table, PinyinIndexConfig::default());
        index
            .extend(&[
                PersonEntry::new("1", "王"),
                PersonEntry::new("2", "李"),
                PersonEntry::new("3", "9号"),
            ])
            .unwrap();
        assert_eq!(index.len(), 3);
        let secs = index.sections();
        assert_eq!(section_titles(&secs), vec!["L", "W", "#"]);
        let hits = index.search("w");
        assert_eq!(hits.len(), 1);
        assert_eq!(index.records()[hits[0].index].id(), "1");
    }
}
