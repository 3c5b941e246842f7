use namedex_pinyin::{
    section_titles, ContactIndex, MatchKind, PersonEntry, PinyinIndexConfig, Searchable,
};

/// End-to-end contact list behavior: build, query, highlight, section.
fn contacts() -> ContactIndex {
    let mut index = ContactIndex::new(PinyinIndexConfig::default()).unwrap();
    index
        .extend(&[
            PersonEntry::new("1", "王鹏飞"),
            PersonEntry::new("2", "重庆办事处"),
            PersonEntry::new("3", "张丽"),
            PersonEntry::new("4", "Tom李"),
            PersonEntry::new("5", "曾文"),
            PersonEntry::new("6", "007"),
        ])
        .unwrap();
    index
}

fn ids_for(index: &mut ContactIndex, query: &str) -> Vec<String> {
    let hits = index.search(query);
    hits.iter()
        .map(|h| index.records()[h.index].id().to_string())
        .collect()
}

#[test]
fn literal_name_match_has_priority() {
    let mut index = contacts();
    let hits = index.search("鹏飞");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].result.kind, MatchKind::Exact);
    assert_eq!(hits[0].result.highlight, 1..3);
}

#[test]
fn full_spelling_and_initials_highlight_source_characters() {
    let mut index = contacts();
    let hits = index.search("pengfei");
    assert_eq!(hits[0].result.kind, MatchKind::FullSpelling);
    let record = &index.records()[hits[0].index];
    assert_eq!(record.id(), "1");
    assert_eq!(record.highlight_range(), Some(1..3));
    assert_eq!(record.match_kind(), Some(MatchKind::FullSpelling));

    let hits = index.search("wpf");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].result.kind, MatchKind::Initials);
    assert_eq!(hits[0].result.highlight, 0..3);
}

#[test]
fn polyphone_alternate_is_searchable() {
    let mut index = contacts();
    let hits = index.search("chongqing");
    assert_eq!(hits.len(), 1);
    assert!(hits[0].result.alternate);
    assert_eq!(hits[0].result.highlight, 0..2);

    // 曾 prefers ceng in running text, zeng is the alternate
    assert_eq!(ids_for(&mut index, "zengw"), vec!["5"]);
    assert_eq!(ids_for(&mut index, "cengw"), vec!["5"]);
}

#[test]
fn mixed_query() {
    let mut index = contacts();
    let hits = index.search("zqban");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].result.kind, MatchKind::Mixed);
    assert_eq!(hits[0].result.highlight, 0..3);
}

#[test]
fn latin_names_and_case() {
    let mut index = contacts();
    let hits = index.search("TOM");
    assert_eq!(hits[0].result.kind, MatchKind::Exact);
    assert_eq!(index.records()[hits[0].index].display_name(), "Tom李");
}

#[test]
fn query_results_are_ordered() {
    let mut index = contacts();
    // both by full spelling: 王鹏飞 starts at 0, 曾文 at 1
    let ids = ids_for(&mut index, "w");
    assert_eq!(ids, vec!["1", "5"]);
}

#[test]
fn sections_put_other_last() {
    let index = contacts();
    let sections = index.sections();
    assert_eq!(section_titles(&sections), vec!["C", "T", "W", "Z", "#"]);
    let z: Vec<&str> = sections[3].items.iter().map(|r| r.id()).collect();
    assert_eq!(z, vec!["2", "3"]);
}
