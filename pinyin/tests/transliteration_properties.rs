use namedex_pinyin::{PersonRecord, PinyinTable, ReadingHint, Transliterator};

/// Properties every transliteration must hold, checked over the bundled
/// table.
///
/// Names are drawn from the bundled resource itself so that every character
/// has a table entry, plus a few mixed and unmapped inputs.
fn sample_names(table: &PinyinTable) -> Vec<String> {
    let chars: Vec<char> = "王李张刘陈杨黄赵吴周重庆单曾长行乐和华都传弹调省会少大小中国人绿女率"
        .chars()
        .filter(|&c| table.contains(c))
        .collect();
    assert!(chars.len() > 30, "bundled table lost common characters");

    let mut names = Vec::new();
    for window in 1..=4 {
        for chunk in chars.chunks(window) {
            names.push(chunk.iter().collect());
        }
    }
    names
}

#[test]
fn positions_cover_spelling_and_stay_in_range() {
    let table = PinyinTable::global().unwrap();
    let tr = Transliterator::new(table);
    for name in sample_names(table) {
        let n = name.chars().count();
        let t = tr.transliterate(&name).unwrap();
        for spelling in std::iter::once(&t.primary).chain(t.alternate.as_ref()) {
            assert_eq!(
                spelling.full_positions.len(),
                spelling.full.chars().count(),
                "positions length for {name}"
            );
            assert!(spelling.full_positions.as_slice().iter().all(|&p| p < n));
            assert_eq!(spelling.segments.len(), n);
            assert_eq!(spelling.initials.chars().count(), n);
            assert_eq!(spelling.initials_positions.len(), n);
            spelling.full_positions.validate(n, spelling.full.chars().count()).unwrap();
        }
    }
}

#[test]
fn transliteration_is_deterministic() {
    let table = PinyinTable::global().unwrap();
    let tr = Transliterator::new(table);
    for name in sample_names(table) {
        let a = tr.transliterate(&name).unwrap();
        let b = tr.transliterate(&name).unwrap();
        assert_eq!(a, b);
    }
    let a = PersonRecord::new("x", "重庆华都").unwrap();
    let b = PersonRecord::new("x", "重庆华都").unwrap();
    assert_eq!(a, b);
}

#[test]
fn chongqing_polyphone_example() {
    let p = PersonRecord::new("cq", "重庆").unwrap();
    assert_eq!(p.full_spelling(), "zhongqing");
    assert_eq!(p.initials(), "zq");
    assert!(p.contains_polyphone());
    assert_eq!(p.alt_full_spelling(), Some("chongqing"));
    assert_eq!(p.alt_initials(), Some("cq"));
    assert_ne!(p.alt_full_spelling(), Some(p.full_spelling()));
    assert_eq!(
        p.alt_full_spelling_positions().unwrap().len(),
        "chongqing".len()
    );
    assert_eq!(p.full_spelling_positions().len(), "zhongqing".len());
}

#[test]
fn mixed_latin_and_cjk_initials() {
    let p = PersonRecord::new("t", "Tom李").unwrap();
    assert_eq!(p.initials(), "toml");
    assert_eq!(p.full_spelling(), "tomli");

    let p = PersonRecord::new("t", "T李").unwrap();
    assert_eq!(p.initials(), "tl");
    assert_eq!(p.initials().chars().count(), 2);
}

#[test]
fn empty_name_is_not_an_error() {
    let p = PersonRecord::new("empty", "").unwrap();
    assert_eq!(p.full_spelling(), "");
    assert_eq!(p.initials(), "");
    assert!(!p.contains_polyphone());
    assert!(p.alt_full_spelling().is_none());
}

#[test]
fn unmapped_characters_pass_through() {
    // 龘 has no entry; 丨 only has a (none0) placeholder
    let p = PersonRecord::new("u", "龘丨李").unwrap();
    assert_eq!(p.full_spelling(), "龘丨li");
    assert_eq!(p.initials(), "龘丨l");
    assert_eq!(p.pinyin_location_string(), "0,1,2,2");
}

#[test]
fn only_first_polyphone_branches() {
    // 重 and 长 are both polyphones; the alternate changes 重 only
    let p = PersonRecord::new("x", "重长").unwrap();
    assert_eq!(p.full_spelling(), "zhongchang");
    assert_eq!(p.alt_full_spelling(), Some("chongchang"));
}

#[test]
fn hint_swaps_primary_and_alternate() {
    let p = PersonRecord::with_hint("s", "单", None, &ReadingHint::Surname).unwrap();
    assert_eq!(p.full_spelling(), "shan");
    assert_eq!(p.alt_full_spelling(), Some("dan"));
}
