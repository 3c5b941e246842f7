//! Alphabetical sections for an indexed contact list.
//!
//! Items are grouped by the first letter of their primary full spelling.
//! Anything that does not start with an ASCII letter lands in the "other"
//! section, which always sorts after `Z`.

use std::collections::BTreeMap;

use crate::matching::Searchable;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section<'a, T> {
    pub title: String,
    pub items: Vec<&'a T>,
}

/// Section key for a single item: an uppercase letter, or `None` for other.
pub fn section_letter<T: Searchable + ?Sized>(item: &T) -> Option<char> {
    item.primary_spelling()
        .full
        .chars()
        .next()
        .filter(|c| c.is_ascii_alphabetic())
        .map(|c| c.to_ascii_uppercase())
}

/// Group `items` into lettered sections. Input order is kept inside each
/// section; sections are ordered `A..Z` then `other_label`.
pub fn sections<'a, T: Searchable>(items: &'a [T], other_label: &str) -> Vec<Section<'a, T>> {
    let mut lettered: BTreeMap<char, Vec<&'a T>> = BTreeMap::new();
    let mut other = Vec::new();

    for item in items {
        match section_letter(item) {
            Some(letter) => lettered.entry(letter).or_default().push(item),
            None => other.push(item),
        }
    }

    let mut out: Vec<Section<'a, T>> = lettered
        .into_iter()
        .map(|(letter, items)| Section {
            title: letter.to_string(),
            items,
        })
        .collect();
    if !other.is_empty() {
        out.push(Section {
            title: other_label.to_string(),
            items: other,
        });
    }
    out
}

/// Titles for the index bar, in section order.
pub fn section_titles<T>(sections: &[Section<'_, T>]) -> Vec<String> {
    sections.iter().map(|s| s.title.clone()).collect()
}
