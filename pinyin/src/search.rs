//! Contact search over person records.

use namedex_core::{MatchResult, Matcher, Searchable};
use serde::Serialize;

use crate::person::PersonRecord;

/// A record that matched, by position in the searched slice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    pub index: usize,
    pub result: MatchResult,
}

/// Evaluate `query` against every record, storing each outcome in the
/// record's scratch fields (non-matches are cleared).
///
/// Hits are ordered by match kind, then where the highlight starts, then by
/// full spelling.
pub fn search(records: &mut [PersonRecord], query: &str, matcher: &Matcher) -> Vec<SearchHit> {
    let mut hits = Vec::new();
    for (index, record) in records.iter_mut().enumerate() {
        let result = matcher.evaluate(&*record, query);
        record.apply_match(result.as_ref());
        if let Some(result) = result {
            hits.push(SearchHit { index, result });
        }
    }

    hits.sort_by(|a, b| {
        a.result
            .kind
            .cmp(&b.result.kind)
            .then_with(|| a.result.highlight.start.cmp(&b.result.highlight.start))
            .then_with(|| {
                records[a.index]
                    .primary_spelling()
                    .full
                    .cmp(records[b.index].primary_spelling().full)
            })
            .then_with(|| a.index.cmp(&b.index))
    });
    hits
}
