//! Query matching against derived spellings.
//!
//! A query typed into a contact search box can be the name itself, a run of
//! full spelling (`zhongq`), a run of initials (`zq`) or a mix where some
//! characters are typed in full and others only by their initial (`zqing`).
//! Matches are reported as a range of *source* characters so the caller can
//! highlight the name directly.

use std::collections::HashSet;
use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::positions::PositionIndex;
use crate::Config;

/// Strategy that produced a match. Ordering is match priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    Exact,
    FullSpelling,
    Initials,
    Mixed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub kind: MatchKind,
    /// Matched source characters (char indices into the name).
    pub highlight: Range<usize>,
    /// True when the match used the alternate (polyphone) spelling.
    pub alternate: bool,
}

/// Borrowed view of one spelling of a name.
#[derive(Debug, Clone, Copy)]
pub struct SpellingView<'a> {
    pub full: &'a str,
    pub full_positions: &'a PositionIndex,
    pub initials: &'a str,
}

impl<'a> SpellingView<'a> {
    /// Split the full spelling back into its per-character segments.
    pub fn segments(&self) -> Vec<&'a str> {
        let full = self.full;
        let mut out = Vec::new();
        let mut start = 0;
        let mut current = None;
        for ((byte, _), &src) in full.char_indices().zip(self.full_positions.as_slice()) {
            if current != Some(src) {
                if current.is_some() {
                    out.push(&full[start..byte]);
                }
                start = byte;
                current = Some(src);
            }
        }
        if current.is_some() {
            out.push(&full[start..]);
        }
        out
    }
}

/// Anything that can be matched: a display name plus one or two spellings.
pub trait Searchable {
    fn display_name(&self) -> &str;

    fn primary_spelling(&self) -> SpellingView<'_>;

    fn alternate_spelling(&self) -> Option<SpellingView<'_>> {
        None
    }
}

/// Evaluates queries with the strategies enabled in [`Config`].
#[derive(Debug, Clone)]
pub struct Matcher {
    exact: bool,
    full_spelling: bool,
    initials: bool,
    mixed: bool,
}

impl Default for Matcher {
    fn default() -> Self {
        Self {
            exact: true,
            full_spelling: true,
            initials: true,
            mixed: true,
        }
    }
}

impl Matcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            exact: config.match_exact,
            full_spelling: config.match_full_spelling,
            initials: config.match_initials,
            mixed: config.match_mixed,
        }
    }

    /// Match `query` against `item`. Strategies are tried in priority order,
    /// each on the primary spelling first and then on the alternate.
    pub fn evaluate<S: Searchable + ?Sized>(&self, item: &S, query: &str) -> Option<MatchResult> {
        let query = fold(query.trim());
        if query.is_empty() {
            return None;
        }

        if self.exact {
            if let Some(highlight) = match_exact(item.display_name(), &query) {
                return Some(MatchResult {
                    kind: MatchKind::Exact,
                    highlight,
                    alternate: false,
                });
            }
        }

        let primary = item.primary_spelling();
        let alternate = item.alternate_spelling();
        let strategies: [(bool, MatchKind, fn(&SpellingView<'_>, &str) -> Option<Range<usize>>); 3] = [
            (self.full_spelling, MatchKind::FullSpelling, match_full_spelling),
            (self.initials, MatchKind::Initials, match_initials),
            (self.mixed, MatchKind::Mixed, match_mixed),
        ];

        for (enabled, kind, strategy) in strategies {
            if !enabled {
                continue;
            }
            if let Some(highlight) = strategy(&primary, &query) {
                tracing::trace!(?kind, query = %query, "matched primary spelling");
                return Some(MatchResult {
                    kind,
                    highlight,
                    alternate: false,
                });
            }
            if let Some(alt) = alternate.as_ref() {
                if let Some(highlight) = strategy(alt, &query) {
                    tracing::trace!(?kind, query = %query, "matched alternate spelling");
                    return Some(MatchResult {
                        kind,
                        highlight,
                        alternate: true,
                    });
                }
            }
        }
        None
    }
}

/// Lowercase one char at a time so char indices are preserved.
fn fold(s: &str) -> String {
    s.chars()
        .map(|c| c.to_lowercase().next().unwrap_or(c))
        .collect()
}

fn char_offset(s: &str, byte: usize) -> usize {
    s[..byte].chars().count()
}

fn match_exact(name: &str, query: &str) -> Option<Range<usize>> {
    let name = fold(name);
    let byte = name.find(query)?;
    let start = char_offset(&name, byte);
    Some(start..start + query.chars().count())
}

fn match_full_spelling(view: &SpellingView<'_>, query: &str) -> Option<Range<usize>> {
    let width = query.chars().count();
    view.full
        .match_indices(query)
        .map(|(byte, _)| char_offset(view.full, byte))
        .find(|&start| view.full_positions.is_segment_start(start))
        .and_then(|start| view.full_positions.source_range(start..start + width))
}

fn match_initials(view: &SpellingView<'_>, query: &str) -> Option<Range<usize>> {
    let byte = view.initials.find(query)?;
    let start = char_offset(view.initials, byte);
    Some(start..start + query.chars().count())
}

fn match_mixed(view: &SpellingView<'_>, query: &str) -> Option<Range<usize>> {
    let segments = view.segments();
    let mut dead = HashSet::new();
    (0..segments.len()).find_map(|start| {
        consume(&segments, start, query, 0, &mut dead).map(|end| start..end)
    })
}

/// Consume `query[offset..]` starting at segment `at`; returns the exclusive
/// end segment. Each segment is taken whole or by its first letter, and the
/// last one may be a prefix. `dead` records `(segment, offset)` states that
/// cannot complete, so every state is explored at most once.
fn consume(
    segments: &[&str],
    at: usize,
    query: &str,
    offset: usize,
    dead: &mut HashSet<(usize, usize)>,
) -> Option<usize> {
    let rest = &query[offset..];
    if rest.is_empty() {
        return Some(at);
    }
    if dead.contains(&(at, offset)) {
        return None;
    }
    let segment: &str = segments.get(at)?;
    if segment.starts_with(rest) {
        return Some(at + 1);
    }

    let mut found = None;
    if rest.starts_with(segment) {
        found = consume(segments, at + 1, query, offset + segment.len(), dead);
    }
    if found.is_none() {
        let mut chars = segment.chars();
        // A one-letter segment taken by its initial is the whole segment.
        if let (Some(first), Some(_)) = (chars.next(), chars.next()) {
            if rest.starts_with(first) {
                found = consume(segments, at + 1, query, offset + first.len_utf8(), dead);
            }
        }
    }
    if found.is_none() {
        dead.insert((at, offset));
    }
    found
}
