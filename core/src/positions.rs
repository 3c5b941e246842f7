//! Position index construction (the "location strings" of a spelling).
//!
//! A spelling derived from a name is longer than the name: `王鹏飞` becomes
//! `wangpengfei`. The position index records, for every character of the
//! spelling, which source character produced it:
//!
//! ```text
//! w a n g p e n g f e i
//! 0 0 0 0 1 1 1 1 2 2 2
//! ```
//!
//! Internally this is a `Vec<usize>`. The comma-joined form is only produced
//! at the boundary for consumers that want a flat string.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PositionIndex(Vec<usize>);

impl PositionIndex {
    /// Build the index for a spelling made by concatenating `segments`,
    /// one segment per source character.
    ///
    /// Fails with `InternalConsistency` when the segment count differs from
    /// `source_len`, when a segment is empty, or when the segments do not add
    /// up to the length of `spelling`. Nothing is truncated.
    pub fn build<S: AsRef<str>>(source_len: usize, segments: &[S], spelling: &str) -> Result<Self> {
        if segments.len() != source_len {
            return Err(Error::inconsistent(
                "segment count",
                source_len,
                segments.len(),
            ));
        }

        let mut positions = Vec::with_capacity(spelling.len());
        for (index, segment) in segments.iter().enumerate() {
            let width = segment.as_ref().chars().count();
            if width == 0 {
                return Err(Error::inconsistent("segment width", 1, 0));
            }
            positions.extend(std::iter::repeat(index).take(width));
        }

        let spelling_len = spelling.chars().count();
        if positions.len() != spelling_len {
            return Err(Error::inconsistent(
                "spelling positions",
                spelling_len,
                positions.len(),
            ));
        }
        Ok(Self(positions))
    }

    /// Index for an initials string: exactly one character per source
    /// character, so the mapping is the identity.
    pub fn for_initials(source_len: usize, initials: &str) -> Result<Self> {
        let found = initials.chars().count();
        if found != source_len {
            return Err(Error::inconsistent("initials positions", source_len, found));
        }
        Ok(Self((0..source_len).collect()))
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, spelling_index: usize) -> Option<usize> {
        self.0.get(spelling_index).copied()
    }

    /// True if `spelling_index` is the first character of its segment.
    pub fn is_segment_start(&self, spelling_index: usize) -> bool {
        match spelling_index {
            0 => !self.0.is_empty(),
            i => match (self.0.get(i - 1), self.0.get(i)) {
                (Some(prev), Some(cur)) => prev != cur,
                _ => false,
            },
        }
    }

    /// Map a character range of the spelling to the range of source
    /// characters it covers. Partially covered segments count as covered.
    pub fn source_range(&self, spelling_range: Range<usize>) -> Option<Range<usize>> {
        if spelling_range.is_empty() || spelling_range.end > self.0.len() {
            return None;
        }
        let first = self.0[spelling_range.start];
        let last = self.0[spelling_range.end - 1];
        Some(first..last + 1)
    }

    /// Number of distinct source characters referenced.
    pub fn source_len(&self) -> usize {
        self.0.last().map(|last| last + 1).unwrap_or(0)
    }

    /// Check the invariants against the lengths they were built for.
    pub fn validate(&self, source_len: usize, spelling_len: usize) -> Result<()> {
        if self.0.len() != spelling_len {
            return Err(Error::inconsistent("spelling positions", spelling_len, self.0.len()));
        }
        if let Some(&bad) = self.0.iter().find(|&&p| p >= source_len) {
            return Err(Error::inconsistent("source index bound", source_len, bad));
        }
        if self.0.windows(2).any(|w| w[1] < w[0] || w[1] > w[0] + 1) {
            return Err(Error::inconsistent("monotonic positions", source_len, self.source_len()));
        }
        Ok(())
    }

    /// Comma-joined form, e.g. `"0,0,1,1"`.
    pub fn to_location_string(&self) -> String {
        self.0
            .iter()
            .map(|p| p.to_string())
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Parse the comma-joined form produced by [`to_location_string`].
    ///
    /// [`to_location_string`]: PositionIndex::to_location_string
    pub fn from_location_string(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Ok(Self::default());
        }
        s.split(',')
            .map(|part| {
                part.trim()
                    .parse::<usize>()
                    .map_err(|source| Error::MalformedLocation {
                        entry: part.trim().to_string(),
                        source,
                    })
            })
            .collect::<Result<Vec<_>>>()
            .map(Self)
    }
}

impl From<PositionIndex> for Vec<usize> {
    fn from(index: PositionIndex) -> Self {
        index.0
    }
}
