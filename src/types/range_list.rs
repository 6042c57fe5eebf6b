#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::types::{selection::Selection, token_range::TokenRange};

/// The tokens of a buffer, kept sorted by `start`. Ranges never overlap: the
/// reconciler removes every token an edit touches before shifting the rest.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RangeList {
    ranges: Vec<TokenRange>,
}

impl RangeList {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Create a list from ranges in any order. The ranges must not overlap.
    #[must_use]
    pub fn from_ranges(ranges: Vec<TokenRange>) -> Self {
        let mut list = Self { ranges };
        list.sort();

        debug_assert!(
            list.is_consistent(usize::MAX),
            "Token ranges overlap: {:?}",
            list.ranges
        );

        list
    }

    /// Add a range, keeping the list sorted.
    pub fn insert(&mut self, range: TokenRange) {
        let index = self.ranges.partition_point(|other| other.start <= range.start);

        debug_assert!(
            index == 0 || self.ranges[index - 1].end <= range.start,
            "Token range {}..{} overlaps its predecessor",
            range.start,
            range.end
        );
        debug_assert!(
            index == self.ranges.len() || range.end <= self.ranges[index].start,
            "Token range {}..{} overlaps its successor",
            range.start,
            range.end
        );

        self.ranges.insert(index, range);
    }

    /// Restore ascending order by `start`. The sort is stable so equal starts
    /// keep their relative order.
    pub fn sort(&mut self) { self.ranges.sort_by_key(|range| range.start); }

    /// Remove and return every range lying entirely within `span`.
    pub fn remove_within(&mut self, span: Selection) -> Vec<TokenRange> {
        let (removed, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.ranges)
            .into_iter()
            .partition(|range| range.is_within(span));

        self.ranges = kept;
        removed
    }

    /// Move every range starting at or after `offset` by `delta` characters.
    pub fn shift_from(&mut self, offset: usize, delta: isize) {
        if delta == 0 {
            return;
        }

        self.ranges
            .iter_mut()
            .filter(|range| range.start >= offset)
            .for_each(|range| range.shift(delta));
    }

    /// Ranges that share at least one character with `span`.
    pub fn overlapping(&self, span: Selection) -> impl Iterator<Item = &TokenRange> {
        self.ranges.iter().filter(move |range| range.overlaps(span))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TokenRange> { self.ranges.iter() }

    #[must_use]
    pub fn len(&self) -> usize { self.ranges.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.ranges.is_empty() }

    pub fn clear(&mut self) { self.ranges.clear(); }

    /// Sorted, pairwise non-overlapping and within a text of `text_length`
    /// characters.
    #[must_use]
    pub fn is_consistent(&self, text_length: usize) -> bool {
        self.ranges.windows(2).all(|pair| pair[0].end <= pair[1].start)
            && self
                .ranges
                .last()
                .is_none_or(|range| range.end <= text_length)
    }
}

impl<'a> IntoIterator for &'a RangeList {
    type Item = &'a TokenRange;
    type IntoIter = std::slice::Iter<'a, TokenRange>;

    fn into_iter(self) -> Self::IntoIter { self.ranges.iter() }
}
