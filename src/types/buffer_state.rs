#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{types::range_list::RangeList, utils::char_len};

/// Display text together with the tokens embedded in it. Owned by a single
/// editor and only mutated through `reconcile_edit` and token insertion.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BufferState {
    pub display_text: String,
    pub ranges: RangeList,
}

impl BufferState {
    #[must_use]
    pub fn new(display_text: String, ranges: RangeList) -> Self {
        let state = Self {
            display_text,
            ranges,
        };

        debug_assert!(
            state.is_consistent(),
            "Token ranges must be sorted, disjoint and within the text"
        );

        state
    }

    /// Length of the display text in characters.
    #[must_use]
    pub fn len(&self) -> usize { char_len(&self.display_text) }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.display_text.is_empty() }

    pub fn clear(&mut self) {
        self.display_text.clear();
        self.ranges.clear();
    }

    #[must_use]
    pub fn is_consistent(&self) -> bool { self.ranges.is_consistent(self.len()) }
}

impl From<&str> for BufferState {
    fn from(text: &str) -> Self { Self::new(text.to_owned(), RangeList::new()) }
}
