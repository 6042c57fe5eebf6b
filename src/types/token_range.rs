#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::types::{payload::Payload, selection::Selection};

/// The position of one token within the display text. `start..end` is a
/// half-open interval of character indices. Only the position changes over
/// the lifetime of a token, the payload is fixed at creation.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenRange {
    pub start: usize,
    pub end: usize,
    payload: Payload,
}

impl TokenRange {
    #[must_use]
    pub fn new(start: usize, end: usize, payload: Payload) -> Self {
        debug_assert!(start <= end, "Token range must not be reversed ({start}..{end})");

        Self {
            start,
            end,
            payload,
        }
    }

    #[must_use]
    pub fn payload(&self) -> &Payload { &self.payload }

    #[must_use]
    pub fn len(&self) -> usize { self.end - self.start }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.start == self.end }

    #[must_use]
    pub fn span(&self) -> Selection { Selection::new(self.start, self.end) }

    /// Whether `offset` lies between two characters of the token, i.e. an
    /// edit starting or ending there would split it.
    #[must_use]
    pub fn strictly_contains(&self, offset: usize) -> bool {
        self.start < offset && offset < self.end
    }

    /// Whether the token shares at least one character with `span`. An empty
    /// span overlaps the token only if it lies strictly inside.
    #[must_use]
    pub fn overlaps(&self, span: Selection) -> bool {
        if span.is_caret() {
            return self.strictly_contains(span.start);
        }

        span.start < self.end && self.start < span.end
    }

    /// Whether the token lies entirely within `span`. An empty token only
    /// counts as within if the span reaches past it on both sides, so edits
    /// next to it leave it alone.
    #[must_use]
    pub fn is_within(&self, span: Selection) -> bool {
        if self.is_empty() {
            return span.start < self.start && self.end < span.end;
        }

        span.start <= self.start && self.end <= span.end && !span.is_caret()
    }

    /// Move the token by `delta` characters.
    pub fn shift(&mut self, delta: isize) {
        self.start = self.start.saturating_add_signed(delta);
        self.end = self.end.saturating_add_signed(delta);
    }
}
