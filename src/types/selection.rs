#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
#[cfg(feature = "wasm")]
use wasm_bindgen::prelude::*;

/// A caret (`start == end`) or a selected span of the display text, in
/// character indices. Also used to express the selection a consumer would
/// like to see after an edit; that intent is advisory and may be overridden
/// when an edit touches a token.
#[cfg_attr(feature = "wasm", wasm_bindgen)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

#[cfg_attr(feature = "wasm", wasm_bindgen)]
impl Selection {
    #[cfg_attr(feature = "wasm", wasm_bindgen(constructor))]
    #[must_use]
    pub fn new(start: usize, end: usize) -> Self { Self { start, end } }

    /// A collapsed selection at `position`.
    #[must_use]
    pub fn caret(position: usize) -> Self { Self::new(position, position) }

    #[must_use]
    pub fn is_caret(&self) -> bool { self.start == self.end }
}

impl Selection {
    /// The same span with `start <= end`.
    #[must_use]
    pub fn normalized(self) -> Self {
        if self.start <= self.end {
            self
        } else {
            Self::new(self.end, self.start)
        }
    }

    /// The normalized span with both ends clamped into `0..=length`.
    #[must_use]
    pub fn clamped(self, length: usize) -> Self {
        let Self { start, end } = self.normalized();
        Self::new(start.min(length), end.min(length))
    }

    #[must_use]
    pub fn len(&self) -> usize { self.end.abs_diff(self.start) }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.is_caret() }
}
