#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::types::selection::Selection;

/// A raw edit reported by the text surface: the characters in
/// `replaced_span` were replaced by `inserted_text`.
///
/// `commit_id`, when present, is a sequence number attached by the surface.
/// Ids must increase with every physical edit; an id that does not exceed
/// the last accepted one marks a repeated delivery of the same edit.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EditEvent {
    pub replaced_span: Selection,
    pub inserted_text: String,
    pub commit_id: Option<u64>,
}

impl EditEvent {
    #[must_use]
    pub fn new(replaced_span: Selection, inserted_text: impl Into<String>) -> Self {
        Self {
            replaced_span,
            inserted_text: inserted_text.into(),
            commit_id: None,
        }
    }

    /// Typing `text` at `position`.
    #[must_use]
    pub fn insert(position: usize, text: impl Into<String>) -> Self {
        Self::new(Selection::caret(position), text)
    }

    /// Deleting the characters in `start..end`.
    #[must_use]
    pub fn delete(start: usize, end: usize) -> Self { Self::new(Selection::new(start, end), "") }

    #[must_use]
    pub fn with_commit_id(mut self, commit_id: u64) -> Self {
        self.commit_id = Some(commit_id);
        self
    }
}
