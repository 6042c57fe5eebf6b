mod deferred;

pub use deferred::{DeferredSelection, RequestToken};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::types::selection::Selection;

/// How a text surface accepts a caret position after its text was replaced.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionTiming {
    /// The selection is set together with the text.
    #[default]
    Immediate,

    /// The surface resets the selection once the new text lands, so the
    /// caret has to be written again one frame later.
    Deferred,
}

/// Where and when to write the caret after a buffer mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CaretUpdate {
    /// Written in the same call as the text.
    pub with_text: Option<Selection>,

    /// Written on the next frame.
    pub next_frame: Option<Selection>,
}

/// Decide how to deliver `caret`. `explicit` marks mutations after which the
/// platform's own caret would be wrong (a widened edit or a programmatic
/// insertion). With deferred timing, other edits leave the native caret
/// alone.
#[must_use]
pub fn plan_caret(timing: SelectionTiming, caret: usize, explicit: bool) -> CaretUpdate {
    let selection = Selection::caret(caret);

    match timing {
        SelectionTiming::Immediate => CaretUpdate {
            with_text: Some(selection),
            next_frame: None,
        },
        SelectionTiming::Deferred => CaretUpdate {
            with_text: None,
            next_frame: explicit.then_some(selection),
        },
    }
}
