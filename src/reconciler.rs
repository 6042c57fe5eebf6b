mod commit_filter;

pub use commit_filter::CommitFilter;
use log::debug;

use crate::{
    types::{
        buffer_state::BufferState, edit_event::EditEvent, range_list::RangeList,
        selection::Selection, token_range::TokenRange,
    },
    utils::{char_len, string_builder::StringBuilder},
};

/// The result of applying one edit to a buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditOutcome {
    /// The span that was actually replaced, after clamping and widening.
    pub replaced_span: Selection,

    /// Tokens deleted by the edit.
    pub removed: Vec<TokenRange>,

    /// Where the caret should go.
    pub caret: usize,

    /// Whether the reported span cut into a token and had to be widened. The
    /// caret position is then forced, regardless of what the consumer asked
    /// for. The same holds for a single typed character.
    pub widened: bool,
}

/// Apply `event` to `state`, keeping the token ranges consistent.
///
/// A token is never partially edited: if either end of the replaced span
/// falls inside a token, the span is widened to cover the whole token, and
/// every token within the resulting span is deleted. Tokens after the span
/// are moved by the change in length; tokens before it are untouched.
///
/// Spans outside of the text are clamped to it, since the surface may report
/// an edit that raced with a programmatic `clear`.
///
/// The caret lands right after the inserted text when the span was widened or
/// when a single character was typed. Otherwise `intent` wins if given.
///
/// # Panics
///
/// Panics if the text length doesn't fit in `isize`.
pub fn reconcile_edit(
    state: &mut BufferState,
    event: &EditEvent,
    intent: Option<Selection>,
) -> EditOutcome {
    let text_length = state.len();
    let requested = event.replaced_span.clamped(text_length);

    if requested != event.replaced_span.normalized() {
        debug!(
            "Clamped edit span {}..{} to {}..{} (text has {text_length} characters)",
            event.replaced_span.start, event.replaced_span.end, requested.start, requested.end
        );
    }

    let span = widen_to_tokens(&state.ranges, requested);
    let widened = span != requested;

    if widened {
        debug!(
            "Widened edit span {}..{} to {}..{} to keep tokens whole",
            requested.start, requested.end, span.start, span.end
        );
    }

    let removed = state.ranges.remove_within(span);

    let mut builder = StringBuilder::new(&state.display_text);
    builder.retain_until(span.start);
    builder.delete(span.len());
    builder.insert(&event.inserted_text);
    state.display_text = builder.build();

    let inserted_length = char_len(&event.inserted_text);
    let delta = isize::try_from(inserted_length).expect("inserted length must fit in isize")
        - isize::try_from(span.len()).expect("replaced length must fit in isize");

    state.ranges.shift_from(span.end, delta);
    state.ranges.sort();

    debug_assert!(
        state.is_consistent(),
        "Edit left the token ranges inconsistent: {:?}",
        state.ranges
    );

    let natural_caret = span.start + inserted_length;
    let typed_one_character = span.is_caret() && inserted_length == 1;

    let caret = if widened || typed_one_character {
        natural_caret
    } else {
        intent.map_or(natural_caret, |intent| {
            intent.clamped(char_len(&state.display_text)).end
        })
    };

    EditOutcome {
        replaced_span: span,
        removed,
        caret,
        widened,
    }
}

/// Extend `span` so that neither of its ends lies inside a token.
fn widen_to_tokens(ranges: &RangeList, span: Selection) -> Selection {
    let mut widened = span;

    for range in ranges.overlapping(span) {
        if range.strictly_contains(widened.start) {
            widened.start = range.start;
        }

        if range.strictly_contains(widened.end) {
            widened.end = range.end;
        }
    }

    widened
}

/// Drops repeated deliveries of the same edit before handing the rest to
/// `reconcile_edit`.
#[derive(Debug, Clone, Default)]
pub struct EditReconciler {
    commits: CommitFilter,
}

impl EditReconciler {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Apply `event` unless it repeats an already processed commit, in which
    /// case the state is left untouched and `None` is returned.
    pub fn apply(
        &mut self,
        state: &mut BufferState,
        event: &EditEvent,
        intent: Option<Selection>,
    ) -> Option<EditOutcome> {
        if !self.commits.accept(event.commit_id) {
            return None;
        }

        Some(reconcile_edit(state, event, intent))
    }
}
