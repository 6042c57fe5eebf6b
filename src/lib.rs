//! A plain-text buffer in which some substrings are tokens: atomic units such
//! as mentions or template placeholders that are shown in a readable form
//! but stand for structured data.
//!
//! The buffer keeps the token ranges consistent while the surrounding text is
//! edited freely. Edits reaching into a token delete the whole token, tokens
//! after an edit move with the text, and the buffer can be serialized at any
//! time into canonical text where every token appears in its
//! machine-readable form.
//!
//! ```
//! use token_text::{EditEvent, MarkerParser, Payload, format_buffer, reconcile_edit};
//!
//! let parser = MarkerParser::new(r"@\[([^\]]+)\]\(id:([^\]]+)\)", 2).unwrap();
//! let mut state = parser.parse("Hello @[Alice](id:1)!", &|payload: &Payload| {
//!     format!("@{}", payload.field(0))
//! });
//! assert_eq!(state.display_text, "Hello @Alice!");
//!
//! // Backspace at the end of the token removes all of it.
//! reconcile_edit(&mut state, &EditEvent::delete(11, 12), None);
//! assert_eq!(state.display_text, "Hello !");
//!
//! let change = format_buffer(&state, &|payload: &Payload| {
//!     format!("@[{}](id:{})", payload.field(0), payload.field(1))
//! });
//! assert_eq!(change.canonical_text, "Hello !");
//! ```

mod caret;
mod config;
mod editor;
mod errors;
mod formatter;
pub mod mention;
mod parser;
mod reconciler;
mod surface;
mod types;
mod utils;

pub use caret::{CaretUpdate, DeferredSelection, RequestToken, SelectionTiming, plan_caret};
pub use config::EditorConfig;
pub use editor::{Formatters, InputStatus, RawTextInput, TokenEditor};
pub use errors::EditorError;
pub use formatter::format_buffer;
pub use parser::{MarkerParser, PayloadFormatter};
pub use reconciler::{CommitFilter, EditOutcome, EditReconciler, reconcile_edit};
pub use surface::{HeadlessSurface, TextSurface};
pub use types::{
    buffer_state::BufferState, change_data::ChangeData, edit_event::EditEvent, payload::Payload,
    range_list::RangeList, selection::Selection, token_range::TokenRange,
};

#[cfg(feature = "wasm")]
pub mod wasm;
