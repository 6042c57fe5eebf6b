//! Ready-made configuration for user mentions. In canonical text a mention
//! is serialized as `@[username](id:42)`; in the text input it reads
//! `@username`. Typing `@` fires the trigger listener so a user picker can be
//! opened, and `TokenEditor::complete_trigger` inserts the picked user.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
#[cfg(feature = "wasm")]
use wasm_bindgen::prelude::*;

use crate::{
    config::EditorConfig,
    editor::Formatters,
    types::{change_data::ChangeData, payload::Payload},
};

/// Matches a serialized mention, capturing the user name and the id.
pub const DEFAULT_MENTION_PATTERN: &str = r"@\[([^\]]+?)\]\(id:([^\]]+?)\)";

pub const MENTION_TRIGGER: &str = "@";

#[cfg_attr(feature = "wasm", wasm_bindgen(getter_with_clone))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MentionUser {
    pub username: String,
    pub id: String,
}

impl MentionUser {
    #[must_use]
    pub fn new(username: impl Into<String>, id: impl ToString) -> Self {
        Self {
            username: username.into(),
            id: id.to_string(),
        }
    }

    /// Read a user back from a mention token's payload.
    #[must_use]
    pub fn from_payload(payload: &Payload) -> Self {
        Self::new(payload.field(0), payload.field(1))
    }

    #[must_use]
    pub fn to_payload(&self) -> Payload {
        Payload::new(vec![self.username.clone(), self.id.clone()])
    }
}

/// Editor configuration for mentions, starting from `default_text`.
#[must_use]
pub fn config(default_text: impl Into<String>) -> EditorConfig {
    EditorConfig::new(DEFAULT_MENTION_PATTERN)
        .with_payload_arity(2)
        .with_default_text(default_text)
        .with_trigger(MENTION_TRIGGER)
}

/// Renders mentions as `@username` in the input and `@[username](id:id)` in
/// canonical text.
#[must_use]
pub fn formatters() -> Formatters {
    Formatters::new(
        |payload: &Payload| format!("@{}", payload.field(0)),
        |payload: &Payload| format!("@[{}](id:{})", payload.field(0), payload.field(1)),
    )
}

/// The users mentioned in a change, in order of appearance.
#[must_use]
pub fn users(change: &ChangeData) -> Vec<MentionUser> {
    change.payloads.iter().map(MentionUser::from_payload).collect()
}
