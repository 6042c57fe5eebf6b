#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::types::payload::Payload;

/// What the change callback receives after every accepted edit: the text as
/// displayed, the canonical text with every token serialized, and the
/// payloads of the tokens in order of appearance.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChangeData {
    pub display_text: String,
    pub canonical_text: String,
    pub payloads: Vec<Payload>,
}
