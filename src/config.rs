use log::debug;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::caret::SelectionTiming;
#[cfg(feature = "serde")]
use crate::errors::EditorError;

/// Everything needed to construct an editor apart from the payload
/// formatters, which are code rather than data.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorConfig {
    /// Regular expression matching one serialized token in canonical text.
    pub pattern: String,

    /// Number of capture groups making up a payload. Zero means the whole
    /// match becomes a single-field payload.
    #[cfg_attr(feature = "serde", serde(default = "default_payload_arity"))]
    pub payload_arity: usize,

    /// Canonical text the buffer starts with.
    #[cfg_attr(feature = "serde", serde(default))]
    pub default_text: String,

    /// Inserting exactly this text fires the trigger callback.
    #[cfg_attr(feature = "serde", serde(default))]
    pub trigger: Option<String>,

    #[cfg_attr(feature = "serde", serde(default = "default_selection_timing"))]
    pub selection_timing: SelectionTiming,
}

fn default_payload_arity() -> usize {
    debug!("Using the whole match as token payload");
    0
}

fn default_selection_timing() -> SelectionTiming {
    debug!("Using default selection timing: {:?}", SelectionTiming::default());
    SelectionTiming::default()
}

impl EditorConfig {
    #[must_use]
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            payload_arity: default_payload_arity(),
            default_text: String::new(),
            trigger: None,
            selection_timing: default_selection_timing(),
        }
    }

    #[must_use]
    pub fn with_payload_arity(mut self, payload_arity: usize) -> Self {
        self.payload_arity = payload_arity;
        self
    }

    #[must_use]
    pub fn with_default_text(mut self, default_text: impl Into<String>) -> Self {
        self.default_text = default_text.into();
        self
    }

    #[must_use]
    pub fn with_trigger(mut self, trigger: impl Into<String>) -> Self {
        self.trigger = Some(trigger.into());
        self
    }

    #[must_use]
    pub fn with_selection_timing(mut self, selection_timing: SelectionTiming) -> Self {
        self.selection_timing = selection_timing;
        self
    }

    /// Load a configuration from a YAML document.
    ///
    /// # Errors
    ///
    /// Returns `EditorError::InvalidConfig` if the document is not a valid
    /// configuration.
    #[cfg(feature = "serde")]
    pub fn from_yaml(yaml: &str) -> Result<Self, EditorError> { Ok(serde_yaml::from_str(yaml)?) }
}
