use thiserror::Error;

/// Errors raised while constructing an editor. Edits themselves never fail:
/// spans reported by the text surface are clamped instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditorError {
    /// The token marker pattern is not a valid regular expression
    #[error("Invalid token marker pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// The payload arity asks for more capture groups than the pattern has
    #[error(
        "Token marker pattern has {available} capture groups but payloads of {arity} fields \
         were requested"
    )]
    ArityMismatch {
        /// The configured number of payload fields
        arity: usize,
        /// The number of capture groups in the pattern
        available: usize,
    },

    /// A configured trigger must contain at least one character
    #[error("The trigger string must not be empty")]
    EmptyTrigger,

    /// The configuration document could not be parsed
    #[cfg(feature = "serde")]
    #[error("Invalid editor configuration: {0}")]
    InvalidConfig(String),
}

#[cfg(feature = "serde")]
impl From<serde_yaml::Error> for EditorError {
    fn from(error: serde_yaml::Error) -> Self { EditorError::InvalidConfig(error.to_string()) }
}
