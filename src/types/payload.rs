use std::ops::Deref;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The structured data a token stands for, e.g. a user name and an id. The
/// buffer never interprets it, it is only handed to the payload formatters.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Payload(Vec<String>);

impl Payload {
    #[must_use]
    pub fn new(fields: Vec<String>) -> Self { Self(fields) }

    #[must_use]
    pub fn into_inner(self) -> Vec<String> { self.0 }

    /// The field at `index`, or an empty string when the payload is shorter.
    #[must_use]
    pub fn field(&self, index: usize) -> &str { self.0.get(index).map_or("", String::as_str) }
}

impl Deref for Payload {
    type Target = [String];

    fn deref(&self) -> &Self::Target { &self.0 }
}

impl From<Vec<String>> for Payload {
    fn from(fields: Vec<String>) -> Self { Self(fields) }
}

impl From<Vec<&str>> for Payload {
    fn from(fields: Vec<&str>) -> Self { Self(fields.into_iter().map(str::to_owned).collect()) }
}

impl<const N: usize> From<[&str; N]> for Payload {
    fn from(fields: [&str; N]) -> Self { Self(fields.into_iter().map(str::to_owned).collect()) }
}
