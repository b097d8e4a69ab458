use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Tag of the "Unreliable Pipeline" result.
pub const PIPELINE: &str = "pipeline";
/// Tag of the "Shadow AI Model" result.
pub const SHADOW_AI: &str = "shadow-ai";
/// Tag of the "Data Quality" result.
pub const DATA_QUALITY: &str = "data-quality";
/// Tag of the "Atlan" result, the catalog default.
pub const ATLAN: &str = "atlan";

/// Unique tag identifying a result entry.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultId(String);

impl ResultId {
    /// Creates a new `ResultId`
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the tag as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ResultId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl Borrow<str> for ResultId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ResultId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ResultId({})", self.0)
    }
}

impl fmt::Display for ResultId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
