//! Result model
//!
//! Every report and lookup is mapped to these types before rendering.

use serde::{Deserialize, Serialize};

/// One distinct item and how many times it was purchased
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ItemCount {
    /// Normalized (trimmed, lowercase) item name
    pub item: String,
    pub count: usize,
}

impl ItemCount {
    pub fn new(item: impl Into<String>, count: usize) -> Self {
        Self {
            item: item.into(),
            count,
        }
    }

    /// The `"<name> <count>"` line used by listings and the frequency file
    pub fn to_line(&self) -> String {
        format!("{} {}", self.item, self.count)
    }
}

impl From<(String, usize)> for ItemCount {
    fn from((item, count): (String, usize)) -> Self {
        Self { item, count }
    }
}

/// Outcome of a single-item lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lookup {
    /// Normalized query
    pub item: String,
    /// Occurrences, or -1 when the item never appears
    pub count: i64,
}

impl Lookup {
    pub fn new(item: impl Into<String>, count: i64) -> Self {
        Self {
            item: item.into(),
            count,
        }
    }

    pub fn is_found(&self) -> bool {
        self.count >= 0
    }
}

/// Error entry for machine-readable output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorItem {
    pub code: String,
    pub message: String,
}

impl ErrorItem {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

impl From<&crate::core::error::TallyError> for ErrorItem {
    fn from(err: &crate::core::error::TallyError) -> Self {
        Self::new(err.code(), err.to_string())
    }
}
