//! Error types for the tally core

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failures surfaced by tally operations.
///
/// A missing item is not an error; lookups signal it with [`NOT_FOUND`](crate::core::tally::NOT_FOUND).
#[derive(Debug, Error)]
pub enum TallyError {
    /// The input source does not exist or could not be read
    #[error("input not found or unreadable: {}", path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The output destination could not be created or written
    #[error("failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl TallyError {
    pub fn not_found(path: impl Into<PathBuf>, source: io::Error) -> Self {
        TallyError::NotFound {
            path: path.into(),
            source,
        }
    }

    pub fn write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        TallyError::Write {
            path: path.into(),
            source,
        }
    }

    /// Stable code used in rendered error output
    pub fn code(&self) -> &'static str {
        match self {
            TallyError::NotFound { .. } => "NOT_FOUND",
            TallyError::Write { .. } => "WRITE_ERROR",
        }
    }
}

pub type Result<T> = std::result::Result<T, TallyError>;
