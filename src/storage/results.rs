//! Storage result types
//!
//! Defines result structures returned by storage operations.

use std::path::PathBuf;

/// Result of a directory listing operation.
///
/// A listing always renders: when the request was rejected or the read
/// failed, `entries` is empty and `error` carries the reason.
#[derive(Debug, Clone)]
pub struct Listing {
    pub base_path: String,
    pub entries: Vec<String>,
    pub error: Option<String>,
}

impl Listing {
    /// An empty listing annotated with an error message
    pub fn annotated(base_path: String, error: impl Into<String>) -> Self {
        Self {
            base_path,
            entries: Vec::new(),
            error: Some(error.into()),
        }
    }
}

/// Outcome of a listing request: either a browsable directory page or the
/// raw contents of a markup document.
#[derive(Debug, Clone)]
pub enum ListOutcome {
    Page(Listing),
    Document(String),
}

/// Result of a file storage operation
#[derive(Debug, Clone)]
pub struct StoreResult {
    pub file_path: PathBuf,
}
