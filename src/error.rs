//! Error types for yir-harvest.
//!
//! Per-URL fetch failures live in [`crate::fetch::FetchError`] and are never
//! fatal to a run. The variants here either abort a run at startup (input
//! errors) or signal a bookkeeping bug in the merge (store errors).

use std::path::PathBuf;

use crate::fetch::FetchError;

/// Error type for catalog and pipeline operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The URL list file does not exist.
    #[error("URL list not found: {}", .0.display())]
    MissingInputFile(PathBuf),

    /// The URL list file holds no URLs after trimming blank lines.
    #[error("URL list is empty: {}", .0.display())]
    EmptyUrlList(PathBuf),

    /// An insertion was attempted for a URL the catalog already holds.
    #[error("catalog already contains {0}")]
    DuplicateUrl(String),

    /// An enrichment was attempted for a URL the catalog does not hold.
    #[error("no catalog entry for {0}")]
    EntryNotFound(String),

    /// The catalog document parsed but violates an invariant.
    #[error("invalid catalog: {0}")]
    InvalidCatalog(String),

    /// Reading or writing a file failed.
    #[error("I/O failed for {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The catalog document is not valid JSON for the entry schema.
    #[error("catalog is malformed: {0}")]
    Json(#[from] serde_json::Error),

    /// Fetching a page failed.
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for catalog and pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;
