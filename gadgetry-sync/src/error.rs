//! Error types for gadgetry-sync.

use std::path::PathBuf;

use thiserror::Error;

use gadgetry_core::WorkspaceError;
use gadgetry_wiki::WikiError;

/// All errors that can arise from a sync pass.
#[derive(Debug, Error)]
pub enum SyncError {
    /// An error from the local workspace layer.
    #[error("workspace error: {0}")]
    Workspace(#[from] WorkspaceError),

    /// An error from the wiki client.
    #[error("wiki error: {0}")]
    Wiki(#[from] WikiError),

    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization error (wiki list data file).
    #[error("wiki list JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A downloaded feed that cannot be interpreted.
    #[error("malformed feed: {0}")]
    Feed(String),
}

/// Convenience constructor for [`SyncError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> SyncError {
    SyncError::Io {
        path: path.into(),
        source,
    }
}
