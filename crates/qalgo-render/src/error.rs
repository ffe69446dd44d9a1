//! Error types for rendering and artifact storage.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while storing or loading artifacts.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Filesystem failure.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        /// Path being written or read.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Artifact name or lookup path that would escape the output root.
    #[error("Invalid artifact path: {0}")]
    InvalidPath(String),
}

impl RenderError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for rendering operations.
pub type RenderResult<T> = Result<T, RenderError>;
