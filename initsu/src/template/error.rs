//! Template pipeline error types

use std::path::PathBuf;
use thiserror::Error;

/// Result type for template resolution and application.
pub type TemplateResult<T> = Result<T, TemplateError>;

/// Result type for remote content retrieval.
pub type FetchResult<T> = Result<T, FetchError>;

/// Failure to retrieve a single remote file
///
/// Never surfaces past [`ContentFetcher::fetch_many`](super::ContentFetcher::fetch_many),
/// which downgrades it to a warning plus fallback content.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Remote answered with something other than HTTP 200
    #[error("GET {url} returned HTTP {status}")]
    Status {
        /// Requested URL
        url: String,
        /// HTTP status code received
        status: u16,
    },

    /// Connection, TLS, timeout or body read failure
    #[error("GET {url} failed: {message}")]
    Transport {
        /// Requested URL
        url: String,
        /// Underlying transport error, rendered
        message: String,
    },
}

impl FetchError {
    /// Create a transport error from any displayable cause
    #[must_use]
    pub fn transport(url: impl Into<String>, cause: impl std::fmt::Display) -> Self {
        Self::Transport {
            url: url.into(),
            message: cause.to_string(),
        }
    }
}

/// Errors surfaced by [`TemplateApplier`](super::TemplateApplier)
#[derive(Debug, Error)]
pub enum TemplateError {
    /// No template registered under the requested name
    #[error("template \"{0}\" not found")]
    NotFound(String),

    /// Template path would escape the project root
    #[error("template path \"{0}\" is not a relative path inside the project")]
    UnsafePath(String),

    /// Directory creation or file write failed
    #[error("failed to write {}: {source}", path.display())]
    Write {
        /// Path being created or written
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl TemplateError {
    /// Whether this error came from the filesystem
    #[must_use]
    pub const fn is_write(&self) -> bool {
        matches!(self, Self::Write { .. })
    }
}
