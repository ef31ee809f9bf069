//! Error types for workerhub
//!
//! Library errors use `thiserror`; the binary wraps them in `anyhow` at the
//! command boundary.

use std::path::PathBuf;
use thiserror::Error;

use crate::config::ConfigError;
use crate::domain::ports::ManifestError;

/// Result type alias for workerhub operations
pub type HubResult<T> = Result<T, HubError>;

/// Main error type for workerhub operations
///
/// Only tree-wide failures surface as a `HubError`. Problems local to a single
/// example or candidate are downgraded to `DiscoveryIssue`s instead.
#[derive(Error, Debug)]
pub enum HubError {
    /// The examples root itself could not be listed
    #[error("examples root '{path}' is unreadable: {message}")]
    UnreadableRoot { path: PathBuf, message: String },

    /// Directory not found
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Configuration file could not be read or parsed
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Root or example manifest failure
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// File watcher could not be started
    #[error("file watcher failed: {0}")]
    Watch(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
