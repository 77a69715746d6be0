//! Error types for document loading and filtering.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or filtering an OpenAPI document.
///
/// The filters themselves never fail; these cover the surfaces around them
/// (files, network, manifest parsing and document shape).
#[derive(Debug, Error)]
pub enum FilterError {
    // IO errors (exit code 3)
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("cannot read {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[cfg(feature = "remote")]
    #[error("failed to fetch {url}: {source}")]
    NetworkError {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    // Parse errors (exit code 2)
    #[error("invalid JSON: {source}")]
    InvalidJson {
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid manifest: {source}")]
    InvalidManifest {
        #[source]
        source: serde_json::Error,
    },

    // Document errors (exit code 2)
    #[error("invalid document: {message}")]
    InvalidDocument { message: String },

    #[error("invalid schema at {path}: {message}")]
    InvalidSchema { path: String, message: String },
}

impl FilterError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            FilterError::FileNotFound { .. } | FilterError::ReadError { .. } => 3,
            #[cfg(feature = "remote")]
            FilterError::NetworkError { .. } => 3,
            _ => 2,
        }
    }
}
