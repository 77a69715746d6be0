//! Document loading from various sources.
//!
//! Handles loading OpenAPI documents from files, strings, and HTTP URLs.

use std::path::Path;

use serde_json::Value;

use crate::error::FilterError;

#[cfg(feature = "remote")]
use std::time::Duration;

/// Default timeout for HTTP requests (10 seconds).
#[cfg(feature = "remote")]
const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Load a document from a file path.
///
/// # Errors
///
/// Returns `FilterError::FileNotFound` if the file doesn't exist,
/// or `FilterError::InvalidJson` if the file isn't valid JSON.
pub fn load_document(path: &Path) -> Result<Value, FilterError> {
    if !path.exists() {
        return Err(FilterError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = std::fs::read_to_string(path).map_err(|source| FilterError::ReadError {
        path: path.to_path_buf(),
        source,
    })?;

    load_document_str(&content)
}

/// Load a document from a JSON string.
///
/// # Errors
///
/// Returns `FilterError::InvalidJson` if the string isn't valid JSON.
pub fn load_document_str(content: &str) -> Result<Value, FilterError> {
    serde_json::from_str(content).map_err(|source| FilterError::InvalidJson { source })
}

/// Load a document from an HTTP/HTTPS URL, e.g. a running service's
/// `/swagger/v1/swagger.json`.
///
/// Requires the `remote` feature (enabled by default).
///
/// # Errors
///
/// Returns `FilterError::NetworkError` if the request fails or the body
/// isn't valid JSON.
#[cfg(feature = "remote")]
pub fn load_document_url(url: &str) -> Result<Value, FilterError> {
    let network_error = |source| FilterError::NetworkError {
        url: url.to_string(),
        source,
    };

    let client = reqwest::blocking::Client::builder()
        .timeout(HTTP_TIMEOUT)
        .build()
        .map_err(network_error)?;

    log::debug!("fetching {}", url);
    let response = client.get(url).send().map_err(network_error)?;

    // Check for HTTP errors before parsing
    let response = response.error_for_status().map_err(network_error)?;

    response.json().map_err(network_error)
}

/// Check if a string looks like a URL (starts with http:// or https://).
pub fn is_url(s: &str) -> bool {
    s.starts_with("http://") || s.starts_with("https://")
}

/// Load a document from a file path or URL.
///
/// URLs need the `remote` feature; without it they are reported as missing
/// files.
pub fn load_document_auto(source: &str) -> Result<Value, FilterError> {
    if is_url(source) {
        #[cfg(feature = "remote")]
        {
            load_document_url(source)
        }
        #[cfg(not(feature = "remote"))]
        {
            Err(FilterError::FileNotFound {
                path: std::path::PathBuf::from(source),
            })
        }
    } else {
        load_document(Path::new(source))
    }
}
