//! Error types for manifest loading.
//!
//! Two failure families surface from the loader: transport failures (the
//! manifest could not be fetched) and format failures (it was fetched but is
//! not a JSON array). Both are recoverable; the catalog turns either into an
//! empty-state message.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading the dataset manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// The server answered with a non-success status.
    #[error("HTTP {status} loading {url}")]
    HttpStatus {
        /// Manifest URL.
        url: String,
        /// HTTP status code.
        status: u16,
    },

    /// The manifest location could not be turned into a URL.
    #[error("invalid manifest URL: {url}")]
    InvalidUrl {
        /// The offending location.
        url: String,
    },

    /// Network-level failure (DNS, connection refused, TLS, etc.)
    #[error("network error loading {url}: {source}")]
    Network {
        /// Manifest URL.
        url: String,
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },

    /// The request did not complete within the configured timeout.
    #[error("timeout loading {url}")]
    Timeout {
        /// Manifest URL.
        url: String,
    },

    /// A local manifest file could not be read.
    #[error("IO error reading {path}: {source}")]
    Io {
        /// Manifest file path.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The manifest body is not valid JSON.
    #[error("manifest is not valid JSON: {source}")]
    Decode {
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// The manifest decoded, but its root value is not an array.
    #[error("manifest must be a JSON array, found {found}")]
    NotArray {
        /// JSON kind of the root value (`object`, `null`, `string`, ...).
        found: &'static str,
    },
}

impl ManifestError {
    /// Creates an HTTP status error.
    pub fn http_status(url: impl Into<String>, status: u16) -> Self {
        Self::HttpStatus {
            url: url.into(),
            status,
        }
    }

    /// Creates a network error from a reqwest error.
    pub fn network(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Network {
            url: url.into(),
            source,
        }
    }

    /// Creates an invalid URL error.
    pub fn invalid_url(url: impl Into<String>) -> Self {
        Self::InvalidUrl { url: url.into() }
    }

    /// Creates a timeout error.
    pub fn timeout(url: impl Into<String>) -> Self {
        Self::Timeout { url: url.into() }
    }

    /// Creates an IO error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Creates a decode error.
    #[must_use]
    pub fn decode(source: serde_json::Error) -> Self {
        Self::Decode { source }
    }

    /// Creates a wrong-shape error.
    #[must_use]
    pub fn not_array(found: &'static str) -> Self {
        Self::NotArray { found }
    }

    /// True for failures where the manifest arrived but had the wrong shape.
    #[must_use]
    pub fn is_format_error(&self) -> bool {
        matches!(self, Self::Decode { .. } | Self::NotArray { .. })
    }

    /// HTTP status carried by the error, if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            Self::Network { source, .. } => source.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_error_http_status_display() {
        let error = ManifestError::http_status("https://example.com/datasets.json", 404);
        let msg = error.to_string();
        assert!(msg.contains("404"), "Expected '404' in: {msg}");
        assert!(msg.contains("datasets.json"), "Expected URL in: {msg}");
        assert_eq!(error.status(), Some(404));
        assert!(!error.is_format_error());
    }

    #[test]
    fn test_manifest_error_not_array_display() {
        let error = ManifestError::not_array("object");
        let msg = error.to_string();
        assert!(msg.contains("JSON array"), "Expected shape hint in: {msg}");
        assert!(msg.contains("object"), "Expected found kind in: {msg}");
        assert!(error.is_format_error());
        assert_eq!(error.status(), None);
    }

    #[test]
    fn test_manifest_error_decode_is_format_error() {
        let source = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
        let error = ManifestError::decode(source);
        assert!(error.is_format_error());
        assert!(error.to_string().contains("not valid JSON"));
    }

    #[test]
    fn test_manifest_error_io_display() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let error = ManifestError::io("/srv/site/datasets.json", io_error);
        let msg = error.to_string();
        assert!(msg.contains("/srv/site/datasets.json"), "Expected path in: {msg}");
        assert!(!error.is_format_error());
    }

    #[test]
    fn test_manifest_error_timeout_display() {
        let error = ManifestError::timeout("https://example.com/datasets.json");
        assert!(error.to_string().contains("timeout"));
    }
}
