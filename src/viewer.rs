//! Outbound viewer link construction.
//!
//! Viewer pages live on a separate host (an object-storage bucket behind a
//! public domain). A dataset's `r2_path` is joined onto that host.

use thiserror::Error;
use url::Url;

use crate::dataset::Dataset;

/// Public host serving the dataset viewers.
pub const DEFAULT_VIEWER_HOST: &str = "https://viewers.karospace.se";

/// Errors from viewer host configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ViewerHostError {
    /// Host string was empty after trimming.
    #[error("viewer host cannot be empty")]
    Empty,

    /// Host could not be parsed as an absolute URL.
    #[error("invalid viewer host '{host}'\n  Suggestion: Use a host such as viewers.example.com or https://viewers.example.com")]
    Invalid {
        /// The rejected host.
        host: String,
    },
}

/// Normalized viewer base URL, without a trailing slash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerHost {
    base: String,
}

impl Default for ViewerHost {
    fn default() -> Self {
        Self {
            base: DEFAULT_VIEWER_HOST.to_string(),
        }
    }
}

impl ViewerHost {
    /// Normalizes a configured host.
    ///
    /// Whitespace and trailing slashes are removed; a bare host name gets an
    /// `https://` scheme.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerHostError`] for empty or unparsable hosts.
    pub fn parse(raw: &str) -> Result<Self, ViewerHostError> {
        let trimmed = raw.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(ViewerHostError::Empty);
        }
        let lower = trimmed.to_ascii_lowercase();
        let base = if lower.starts_with("http://") || lower.starts_with("https://") {
            trimmed.to_string()
        } else {
            format!("https://{trimmed}")
        };
        match Url::parse(&base) {
            Ok(url) if url.host_str().is_some_and(|h| !h.is_empty()) => Ok(Self { base }),
            _ => Err(ViewerHostError::Invalid {
                host: raw.trim().to_string(),
            }),
        }
    }

    /// Base URL without trailing slash.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.base
    }

    /// Joins a relative viewer path onto the host with exactly one slash.
    ///
    /// Any number of leading slashes are stripped. `None` yields the host root.
    #[must_use]
    pub fn resolve_path(&self, r2_path: Option<&str>) -> String {
        let path = r2_path.unwrap_or_default().trim_start_matches('/');
        format!("{}/{path}", self.base)
    }

    /// Viewer URL for a dataset. Never fails.
    #[must_use]
    pub fn resolve(&self, dataset: &Dataset) -> String {
        self.resolve_path(dataset.r2_path.as_deref())
    }
}

impl std::fmt::Display for ViewerHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.base)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_strips_leading_slash() {
        let host = ViewerHost::parse("https://viewers.example.com").unwrap();
        let dataset = Dataset::new().with_r2_path("/foo/bar.html");
        assert_eq!(host.resolve(&dataset), "https://viewers.example.com/foo/bar.html");
    }

    #[test]
    fn test_resolve_strips_many_leading_slashes() {
        let host = ViewerHost::parse("https://viewers.example.com/").unwrap();
        assert_eq!(
            host.resolve_path(Some("///foo/bar.html")),
            "https://viewers.example.com/foo/bar.html"
        );
    }

    #[test]
    fn test_resolve_relative_path() {
        let host = ViewerHost::default();
        assert_eq!(
            host.resolve_path(Some("viewers/mouse.html")),
            "https://viewers.karospace.se/viewers/mouse.html"
        );
    }

    #[test]
    fn test_resolve_missing_path_points_at_root() {
        let host = ViewerHost::parse("viewers.example.com").unwrap();
        assert_eq!(host.resolve(&Dataset::new()), "https://viewers.example.com/");
    }

    #[test]
    fn test_parse_adds_scheme_and_strips_trailing_slashes() {
        let host = ViewerHost::parse("  viewers.example.com//  ").unwrap();
        assert_eq!(host.as_str(), "https://viewers.example.com");

        let host = ViewerHost::parse("http://localhost:8080/").unwrap();
        assert_eq!(host.as_str(), "http://localhost:8080");
    }

    #[test]
    fn test_parse_rejects_empty_host() {
        assert_eq!(ViewerHost::parse("  / "), Err(ViewerHostError::Empty));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = ViewerHost::parse("https://exa mple.com").unwrap_err();
        assert!(matches!(err, ViewerHostError::Invalid { .. }));
    }
}
