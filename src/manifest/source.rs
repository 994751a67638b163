//! Where manifest bytes come from: a remote site or a local site directory.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{CACHE_CONTROL, PRAGMA};
use tracing::{debug, instrument};
use url::Url;

use super::MANIFEST_PATH;
use super::error::ManifestError;
use crate::user_agent;

/// Default connect timeout for manifest fetches.
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Default read timeout for manifest fetches.
///
/// A hung request would otherwise leave the catalog empty forever.
pub const DEFAULT_READ_TIMEOUT_SECS: u64 = 30;

/// A place the manifest can be read from.
///
/// Uses `async_trait` so the CLI can pick a source at runtime behind
/// `Box<dyn ManifestSource>`.
#[async_trait]
pub trait ManifestSource: Send + Sync {
    /// Human-readable location for logs and error messages.
    fn location(&self) -> String;

    /// Returns the raw manifest body.
    async fn fetch(&self) -> Result<Vec<u8>, ManifestError>;
}

/// Fetches the manifest over HTTP, bypassing caches.
#[derive(Debug, Clone)]
pub struct HttpManifestSource {
    client: Client,
    url: Url,
}

impl HttpManifestSource {
    /// Creates a source for `datasets.json` under the site root `site`.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::InvalidUrl`] when `site` is not an absolute
    /// URL and [`ManifestError::Network`] when the client cannot be built.
    pub fn from_site(site: &str) -> Result<Self, ManifestError> {
        Self::with_options(
            site,
            MANIFEST_PATH,
            DEFAULT_CONNECT_TIMEOUT_SECS,
            DEFAULT_READ_TIMEOUT_SECS,
        )
    }

    /// Creates a source with an explicit manifest path and timeouts.
    ///
    /// A `site` that already ends in `.json` is taken as the manifest URL.
    ///
    /// # Errors
    ///
    /// Same as [`from_site`](Self::from_site).
    pub fn with_options(
        site: &str,
        manifest_path: &str,
        connect_timeout_secs: u64,
        read_timeout_secs: u64,
    ) -> Result<Self, ManifestError> {
        let url = manifest_url(site, manifest_path)?;
        let client = Client::builder()
            .user_agent(user_agent::default_catalog_user_agent())
            .connect_timeout(Duration::from_secs(connect_timeout_secs))
            .read_timeout(Duration::from_secs(read_timeout_secs))
            .gzip(true)
            .build()
            .map_err(|e| ManifestError::network(url.as_str(), e))?;
        Ok(Self { client, url })
    }

    /// Resolved manifest URL.
    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl ManifestSource for HttpManifestSource {
    fn location(&self) -> String {
        self.url.to_string()
    }

    #[instrument(skip(self), fields(url = %self.url))]
    async fn fetch(&self) -> Result<Vec<u8>, ManifestError> {
        let url = self.url.as_str();
        let response = self
            .client
            .get(self.url.clone())
            .header(CACHE_CONTROL, "no-cache")
            .header(PRAGMA, "no-cache")
            .send()
            .await
            .map_err(|e| transport_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            debug!(status = status.as_u16(), "manifest request failed");
            return Err(ManifestError::http_status(url, status.as_u16()));
        }

        let body = response.bytes().await.map_err(|e| transport_error(url, e))?;
        debug!(bytes = body.len(), "manifest body received");
        Ok(body.to_vec())
    }
}

/// Reads the manifest from a local site directory (or a manifest file).
#[derive(Debug, Clone)]
pub struct FileManifestSource {
    path: PathBuf,
}

impl FileManifestSource {
    /// Creates a source for `manifest_path` inside `site_dir`.
    ///
    /// A `site_dir` that ends in `.json` is taken as the manifest file.
    #[must_use]
    pub fn new(site_dir: impl Into<PathBuf>, manifest_path: &str) -> Self {
        let site_dir = site_dir.into();
        let path = if has_json_extension(&site_dir.to_string_lossy()) {
            site_dir
        } else {
            site_dir.join(manifest_path.trim_start_matches('/'))
        };
        Self { path }
    }

    /// Resolved manifest file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ManifestSource for FileManifestSource {
    fn location(&self) -> String {
        self.path.display().to_string()
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn fetch(&self) -> Result<Vec<u8>, ManifestError> {
        tokio::fs::read(&self.path)
            .await
            .map_err(|e| ManifestError::io(&self.path, e))
    }
}

/// Picks an HTTP source for `http(s)://` locations and a file source otherwise.
///
/// # Errors
///
/// Returns an error when an HTTP location cannot be turned into a manifest URL.
pub fn source_for_location(
    location: &str,
    manifest_path: &str,
    connect_timeout_secs: u64,
    read_timeout_secs: u64,
) -> Result<Box<dyn ManifestSource>, ManifestError> {
    let lower = location.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        let source = HttpManifestSource::with_options(
            location,
            manifest_path,
            connect_timeout_secs,
            read_timeout_secs,
        )?;
        Ok(Box::new(source))
    } else {
        Ok(Box::new(FileManifestSource::new(location, manifest_path)))
    }
}

fn manifest_url(site: &str, manifest_path: &str) -> Result<Url, ManifestError> {
    let site = site.trim();
    if has_json_extension(site) {
        return Url::parse(site).map_err(|_| ManifestError::invalid_url(site));
    }
    let base = if site.ends_with('/') {
        site.to_string()
    } else {
        format!("{site}/")
    };
    let base = Url::parse(&base).map_err(|_| ManifestError::invalid_url(site))?;
    if base.cannot_be_a_base() {
        return Err(ManifestError::invalid_url(site));
    }
    base.join(manifest_path.trim_start_matches('/'))
        .map_err(|_| ManifestError::invalid_url(site))
}

fn has_json_extension(location: &str) -> bool {
    Path::new(location)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

fn transport_error(url: &str, error: reqwest::Error) -> ManifestError {
    if error.is_timeout() {
        ManifestError::timeout(url)
    } else {
        ManifestError::network(url, error)
    }
}
