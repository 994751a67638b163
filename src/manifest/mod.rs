//! Dataset manifest loading.
//!
//! The manifest is a JSON document at a fixed path relative to the site root
//! (`datasets.json`) whose root value must be an array of dataset records.
//! It can be served over HTTP or read from a local site directory.
//!
//! # Example
//!
//! ```no_run
//! use catalog_core::manifest::{HttpManifestSource, load};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let source = HttpManifestSource::from_site("https://catalog.example.com/")?;
//! let datasets = load(&source).await?;
//! println!("Loaded {} datasets", datasets.len());
//! # Ok(())
//! # }
//! ```

mod error;
mod source;

pub use error::ManifestError;
pub use source::{
    DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_READ_TIMEOUT_SECS, FileManifestSource,
    HttpManifestSource, ManifestSource, source_for_location,
};

use serde_json::Value;
use tracing::{debug, info, instrument};

use crate::dataset::Dataset;

/// Manifest path relative to the site root.
pub const MANIFEST_PATH: &str = "datasets.json";

/// Fetches the manifest from `source` and decodes it.
///
/// Records are returned in manifest order with no per-record validation.
///
/// # Errors
///
/// Returns [`ManifestError`] when the fetch fails, the body is not JSON, or
/// the root value is not an array.
#[instrument(skip(source), fields(location = %source.location()))]
pub async fn load(source: &dyn ManifestSource) -> Result<Vec<Dataset>, ManifestError> {
    let body = source.fetch().await?;
    let datasets = parse_manifest(&body)?;
    info!(datasets = datasets.len(), "manifest loaded");
    Ok(datasets)
}

/// Decodes a manifest body.
///
/// # Errors
///
/// Returns [`ManifestError::Decode`] for invalid JSON and
/// [`ManifestError::NotArray`] when the root is an object, scalar or `null`.
pub fn parse_manifest(body: &[u8]) -> Result<Vec<Dataset>, ManifestError> {
    let root: Value = serde_json::from_slice(body).map_err(ManifestError::decode)?;
    let Value::Array(entries) = root else {
        let found = json_kind(&root);
        debug!(found, "manifest root is not an array");
        return Err(ManifestError::not_array(found));
    };
    Ok(entries.into_iter().map(Dataset::from).collect())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
