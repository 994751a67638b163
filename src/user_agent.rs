//! User-Agent string for manifest requests.

/// Project URL for User-Agent identification (good citizenship; RFC 9308).
const PROJECT_UA_URL: &str = "https://github.com/karospace/karospace-catalog";

/// Default User-Agent for manifest fetches.
#[must_use]
pub(crate) fn default_catalog_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("karospace-catalog/{version} (dataset-catalog; +{PROJECT_UA_URL})")
}
