//! Thumbnail path normalization.
//!
//! Thumbnails come from three places: an external CDN, inline data URIs, or a
//! directory next to the catalog page. Absolute forms pass through; anything
//! else is made explicitly page-relative.

/// Prefix applied to page-relative thumbnail paths.
pub const DEFAULT_THUMBNAIL_PREFIX: &str = "./";

const ABSOLUTE_PREFIXES: [&str; 3] = ["http://", "https://", "data:"];

/// Resolves a manifest thumbnail value to an image source.
///
/// Returns `None` for absent, empty or whitespace-only values.
#[must_use]
pub fn normalize_thumbnail(raw: Option<&str>, prefix: &str) -> Option<String> {
    let value = raw?.trim();
    if value.is_empty() {
        return None;
    }
    if is_absolute(value) {
        return Some(value.to_string());
    }
    let relative = value.strip_prefix("./").unwrap_or(value);
    Some(format!("{prefix}{relative}"))
}

fn is_absolute(value: &str) -> bool {
    if value.starts_with('/') {
        return true;
    }
    ABSOLUTE_PREFIXES.iter().any(|scheme| {
        value
            .get(..scheme.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(scheme))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_path_gets_page_prefix() {
        assert_eq!(
            normalize_thumbnail(Some("thumbs/a.jpg"), DEFAULT_THUMBNAIL_PREFIX).as_deref(),
            Some("./thumbs/a.jpg")
        );
    }

    #[test]
    fn test_dot_relative_path_is_not_double_prefixed() {
        assert_eq!(
            normalize_thumbnail(Some("./thumbs/a.jpg"), "./").as_deref(),
            Some("./thumbs/a.jpg")
        );
        assert_eq!(
            normalize_thumbnail(Some("thumbs/a.jpg"), "site/").as_deref(),
            Some("site/thumbs/a.jpg")
        );
    }

    #[test]
    fn test_absolute_sources_pass_through() {
        for value in [
            "https://cdn/x.jpg",
            "http://cdn/x.jpg",
            "HTTPS://CDN/X.JPG",
            "data:image/png;base64,AAAA",
            "/static/thumbs/x.jpg",
        ] {
            assert_eq!(
                normalize_thumbnail(Some(value), "./").as_deref(),
                Some(value),
                "value {value}"
            );
        }
    }

    #[test]
    fn test_blank_values_yield_no_thumbnail() {
        assert_eq!(normalize_thumbnail(None, "./"), None);
        assert_eq!(normalize_thumbnail(Some(""), "./"), None);
        assert_eq!(normalize_thumbnail(Some("   \t"), "./"), None);
    }

    #[test]
    fn test_surrounding_whitespace_is_trimmed() {
        assert_eq!(
            normalize_thumbnail(Some("  thumbs/a.jpg "), "./").as_deref(),
            Some("./thumbs/a.jpg")
        );
    }
}
