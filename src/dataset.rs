//! Dataset records as they appear in the catalog manifest.
//!
//! Records are decoded leniently: a manifest entry that is not an object, or
//! whose fields carry the wrong JSON type, still becomes a [`Dataset`] with
//! those fields absent. Callers downstream default every field they read, so
//! a malformed entry degrades to placeholder text instead of failing the load.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One manifest entry describing a single viewable dataset.
///
/// Immutable once loaded. Every field is optional because the manifest is
/// hand-authored and not schema-checked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Value")]
pub struct Dataset {
    /// Stable identifier, shown on the card.
    pub slug: Option<String>,
    /// Display name.
    pub title: Option<String>,
    /// Free-text description.
    pub description: Option<String>,
    /// Optional citation line.
    pub citation: Option<String>,
    /// Short classification label (`type` in the manifest).
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Ordered tag labels. `None` when the manifest omits the field.
    pub tags: Option<Vec<String>>,
    /// Path or URL of a preview image.
    pub thumbnail: Option<String>,
    /// Path of the viewer resource, relative to the viewer host.
    pub r2_path: Option<String>,
}

impl Dataset {
    /// Creates an empty record; handy as a builder seed in tests and tools.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the slug.
    #[must_use]
    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    /// Sets the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the citation.
    #[must_use]
    pub fn with_citation(mut self, citation: impl Into<String>) -> Self {
        self.citation = Some(citation.into());
        self
    }

    /// Sets the type label.
    #[must_use]
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    /// Sets the tag list.
    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the thumbnail path.
    #[must_use]
    pub fn with_thumbnail(mut self, thumbnail: impl Into<String>) -> Self {
        self.thumbnail = Some(thumbnail.into());
        self
    }

    /// Sets the viewer path.
    #[must_use]
    pub fn with_r2_path(mut self, r2_path: impl Into<String>) -> Self {
        self.r2_path = Some(r2_path.into());
        self
    }

    /// Tags as a slice; an absent list reads as empty.
    #[must_use]
    pub fn tags(&self) -> &[String] {
        self.tags.as_deref().unwrap_or_default()
    }

    /// Title shown on the card: `title`, else `slug`, else nothing.
    #[must_use]
    pub fn display_title(&self) -> Option<&str> {
        non_empty(self.title.as_deref()).or_else(|| non_empty(self.slug.as_deref()))
    }
}

impl From<Value> for Dataset {
    fn from(value: Value) -> Self {
        let Value::Object(map) = value else {
            return Self::default();
        };
        Self {
            slug: text_field(&map, "slug"),
            title: text_field(&map, "title"),
            description: text_field(&map, "description"),
            citation: text_field(&map, "citation"),
            kind: text_field(&map, "type"),
            tags: tags_field(&map),
            thumbnail: text_field(&map, "thumbnail"),
            r2_path: text_field(&map, "r2_path"),
        }
    }
}

/// Reads a scalar field as text. Numbers and booleans are stringified the way
/// they would print; `null`, arrays and objects read as absent.
fn text_field(map: &Map<String, Value>, key: &str) -> Option<String> {
    match map.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn tags_field(map: &Map<String, Value>) -> Option<Vec<String>> {
    match map.get("tags")? {
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s.clone()),
                    Value::Number(n) => Some(n.to_string()),
                    Value::Bool(b) => Some(b.to_string()),
                    _ => None,
                })
                .collect(),
        ),
        _ => None,
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_dataset_from_full_object() {
        let dataset: Dataset = serde_json::from_value(json!({
            "slug": "mouse-brain",
            "title": "Mouse Brain",
            "description": "Coronal sections",
            "citation": "Doe et al. 2024",
            "type": "xenium",
            "tags": ["brain", "mouse"],
            "thumbnail": "thumbs/mouse-brain.jpg",
            "r2_path": "viewers/mouse-brain.html"
        }))
        .unwrap();

        assert_eq!(dataset.slug.as_deref(), Some("mouse-brain"));
        assert_eq!(dataset.kind.as_deref(), Some("xenium"));
        assert_eq!(dataset.tags(), ["brain", "mouse"]);
        assert_eq!(dataset.r2_path.as_deref(), Some("viewers/mouse-brain.html"));
    }

    #[test]
    fn test_dataset_missing_fields_are_none() {
        let dataset: Dataset = serde_json::from_value(json!({})).unwrap();
        assert_eq!(dataset, Dataset::default());
        assert!(dataset.tags().is_empty());
    }

    #[test]
    fn test_dataset_non_object_entry_degrades_to_empty() {
        for value in [json!(null), json!(42), json!("text"), json!([1, 2])] {
            let dataset: Dataset = serde_json::from_value(value).unwrap();
            assert_eq!(dataset, Dataset::default());
        }
    }

    #[test]
    fn test_dataset_wrong_types_are_tolerated() {
        let dataset: Dataset = serde_json::from_value(json!({
            "title": 2024,
            "description": null,
            "tags": "not-a-list",
            "r2_path": {"nested": true}
        }))
        .unwrap();

        assert_eq!(dataset.title.as_deref(), Some("2024"));
        assert!(dataset.description.is_none());
        assert!(dataset.tags.is_none());
        assert!(dataset.r2_path.is_none());
    }

    #[test]
    fn test_dataset_tags_skip_non_scalar_items() {
        let dataset: Dataset =
            serde_json::from_value(json!({"tags": ["a", {"x": 1}, 3, null, "b"]})).unwrap();
        assert_eq!(dataset.tags(), ["a", "3", "b"]);
    }

    #[test]
    fn test_display_title_falls_back_to_slug() {
        let dataset = Dataset::new().with_slug("only-slug");
        assert_eq!(dataset.display_title(), Some("only-slug"));

        let dataset = Dataset::new().with_slug("s").with_title("");
        assert_eq!(dataset.display_title(), Some("s"));

        assert_eq!(Dataset::new().display_title(), None);
    }
}
