//! Projection of dataset records onto renderable cards.
//!
//! Projection never fails. Every field read has a fallback, so a sparse or
//! malformed manifest entry still yields a complete card.

pub mod activation;
pub mod thumbnail;

pub use activation::{Activation, ActivationTrigger, ElementKind};
pub use thumbnail::{DEFAULT_THUMBNAIL_PREFIX, normalize_thumbnail};

use crate::dataset::Dataset;
use crate::options::CatalogOptions;
use crate::viewer::ViewerHost;

/// Description shown when a record has none.
pub const DESCRIPTION_PLACEHOLDER: &str = "No description provided.";

/// Type badge shown when a record has no `type`.
pub const UNKNOWN_TYPE: &str = "unknown";

/// Everything the view needs to draw one card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    /// Heading: title, else slug. `None` omits the heading.
    pub title: Option<String>,
    /// Slug line, when present.
    pub slug: Option<String>,
    /// Description or placeholder.
    pub description: String,
    /// Citation line, only when present and enabled.
    pub citation: Option<String>,
    /// Type badge text.
    pub type_badge: String,
    /// Tag chips, in manifest order.
    pub tags: Vec<String>,
    /// Resolved image source, only when present and enabled.
    pub thumbnail: Option<String>,
    /// Outbound viewer URL.
    pub viewer_url: String,
    /// Whole card is a click/keyboard target.
    pub activation_target: bool,
    /// Lowercased search text, carried for views that filter client-side.
    pub search_text: String,
}

impl Card {
    /// True when the card renders a preview image.
    #[must_use]
    pub fn has_thumbnail(&self) -> bool {
        self.thumbnail.is_some()
    }
}

/// Maps records to cards under a fixed set of options.
#[derive(Debug, Clone)]
pub struct CardProjector {
    viewer_host: ViewerHost,
    thumbnail_prefix: String,
    supports_thumbnails: bool,
    show_citation: bool,
    activation_target: bool,
}

impl CardProjector {
    /// Creates a projector from catalog options.
    #[must_use]
    pub fn new(options: &CatalogOptions) -> Self {
        Self {
            viewer_host: options.viewer_host.clone(),
            thumbnail_prefix: options.thumbnail_prefix.clone(),
            supports_thumbnails: options.supports_thumbnails,
            show_citation: options.show_citation,
            activation_target: options.card_is_activation_target,
        }
    }

    /// Projects one record. `search_text` is the record's precomputed index entry.
    #[must_use]
    pub fn project(&self, dataset: &Dataset, search_text: &str) -> Card {
        let description = dataset
            .description
            .as_deref()
            .filter(|d| !d.is_empty())
            .unwrap_or(DESCRIPTION_PLACEHOLDER)
            .to_string();
        let type_badge = dataset
            .kind
            .as_deref()
            .filter(|k| !k.is_empty())
            .unwrap_or(UNKNOWN_TYPE)
            .to_string();
        let citation = if self.show_citation {
            dataset.citation.clone().filter(|c| !c.trim().is_empty())
        } else {
            None
        };
        let thumbnail = if self.supports_thumbnails {
            normalize_thumbnail(dataset.thumbnail.as_deref(), &self.thumbnail_prefix)
        } else {
            None
        };

        Card {
            title: dataset.display_title().map(str::to_string),
            slug: dataset.slug.clone().filter(|s| !s.is_empty()),
            description,
            citation,
            type_badge,
            tags: dataset.tags().to_vec(),
            thumbnail,
            viewer_url: self.viewer_host.resolve(dataset),
            activation_target: self.activation_target,
            search_text: search_text.to_string(),
        }
    }
}
