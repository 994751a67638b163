//! Feature flags and deploy-time settings shared by projection, indexing and
//! rendering.

use crate::card::thumbnail::DEFAULT_THUMBNAIL_PREFIX;
use crate::search::IndexFields;
use crate::theme::Theme;
use crate::viewer::ViewerHost;

/// Catalog behaviour switches.
///
/// The default is the full-featured catalog: thumbnails, citation lines,
/// whole-card activation and the theme toggle all enabled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogOptions {
    /// Host serving viewer pages.
    pub viewer_host: ViewerHost,
    /// Prefix for page-relative thumbnail paths.
    pub thumbnail_prefix: String,
    /// Render preview images.
    pub supports_thumbnails: bool,
    /// Whole card opens the viewer on click, `Enter` or `Space`.
    pub card_is_activation_target: bool,
    /// Page carries a light/dark toggle.
    pub has_theme_toggle: bool,
    /// Show the citation line and include it in the search text.
    pub show_citation: bool,
    /// Theme used when no preference is stored.
    pub system_theme: Theme,
}

impl Default for CatalogOptions {
    fn default() -> Self {
        Self {
            viewer_host: ViewerHost::default(),
            thumbnail_prefix: DEFAULT_THUMBNAIL_PREFIX.to_string(),
            supports_thumbnails: true,
            card_is_activation_target: true,
            has_theme_toggle: true,
            show_citation: true,
            system_theme: Theme::Light,
        }
    }
}

impl CatalogOptions {
    /// The plain catalog: no thumbnails, no citation, link-only activation,
    /// no theme toggle.
    #[must_use]
    pub fn minimal() -> Self {
        Self {
            supports_thumbnails: false,
            card_is_activation_target: false,
            has_theme_toggle: false,
            show_citation: false,
            ..Self::default()
        }
    }

    /// Search fields matching what the cards display.
    #[must_use]
    pub fn index_fields(&self) -> IndexFields {
        if self.show_citation {
            IndexFields::Rich
        } else {
            IndexFields::Minimal
        }
    }
}
