//! Catalog state and event handling.
//!
//! [`Catalog`] owns the working set loaded at startup together with its
//! search index. Filtering always derives a fresh view from that immutable
//! set. Page events are plain values handed to [`Catalog::handle`], so a test
//! can drive the catalog exactly as the page would.

use tracing::{debug, info, instrument, warn};

use crate::card::{Activation, CardProjector};
use crate::dataset::Dataset;
use crate::manifest::{self, ManifestSource};
use crate::options::CatalogOptions;
use crate::render::{CatalogView, Renderer, load_failure_message};
use crate::search::{SearchIndex, normalize_query};
use crate::theme::{Theme, ThemeStore, resolve_theme, toggle_theme};

/// Something that happened on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogEvent {
    /// The search input changed to this raw value.
    QueryChanged(String),
    /// The image of the card at `slot` failed to load.
    ThumbnailFailed {
        /// Display position of the card.
        slot: usize,
    },
    /// The card at `slot` was clicked or received a key press.
    CardActivated {
        /// Display position of the card.
        slot: usize,
        /// Trigger and origin of the activation.
        activation: Activation,
    },
}

/// The loaded catalog and what it currently shows.
#[derive(Debug, Clone)]
pub struct Catalog {
    datasets: Vec<Dataset>,
    index: SearchIndex,
    options: CatalogOptions,
    renderer: Renderer,
    query: String,
    visible: Vec<usize>,
    load_error: Option<String>,
}

impl Catalog {
    /// Builds a catalog over `datasets`, indexing each record once.
    #[must_use]
    pub fn new(datasets: Vec<Dataset>, options: CatalogOptions) -> Self {
        let index = SearchIndex::build(&datasets, options.index_fields());
        let renderer = Renderer::new(CardProjector::new(&options));
        let visible = (0..datasets.len()).collect();
        Self {
            datasets,
            index,
            options,
            renderer,
            query: String::new(),
            visible,
            load_error: None,
        }
    }

    /// Loads the manifest and draws the full catalog.
    ///
    /// A failed load clears the card area, reports the error in the empty
    /// state and yields an empty catalog that still accepts events.
    #[instrument(skip_all, fields(location = %source.location()))]
    pub async fn startup(
        source: &dyn ManifestSource,
        options: CatalogOptions,
        view: &mut dyn CatalogView,
    ) -> Self {
        match manifest::load(source).await {
            Ok(datasets) => {
                let mut catalog = Self::new(datasets, options);
                catalog.render_all(view);
                catalog
            }
            Err(error) => {
                warn!(error = %error, "manifest load failed");
                let mut catalog = Self::new(Vec::new(), options);
                let message = load_failure_message(&error);
                catalog.renderer.render_failure(view, &message);
                catalog.load_error = Some(message);
                catalog
            }
        }
    }

    /// Resolves the theme from `store` and applies it, when the toggle is enabled.
    pub fn apply_stored_theme(
        &self,
        store: &dyn ThemeStore,
        view: &mut dyn CatalogView,
    ) -> Option<Theme> {
        if !self.options.has_theme_toggle {
            return None;
        }
        let theme = resolve_theme(store, self.options.system_theme);
        view.set_theme(theme);
        Some(theme)
    }

    /// Flips the theme and persists it, when the toggle is enabled.
    pub fn toggle_theme(
        &self,
        store: &dyn ThemeStore,
        current: Theme,
        view: &mut dyn CatalogView,
    ) -> Option<Theme> {
        if !self.options.has_theme_toggle {
            return None;
        }
        let next = toggle_theme(store, current);
        view.set_theme(next);
        Some(next)
    }

    /// Draws every record.
    pub fn render_all(&mut self, view: &mut dyn CatalogView) {
        self.query.clear();
        self.visible = (0..self.datasets.len()).collect();
        self.renderer
            .render(view, &self.datasets, &self.index, &self.visible);
    }

    /// Re-filters the working set for `raw_query` and redraws.
    ///
    /// After a failed load the failure message stays up instead of a
    /// "no matches" state. Returns the number of cards shown.
    pub fn filter(&mut self, raw_query: &str, view: &mut dyn CatalogView) -> usize {
        self.query = normalize_query(raw_query);
        if let Some(message) = &self.load_error {
            self.renderer.render_failure(view, message);
            return 0;
        }
        self.visible = self.index.matching(&self.query);
        debug!(query = %self.query, matches = self.visible.len(), "filter applied");
        self.renderer
            .render(view, &self.datasets, &self.index, &self.visible)
    }

    /// Dispatches one page event.
    pub fn handle(&mut self, event: CatalogEvent, view: &mut dyn CatalogView) {
        match event {
            CatalogEvent::QueryChanged(raw) => {
                self.filter(&raw, view);
            }
            CatalogEvent::ThumbnailFailed { slot } => {
                debug!(slot, "thumbnail failed to load; hiding image");
                view.hide_thumbnail(slot);
            }
            CatalogEvent::CardActivated { slot, activation } => {
                if !self.options.card_is_activation_target || !activation.opens_viewer() {
                    return;
                }
                if let Some(url) = self.viewer_url_at(slot) {
                    info!(slot, url = %url, "opening viewer");
                    view.navigate(&url);
                }
            }
        }
    }

    /// Viewer URL of the card at display position `slot`.
    #[must_use]
    pub fn viewer_url_at(&self, slot: usize) -> Option<String> {
        let position = *self.visible.get(slot)?;
        let dataset = self.datasets.get(position)?;
        Some(self.options.viewer_host.resolve(dataset))
    }

    /// Empty-state message of a failed startup load.
    #[must_use]
    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    /// Full working set, in manifest order.
    #[must_use]
    pub fn datasets(&self) -> &[Dataset] {
        &self.datasets
    }

    /// Records currently displayed, in display order.
    #[must_use]
    pub fn visible(&self) -> Vec<&Dataset> {
        self.visible
            .iter()
            .filter_map(|&position| self.datasets.get(position))
            .collect()
    }

    /// Normalized query behind the current display.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Options in effect.
    #[must_use]
    pub fn options(&self) -> &CatalogOptions {
        &self.options
    }

    /// Search index built at load.
    #[must_use]
    pub fn index(&self) -> &SearchIndex {
        &self.index
    }
}
