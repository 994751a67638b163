//! Catalog rendering onto an injectable view surface.
//!
//! [`CatalogView`] stands in for the page's named insertion points: the card
//! container, the result count, the empty-state element and the document
//! root. The [`Renderer`] replaces the whole card list on every call and
//! keeps the count and empty state consistent with it.

pub mod html;
pub mod memory;

pub use html::HtmlView;
pub use memory::MemoryView;

use tracing::trace;

use crate::card::{Card, CardProjector};
use crate::dataset::Dataset;
use crate::search::SearchIndex;
use crate::theme::Theme;

/// Empty-state text when nothing is shown.
pub const EMPTY_STATE_MESSAGE: &str = "No datasets match your search.";

/// The rendering surface, addressed by stable element identity.
///
/// `slot` arguments are positions in the currently displayed list.
pub trait CatalogView {
    /// Removes every card from the display region.
    fn clear_cards(&mut self);

    /// Appends a card at display position `slot`.
    fn append_card(&mut self, slot: usize, card: &Card);

    /// Replaces the result-count text. An empty label clears it.
    fn set_count_label(&mut self, label: &str);

    /// Shows the empty-state element with `message`.
    fn show_empty_state(&mut self, message: &str);

    /// Hides the empty-state element.
    fn hide_empty_state(&mut self);

    /// Hides the image of the card at `slot` and drops its thumbnail styling.
    fn hide_thumbnail(&mut self, slot: usize);

    /// Opens `url` (the card's viewer link).
    fn navigate(&mut self, url: &str);

    /// Applies a colour scheme to the document root.
    fn set_theme(&mut self, theme: Theme);
}

/// Human-readable result count with singular/plural agreement.
#[must_use]
pub fn count_label(count: usize) -> String {
    if count == 1 {
        "1 dataset shown".to_string()
    } else {
        format!("{count} datasets shown")
    }
}

/// Empty-state text after a failed manifest load.
#[must_use]
pub fn load_failure_message(error: &dyn std::error::Error) -> String {
    format!("Unable to load datasets: {error}")
}

/// Materializes cards for a subset of the working set.
#[derive(Debug, Clone)]
pub struct Renderer {
    projector: CardProjector,
}

impl Renderer {
    /// Creates a renderer around a projector.
    #[must_use]
    pub fn new(projector: CardProjector) -> Self {
        Self { projector }
    }

    /// Replaces the view's cards with `positions` from `datasets`, in order.
    ///
    /// Positions without a record are skipped. Returns the number of cards drawn.
    pub fn render(
        &self,
        view: &mut dyn CatalogView,
        datasets: &[Dataset],
        index: &SearchIndex,
        positions: &[usize],
    ) -> usize {
        view.clear_cards();

        let mut shown = 0;
        for &position in positions {
            let Some(dataset) = datasets.get(position) else {
                continue;
            };
            let card = self
                .projector
                .project(dataset, index.text(position).unwrap_or_default());
            view.append_card(shown, &card);
            shown += 1;
        }
        trace!(shown, "cards rendered");

        view.set_count_label(&count_label(shown));
        if shown == 0 {
            view.show_empty_state(EMPTY_STATE_MESSAGE);
        } else {
            view.hide_empty_state();
        }
        shown
    }

    /// Clears the view after a load failure and reports `message`.
    pub fn render_failure(&self, view: &mut dyn CatalogView, message: &str) {
        view.clear_cards();
        view.set_count_label("");
        view.show_empty_state(message);
    }
}
