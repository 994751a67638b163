//! A view that records its state in memory.
//!
//! Used by the `search` command to print results and by tests to observe what
//! a page would show.

use std::collections::BTreeSet;

use super::CatalogView;
use crate::card::Card;
use crate::theme::Theme;

/// In-memory [`CatalogView`].
#[derive(Debug, Clone, Default)]
pub struct MemoryView {
    cards: Vec<Card>,
    count_label: String,
    empty_state: Option<String>,
    hidden_thumbnails: BTreeSet<usize>,
    navigations: Vec<String>,
    theme: Option<Theme>,
    clears: usize,
}

impl MemoryView {
    /// Creates a blank view.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cards currently displayed.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Card headings in display order; untitled cards read as `""`.
    #[must_use]
    pub fn titles(&self) -> Vec<&str> {
        self.cards
            .iter()
            .map(|c| c.title.as_deref().unwrap_or_default())
            .collect()
    }

    /// Current result-count text.
    #[must_use]
    pub fn count_label(&self) -> &str {
        &self.count_label
    }

    /// Empty-state message when visible.
    #[must_use]
    pub fn empty_state(&self) -> Option<&str> {
        self.empty_state.as_deref()
    }

    /// True when the empty-state element is shown.
    #[must_use]
    pub fn is_empty_state_visible(&self) -> bool {
        self.empty_state.is_some()
    }

    /// True when the card at `slot` shows its image.
    #[must_use]
    pub fn is_thumbnail_visible(&self, slot: usize) -> bool {
        self.cards.get(slot).is_some_and(Card::has_thumbnail)
            && !self.hidden_thumbnails.contains(&slot)
    }

    /// URLs opened so far, oldest first.
    #[must_use]
    pub fn navigations(&self) -> &[String] {
        &self.navigations
    }

    /// Theme applied to the document root.
    #[must_use]
    pub fn theme(&self) -> Option<Theme> {
        self.theme
    }

    /// Number of times the card region was cleared.
    #[must_use]
    pub fn clear_count(&self) -> usize {
        self.clears
    }
}

impl CatalogView for MemoryView {
    fn clear_cards(&mut self) {
        self.cards.clear();
        self.hidden_thumbnails.clear();
        self.clears += 1;
    }

    fn append_card(&mut self, slot: usize, card: &Card) {
        debug_assert_eq!(slot, self.cards.len(), "cards are appended in order");
        self.cards.push(card.clone());
    }

    fn set_count_label(&mut self, label: &str) {
        self.count_label = label.to_string();
    }

    fn show_empty_state(&mut self, message: &str) {
        self.empty_state = Some(message.to_string());
    }

    fn hide_empty_state(&mut self) {
        self.empty_state = None;
    }

    fn hide_thumbnail(&mut self, slot: usize) {
        if slot < self.cards.len() {
            self.hidden_thumbnails.insert(slot);
        }
    }

    fn navigate(&mut self, url: &str) {
        self.navigations.push(url.to_string());
    }

    fn set_theme(&mut self, theme: Theme) {
        self.theme = Some(theme);
    }
}
