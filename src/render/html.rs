//! Static HTML rendering of the catalog page.
//!
//! The page exposes the named insertion points the catalog writes to:
//! `#dataset-grid`, `#search-input`, `#result-count` and `#empty-state`.
//! Broken thumbnails are handled in the browser by an `onerror` hook that
//! hides the image and drops the card's `has-thumb` class.
//!
//! A small inline script filters the rendered cards as the search input
//! changes (lowercase substring match on `data-search`) and opens a card's
//! `data-href` on click, `Enter` or `Space`, unless the event started on a
//! nested link, button, form control or label. It only sees the cards drawn
//! at render time, so a page rendered with a query filters within that
//! subset.

use std::fmt::Write as _;

use super::{CatalogView, EMPTY_STATE_MESSAGE};
use crate::card::Card;
use crate::theme::Theme;

const THUMBNAIL_ONERROR: &str =
    "this.hidden=true;this.closest('.card').classList.remove('has-thumb');";

const PAGE_STYLE: &str = r"
:root { --bg: #fff; --text: #222; --muted: #666; --card: #f6f6f6; --accent: #0066cc; }
:root[data-theme='dark'] { --bg: #111; --text: #eee; --muted: #aaa; --card: #1c1c1c; --accent: #66aaff; }
body { margin: 0 auto; max-width: 1100px; padding: 1rem; background: var(--bg); color: var(--text); font-family: system-ui, sans-serif; }
#dataset-grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(260px, 1fr)); gap: 1rem; }
.card { background: var(--card); border-radius: 8px; padding: 0.75rem; }
.card[role='link'] { cursor: pointer; }
.card-thumb { width: 100%; aspect-ratio: 16 / 9; object-fit: cover; border-radius: 4px; }
.card-slug, .card-citation, #result-count { color: var(--muted); font-size: 0.85rem; }
.card-tags { list-style: none; padding: 0; display: flex; flex-wrap: wrap; gap: 0.25rem; }
.tag, .card-type { border: 1px solid var(--muted); border-radius: 999px; padding: 0 0.5rem; font-size: 0.8rem; }
.card-link { color: var(--accent); }
";

const PAGE_SCRIPT: &str = r#"
(function () {
  var input = document.getElementById('search-input');
  var count = document.getElementById('result-count');
  var empty = document.getElementById('empty-state');
  var cards = Array.prototype.slice.call(document.querySelectorAll('#dataset-grid .card'));
  var nested = 'a, button, input, select, textarea, label';
  var openKeys = ['Enter', ' ', 'Space', 'Spacebar'];
  if (input && cards.length) {
    input.addEventListener('input', function () {
      var query = input.value.trim().toLowerCase();
      var shown = 0;
      cards.forEach(function (card) {
        var hit = query === '' || (card.getAttribute('data-search') || '').indexOf(query) !== -1;
        card.hidden = !hit;
        if (hit) { shown += 1; }
      });
      count.textContent = shown === 1 ? '1 dataset shown' : shown + ' datasets shown';
      if (shown === 0) {
        empty.textContent = '__EMPTY_MESSAGE__';
        empty.hidden = false;
      } else {
        empty.hidden = true;
      }
    });
  }
  cards.forEach(function (card) {
    var href = card.getAttribute('data-href');
    if (!href) { return; }
    card.addEventListener('click', function (event) {
      if (event.target.closest(nested)) { return; }
      window.open(href, '_blank', 'noopener');
    });
    card.addEventListener('keydown', function (event) {
      if (openKeys.indexOf(event.key) === -1 || event.target.closest(nested)) { return; }
      event.preventDefault();
      window.open(href, '_blank', 'noopener');
    });
  });
})();
"#;

#[derive(Debug, Clone)]
struct HtmlCard {
    card: Card,
    thumbnail_hidden: bool,
}

/// [`CatalogView`] that produces a standalone HTML document.
#[derive(Debug, Clone)]
pub struct HtmlView {
    page_title: String,
    query: String,
    cards: Vec<HtmlCard>,
    count_label: String,
    empty_state: Option<String>,
    theme: Option<Theme>,
    navigations: Vec<String>,
}

impl HtmlView {
    /// Creates an empty page titled `page_title`.
    #[must_use]
    pub fn new(page_title: impl Into<String>) -> Self {
        Self {
            page_title: page_title.into(),
            query: String::new(),
            cards: Vec::new(),
            count_label: String::new(),
            empty_state: None,
            theme: None,
            navigations: Vec::new(),
        }
    }

    /// Pre-fills the search input.
    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
    }

    /// URLs the catalog asked to open. A static page cannot follow them.
    #[must_use]
    pub fn navigations(&self) -> &[String] {
        &self.navigations
    }

    /// Renders the complete document.
    #[must_use]
    pub fn to_document(&self) -> String {
        let mut out = String::with_capacity(4096 + self.cards.len() * 768);
        out.push_str("<!DOCTYPE html>\n");
        match self.theme {
            Some(theme) => {
                let _ = writeln!(
                    out,
                    r#"<html lang="en" class="{theme}" data-theme="{theme}">"#
                );
            }
            None => out.push_str("<html lang=\"en\">\n"),
        }
        out.push_str("<head>\n<meta charset=\"utf-8\">\n");
        out.push_str(
            "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n",
        );
        let _ = writeln!(out, "<title>{}</title>", escape_html(&self.page_title));
        let _ = writeln!(out, "<style>{PAGE_STYLE}</style>");
        out.push_str("</head>\n<body>\n<header>\n");
        let _ = writeln!(out, "<h1>{}</h1>", escape_html(&self.page_title));
        let _ = writeln!(
            out,
            r#"<input id="search-input" type="search" placeholder="Search datasets" value="{}">"#,
            escape_html(&self.query)
        );
        let _ = writeln!(
            out,
            r#"<p id="result-count">{}</p>"#,
            escape_html(&self.count_label)
        );
        out.push_str("</header>\n<main>\n<div id=\"dataset-grid\">\n");
        for (slot, entry) in self.cards.iter().enumerate() {
            write_card(&mut out, slot, entry);
        }
        out.push_str("</div>\n");
        match &self.empty_state {
            Some(message) => {
                let _ = writeln!(out, r#"<p id="empty-state">{}</p>"#, escape_html(message));
            }
            None => out.push_str("<p id=\"empty-state\" hidden></p>\n"),
        }
        out.push_str("</main>\n<script>");
        out.push_str(&PAGE_SCRIPT.replace("__EMPTY_MESSAGE__", EMPTY_STATE_MESSAGE));
        out.push_str("</script>\n</body>\n</html>\n");
        out
    }
}

impl CatalogView for HtmlView {
    fn clear_cards(&mut self) {
        self.cards.clear();
    }

    fn append_card(&mut self, _slot: usize, card: &Card) {
        self.cards.push(HtmlCard {
            card: card.clone(),
            thumbnail_hidden: false,
        });
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
        if let Some(entry) = self.cards.get_mut(slot) {
            entry.thumbnail_hidden = true;
        }
    }

    fn navigate(&mut self, url: &str) {
        self.navigations.push(url.to_string());
    }

    fn set_theme(&mut self, theme: Theme) {
        self.theme = Some(theme);
    }
}

fn write_card(out: &mut String, slot: usize, entry: &HtmlCard) {
    let card = &entry.card;
    let thumbnail = card.thumbnail.as_deref().filter(|_| !entry.thumbnail_hidden);
    let class = if thumbnail.is_some() { "card has-thumb" } else { "card" };
    let url = escape_html(&card.viewer_url);

    let _ = write!(
        out,
        r#"<article class="{class}" data-slot="{slot}" data-search="{}""#,
        escape_html(&card.search_text)
    );
    if card.activation_target {
        let _ = write!(out, r#" tabindex="0" role="link" data-href="{url}""#);
    }
    out.push_str(">\n");

    if let Some(src) = thumbnail {
        let _ = writeln!(
            out,
            r#"<img class="card-thumb" src="{}" alt="" loading="lazy" onerror="{THUMBNAIL_ONERROR}">"#,
            escape_html(src)
        );
    }
    if let Some(title) = &card.title {
        let _ = writeln!(out, r#"<h2 class="card-title">{}</h2>"#, escape_html(title));
    }
    if let Some(slug) = &card.slug {
        let _ = writeln!(out, r#"<p class="card-slug">{}</p>"#, escape_html(slug));
    }
    let _ = writeln!(
        out,
        r#"<p class="card-description">{}</p>"#,
        escape_html(&card.description)
    );
    if let Some(citation) = &card.citation {
        let _ = writeln!(out, r#"<p class="card-citation">{}</p>"#, escape_html(citation));
    }
    let _ = writeln!(
        out,
        r#"<span class="card-type">{}</span>"#,
        escape_html(&card.type_badge)
    );
    if !card.tags.is_empty() {
        out.push_str("<ul class=\"card-tags\">");
        for tag in &card.tags {
            let _ = write!(out, r#"<li class="tag">{}</li>"#, escape_html(tag));
        }
        out.push_str("</ul>\n");
    }
    let _ = writeln!(
        out,
        r#"<a class="card-link" href="{url}" target="_blank" rel="noopener">Open viewer</a>"#
    );
    out.push_str("</article>\n");
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
