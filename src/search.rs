//! Search text derivation and substring filtering.
//!
//! Each record gets one lowercase string built from its displayed text fields.
//! The strings are computed once per load; a keystroke only scans them.

use crate::dataset::Dataset;

/// Which fields feed the search text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IndexFields {
    /// Title, description, citation and tags.
    #[default]
    Rich,
    /// Title, description and tags (cards without a citation line).
    Minimal,
}

/// Builds the lowercase search text for one record.
///
/// Order: title (falling back to slug, as displayed), description, citation
/// (rich only), then tags, separated by single spaces. Absent fields
/// contribute nothing, and a blank citation is skipped since the card hides
/// it. The slug line and type badge are shown on the card but not indexed.
#[must_use]
pub fn index_text(dataset: &Dataset, fields: IndexFields) -> String {
    let mut parts: Vec<&str> = Vec::with_capacity(3 + dataset.tags().len());
    parts.extend(dataset.display_title());
    parts.extend(dataset.description.as_deref());
    if fields == IndexFields::Rich {
        parts.extend(dataset.citation.as_deref().filter(|c| !c.trim().is_empty()));
    }
    parts.extend(dataset.tags().iter().map(String::as_str));
    parts
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Trims and lowercases raw query input. Empty means "show everything".
#[must_use]
pub fn normalize_query(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Precomputed search text for a working set, aligned by position.
#[derive(Debug, Clone, Default)]
pub struct SearchIndex {
    entries: Vec<String>,
}

impl SearchIndex {
    /// Indexes every record once.
    #[must_use]
    pub fn build(datasets: &[Dataset], fields: IndexFields) -> Self {
        Self {
            entries: datasets.iter().map(|d| index_text(d, fields)).collect(),
        }
    }

    /// Search text of the record at `position`.
    #[must_use]
    pub fn text(&self, position: usize) -> Option<&str> {
        self.entries.get(position).map(String::as_str)
    }

    /// Number of indexed records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Positions of records matching an already-normalized query, in order.
    ///
    /// An empty query matches every record.
    #[must_use]
    pub fn matching(&self, normalized_query: &str) -> Vec<usize> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, text)| normalized_query.is_empty() || text.contains(normalized_query))
            .map(|(position, _)| position)
            .collect()
    }
}
