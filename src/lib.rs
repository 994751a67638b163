//! Catalog Core Library
//!
//! Loads a dataset manifest, turns each record into a card, and keeps a
//! searchable, filterable catalog of spatial dataset viewers.
//!
//! # Architecture
//!
//! - [`manifest`] - Fetch and shape-check `datasets.json` (HTTP or local)
//! - [`dataset`] - Lenient dataset records
//! - [`search`] - Lowercased search text and substring matching
//! - [`card`] - Record-to-card projection, thumbnails, whole-card activation
//! - [`viewer`] - Viewer host normalization and link resolution
//! - [`render`] - The [`CatalogView`] surface, renderer, HTML and memory views
//! - [`catalog`] - Working set, filter state and page events
//! - [`theme`] - Light/dark preference with failure-tolerant storage
//! - [`thumbs`] - Thumbnail capture planning

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod card;
pub mod catalog;
pub mod dataset;
pub mod manifest;
pub mod options;
pub mod render;
pub mod search;
pub mod theme;
pub mod thumbs;
pub mod viewer;

mod user_agent;

// Re-export commonly used types
pub use card::{Activation, Card, CardProjector, ElementKind};
pub use catalog::{Catalog, CatalogEvent};
pub use dataset::Dataset;
pub use manifest::{ManifestError, ManifestSource, load, parse_manifest};
pub use options::CatalogOptions;
pub use render::{CatalogView, HtmlView, MemoryView, Renderer, count_label};
pub use search::{IndexFields, SearchIndex, index_text, normalize_query};
pub use theme::{Theme, ThemeStore};
pub use viewer::{DEFAULT_VIEWER_HOST, ViewerHost};
