//! Thumbnail capture planning.
//!
//! Works out, for each dataset, which viewer page to screenshot, where the
//! image goes, and what manifest-relative `thumbnail` value points at it.
//! Capturing itself happens in an external headless browser.

use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;
use tracing::{debug, warn};

use crate::dataset::Dataset;
use crate::viewer::ViewerHost;

/// Slug characters outside this set collapse to `_` in file names.
#[allow(clippy::expect_used)]
static UNSAFE_SLUG_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9._-]+").expect("slug regex is valid"));

/// File name used when a slug sanitizes to nothing.
pub const FALLBACK_THUMBNAIL_STEM: &str = "dataset";

/// Errors from thumbnail planning.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ThumbnailPlanError {
    /// No dataset survived slug and subset filtering.
    #[error("no datasets selected\n  Suggestion: Check --slugs or the manifest content")]
    NothingSelected,
}

/// One planned capture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThumbnailTarget {
    /// Dataset slug.
    pub slug: String,
    /// Viewer page to capture.
    pub viewer_url: String,
    /// Where the image is written.
    pub output_path: PathBuf,
    /// Value for the manifest `thumbnail` field, relative to the manifest.
    pub thumbnail_path: String,
    /// True when the image file is already on disk.
    pub exists: bool,
}

impl ThumbnailTarget {
    /// Whether this target should be captured: missing images always are,
    /// existing ones only when `overwrite` is set.
    #[must_use]
    pub fn needs_capture(&self, overwrite: bool) -> bool {
        overwrite || !self.exists
    }
}

/// Why a dataset was left out of the plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Entry has no slug.
    MissingSlug,
    /// Entry has no viewer path to capture.
    MissingViewerPath,
}

/// The planned captures plus entries that could not be planned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThumbnailPlan {
    /// Captures to run, in manifest order.
    pub targets: Vec<ThumbnailTarget>,
    /// `(manifest position, reason)` for every skipped entry.
    pub skipped: Vec<(usize, SkipReason)>,
}

/// Turns a slug into a safe image file stem.
#[must_use]
pub fn sanitize_slug(slug: &str) -> String {
    let replaced = UNSAFE_SLUG_CHARS.replace_all(slug, "_");
    let trimmed = replaced.trim_matches(|c| c == '.' || c == '_');
    if trimmed.is_empty() {
        FALLBACK_THUMBNAIL_STEM.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Plans captures for `datasets`.
///
/// `slugs` restricts the plan to those slugs when non-empty. `manifest_dir`
/// is the directory holding the manifest; thumbnail paths are made relative
/// to it. Both directories are normalized first, so `.` and `..` segments
/// do not leak into the relative path.
///
/// # Errors
///
/// Returns [`ThumbnailPlanError::NothingSelected`] when no target remains.
pub fn plan_thumbnails(
    datasets: &[Dataset],
    host: &ViewerHost,
    output_dir: &Path,
    manifest_dir: &Path,
    slugs: &[String],
) -> Result<ThumbnailPlan, ThumbnailPlanError> {
    let wanted: HashSet<&str> = slugs.iter().map(String::as_str).collect();
    let output_dir = normalize_path(output_dir);
    let manifest_dir = normalize_path(manifest_dir);
    let mut plan = ThumbnailPlan::default();

    for (position, dataset) in datasets.iter().enumerate() {
        let slug = dataset.slug.as_deref().map(str::trim).unwrap_or_default();
        if slug.is_empty() {
            warn!(position, "skipping manifest entry with missing slug");
            plan.skipped.push((position, SkipReason::MissingSlug));
            continue;
        }
        if !wanted.is_empty() && !wanted.contains(slug) {
            continue;
        }
        let has_path = dataset
            .r2_path
            .as_deref()
            .is_some_and(|p| !p.trim_start_matches('/').is_empty());
        if !has_path {
            warn!(slug, "skipping dataset without viewer path");
            plan.skipped.push((position, SkipReason::MissingViewerPath));
            continue;
        }

        let output_path = output_dir.join(format!("{}.jpg", sanitize_slug(slug)));
        let thumbnail_path = relative_path(&output_path, &manifest_dir);
        debug!(slug, path = %output_path.display(), "planned thumbnail");
        plan.targets.push(ThumbnailTarget {
            slug: slug.to_string(),
            viewer_url: host.resolve(dataset),
            exists: output_path.exists(),
            output_path,
            thumbnail_path,
        });
    }

    if plan.targets.is_empty() {
        return Err(ThumbnailPlanError::NothingSelected);
    }
    Ok(plan)
}

/// `target` relative to `base`, with `/` separators.
/// Folds `.` and `..` segments without touching the filesystem.
///
/// A `..` at the root stays at the root; a leading `..` in a relative path is
/// kept.
fn normalize_path(path: &Path) -> PathBuf {
    let mut out: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }
    if out.is_empty() {
        return PathBuf::from(".");
    }
    out.iter().collect()
}

fn relative_path(target: &Path, base: &Path) -> String {
    let target: Vec<Component<'_>> = target.components().collect();
    let base: Vec<Component<'_>> = base.components().collect();
    let shared = target
        .iter()
        .zip(&base)
        .take_while(|(a, b)| a == b)
        .count();

    let ups = base[shared..]
        .iter()
        .filter(|c| !matches!(c, Component::CurDir))
        .map(|_| "..".to_string());
    let downs = target[shared..]
        .iter()
        .filter(|c| !matches!(c, Component::CurDir))
        .map(|c| c.as_os_str().to_string_lossy().into_owned());
    ups.chain(downs).collect::<Vec<_>>().join("/")
}
