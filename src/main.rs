//! CLI entry point for the catalog tool.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use catalog_core::manifest::{self, ManifestSource, source_for_location};
use catalog_core::render::load_failure_message;
use catalog_core::theme::{FileThemeStore, MemoryThemeStore, resolve_theme, store_theme, toggle_theme};
use catalog_core::thumbs::{SkipReason, plan_thumbnails};
use catalog_core::{Catalog, CatalogEvent, CatalogView, HtmlView, MemoryView, Theme, ThemeStore};
use clap::Parser;
use tracing::{debug, info};

mod app_config;
mod cli;

use app_config::{ResolvedConfig, load_default_file_config, resolve_config};
use cli::{Args, Command, ThemeAction, ThemeChoice};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    debug!(?args, "CLI arguments parsed");

    let file_config = load_default_file_config()?;
    let config = resolve_config(file_config.as_ref(), &args.features)?;
    debug!(viewer_host = %config.options.viewer_host, "configuration resolved");

    match args.command {
        Command::Search { source, query } => run_search(&config, &source, query.as_deref()).await,
        Command::Render {
            source,
            query,
            output,
            theme,
            title,
        } => run_render(&config, &source, query.as_deref(), output.as_deref(), theme, &title).await,
        Command::Thumbs {
            source,
            output_dir,
            manifest_dir,
            slugs,
            overwrite,
        } => run_thumbs(&config, &source, &output_dir, &manifest_dir, &slugs, overwrite).await,
        Command::Theme { action } => run_theme(&config, action),
    }
}

fn open_source(config: &ResolvedConfig, source: &str) -> Result<Box<dyn ManifestSource>> {
    source_for_location(
        source,
        &config.fetch.manifest_path,
        config.fetch.connect_timeout_secs,
        config.fetch.read_timeout_secs,
    )
    .with_context(|| format!("Cannot read a manifest from '{source}'"))
}

fn theme_store(config: &ResolvedConfig) -> Box<dyn ThemeStore> {
    match &config.state_dir {
        Some(dir) => Box::new(FileThemeStore::new(dir)),
        None => Box::new(MemoryThemeStore::new()),
    }
}

async fn run_search(config: &ResolvedConfig, source: &str, query: Option<&str>) -> Result<()> {
    let source = open_source(config, source)?;
    let mut view = MemoryView::new();
    let mut catalog = Catalog::startup(source.as_ref(), config.options.clone(), &mut view).await;
    if let Some(query) = query {
        catalog.handle(CatalogEvent::QueryChanged(query.to_string()), &mut view);
    }

    let mut stdout = io::stdout().lock();
    if !view.count_label().is_empty() {
        writeln!(stdout, "{}", view.count_label())?;
    }
    if let Some(message) = view.empty_state() {
        writeln!(stdout, "{message}")?;
    }
    for card in view.cards() {
        let title = card.title.as_deref().unwrap_or("(untitled)");
        writeln!(stdout, "{title}\t[{}]\t{}", card.type_badge, card.viewer_url)?;
    }
    Ok(())
}

async fn run_render(
    config: &ResolvedConfig,
    source: &str,
    query: Option<&str>,
    output: Option<&Path>,
    theme: Option<ThemeChoice>,
    title: &str,
) -> Result<()> {
    let source = open_source(config, source)?;
    let mut view = HtmlView::new(title);
    let mut catalog = Catalog::startup(source.as_ref(), config.options.clone(), &mut view).await;

    if let Some(query) = query {
        view.set_query(query);
        catalog.handle(CatalogEvent::QueryChanged(query.to_string()), &mut view);
    }

    match theme {
        Some(choice) if config.options.has_theme_toggle => view.set_theme(match choice {
            ThemeChoice::Light => Theme::Light,
            ThemeChoice::Dark => Theme::Dark,
        }),
        _ => {
            let store = theme_store(config);
            catalog.apply_stored_theme(store.as_ref(), &mut view);
        }
    }

    let document = view.to_document();
    match output {
        Some(path) => {
            std::fs::write(path, &document)
                .with_context(|| format!("Failed to write '{}'", path.display()))?;
            info!(path = %path.display(), cards = catalog.visible().len(), "catalog page written");
        }
        None => io::stdout().lock().write_all(document.as_bytes())?,
    }
    Ok(())
}

async fn run_thumbs(
    config: &ResolvedConfig,
    source: &str,
    output_dir: &Path,
    manifest_dir: &Path,
    slugs: &[String],
    overwrite: bool,
) -> Result<()> {
    let source = open_source(config, source)?;
    let datasets = manifest::load(source.as_ref())
        .await
        .map_err(|e| anyhow::anyhow!(load_failure_message(&e)))?;

    let output_dir = absolute(output_dir)?;
    let manifest_dir = absolute(manifest_dir)?;
    let plan = plan_thumbnails(
        &datasets,
        &config.options.viewer_host,
        &output_dir,
        &manifest_dir,
        slugs,
    )?;

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "Datasets selected: {}", plan.targets.len())?;
    writeln!(stdout, "Output directory: {}", output_dir.display())?;
    writeln!(stdout, "Viewer host: {}", config.options.viewer_host)?;
    for target in &plan.targets {
        let state = if target.needs_capture(overwrite) {
            "PLAN"
        } else {
            "SKIP (exists)"
        };
        writeln!(
            stdout,
            "{state} {}: {} -> {} (thumbnail={})",
            target.slug,
            target.viewer_url,
            target.output_path.display(),
            target.thumbnail_path
        )?;
    }
    for (position, reason) in &plan.skipped {
        let reason = match reason {
            SkipReason::MissingSlug => "missing slug",
            SkipReason::MissingViewerPath => "missing r2_path",
        };
        writeln!(stdout, "SKIP entry #{position}: {reason}")?;
    }
    Ok(())
}

fn run_theme(config: &ResolvedConfig, action: Option<ThemeAction>) -> Result<()> {
    let store = theme_store(config);
    let current = resolve_theme(store.as_ref(), config.options.system_theme);
    let theme = match action {
        None => current,
        Some(ThemeAction::Toggle) => toggle_theme(store.as_ref(), current),
        Some(ThemeAction::Light) => {
            store_theme(store.as_ref(), Theme::Light);
            Theme::Light
        }
        Some(ThemeAction::Dark) => {
            store_theme(store.as_ref(), Theme::Dark);
            Theme::Dark
        }
    };
    writeln!(io::stdout().lock(), "{theme}")?;
    Ok(())
}

fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir().context("Failed to resolve the current directory")?;
    Ok(cwd.join(path))
}
