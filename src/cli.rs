//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Browse, filter and render a catalog of spatial dataset viewers.
///
/// SOURCE is either an http(s) site root serving `datasets.json` or a local
/// site directory containing it. A SOURCE ending in `.json` is used as the
/// manifest itself.
#[derive(Parser, Debug)]
#[command(name = "catalog")]
#[command(author, version, about)]
pub struct Args {
    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(flatten)]
    pub features: FeatureArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Overrides for deploy-time catalog settings.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct FeatureArgs {
    /// Viewer host that dataset paths are joined onto
    #[arg(long, global = true, value_name = "HOST")]
    pub viewer_host: Option<String>,

    /// Do not render thumbnails
    #[arg(long, global = true)]
    pub no_thumbnails: bool,

    /// Only the card link opens the viewer, not the whole card
    #[arg(long, global = true)]
    pub no_card_activation: bool,

    /// Leave out the light/dark theme toggle
    #[arg(long, global = true)]
    pub no_theme_toggle: bool,

    /// Hide citations and search only title, description and tags
    #[arg(long, global = true)]
    pub minimal_index: bool,
}

/// Catalog subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Load the catalog and print the cards matching a query
    Search {
        /// Site root URL, site directory, or manifest file
        source: String,

        /// Case-insensitive substring query (omit to list everything)
        query: Option<String>,
    },

    /// Write the catalog as a static HTML page
    Render {
        /// Site root URL, site directory, or manifest file
        source: String,

        /// Pre-apply this query to the rendered page
        #[arg(long)]
        query: Option<String>,

        /// Output file (stdout when omitted)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Force a theme instead of the stored preference
        #[arg(long, value_enum)]
        theme: Option<ThemeChoice>,

        /// Page title
        #[arg(long, default_value = "KaroSpace datasets")]
        title: String,
    },

    /// Plan thumbnail captures for the datasets in a manifest
    Thumbs {
        /// Site root URL, site directory, or manifest file
        source: String,

        /// Directory the thumbnails are written to
        #[arg(long, default_value = "site/thumbs", value_name = "DIR")]
        output_dir: PathBuf,

        /// Directory the manifest lives in (thumbnail paths are relative to it)
        #[arg(long, default_value = "site", value_name = "DIR")]
        manifest_dir: PathBuf,

        /// Restrict the plan to these slugs
        #[arg(long, num_args = 1..)]
        slugs: Vec<String>,

        /// Plan captures for images that already exist
        #[arg(long)]
        overwrite: bool,
    },

    /// Show, set or toggle the stored light/dark preference
    Theme {
        /// New preference (omit to show the current one)
        #[arg(value_enum)]
        action: Option<ThemeAction>,
    },
}

/// Explicit theme for a render.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeChoice {
    Light,
    Dark,
}

/// Change to the stored theme preference.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeAction {
    Light,
    Dark,
    Toggle,
}
