//! Deploy-time configuration for the catalog binary.
//!
//! Settings come from `config.toml` in the catalog config directory and are
//! overridden by CLI flags.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};
use catalog_core::manifest::{
    DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_READ_TIMEOUT_SECS, MANIFEST_PATH,
};
use catalog_core::{CatalogOptions, Theme, ViewerHost};

use crate::cli::FeatureArgs;

/// Config directory name under `$XDG_CONFIG_HOME` / `$HOME/.config`.
const CONFIG_DIR_NAME: &str = "karospace-catalog";

/// File-backed settings. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileConfig {
    /// Host serving viewer pages.
    pub viewer_host: Option<String>,
    /// Manifest path relative to the site root.
    pub manifest_path: Option<String>,
    /// Prefix for page-relative thumbnails.
    pub thumbnail_prefix: Option<String>,
    /// Manifest fetch connect timeout in seconds.
    pub connect_timeout_secs: Option<u64>,
    /// Manifest fetch read timeout in seconds.
    pub read_timeout_secs: Option<u64>,
    /// Render preview images.
    pub supports_thumbnails: Option<bool>,
    /// Whole-card activation.
    pub card_is_activation_target: Option<bool>,
    /// Theme toggle present.
    pub has_theme_toggle: Option<bool>,
    /// Citation shown and indexed.
    pub index_citation: Option<bool>,
    /// Theme used when no preference is stored.
    pub system_theme: Option<Theme>,
}

impl FileConfig {
    /// Validates values against runtime constraints.
    pub fn validate(&self) -> Result<()> {
        validate_timeout_secs("connect_timeout_secs", self.connect_timeout_secs)?;
        validate_timeout_secs("read_timeout_secs", self.read_timeout_secs)?;
        if let Some(host) = &self.viewer_host {
            ViewerHost::parse(host)
                .with_context(|| "Invalid config value for `viewer_host`".to_string())?;
        }
        if let Some(path) = &self.manifest_path
            && path.trim().is_empty()
        {
            bail!("Invalid config value for `manifest_path`: must not be empty");
        }
        Ok(())
    }
}

fn validate_timeout_secs(field: &str, value: Option<u64>) -> Result<()> {
    let Some(value) = value else {
        return Ok(());
    };
    if !(1..=3600).contains(&value) {
        bail!("Invalid config value for `{field}`: {value}. Expected range: 1..=3600");
    }
    Ok(())
}

/// Manifest fetch settings after merging file config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchSettings {
    /// Manifest path relative to the site root.
    pub manifest_path: String,
    /// Connect timeout in seconds.
    pub connect_timeout_secs: u64,
    /// Read timeout in seconds.
    pub read_timeout_secs: u64,
}

/// Everything the commands need.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Catalog behaviour.
    pub options: CatalogOptions,
    /// Manifest fetch settings.
    pub fetch: FetchSettings,
    /// Directory holding config and theme state, when known.
    pub state_dir: Option<PathBuf>,
}

/// Merges file config and CLI flags into the settings used at runtime.
pub fn resolve_config(file: Option<&FileConfig>, flags: &FeatureArgs) -> Result<ResolvedConfig> {
    let defaults = CatalogOptions::default();
    let file = file.cloned().unwrap_or_default();

    let host_raw = flags.viewer_host.clone().or(file.viewer_host);
    let viewer_host = match host_raw {
        Some(raw) => ViewerHost::parse(&raw).with_context(|| format!("Invalid viewer host '{raw}'"))?,
        None => defaults.viewer_host.clone(),
    };

    let options = CatalogOptions {
        viewer_host,
        thumbnail_prefix: file
            .thumbnail_prefix
            .unwrap_or_else(|| defaults.thumbnail_prefix.clone()),
        supports_thumbnails: !flags.no_thumbnails
            && file.supports_thumbnails.unwrap_or(defaults.supports_thumbnails),
        card_is_activation_target: !flags.no_card_activation
            && file
                .card_is_activation_target
                .unwrap_or(defaults.card_is_activation_target),
        has_theme_toggle: !flags.no_theme_toggle
            && file.has_theme_toggle.unwrap_or(defaults.has_theme_toggle),
        show_citation: !flags.minimal_index
            && file.index_citation.unwrap_or(defaults.show_citation),
        system_theme: file.system_theme.unwrap_or(defaults.system_theme),
    };

    let fetch = FetchSettings {
        manifest_path: file
            .manifest_path
            .unwrap_or_else(|| MANIFEST_PATH.to_string()),
        connect_timeout_secs: file
            .connect_timeout_secs
            .unwrap_or(DEFAULT_CONNECT_TIMEOUT_SECS),
        read_timeout_secs: file.read_timeout_secs.unwrap_or(DEFAULT_READ_TIMEOUT_SECS),
    };

    Ok(ResolvedConfig {
        options,
        fetch,
        state_dir: resolve_config_dir(),
    })
}

/// Resolves the catalog config directory.
///
/// Priority:
/// 1. `$XDG_CONFIG_HOME/karospace-catalog`
/// 2. `$HOME/.config/karospace-catalog`
#[must_use]
pub fn resolve_config_dir() -> Option<PathBuf> {
    if let Some(xdg_config_home) = env_var_non_empty_os("XDG_CONFIG_HOME") {
        return Some(PathBuf::from(xdg_config_home).join(CONFIG_DIR_NAME));
    }
    let home = env_var_non_empty_os("HOME")?;
    Some(PathBuf::from(home).join(".config").join(CONFIG_DIR_NAME))
}

fn env_var_non_empty_os(name: &str) -> Option<std::ffi::OsString> {
    let value = env::var_os(name)?;
    if value.is_empty() { None } else { Some(value) }
}

/// Loads `config.toml` from the default directory if present.
pub fn load_default_file_config() -> Result<Option<FileConfig>> {
    let Some(dir) = resolve_config_dir() else {
        return Ok(None);
    };
    let path = dir.join("config.toml");
    if !path.exists() {
        return Ok(None);
    }
    load_file_config(&path).map(Some)
}

fn load_file_config(path: &Path) -> Result<FileConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
    parse_config_str(&raw)
        .with_context(|| format!("Failed to parse config file '{}'", path.display()))
}

fn parse_config_str(raw: &str) -> Result<FileConfig> {
    let mut cfg = FileConfig::default();
    for (line_index, raw_line) in raw.lines().enumerate() {
        let line_no = line_index + 1;
        let line = strip_inline_comment(raw_line).trim();
        if line.is_empty() {
            continue;
        }

        let Some((raw_key, raw_value)) = line.split_once('=') else {
            bail!("Invalid config syntax on line {line_no}: expected key = value");
        };
        let key = raw_key.trim();
        let value = raw_value.trim();
        let invalid = || format!("Invalid `{key}` value on line {line_no}");

        match key {
            "viewer_host" => cfg.viewer_host = Some(parse_string_literal(value).with_context(invalid)?),
            "manifest_path" => {
                cfg.manifest_path = Some(parse_string_literal(value).with_context(invalid)?);
            }
            "thumbnail_prefix" => {
                cfg.thumbnail_prefix = Some(parse_string_literal(value).with_context(invalid)?);
            }
            "connect_timeout_secs" => {
                cfg.connect_timeout_secs = Some(parse_integer_u64(value).with_context(invalid)?);
            }
            "read_timeout_secs" => {
                cfg.read_timeout_secs = Some(parse_integer_u64(value).with_context(invalid)?);
            }
            "supports_thumbnails" => {
                cfg.supports_thumbnails = Some(parse_boolean(value).with_context(invalid)?);
            }
            "card_is_activation_target" => {
                cfg.card_is_activation_target = Some(parse_boolean(value).with_context(invalid)?);
            }
            "has_theme_toggle" => {
                cfg.has_theme_toggle = Some(parse_boolean(value).with_context(invalid)?);
            }
            "index_citation" => {
                cfg.index_citation = Some(parse_boolean(value).with_context(invalid)?);
            }
            "system_theme" => {
                let parsed = parse_string_literal(value).with_context(invalid)?;
                cfg.system_theme = Some(parsed.parse::<Theme>().with_context(invalid)?);
            }
            _ => bail!("Unknown config key `{key}` on line {line_no}"),
        }
    }

    cfg.validate()?;
    Ok(cfg)
}

fn strip_inline_comment(line: &str) -> &str {
    let mut in_string = false;
    let mut escaped = false;
    for (idx, ch) in line.char_indices() {
        match ch {
            '\\' if in_string => escaped = !escaped,
            '"' if !escaped => {
                in_string = !in_string;
                escaped = false;
            }
            '#' if !in_string => return &line[..idx],
            _ => escaped = false,
        }
    }
    line
}

fn parse_string_literal(value: &str) -> Result<String> {
    let inner = value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .ok_or_else(|| anyhow!("expected a quoted string"))?;
    Ok(inner.replace("\\\"", "\"").replace("\\\\", "\\"))
}

fn parse_integer_u64(value: &str) -> Result<u64> {
    value
        .replace('_', "")
        .parse::<u64>()
        .map_err(|e| anyhow!("expected a non-negative integer: {e}"))
}

fn parse_boolean(value: &str) -> Result<bool> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => bail!("expected true or false"),
    }
}
