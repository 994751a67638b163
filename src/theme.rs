//! Light/dark theme preference.
//!
//! The preference lives in one named storage slot. Storage may be missing,
//! read-only or corrupted; none of that may stop the catalog from choosing a
//! theme, so every storage error is logged and swallowed here.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Mutex;

use thiserror::Error;
use tracing::{debug, warn};

/// Storage slot holding the theme preference.
pub const THEME_STORAGE_KEY: &str = "karospace-theme";

/// Colour scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    /// Light background.
    #[default]
    Light,
    /// Dark background.
    Dark,
}

impl Theme {
    /// Stable label stored and rendered (`light` / `dark`).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// The other theme.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl FromStr for Theme {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            _ => Err(ThemeError::InvalidValue {
                value: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors from preference storage.
#[derive(Debug, Error)]
pub enum ThemeError {
    /// Stored value is not a known theme.
    #[error("invalid theme value '{value}' (expected 'light' or 'dark')")]
    InvalidValue {
        /// The rejected value.
        value: String,
    },

    /// Storage could not be read or written.
    #[error("theme storage error at {path}: {source}")]
    Io {
        /// Storage location.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Storage is not available in this environment.
    #[error("theme storage unavailable: {reason}")]
    Unavailable {
        /// Why storage cannot be used.
        reason: String,
    },
}

/// Key/value storage for the preference.
pub trait ThemeStore {
    /// Reads the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError`] when storage cannot be read.
    fn load(&self, key: &str) -> Result<Option<String>, ThemeError>;

    /// Writes `value` under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError`] when storage cannot be written.
    fn save(&self, key: &str, value: &str) -> Result<(), ThemeError>;
}

/// Stores each key as a small file inside a directory.
#[derive(Debug, Clone)]
pub struct FileThemeStore {
    dir: PathBuf,
}

impl FileThemeStore {
    /// Creates a store rooted at `dir`. The directory is created on first save.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn slot_path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }

    /// Directory backing the store.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ThemeStore for FileThemeStore {
    fn load(&self, key: &str) -> Result<Option<String>, ThemeError> {
        let path = self.slot_path(key);
        match fs::read_to_string(&path) {
            Ok(raw) => Ok(Some(raw.trim().to_string())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(ThemeError::Io { path, source }),
        }
    }

    fn save(&self, key: &str, value: &str) -> Result<(), ThemeError> {
        fs::create_dir_all(&self.dir).map_err(|source| ThemeError::Io {
            path: self.dir.clone(),
            source,
        })?;
        let path = self.slot_path(key);
        fs::write(&path, format!("{value}\n")).map_err(|source| ThemeError::Io { path, source })
    }
}

/// In-process store, also able to simulate unavailable storage.
#[derive(Debug, Default)]
pub struct MemoryThemeStore {
    slots: Mutex<HashMap<String, String>>,
    unavailable: bool,
}

impl MemoryThemeStore {
    /// Creates an empty, working store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store whose every access fails.
    #[must_use]
    pub fn unavailable() -> Self {
        Self {
            slots: Mutex::new(HashMap::new()),
            unavailable: true,
        }
    }

    fn check(&self) -> Result<(), ThemeError> {
        if self.unavailable {
            return Err(ThemeError::Unavailable {
                reason: "storage access denied".to_string(),
            });
        }
        Ok(())
    }
}

impl ThemeStore for MemoryThemeStore {
    fn load(&self, key: &str) -> Result<Option<String>, ThemeError> {
        self.check()?;
        let slots = self.slots.lock().map_err(|_| ThemeError::Unavailable {
            reason: "storage lock poisoned".to_string(),
        })?;
        Ok(slots.get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<(), ThemeError> {
        self.check()?;
        let mut slots = self.slots.lock().map_err(|_| ThemeError::Unavailable {
            reason: "storage lock poisoned".to_string(),
        })?;
        slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Picks the theme: a valid stored preference, else `system`.
#[must_use]
pub fn resolve_theme(store: &dyn ThemeStore, system: Theme) -> Theme {
    match store.load(THEME_STORAGE_KEY) {
        Ok(Some(raw)) => match raw.parse::<Theme>() {
            Ok(theme) => {
                debug!(theme = %theme, "using stored theme preference");
                theme
            }
            Err(error) => {
                warn!(error = %error, "ignoring stored theme preference");
                system
            }
        },
        Ok(None) => system,
        Err(error) => {
            warn!(error = %error, "theme storage unreadable; using system preference");
            system
        }
    }
}

/// Stores `theme` as the preference. Failures are logged and swallowed.
pub fn store_theme(store: &dyn ThemeStore, theme: Theme) {
    if let Err(error) = store.save(THEME_STORAGE_KEY, theme.as_str()) {
        warn!(error = %error, "could not persist theme preference");
    }
}

/// Flips `current`, tries to persist it, and returns the new theme.
pub fn toggle_theme(store: &dyn ThemeStore, current: Theme) -> Theme {
    let next = current.toggled();
    store_theme(store, next);
    next
}
