//! Persisted cosmetic settings.
//!
//! A small key-value surface stored as JSON under the user's config
//! directory. Load failures are never fatal: a missing or corrupt file
//! falls back to defaults with a logged warning.

use std::path::{Path, PathBuf};
use std::{fmt, fs, io};

use serde::{Deserialize, Serialize};

/// Settings that survive across sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Id of the active theme palette.
    pub theme: String,
    /// Optional `#RRGGBB` foreground override.
    pub custom_fg: Option<String>,
    /// Optional `#RRGGBB` background override.
    pub custom_bg: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
            custom_fg: None,
            custom_bg: None,
        }
    }
}

/// Errors from saving settings.
#[derive(Debug)]
pub enum SettingsError {
    Io(io::Error),
    Serialize(serde_json::Error),
    /// No config directory could be determined for this platform.
    NoConfigDir,
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "settings I/O error: {e}"),
            Self::Serialize(e) => write!(f, "settings serialization error: {e}"),
            Self::NoConfigDir => write!(f, "no config directory available"),
        }
    }
}

impl std::error::Error for SettingsError {}

impl From<io::Error> for SettingsError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialize(e)
    }
}

/// Default on-disk location of the settings file.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("termfolio").join("settings.json"))
}

impl Settings {
    /// Load from the default path. Any failure falls back to defaults.
    pub fn load() -> Self {
        match config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load from an explicit path, falling back to defaults on any failure.
    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(text) => match serde_json::from_str(&text) {
                Ok(settings) => settings,
                Err(e) => {
                    log::warn!("settings file {} is invalid: {e}", path.display());
                    Self::default()
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => Self::default(),
            Err(e) => {
                log::warn!("could not read settings {}: {e}", path.display());
                Self::default()
            }
        }
    }

    /// Write to the default path, creating the directory as needed.
    pub fn save(&self) -> Result<(), SettingsError> {
        let path = config_path().ok_or(SettingsError::NoConfigDir)?;
        self.save_to(&path)
    }

    /// Write to an explicit path, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}
