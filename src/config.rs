/// User settings loaded from `settings.json`
///
/// The file is optional. Every field has a default, so a partial file
/// only overrides what it names.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

const SETTINGS_FILE_NAME: &str = "settings.json";

/// Longest side of a bounded preview, in pixels
pub const DEFAULT_PREVIEW_SIZE: u32 = 300;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Override for the image database location
    pub database_path: Option<PathBuf>,
    /// Longest side of the original/processed previews
    pub preview_size: u32,
    /// Start the window in fullscreen mode
    pub fullscreen: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_path: None,
            preview_size: DEFAULT_PREVIEW_SIZE,
            fullscreen: true,
        }
    }
}

impl Settings {
    /// Parse settings from a JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut settings: Settings = serde_json::from_str(json)?;
        // A zero-sized preview can't be rendered
        if settings.preview_size == 0 {
            settings.preview_size = DEFAULT_PREVIEW_SIZE;
        }
        Ok(settings)
    }

    /// Read settings from `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        Self::from_json(&json).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load the user's settings, falling back to defaults on any problem.
    pub fn load() -> Self {
        let Some(path) = settings_path() else {
            return Self::default();
        };

        match Self::load_from(&path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("⚠️  {}; using default settings", e);
                Self::default()
            }
        }
    }
}

/// `<config dir>/image-restore/settings.json`
fn settings_path() -> Option<PathBuf> {
    let mut path = dirs::config_dir()?;
    path.push(crate::APP_DIR_NAME);
    path.push(SETTINGS_FILE_NAME);
    Some(path)
}
