//! Runner settings
//!
//! Read from an optional JSON file; every field has a default, so `{}` is a
//! valid settings file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a settings file could not be used
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("cannot read settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Headless runner configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Fixed seed; random when absent
    pub seed: Option<u64>,
    /// Frames to simulate
    pub ticks: u32,
    /// Let the autopilot play instead of idling
    pub autopilot: bool,
    /// Debug-level logging
    pub verbose: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            ticks: 3600,
            autopilot: true,
            verbose: false,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }
}
