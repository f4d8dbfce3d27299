//! Path management for rtms configuration and local storage.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/rtms/              # Config directory
//! └── config.toml              # Application configuration
//!
//! ~/.local/share/rtms/         # Data directory (overridable)
//! └── storage.toml             # Session token, identity, preferences
//! ```

use std::path::PathBuf;
use thiserror::Error;

use rtms_core::error::RtmsError;

const APP_DIR: &str = "rtms";
const CONFIG_FILE: &str = "config.toml";
const STORAGE_FILE: &str = "storage.toml";

/// Errors that can occur during path resolution.
#[derive(Debug, Error)]
pub enum PathError {
    /// Home directory could not be determined.
    #[error("Cannot find home directory")]
    HomeDirNotFound,
}

impl From<PathError> for RtmsError {
    fn from(err: PathError) -> Self {
        RtmsError::config(err.to_string())
    }
}

/// Resolves rtms paths, honouring an explicit data directory override.
#[derive(Debug, Clone, Default)]
pub struct RtmsPaths {
    data_dir_override: Option<PathBuf>,
}

impl RtmsPaths {
    /// Creates a resolver. `data_dir` replaces the platform data directory.
    pub fn new(data_dir: Option<PathBuf>) -> Self {
        Self {
            data_dir_override: data_dir,
        }
    }

    /// Returns the rtms configuration directory (e.g. `~/.config/rtms/`).
    pub fn config_dir(&self) -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the rtms data directory (e.g. `~/.local/share/rtms/`).
    pub fn data_dir(&self) -> Result<PathBuf, PathError> {
        if let Some(dir) = &self.data_dir_override {
            return Ok(dir.clone());
        }
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::HomeDirNotFound)
    }

    pub fn config_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join(CONFIG_FILE))
    }

    /// File backing the key-value storage.
    pub fn storage_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.data_dir()?.join(STORAGE_FILE))
    }
}
