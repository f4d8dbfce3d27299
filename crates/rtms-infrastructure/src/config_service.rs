//! Configuration service.
//!
//! Loads [`AppConfig`] from `config.toml` and applies environment overrides.

use rtms_core::config::AppConfig;
use rtms_core::error::Result;
use std::path::{Path, PathBuf};

use crate::paths::RtmsPaths;

/// Loads the application configuration.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
}

impl ConfigService {
    /// Service reading the default `~/.config/rtms/config.toml`.
    pub fn new() -> Result<Self> {
        Ok(Self::with_path(RtmsPaths::default().config_file()?))
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the file, falling back to defaults when it does not exist.
    ///
    /// # Errors
    ///
    /// A file that exists but cannot be read or parsed is an error.
    pub fn load(&self) -> Result<AppConfig> {
        if !self.path.exists() {
            tracing::debug!("No config file at {:?}, using defaults", self.path);
            return Ok(AppConfig::default());
        }
        let content = std::fs::read_to_string(&self.path)?;
        let config = AppConfig::from_toml_str(&content)?;
        tracing::debug!("Loaded config from {:?}", self.path);
        Ok(config)
    }

    /// [`load`](Self::load) followed by overrides from the process environment.
    pub fn load_with_env(&self) -> Result<AppConfig> {
        Ok(self.load()?.with_overrides(|key| std::env::var(key).ok()))
    }
}
