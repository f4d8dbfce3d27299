//! Application configuration.
//!
//! Loaded from `config.toml`; every field has a default so a missing or
//! partial file still yields a usable configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::error::Result;
use crate::page::DEFAULT_PAGE_ID;

pub const ENV_API_BASE_URL: &str = "RTMS_API_BASE_URL";
pub const ENV_DATA_DIR: &str = "RTMS_DATA_DIR";
pub const ENV_LOG: &str = "RTMS_LOG";

fn default_api_base_url() -> String {
    "http://localhost:8080/api".to_string()
}

fn default_page() -> String {
    DEFAULT_PAGE_ID.to_string()
}

fn default_social_login_delay_ms() -> u64 {
    1500
}

fn default_notice_ttl_secs() -> u64 {
    5
}

fn default_log_filter() -> String {
    "info".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Prefix for every backend path, e.g. `https://rtms.example.org/api`.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Page shown at startup; must be reachable without login.
    #[serde(default = "default_page")]
    pub default_page: String,

    /// Where local storage lives. `None` means the platform data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,

    /// Delay of the simulated social sign-in.
    #[serde(default = "default_social_login_delay_ms")]
    pub social_login_delay_ms: u64,

    /// How long a notice stays visible.
    #[serde(default = "default_notice_ttl_secs")]
    pub notice_ttl_secs: u64,

    /// `tracing_subscriber::EnvFilter` directive.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            default_page: default_page(),
            data_dir: None,
            social_login_delay_ms: default_social_login_delay_ms(),
            notice_ttl_secs: default_notice_ttl_secs(),
            log_filter: default_log_filter(),
        }
    }
}

impl AppConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Overrides fields from environment-style lookups.
    ///
    /// Takes the lookup as a function so callers decide the source
    /// (`std::env::var` in the binary, a map in tests).
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_API_BASE_URL) {
            self.api_base_url = url;
        }
        if let Some(dir) = lookup(ENV_DATA_DIR) {
            self.data_dir = Some(PathBuf::from(dir));
        }
        if let Some(filter) = lookup(ENV_LOG) {
            self.log_filter = filter;
        }
        self
    }

    pub fn social_login_delay(&self) -> Duration {
        Duration::from_millis(self.social_login_delay_ms)
    }

    pub fn notice_ttl(&self) -> Duration {
        Duration::from_secs(self.notice_ttl_secs)
    }
}
