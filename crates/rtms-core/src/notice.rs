//! User-facing notices and the UI port that presents them.

use serde::{Deserialize, Serialize};
use strum::Display;

use crate::page::PageId;

/// Shown when a session lacks the role a page requires.
pub const ACCESS_DENIED_MESSAGE: &str = "Access denied. Staff privileges required.";

/// Severity of a transient notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Info,
    Warning,
    Error,
}

/// A short message shown to the user and dismissed automatically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Success, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Info, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Error, message)
    }
}

/// Requests the router and shell make of the UI.
///
/// Implementations only present things; they never call back into the
/// router or the session store.
pub trait Notifier: Send + Sync {
    /// Open the login flow (modal, prompt, ...).
    fn prompt_login(&self, requested: &PageId);

    /// Tell the user the page needs privileges they do not have.
    fn access_denied(&self, requested: &PageId);

    /// Show a transient notice.
    fn notify(&self, notice: Notice);
}
