use serde::{Deserialize, Serialize};

use crate::identity::Identity;

/// Lifecycle events published by the session store.
///
/// Consumed by the router (to re-evaluate gated pages) and by the UI (to
/// refresh the identity badge).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    /// A session became active, either by login or by restoring storage.
    LoggedIn { identity: Identity },
    /// The user logged out explicitly.
    LoggedOut,
    /// The credential was rejected by the backend; treated as a logout.
    Expired,
}

impl SessionEvent {
    /// Whether the event leaves the session anonymous.
    pub fn ends_session(&self) -> bool {
        matches!(self, SessionEvent::LoggedOut | SessionEvent::Expired)
    }
}
