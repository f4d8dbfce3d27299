//! Session repository trait.
//!
//! Defines the interface for persisting the active session across runs.

use async_trait::async_trait;

use crate::error::Result;
use crate::identity::Identity;

/// The `(token, identity)` pair as it sits in local storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedSession {
    pub token: String,
    pub identity: Identity,
}

/// An abstract repository for the locally persisted session.
///
/// Decouples the session store from the storage mechanism (TOML key-value
/// file, in-memory map in tests).
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Loads the persisted pair.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(_))`: both token and identity were present
    /// - `Ok(None)`: nothing stored, or only half of the pair
    /// - `Err(_)`: storage could not be read or the identity is corrupt
    async fn load(&self) -> Result<Option<PersistedSession>>;

    /// Writes token and identity.
    async fn save(&self, session: &PersistedSession) -> Result<()>;

    /// Removes both entries. Succeeds when nothing was stored.
    async fn clear(&self) -> Result<()>;
}
