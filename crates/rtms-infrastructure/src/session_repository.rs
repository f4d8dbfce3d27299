//! Session repository backed by key-value storage.

use async_trait::async_trait;
use rtms_core::error::Result;
use rtms_core::identity::Identity;
use rtms_core::session::{PersistedSession, SessionRepository};
use std::sync::Arc;

use crate::storage::KeyValueStore;

/// Storage key of the opaque session token.
pub const TOKEN_KEY: &str = "rtms_token";
/// Storage key of the JSON-serialized identity.
pub const USER_KEY: &str = "rtms_user";

/// Persists the session as two entries: the token and the identity JSON.
#[derive(Clone)]
pub struct KeyValueSessionRepository {
    store: Arc<dyn KeyValueStore>,
}

impl KeyValueSessionRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl SessionRepository for KeyValueSessionRepository {
    async fn load(&self) -> Result<Option<PersistedSession>> {
        let token = self.store.get(TOKEN_KEY).await?;
        let user = self.store.get(USER_KEY).await?;

        match (token, user) {
            (Some(token), Some(user)) if !token.is_empty() => {
                let identity: Identity = serde_json::from_str(&user)?;
                Ok(Some(PersistedSession { token, identity }))
            }
            (None, None) => Ok(None),
            _ => {
                tracing::debug!("Ignoring half-persisted session");
                Ok(None)
            }
        }
    }

    async fn save(&self, session: &PersistedSession) -> Result<()> {
        let user = serde_json::to_string(&session.identity)?;
        self.store.set(TOKEN_KEY, session.token.clone()).await?;
        self.store.set(USER_KEY, user).await
    }

    async fn clear(&self) -> Result<()> {
        self.store.remove(TOKEN_KEY).await?;
        self.store.remove(USER_KEY).await
    }
}
