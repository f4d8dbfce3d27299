//! Preference repository backed by key-value storage.

use async_trait::async_trait;
use rtms_core::error::Result;
use rtms_core::preferences::{PreferenceRepository, ThemeMode};
use std::sync::Arc;

use crate::storage::KeyValueStore;

/// Storage key of the theme preference.
pub const THEME_KEY: &str = "rtms-glow-mode";

#[derive(Clone)]
pub struct KeyValuePreferenceRepository {
    store: Arc<dyn KeyValueStore>,
}

impl KeyValuePreferenceRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl PreferenceRepository for KeyValuePreferenceRepository {
    async fn theme(&self) -> Result<Option<ThemeMode>> {
        let Some(raw) = self.store.get(THEME_KEY).await? else {
            return Ok(None);
        };
        match raw.parse::<ThemeMode>() {
            Ok(theme) => Ok(Some(theme)),
            Err(_) => {
                tracing::warn!("Ignoring unknown theme '{}'", raw);
                Ok(None)
            }
        }
    }

    async fn set_theme(&self, theme: ThemeMode) -> Result<()> {
        self.store.set(THEME_KEY, theme.to_string()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{KeyValueStore, MemoryKeyValueStore};

    #[tokio::test]
    async fn test_theme_round_trip() {
        let repo = KeyValuePreferenceRepository::new(Arc::new(MemoryKeyValueStore::new()));
        assert_eq!(repo.theme().await.unwrap(), None);

        repo.set_theme(ThemeMode::HighGlow).await.unwrap();
        assert_eq!(repo.theme().await.unwrap(), Some(ThemeMode::HighGlow));
    }

    #[tokio::test]
    async fn test_unknown_theme_is_ignored() {
        let store = Arc::new(MemoryKeyValueStore::new());
        store.set(THEME_KEY, "neon".to_string()).await.unwrap();

        let repo = KeyValuePreferenceRepository::new(store);
        assert_eq!(repo.theme().await.unwrap(), None);
    }
}
