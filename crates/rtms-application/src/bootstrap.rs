//! Wiring of the production components.

use rtms_core::config::AppConfig;
use rtms_core::error::Result;
use rtms_core::notice::Notifier;
use rtms_core::page::PageRegistry;
use rtms_infrastructure::{
    KeyValuePreferenceRepository, KeyValueSessionRepository, KeyValueStore, RtmsPaths,
    TomlKeyValueStore,
};
use rtms_interaction::{ApiClient, RemoteAuthApi, RtmsApi, SimulatedSocialLogin};
use std::sync::Arc;

use crate::app::App;
use crate::navigation::NavigationRouter;
use crate::session::SessionStore;

/// Builds an [`App`] backed by the TOML storage file and the remote backend.
///
/// # Errors
///
/// Returns an error if the data directory cannot be resolved or the
/// configured default page is not a public page.
pub async fn build_app(config: &AppConfig, notifier: Arc<dyn Notifier>) -> Result<App> {
    let paths = RtmsPaths::new(config.data_dir.clone());
    let storage_file = paths.storage_file()?;
    tracing::debug!(path = %storage_file.display(), "Using storage file");
    let store: Arc<dyn KeyValueStore> = Arc::new(TomlKeyValueStore::new(storage_file));

    let client = Arc::new(ApiClient::new(config.api_base_url.clone()));
    let session = Arc::new(SessionStore::new(
        Arc::new(RemoteAuthApi::new(client.clone())),
        Arc::new(KeyValueSessionRepository::new(store.clone())),
        Arc::new(SimulatedSocialLogin::new(config.social_login_delay())),
    ));

    let pages = PageRegistry::standard_with_default(&config.default_page)?;
    let router = NavigationRouter::new(pages, session.clone(), notifier.clone()).await;

    Ok(App::new(
        session,
        router,
        RtmsApi::new(client),
        Arc::new(KeyValuePreferenceRepository::new(store)),
        notifier,
        config.notice_ttl(),
    ))
}
