use rtms_core::auth::{AuthApi, AuthResponse, SocialLoginProvider, SocialProvider};
use rtms_core::error::{Result, RtmsError};
use rtms_core::identity::{Identity, LoginCredentials, Role};
use rtms_core::session::{PersistedSession, Session, SessionEvent, SessionRepository};
use std::sync::Arc;
use tokio::sync::{RwLock, broadcast};

/// Buffered session events per subscriber before it starts lagging.
const EVENT_CAPACITY: usize = 32;

/// The single source of truth for who the user is and what they may do.
///
/// `SessionStore` is responsible for:
/// - Restoring a persisted session at startup and verifying it
/// - Password and social login
/// - Logout, explicit or forced by a rejected credential
/// - Publishing [`SessionEvent`]s to subscribers
///
/// It is shared as `Arc<SessionStore>`; the state sits behind a
/// `tokio::sync::RwLock` so spawned tasks (token verification) can update it.
pub struct SessionStore {
    state: RwLock<Session>,
    auth_api: Arc<dyn AuthApi>,
    repository: Arc<dyn SessionRepository>,
    social: Arc<dyn SocialLoginProvider>,
    events: broadcast::Sender<SessionEvent>,
}

impl SessionStore {
    /// Creates an anonymous store.
    ///
    /// # Arguments
    ///
    /// * `auth_api` - Backend authentication endpoints
    /// * `repository` - Local persistence of the `(token, identity)` pair
    /// * `social` - Provider used by [`SessionStore::social_login`]
    pub fn new(
        auth_api: Arc<dyn AuthApi>,
        repository: Arc<dyn SessionRepository>,
        social: Arc<dyn SocialLoginProvider>,
    ) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            state: RwLock::new(Session::anonymous()),
            auth_api,
            repository,
            social,
            events,
        }
    }

    /// Receiver for every event published after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    // ============================================================================
    // Lifecycle
    // ============================================================================

    /// Activates the persisted session, if any, without contacting the backend.
    ///
    /// A corrupt persisted identity wipes storage and counts as no session.
    /// Call [`SessionStore::verify_session`] afterwards to check the token.
    ///
    /// # Returns
    ///
    /// The restored identity, or `None` when the session stays anonymous.
    ///
    /// # Errors
    ///
    /// Returns an error only if storage itself cannot be read.
    pub async fn restore(&self) -> Result<Option<Identity>> {
        let persisted = match self.repository.load().await {
            Ok(persisted) => persisted,
            Err(err @ RtmsError::Serialization { .. }) => {
                tracing::warn!("Discarding corrupt persisted session: {}", err);
                if let Err(e) = self.repository.clear().await {
                    tracing::warn!("Failed to clear persisted session: {}", e);
                }
                None
            }
            Err(err) => return Err(err),
        };

        let Some(PersistedSession { token, identity }) = persisted else {
            tracing::debug!("No persisted session");
            return Ok(None);
        };

        self.activate(token, identity.clone()).await;
        tracing::info!(user = %identity.email, role = %identity.role, "Session restored");
        Ok(Some(identity))
    }

    /// Checks the current token with the backend.
    ///
    /// Any verification failure is an implicit logout: the session is cleared
    /// and [`SessionEvent::Expired`] is published. A login that completes while
    /// the check is in flight is left alone.
    ///
    /// # Returns
    ///
    /// `true` if the session is still valid, `false` if it was anonymous or got
    /// cleared.
    pub async fn verify_session(&self) -> bool {
        let Some(token) = self.token().await else {
            return false;
        };

        match self.auth_api.verify(&token).await {
            Ok(()) => {
                tracing::debug!("Session token verified");
                true
            }
            Err(err) => {
                tracing::warn!(kind = %err.kind(), "Session verification failed: {}", err);
                self.expire_if_current(&token).await;
                false
            }
        }
    }

    /// Logs in with email and password.
    ///
    /// # Errors
    ///
    /// - `Validation` if the form is incomplete (nothing is sent), or if the
    ///   backend rejects the credentials with a 401
    /// - Whatever else the backend call fails with
    /// - `Http` with the backend's message when the response is not a success
    ///
    /// On error the session is left exactly as it was.
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<Identity> {
        credentials.validate()?;
        tracing::info!(email = %credentials.email, role = %credentials.user_type, "Logging in");

        let response = match self.auth_api.login(credentials).await {
            Ok(response) => response,
            // A 401 here rejects the submitted credentials, not the current session.
            Err(RtmsError::Unauthorized(message)) => return Err(RtmsError::Validation(message)),
            Err(err) => return Err(err),
        };
        self.complete_login(response).await
    }

    /// Logs in through a social provider.
    ///
    /// Completes exactly like [`SessionStore::login`].
    pub async fn social_login(
        &self,
        provider: SocialProvider,
        requested_role: Role,
    ) -> Result<Identity> {
        tracing::info!(%provider, role = %requested_role, "Starting social login");
        let response = self.social.authorize(provider, requested_role).await?;
        self.complete_login(response).await
    }

    /// Logs out.
    ///
    /// The backend is told first, best effort. Local state and storage are
    /// then cleared unconditionally and [`SessionEvent::LoggedOut`] is published.
    pub async fn logout(&self) {
        if self.is_authenticated().await {
            if let Err(err) = self.auth_api.logout().await {
                tracing::warn!("Remote logout failed: {}", err);
            }
        }

        self.clear_local().await;
        tracing::info!("Logged out");
        self.publish(SessionEvent::LoggedOut);
    }

    /// Routes a request failure through the session.
    ///
    /// An `Unauthorized` error on an authenticated session forces a local
    /// logout and publishes [`SessionEvent::Expired`]. The error is handed back
    /// either way so the caller can report it.
    pub async fn absorb_error(&self, err: RtmsError) -> RtmsError {
        if err.is_unauthorized() && self.is_authenticated().await {
            tracing::warn!("Credential rejected by backend, ending session");
            self.clear_local().await;
            self.publish(SessionEvent::Expired);
        }
        err
    }

    // ============================================================================
    // Queries
    // ============================================================================

    pub async fn is_authenticated(&self) -> bool {
        self.state.read().await.is_authenticated()
    }

    pub async fn has_role(&self, role: Role) -> bool {
        self.state.read().await.has_role(role)
    }

    pub async fn role(&self) -> Role {
        self.state.read().await.role()
    }

    pub async fn identity(&self) -> Option<Identity> {
        self.state.read().await.identity().cloned()
    }

    pub async fn token(&self) -> Option<String> {
        self.state.read().await.token().map(str::to_string)
    }

    /// Copy of the whole session, consistent at one instant.
    pub async fn snapshot(&self) -> Session {
        self.state.read().await.clone()
    }

    // ============================================================================
    // Internals
    // ============================================================================

    async fn complete_login(&self, response: AuthResponse) -> Result<Identity> {
        let (token, identity) = response.into_credential()?;

        let persisted = PersistedSession {
            token: token.clone(),
            identity: identity.clone(),
        };
        if let Err(err) = self.repository.save(&persisted).await {
            tracing::warn!("Failed to persist session: {}", err);
        }

        self.activate(token, identity.clone()).await;
        tracing::info!(user = %identity.email, role = %identity.role, "Logged in");
        Ok(identity)
    }

    async fn activate(&self, token: String, identity: Identity) {
        self.auth_api.set_bearer(Some(&token));
        *self.state.write().await = Session::authenticated(token, identity.clone());
        self.publish(SessionEvent::LoggedIn { identity });
    }

    async fn expire_if_current(&self, token: &str) {
        {
            let mut state = self.state.write().await;
            if state.token() != Some(token) {
                tracing::debug!("Session changed during verification, keeping it");
                return;
            }
            state.clear();
        }
        self.auth_api.set_bearer(None);
        if let Err(err) = self.repository.clear().await {
            tracing::warn!("Failed to clear persisted session: {}", err);
        }
        self.publish(SessionEvent::Expired);
    }

    async fn clear_local(&self) {
        self.state.write().await.clear();
        self.auth_api.set_bearer(None);
        if let Err(err) = self.repository.clear().await {
            tracing::warn!("Failed to clear persisted session: {}", err);
        }
    }

    fn publish(&self, event: SessionEvent) {
        if self.events.send(event).is_err() {
            tracing::debug!("No session event subscribers");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeAuthApi, InstantSocialLogin, identity};
    use rtms_core::ErrorKind;
    use rtms_core::session::SessionRepository;
    use rtms_infrastructure::{KeyValueSessionRepository, KeyValueStore, MemoryKeyValueStore};

    struct Fixture {
        store: SessionStore,
        auth: Arc<FakeAuthApi>,
        repository: Arc<KeyValueSessionRepository>,
        kv: Arc<MemoryKeyValueStore>,
    }

    fn fixture() -> Fixture {
        let auth = Arc::new(FakeAuthApi::default());
        let kv = Arc::new(MemoryKeyValueStore::new());
        let repository = Arc::new(KeyValueSessionRepository::new(kv.clone()));
        let store = SessionStore::new(
            auth.clone(),
            repository.clone(),
            Arc::new(InstantSocialLogin),
        );
        Fixture {
            store,
            auth,
            repository,
            kv,
        }
    }

    fn student_credentials() -> LoginCredentials {
        LoginCredentials::new("kim@uni.edu", "secret", Role::Student)
    }

    #[tokio::test]
    async fn test_login_populates_and_persists() {
        let f = fixture();
        let mut events = f.store.subscribe();

        let identity = f.store.login(&student_credentials()).await.unwrap();

        assert_eq!(identity.role, Role::Student);
        assert!(f.store.is_authenticated().await);
        assert!(!f.store.token().await.unwrap().is_empty());
        assert!(f.store.has_role(Role::Student).await);
        assert_eq!(f.auth.bearer().as_deref(), Some("token-kim@uni.edu"));
        assert!(f.repository.load().await.unwrap().is_some());
        assert_eq!(
            events.try_recv().unwrap(),
            SessionEvent::LoggedIn { identity }
        );
    }

    #[tokio::test]
    async fn test_logout_clears_everything() {
        let f = fixture();
        f.store.login(&student_credentials()).await.unwrap();
        let mut events = f.store.subscribe();

        f.store.logout().await;

        assert!(!f.store.is_authenticated().await);
        assert!(f.store.token().await.is_none());
        assert!(f.store.identity().await.is_none());
        assert!(f.auth.bearer().is_none());
        assert!(f.repository.load().await.unwrap().is_none());
        assert_eq!(f.auth.logout_calls(), 1);
        assert_eq!(events.try_recv().unwrap(), SessionEvent::LoggedOut);
    }

    #[tokio::test]
    async fn test_logout_survives_remote_failure() {
        let f = fixture();
        f.store.login(&student_credentials()).await.unwrap();
        f.auth.fail_logout();

        f.store.logout().await;
        assert!(!f.store.is_authenticated().await);
    }

    #[tokio::test]
    async fn test_validation_error_sends_nothing() {
        let f = fixture();
        let err = f
            .store
            .login(&LoginCredentials::new("", "secret", Role::Student))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), rtms_core::ErrorKind::Validation);
        assert_eq!(f.auth.login_calls(), 0);
        assert!(!f.store.is_authenticated().await);
    }

    #[tokio::test]
    async fn test_rejected_login_leaves_state_untouched() {
        let f = fixture();
        f.auth.reject_logins("Invalid credentials");

        let err = f.store.login(&student_credentials()).await.unwrap_err();

        assert_eq!(err.user_message(), "Invalid credentials");
        assert_eq!(f.store.snapshot().await, Session::anonymous());
        assert!(f.repository.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_failed_login_keeps_existing_session() {
        for kind in [ErrorKind::Unauthorized, ErrorKind::NetworkUnreachable] {
            let f = fixture();
            f.store.login(&student_credentials()).await.unwrap();
            let before = f.store.snapshot().await;
            let persisted = f.kv.get("rtms_token").await.unwrap();
            let mut events = f.store.subscribe();

            f.auth.fail_logins(kind, "Invalid email or password");
            let err = f
                .store
                .login(&LoginCredentials::new("kim@uni.edu", "wrong", Role::Student))
                .await
                .unwrap_err();

            assert!(!err.is_unauthorized(), "{kind}");
            assert_eq!(f.store.snapshot().await, before, "{kind}");
            assert_eq!(f.auth.bearer().as_deref(), Some("token-kim@uni.edu"));
            assert_eq!(f.kv.get("rtms_token").await.unwrap(), persisted);
            assert!(f.repository.load().await.unwrap().is_some());
            assert!(events.try_recv().is_err());
        }
    }

    #[tokio::test]
    async fn test_rejected_credentials_carry_backend_message() {
        let f = fixture();
        f.auth
            .fail_logins(ErrorKind::Unauthorized, "Invalid email or password");

        let err = f.store.login(&student_credentials()).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.user_message(), "Invalid email or password");
        assert_eq!(f.store.snapshot().await, Session::anonymous());
    }

    #[tokio::test]
    async fn test_social_login_uses_requested_role() {
        let f = fixture();
        let identity = f
            .store
            .social_login(SocialProvider::Github, Role::Staff)
            .await
            .unwrap();

        assert_eq!(identity.email, "user@github.com");
        assert!(f.store.has_role(Role::Staff).await);
        assert!(f.repository.load().await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_restore_activates_persisted_session() {
        let f = fixture();
        let persisted = PersistedSession {
            token: "stored".to_string(),
            identity: identity(Role::Staff),
        };
        f.repository.save(&persisted).await.unwrap();
        let mut events = f.store.subscribe();

        let restored = f.store.restore().await.unwrap();

        assert_eq!(restored, Some(persisted.identity.clone()));
        assert_eq!(f.store.token().await.as_deref(), Some("stored"));
        assert_eq!(f.auth.bearer().as_deref(), Some("stored"));
        assert!(matches!(events.try_recv().unwrap(), SessionEvent::LoggedIn { .. }));
    }

    #[tokio::test]
    async fn test_restore_then_failed_verification_equals_fresh_store() {
        let f = fixture();
        f.repository
            .save(&PersistedSession {
                token: "stale".to_string(),
                identity: identity(Role::Student),
            })
            .await
            .unwrap();
        f.auth.reject_verification();

        f.store.restore().await.unwrap();
        let mut events = f.store.subscribe();
        assert!(!f.store.verify_session().await);

        let fresh = fixture();
        assert_eq!(f.store.snapshot().await, fresh.store.snapshot().await);
        assert!(f.repository.load().await.unwrap().is_none());
        assert!(f.auth.bearer().is_none());
        assert_eq!(events.try_recv().unwrap(), SessionEvent::Expired);
    }

    #[tokio::test]
    async fn test_successful_verification_keeps_session() {
        let f = fixture();
        f.store.login(&student_credentials()).await.unwrap();
        assert!(f.store.verify_session().await);
        assert!(f.store.is_authenticated().await);
    }

    #[tokio::test]
    async fn test_restore_discards_corrupt_identity() {
        let f = fixture();
        f.kv.set("rtms_token", "tok".to_string()).await.unwrap();
        f.kv.set("rtms_user", "{not json".to_string()).await.unwrap();

        assert!(f.store.restore().await.unwrap().is_none());
        assert!(!f.store.is_authenticated().await);
        assert!(f.kv.get("rtms_token").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_absorb_unauthorized_expires_session() {
        let f = fixture();
        f.store.login(&student_credentials()).await.unwrap();
        let mut events = f.store.subscribe();

        let err = f
            .store
            .absorb_error(RtmsError::Unauthorized("Token expired".into()))
            .await;

        assert!(err.is_unauthorized());
        assert!(!f.store.is_authenticated().await);
        assert_eq!(events.try_recv().unwrap(), SessionEvent::Expired);
    }

    #[tokio::test]
    async fn test_absorb_other_errors_is_passthrough() {
        let f = fixture();
        f.store.login(&student_credentials()).await.unwrap();

        let err = f.store.absorb_error(RtmsError::http(500, "boom")).await;

        assert_eq!(err.user_message(), "boom");
        assert!(f.store.is_authenticated().await);
    }
}
