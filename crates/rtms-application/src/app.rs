//! Application shell.
//!
//! Owns the session store, the router and the domain API, and turns UI
//! intents into calls on them. Request failures never escape: they are
//! routed through the session (a 401 ends it) and shown as notices. Login
//! failures only produce a notice.

use rtms_core::auth::SocialProvider;
use rtms_core::error::{Result, RtmsError};
use rtms_core::identity::{LoginCredentials, Role};
use rtms_core::notice::{Notice, Notifier};
use rtms_core::preferences::{PreferenceRepository, ThemeMode};
use rtms_core::realtime::RealtimeEvent;
use rtms_interaction::RtmsApi;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

use crate::navigation::{NavigationOutcome, NavigationRouter};
use crate::notice_board::NoticeBoard;
use crate::session::SessionStore;

/// Page refreshed by `challenge_update` events.
const CHALLENGES_PAGE: &str = "challenges";

/// What a UI element asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Navigate(String),
    JoinClub,
    BecomeSponsor,
    OpenLogin,
    Login(LoginCredentials),
    SocialLogin(SocialProvider),
    /// Role the login form submits for social sign-in.
    SelectLoginRole(Role),
    Logout,
    Back,
    Forward,
    SetTheme(ThemeMode),
}

/// Page a fresh password login lands on.
pub fn landing_page(role: Role) -> &'static str {
    match role {
        Role::Staff => "admin-dashboard",
        _ => "dashboard",
    }
}

pub struct App {
    session: Arc<SessionStore>,
    router: NavigationRouter,
    api: RtmsApi,
    preferences: Arc<dyn PreferenceRepository>,
    notifier: Arc<dyn Notifier>,
    notices: NoticeBoard,
    login_role: Role,
    theme: ThemeMode,
    unread_notifications: usize,
}

impl App {
    pub fn new(
        session: Arc<SessionStore>,
        router: NavigationRouter,
        api: RtmsApi,
        preferences: Arc<dyn PreferenceRepository>,
        notifier: Arc<dyn Notifier>,
        notice_ttl: Duration,
    ) -> Self {
        Self {
            session,
            router,
            api,
            preferences,
            notifier,
            notices: NoticeBoard::new(notice_ttl),
            login_role: Role::Student,
            theme: ThemeMode::default(),
            unread_notifications: 0,
        }
    }

    /// Restores the theme and the persisted session.
    ///
    /// The session is activated optimistically; use
    /// [`App::spawn_verification`] to check it against the backend.
    ///
    /// # Errors
    ///
    /// Returns an error if local storage cannot be read.
    pub async fn start(&mut self) -> Result<()> {
        match self.preferences.theme().await {
            Ok(Some(theme)) => self.theme = theme,
            Ok(None) => {}
            Err(err) => tracing::warn!("Failed to load theme: {}", err),
        }

        if let Some(identity) = self.session.restore().await? {
            self.login_role = identity.role;
        }
        self.router.sync_session().await;
        Ok(())
    }

    /// Verifies the restored token in the background.
    ///
    /// A rejected token ends the session; the router picks the resulting
    /// event up on its next transition.
    pub fn spawn_verification(&self) -> JoinHandle<bool> {
        let session = self.session.clone();
        tokio::spawn(async move { session.verify_session().await })
    }

    /// Carries out one intent.
    ///
    /// # Returns
    ///
    /// The navigation outcome when the intent moved (or tried to move) the
    /// router, `None` otherwise.
    pub async fn dispatch(&mut self, intent: Intent) -> Option<NavigationOutcome> {
        tracing::debug!(?intent, "Dispatching intent");
        match intent {
            Intent::Navigate(page) => Some(self.router.navigate(&page).await),
            Intent::JoinClub => Some(self.router.navigate("join").await),
            Intent::BecomeSponsor => Some(self.router.navigate("sponsors").await),
            Intent::OpenLogin => {
                self.notifier.prompt_login(&self.router.current_page().id);
                None
            }
            Intent::Login(credentials) => self.login(credentials).await,
            Intent::SocialLogin(provider) => {
                self.social_login(provider).await;
                None
            }
            Intent::SelectLoginRole(role) => {
                self.login_role = role;
                None
            }
            Intent::Logout => {
                self.session.logout().await;
                self.router.sync_session().await;
                self.notify(Notice::success("Logged out successfully"));
                None
            }
            Intent::Back => Some(self.router.back().await),
            Intent::Forward => Some(self.router.forward().await),
            Intent::SetTheme(theme) => {
                self.set_theme(theme).await;
                None
            }
        }
    }

    /// Reacts to one server-pushed event.
    pub async fn handle_realtime(&mut self, event: RealtimeEvent) {
        tracing::debug!(?event, "Real-time event");
        match event {
            RealtimeEvent::Notification => self.refresh_unread_count().await,
            RealtimeEvent::ChallengeUpdate => {
                self.router.invalidate_view(CHALLENGES_PAGE);
                if self.router.current_page().id == CHALLENGES_PAGE {
                    self.router.navigate(CHALLENGES_PAGE).await;
                }
            }
            RealtimeEvent::SubmissionStatus { message, status } => {
                if status == "approved" {
                    self.notify(Notice::success(message));
                } else {
                    self.notify(Notice::info(message));
                }
            }
            RealtimeEvent::Unknown => tracing::debug!("Ignoring unknown real-time event"),
        }
    }

    /// Re-reads the notification list and updates the badge count.
    pub async fn refresh_unread_count(&mut self) {
        match self.api.unread_notification_count().await {
            Ok(count) => self.unread_notifications = count,
            Err(err) => self.report(err).await,
        }
    }

    /// Routes a request failure through the session and shows it.
    pub async fn report(&mut self, err: RtmsError) {
        let err = self.session.absorb_error(err).await;
        self.router.sync_session().await;
        if err.is_not_found() {
            tracing::debug!("Not surfacing: {}", err);
            return;
        }
        self.notify(Notice::error(err.user_message()));
    }

    /// Notices still on screen.
    pub fn notices(&mut self) -> Vec<Notice> {
        self.notices.active()
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    pub fn router(&self) -> &NavigationRouter {
        &self.router
    }

    pub fn api(&self) -> &RtmsApi {
        &self.api
    }

    pub fn theme(&self) -> ThemeMode {
        self.theme
    }

    pub fn login_role(&self) -> Role {
        self.login_role
    }

    pub fn unread_notifications(&self) -> usize {
        self.unread_notifications
    }

    async fn login(&mut self, credentials: LoginCredentials) -> Option<NavigationOutcome> {
        match self.session.login(&credentials).await {
            Ok(identity) => {
                self.notify(Notice::success("Welcome back!"));
                Some(self.router.navigate(landing_page(identity.role)).await)
            }
            Err(err) => {
                tracing::warn!(kind = %err.kind(), "Login failed: {}", err);
                self.notify(Notice::error(err.user_message()));
                None
            }
        }
    }

    async fn social_login(&mut self, provider: SocialProvider) {
        self.notify(Notice::info(format!("Redirecting to {}...", provider)));
        match self.session.social_login(provider, self.login_role).await {
            Ok(_) => {
                self.router.sync_session().await;
                self.notify(Notice::success(format!("Welcome via {}!", provider)));
            }
            Err(err) => {
                tracing::warn!(%provider, "Social login failed: {}", err);
                self.notify(Notice::error(format!(
                    "{} login failed. Please try again.",
                    provider
                )));
            }
        }
    }

    async fn set_theme(&mut self, theme: ThemeMode) {
        self.theme = theme;
        if let Err(err) = self.preferences.set_theme(theme).await {
            tracing::warn!("Failed to save theme: {}", err);
        }
    }

    fn notify(&mut self, notice: Notice) {
        self.notices.post(notice.clone());
        self.notifier.notify(notice);
    }
}
