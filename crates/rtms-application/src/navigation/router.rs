use rtms_core::notice::Notifier;
use rtms_core::page::{Page, PageId, PageRegistry};
use rtms_core::session::{Session, SessionEvent};
use std::sync::Arc;
use tokio::sync::broadcast::{self, error::TryRecvError};

use super::history::History;
use crate::session::SessionStore;
use crate::view::{View, ViewRegistry};

/// Result of a navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationOutcome {
    /// The target became the current page.
    Navigated,
    /// The target was already current and its content was rebuilt.
    Refreshed,
    /// The target was already current; nothing changed.
    Unchanged,
    /// The id is not registered.
    UnknownPage,
    /// Anonymous session on an auth-only page; the login prompt was requested.
    LoginRequired,
    /// The session lacks the page's role; an access-denied notice was requested.
    AccessDenied,
}

impl NavigationOutcome {
    /// Whether the gate let the request through.
    pub fn is_accepted(&self) -> bool {
        matches!(
            self,
            NavigationOutcome::Navigated | NavigationOutcome::Refreshed | NavigationOutcome::Unchanged
        )
    }
}

/// Page-visibility state machine with authorization gating and history.
///
/// Exactly one registered page is current at any time. Session events are
/// drained before every transition so the gate always sees the latest
/// session.
pub struct NavigationRouter {
    pages: PageRegistry,
    views: ViewRegistry,
    session: Arc<SessionStore>,
    events: broadcast::Receiver<SessionEvent>,
    notifier: Arc<dyn Notifier>,
    current: PageId,
    history: History,
}

impl NavigationRouter {
    /// Creates a router showing the registry's default page.
    pub async fn new(
        pages: PageRegistry,
        session: Arc<SessionStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let events = session.subscribe();
        let start = pages.default_page().clone();
        let mut views = ViewRegistry::new();
        views.ensure(&start, &session.snapshot().await);

        Self {
            pages,
            views,
            session,
            events,
            notifier,
            current: start.id.clone(),
            history: History::new(start.id),
        }
    }

    // ============================================================================
    // Transitions
    // ============================================================================

    /// Navigates to `target`, pushing a history entry on success.
    pub async fn navigate(&mut self, target: &str) -> NavigationOutcome {
        self.sync_session().await;
        self.transition(target, true).await
    }

    /// Replays the previous history entry through the full gate.
    ///
    /// A refused replay leaves the cursor where it was.
    pub async fn back(&mut self) -> NavigationOutcome {
        self.sync_session().await;
        let Some(target) = self.history.peek_back().cloned() else {
            return NavigationOutcome::Unchanged;
        };

        let outcome = self.transition(target.as_str(), false).await;
        if outcome.is_accepted() {
            self.history.step_back();
        }
        outcome
    }

    /// Replays the next history entry through the full gate.
    pub async fn forward(&mut self) -> NavigationOutcome {
        self.sync_session().await;
        let Some(target) = self.history.peek_forward().cloned() else {
            return NavigationOutcome::Unchanged;
        };

        let outcome = self.transition(target.as_str(), false).await;
        if outcome.is_accepted() {
            self.history.step_forward();
        }
        outcome
    }

    /// Applies every pending session event.
    pub async fn sync_session(&mut self) {
        loop {
            match self.events.try_recv() {
                Ok(event) => {
                    tracing::debug!(?event, "Applying session event");
                    self.reevaluate().await;
                }
                Err(TryRecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Session events lagged, re-evaluating");
                    self.reevaluate().await;
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }
    }

    /// Drops the cached content of `page_id`.
    ///
    /// The next navigation to it rebuilds the content; when it is the
    /// current page that navigation reports [`NavigationOutcome::Refreshed`].
    pub fn invalidate_view(&mut self, page_id: &str) -> bool {
        self.views.invalidate(page_id)
    }

    // ============================================================================
    // Queries
    // ============================================================================

    pub fn current_page(&self) -> &Page {
        self.pages
            .get(self.current.as_str())
            .unwrap_or_else(|| self.pages.default_page())
    }

    pub fn current_view(&self) -> Option<Arc<View>> {
        self.views.get(self.current.as_str())
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn pages(&self) -> &PageRegistry {
        &self.pages
    }

    pub fn views(&self) -> &ViewRegistry {
        &self.views
    }

    // ============================================================================
    // Internals
    // ============================================================================

    async fn transition(&mut self, target: &str, push: bool) -> NavigationOutcome {
        let Some(page) = self.pages.get(target).cloned() else {
            tracing::debug!(page = target, "Ignoring navigation to unknown page");
            return NavigationOutcome::UnknownPage;
        };
        let session = self.session.snapshot().await;

        if let Some(refusal) = self.gate(&page, &session) {
            return refusal;
        }

        if page.id == self.current {
            if self.views.is_cached(page.id.as_str()) {
                return NavigationOutcome::Unchanged;
            }
            self.views.ensure(&page, &session);
            tracing::debug!(page = %page.id, "Rebuilt current page");
            return NavigationOutcome::Refreshed;
        }

        self.activate(&page, &session, push);
        NavigationOutcome::Navigated
    }

    fn gate(&self, page: &Page, session: &Session) -> Option<NavigationOutcome> {
        if page.requires_auth && !session.is_authenticated() {
            tracing::info!(page = %page.id, "Login required");
            self.notifier.prompt_login(&page.id);
            return Some(NavigationOutcome::LoginRequired);
        }
        if let Some(required) = page.requires_role {
            if !session.role().satisfies(required) {
                tracing::info!(page = %page.id, role = %session.role(), "Access denied");
                self.notifier.access_denied(&page.id);
                return Some(NavigationOutcome::AccessDenied);
            }
        }
        None
    }

    fn activate(&mut self, page: &Page, session: &Session, push: bool) {
        self.views.ensure(page, session);
        tracing::info!(from = %self.current, to = %page.id, "Navigated");
        self.current = page.id.clone();
        if push {
            self.history.push(page.id.clone());
        }
    }

    /// Re-checks the current page against the latest session.
    async fn reevaluate(&mut self) {
        self.views.invalidate_personalized();
        let session = self.session.snapshot().await;
        let page = self.current_page().clone();

        if !page.is_accessible_to(session.role()) {
            let start = self.pages.default_page().clone();
            tracing::info!(from = %page.id, "Current page no longer accessible");
            self.activate(&start, &session, true);
            return;
        }

        if page.requires_auth || page.personalized {
            self.views.invalidate(page.id.as_str());
            self.views.ensure(&page, &session);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeAuthApi, InstantSocialLogin, RecordingNotifier};
    use rtms_core::auth::SocialProvider;
    use rtms_core::identity::{LoginCredentials, Role};
    use rtms_infrastructure::{KeyValueSessionRepository, MemoryKeyValueStore};

    struct Fixture {
        router: NavigationRouter,
        session: Arc<SessionStore>,
        notifier: Arc<RecordingNotifier>,
    }

    async fn fixture() -> Fixture {
        let session = Arc::new(SessionStore::new(
            Arc::new(FakeAuthApi::default()),
            Arc::new(KeyValueSessionRepository::new(Arc::new(
                MemoryKeyValueStore::new(),
            ))),
            Arc::new(InstantSocialLogin),
        ));
        let notifier = Arc::new(RecordingNotifier::default());
        let router =
            NavigationRouter::new(PageRegistry::standard(), session.clone(), notifier.clone())
                .await;
        Fixture {
            router,
            session,
            notifier,
        }
    }

    async fn login(session: &SessionStore, role: Role) {
        session
            .login(&LoginCredentials::new("sam@example.com", "pw", role))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_starts_on_default_page() {
        let f = fixture().await;
        assert_eq!(f.router.current_page().id, "home");
        assert_eq!(f.router.history().entries(), &[PageId::from("home")]);
        assert!(f.router.current_view().is_some());
    }

    #[tokio::test]
    async fn test_unknown_page_changes_nothing() {
        let mut f = fixture().await;
        assert_eq!(f.router.navigate("nope").await, NavigationOutcome::UnknownPage);
        assert_eq!(f.router.current_page().id, "home");
        assert_eq!(f.router.history().entries().len(), 1);
        assert!(f.notifier.calls().is_empty());
    }

    #[tokio::test]
    async fn test_anonymous_prompted_once_per_attempt() {
        let mut f = fixture().await;

        assert_eq!(
            f.router.navigate("dashboard").await,
            NavigationOutcome::LoginRequired
        );
        assert_eq!(f.notifier.login_prompts(), 1);
        assert_eq!(f.router.current_page().id, "home");

        f.router.navigate("submissions").await;
        assert_eq!(f.notifier.login_prompts(), 2);
        assert_eq!(f.router.current_page().id, "home");
    }

    #[tokio::test]
    async fn test_student_journey() {
        let mut f = fixture().await;

        assert_eq!(
            f.router.navigate("dashboard").await,
            NavigationOutcome::LoginRequired
        );
        assert_eq!(f.notifier.login_prompts(), 1);

        login(&f.session, Role::Student).await;
        assert_eq!(f.router.navigate("dashboard").await, NavigationOutcome::Navigated);
        assert_eq!(f.router.current_page().id, "dashboard");

        assert_eq!(
            f.router.navigate("admin-dashboard").await,
            NavigationOutcome::AccessDenied
        );
        assert_eq!(f.notifier.denials(), 1);
        assert_eq!(f.router.current_page().id, "dashboard");
    }

    #[tokio::test]
    async fn test_logout_on_profile_returns_to_default() {
        let mut f = fixture().await;
        login(&f.session, Role::Student).await;
        f.router.navigate("profile").await;

        f.session.logout().await;
        f.router.sync_session().await;

        assert!(!f.session.is_authenticated().await);
        assert_eq!(f.router.current_page().id, "home");
        assert!(!f.router.views().is_cached("profile"));
    }

    #[tokio::test]
    async fn test_logout_on_public_page_stays() {
        let mut f = fixture().await;
        login(&f.session, Role::Student).await;
        f.router.navigate("merch").await;

        f.session.logout().await;
        f.router.sync_session().await;
        assert_eq!(f.router.current_page().id, "merch");
    }

    #[tokio::test]
    async fn test_reentrant_navigation() {
        let mut f = fixture().await;
        assert_eq!(f.router.navigate("challenges").await, NavigationOutcome::Navigated);
        let view = f.router.current_view().unwrap();

        assert_eq!(f.router.navigate("challenges").await, NavigationOutcome::Unchanged);
        assert_eq!(f.router.history().entries().len(), 2);
        assert!(Arc::ptr_eq(&view, &f.router.current_view().unwrap()));

        assert!(f.router.invalidate_view("challenges"));
        assert_eq!(f.router.navigate("challenges").await, NavigationOutcome::Refreshed);
        assert_eq!(f.router.history().entries().len(), 2);
        assert!(!Arc::ptr_eq(&view, &f.router.current_view().unwrap()));
    }

    #[tokio::test]
    async fn test_back_and_forward() {
        let mut f = fixture().await;
        f.router.navigate("challenges").await;
        f.router.navigate("showcase").await;

        assert_eq!(f.router.back().await, NavigationOutcome::Navigated);
        assert_eq!(f.router.current_page().id, "challenges");
        assert_eq!(f.router.history().cursor(), 1);

        assert_eq!(f.router.forward().await, NavigationOutcome::Navigated);
        assert_eq!(f.router.current_page().id, "showcase");
        assert_eq!(f.router.forward().await, NavigationOutcome::Unchanged);

        f.router.back().await;
        f.router.navigate("merch").await;
        assert_eq!(f.router.history().entries().len(), 3);
        assert!(f.router.history().peek_forward().is_none());
    }

    #[tokio::test]
    async fn test_replay_of_inaccessible_page_refused() {
        let mut f = fixture().await;
        login(&f.session, Role::Student).await;
        f.router.navigate("dashboard").await;
        f.session.logout().await;
        f.router.sync_session().await;
        let cursor = f.router.history().cursor();

        assert_eq!(f.router.back().await, NavigationOutcome::LoginRequired);
        assert_eq!(f.router.current_page().id, "home");
        assert_eq!(f.router.history().cursor(), cursor);
        assert_eq!(f.notifier.login_prompts(), 1);
    }

    #[tokio::test]
    async fn test_role_change_leaves_staff_page() {
        let mut f = fixture().await;
        login(&f.session, Role::Staff).await;
        assert_eq!(
            f.router.navigate("admin-dashboard").await,
            NavigationOutcome::Navigated
        );

        login(&f.session, Role::Student).await;
        f.router.sync_session().await;
        assert_eq!(f.router.current_page().id, "home");
    }

    #[tokio::test]
    async fn test_login_refreshes_personalized_current_page() {
        let mut f = fixture().await;
        login(&f.session, Role::Student).await;
        f.router.navigate("dashboard").await;
        let before = f.router.current_view().unwrap();
        assert_eq!(before.heading, "Welcome back, Sam!");

        f.session
            .social_login(SocialProvider::Google, Role::Student)
            .await
            .unwrap();
        f.router.sync_session().await;

        let after = f.router.current_view().unwrap();
        assert_eq!(after.heading, "Welcome back, Social!");
        assert_eq!(f.router.current_page().id, "dashboard");
    }

    #[tokio::test]
    async fn test_lagged_events_trigger_reevaluation() {
        let mut f = fixture().await;
        login(&f.session, Role::Student).await;
        f.router.navigate("profile").await;

        for _ in 0..20 {
            f.session.logout().await;
            login(&f.session, Role::Student).await;
        }
        f.session.logout().await;
        f.router.sync_session().await;

        assert_eq!(f.router.current_page().id, "home");
    }
}
