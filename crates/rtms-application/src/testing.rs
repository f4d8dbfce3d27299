//! In-crate fakes for the service traits.

use async_trait::async_trait;
use rtms_core::auth::{AuthApi, AuthResponse, SocialLoginProvider, SocialProvider};
use rtms_core::error::{ErrorKind, Result, RtmsError};
use rtms_core::identity::{Identity, LoginCredentials, Role};
use rtms_core::notice::{Notice, Notifier};
use rtms_core::page::PageId;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

pub fn identity(role: Role) -> Identity {
    Identity {
        id: "u-1".to_string(),
        first_name: "Sam".to_string(),
        last_name: "Lee".to_string(),
        email: "sam@example.com".to_string(),
        role,
        avatar: None,
    }
}

/// Backend stand-in: accepts every login unless told otherwise.
#[derive(Default)]
pub struct FakeAuthApi {
    bearer: Mutex<Option<String>>,
    rejection: Mutex<Option<String>>,
    failure: Mutex<Option<(ErrorKind, String)>>,
    logout_fails: AtomicBool,
    verification_fails: AtomicBool,
    login_calls: AtomicUsize,
    logout_calls: AtomicUsize,
}

impl FakeAuthApi {
    pub fn bearer(&self) -> Option<String> {
        self.bearer.lock().unwrap().clone()
    }

    pub fn reject_logins(&self, message: &str) {
        *self.rejection.lock().unwrap() = Some(message.to_string());
    }

    /// Makes `login` fail outright with an error of `kind`.
    pub fn fail_logins(&self, kind: ErrorKind, message: &str) {
        *self.failure.lock().unwrap() = Some((kind, message.to_string()));
    }

    pub fn fail_logout(&self) {
        self.logout_fails.store(true, Ordering::SeqCst);
    }

    pub fn reject_verification(&self) {
        self.verification_fails.store(true, Ordering::SeqCst);
    }

    pub fn login_calls(&self) -> usize {
        self.login_calls.load(Ordering::SeqCst)
    }

    pub fn logout_calls(&self) -> usize {
        self.logout_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AuthApi for FakeAuthApi {
    async fn login(&self, credentials: &LoginCredentials) -> Result<AuthResponse> {
        self.login_calls.fetch_add(1, Ordering::SeqCst);
        if let Some((kind, message)) = self.failure.lock().unwrap().clone() {
            return Err(match kind {
                ErrorKind::Unauthorized => RtmsError::Unauthorized(message),
                ErrorKind::NetworkUnreachable => RtmsError::NetworkUnreachable(message),
                _ => RtmsError::http(500, message),
            });
        }
        if let Some(message) = self.rejection.lock().unwrap().clone() {
            return Ok(AuthResponse {
                success: false,
                message: Some(message),
                ..AuthResponse::default()
            });
        }
        let user = Identity {
            email: credentials.email.clone(),
            ..identity(credentials.user_type)
        };
        Ok(AuthResponse::accepted(format!("token-{}", credentials.email), user))
    }

    async fn logout(&self) -> Result<()> {
        self.logout_calls.fetch_add(1, Ordering::SeqCst);
        if self.logout_fails.load(Ordering::SeqCst) {
            return Err(RtmsError::NetworkUnreachable("connection refused".into()));
        }
        Ok(())
    }

    async fn verify(&self, _token: &str) -> Result<()> {
        if self.verification_fails.load(Ordering::SeqCst) {
            return Err(RtmsError::Unauthorized("Invalid token".into()));
        }
        Ok(())
    }

    fn set_bearer(&self, token: Option<&str>) {
        *self.bearer.lock().unwrap() = token.map(str::to_string);
    }
}

/// Social provider that resolves immediately.
pub struct InstantSocialLogin;

#[async_trait]
impl SocialLoginProvider for InstantSocialLogin {
    async fn authorize(&self, provider: SocialProvider, requested_role: Role) -> Result<AuthResponse> {
        Ok(rtms_interaction::social_login::synthetic_response(
            provider,
            requested_role,
        ))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiCall {
    PromptLogin(PageId),
    AccessDenied(PageId),
    Notice(Notice),
}

/// Notifier that records every request.
#[derive(Default)]
pub struct RecordingNotifier {
    calls: Mutex<Vec<UiCall>>,
}

impl RecordingNotifier {
    pub fn calls(&self) -> Vec<UiCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn login_prompts(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, UiCall::PromptLogin(_)))
            .count()
    }

    pub fn denials(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, UiCall::AccessDenied(_)))
            .count()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                UiCall::Notice(notice) => Some(notice),
                _ => None,
            })
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn prompt_login(&self, requested: &PageId) {
        self.calls
            .lock()
            .unwrap()
            .push(UiCall::PromptLogin(requested.clone()));
    }

    fn access_denied(&self, requested: &PageId) {
        self.calls
            .lock()
            .unwrap()
            .push(UiCall::AccessDenied(requested.clone()));
    }

    fn notify(&self, notice: Notice) {
        self.calls.lock().unwrap().push(UiCall::Notice(notice));
    }
}
