//! Authentication service traits.
//!
//! The session store talks to the backend and to the social-login flow only
//! through these traits, so tests can substitute instant fakes.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::{Result, RtmsError};
use crate::identity::{Identity, LoginCredentials, Role};

/// Envelope returned by the login endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub user: Option<Identity>,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl AuthResponse {
    pub fn accepted(token: impl Into<String>, user: Identity) -> Self {
        Self {
            success: true,
            user: Some(user),
            token: Some(token.into()),
            message: None,
        }
    }

    /// Extracts the credential pair.
    ///
    /// # Errors
    ///
    /// Fails with the backend's message (or "Login failed") unless the
    /// response is successful and carries both a non-empty token and a user.
    /// A user whose role is `anonymous` is rejected as well.
    pub fn into_credential(self) -> Result<(String, Identity)> {
        let failure = || {
            RtmsError::http(
                200,
                self.message
                    .clone()
                    .unwrap_or_else(|| "Login failed".to_string()),
            )
        };
        if !self.success {
            return Err(failure());
        }
        match (self.token.clone(), self.user.clone()) {
            (Some(_), Some(user)) if user.role == Role::Anonymous => Err(RtmsError::validation(
                "Login returned a user without a role",
            )),
            (Some(token), Some(user)) if !token.is_empty() => Ok((token, user)),
            _ => Err(failure()),
        }
    }
}

/// Backend authentication endpoints.
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// `POST /auth/login`
    async fn login(&self, credentials: &LoginCredentials) -> Result<AuthResponse>;

    /// `POST /auth/logout` with the currently attached token.
    async fn logout(&self) -> Result<()>;

    /// `GET /auth/verify` with an explicit bearer token.
    async fn verify(&self, token: &str) -> Result<()>;

    /// Attaches (or detaches) the bearer token used by subsequent requests.
    fn set_bearer(&self, token: Option<&str>);
}

/// Identity providers offered on the login form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum SocialProvider {
    Google,
    Github,
}

/// Deferred social sign-in.
#[async_trait]
pub trait SocialLoginProvider: Send + Sync {
    /// Resolves with an identity tagged with `requested_role`.
    async fn authorize(&self, provider: SocialProvider, requested_role: Role) -> Result<AuthResponse>;
}
