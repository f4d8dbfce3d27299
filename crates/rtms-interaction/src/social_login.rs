//! Simulated social sign-in.
//!
//! There is no real OAuth round trip: after a fixed delay the provider
//! resolves with a synthetic identity for the requested role.

use async_trait::async_trait;
use rtms_core::auth::{AuthResponse, SocialLoginProvider, SocialProvider};
use rtms_core::error::Result;
use rtms_core::identity::{Identity, Role};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct SimulatedSocialLogin {
    delay: Duration,
}

impl SimulatedSocialLogin {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for SimulatedSocialLogin {
    fn default() -> Self {
        Self::new(Duration::from_millis(1500))
    }
}

/// Identity and token the simulated provider hands out.
pub fn synthetic_response(provider: SocialProvider, requested_role: Role) -> AuthResponse {
    let identity = Identity {
        id: uuid::Uuid::new_v4().to_string(),
        first_name: "Social".to_string(),
        last_name: "User".to_string(),
        email: format!("user@{}.com", provider),
        role: requested_role,
        avatar: Some(format!(
            "https://api.dicebear.com/7.x/avataaars/svg?seed={}",
            provider
        )),
    };
    let token = format!(
        "demo_social_token_{}",
        chrono::Utc::now().timestamp_millis()
    );
    AuthResponse::accepted(token, identity)
}

#[async_trait]
impl SocialLoginProvider for SimulatedSocialLogin {
    async fn authorize(&self, provider: SocialProvider, requested_role: Role) -> Result<AuthResponse> {
        tracing::info!(%provider, role = %requested_role, "Simulating social sign-in");
        tokio::time::sleep(self.delay).await;
        Ok(synthetic_response(provider, requested_role))
    }
}
