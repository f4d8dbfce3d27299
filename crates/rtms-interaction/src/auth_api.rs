//! RemoteAuthApi - backend authentication endpoints over [`ApiClient`].

use async_trait::async_trait;
use reqwest::Method;
use rtms_core::auth::{AuthApi, AuthResponse};
use rtms_core::error::Result;
use rtms_core::identity::LoginCredentials;
use std::sync::Arc;

use crate::client::{ApiClient, RequestBody};

#[derive(Clone)]
pub struct RemoteAuthApi {
    client: Arc<ApiClient>,
}

impl RemoteAuthApi {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AuthApi for RemoteAuthApi {
    async fn login(&self, credentials: &LoginCredentials) -> Result<AuthResponse> {
        let body = serde_json::to_value(credentials)?;
        let value = self
            .client
            .request(Method::POST, "/auth/login", Some(RequestBody::Json(body)))
            .await?;
        let response: AuthResponse = serde_json::from_value(value)?;

        if let Ok((token, _)) = response.clone().into_credential() {
            self.client.set_token(Some(&token));
        }
        Ok(response)
    }

    async fn logout(&self) -> Result<()> {
        let result = self.client.request(Method::POST, "/auth/logout", None).await;
        // The local token goes away whether or not the backend heard us.
        self.client.set_token(None);
        result.map(|_| ())
    }

    async fn verify(&self, token: &str) -> Result<()> {
        self.client
            .request_with_token(Method::GET, "/auth/verify", None, Some(token))
            .await
            .map(|_| ())
    }

    fn set_bearer(&self, token: Option<&str>) {
        self.client.set_token(token);
    }
}
