//! Domain endpoints of the RTMS backend.
//!
//! Thin, untyped wrappers: each method names a backend route and returns the
//! JSON body. Views decide what to read out of it.

use reqwest::Method;
use reqwest::multipart::{Form, Part};
use rtms_core::error::{Result, RtmsError};
use serde_json::{Value, json};
use std::path::Path;
use std::sync::Arc;

use crate::client::{ApiClient, RequestBody};

/// Analytics window used when the caller has no preference.
pub const DEFAULT_ANALYTICS_TIMEFRAME: &str = "30d";

#[derive(Clone)]
pub struct RtmsApi {
    client: Arc<ApiClient>,
}

impl RtmsApi {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &Arc<ApiClient> {
        &self.client
    }

    // ============================================================================
    // Users
    // ============================================================================

    pub async fn current_user(&self) -> Result<Value> {
        self.client.get("/users/me").await
    }

    pub async fn update_profile(&self, profile: Value) -> Result<Value> {
        self.client.put("/users/me", profile).await
    }

    /// Uploads an avatar image as multipart field `avatar`.
    pub async fn upload_avatar(&self, path: &Path) -> Result<Value> {
        let form = Form::new().part("avatar", file_part(path).await?);
        self.client
            .request(Method::POST, "/users/me/avatar", Some(RequestBody::Multipart(form)))
            .await
    }

    /// Uploads any file as multipart field `file` to `endpoint`.
    pub async fn upload_file(&self, endpoint: &str, path: &Path) -> Result<Value> {
        let form = Form::new().part("file", file_part(path).await?);
        self.client
            .request(Method::POST, endpoint, Some(RequestBody::Multipart(form)))
            .await
    }

    // ============================================================================
    // Students
    // ============================================================================

    pub async fn student_dashboard(&self) -> Result<Value> {
        self.client.get("/students/dashboard").await
    }

    pub async fn student_submissions(&self) -> Result<Value> {
        self.client.get("/students/submissions").await
    }

    pub async fn student_progress(&self) -> Result<Value> {
        self.client.get("/students/progress").await
    }

    pub async fn submit_challenge(&self, challenge_id: &str, submission: Value) -> Result<Value> {
        self.client
            .post(&format!("/challenges/{}/submit", challenge_id), submission)
            .await
    }

    // ============================================================================
    // Staff
    // ============================================================================

    pub async fn admin_dashboard(&self) -> Result<Value> {
        self.client.get("/admin/dashboard").await
    }

    /// Lists students, filtered by the given query pairs.
    pub async fn students(&self, filters: &[(&str, &str)]) -> Result<Value> {
        self.client
            .get(&format!("/admin/students?{}", query_string(filters)))
            .await
    }

    pub async fn student_details(&self, student_id: &str) -> Result<Value> {
        self.client
            .get(&format!("/admin/students/{}", student_id))
            .await
    }

    pub async fn update_student_status(&self, student_id: &str, status: &str) -> Result<Value> {
        self.client
            .put(
                &format!("/admin/students/{}/status", student_id),
                json!({ "status": status }),
            )
            .await
    }

    pub async fn all_challenges(&self) -> Result<Value> {
        self.client.get("/admin/challenges").await
    }

    pub async fn create_challenge(&self, challenge: Value) -> Result<Value> {
        self.client.post("/admin/challenges", challenge).await
    }

    pub async fn update_challenge(&self, challenge_id: &str, challenge: Value) -> Result<Value> {
        self.client
            .put(&format!("/admin/challenges/{}", challenge_id), challenge)
            .await
    }

    pub async fn delete_challenge(&self, challenge_id: &str) -> Result<Value> {
        self.client
            .delete(&format!("/admin/challenges/{}", challenge_id))
            .await
    }

    pub async fn create_chapter(&self, chapter: Value) -> Result<Value> {
        self.client.post("/admin/chapters", chapter).await
    }

    pub async fn update_chapter(&self, chapter_id: &str, chapter: Value) -> Result<Value> {
        self.client
            .put(&format!("/admin/chapters/{}", chapter_id), chapter)
            .await
    }

    pub async fn analytics(&self, timeframe: &str) -> Result<Value> {
        self.client
            .get(&format!(
                "/admin/analytics?{}",
                query_string(&[("timeframe", timeframe)])
            ))
            .await
    }

    pub async fn engagement_metrics(&self) -> Result<Value> {
        self.client.get("/admin/analytics/engagement").await
    }

    // ============================================================================
    // Public
    // ============================================================================

    pub async fn challenges(&self) -> Result<Value> {
        self.client.get("/challenges").await
    }

    pub async fn challenge_details(&self, challenge_id: &str) -> Result<Value> {
        self.client
            .get(&format!("/challenges/{}", challenge_id))
            .await
    }

    pub async fn showcase_projects(&self) -> Result<Value> {
        self.client.get("/showcase").await
    }

    pub async fn chapters(&self) -> Result<Value> {
        self.client.get("/chapters").await
    }

    pub async fn events(&self) -> Result<Value> {
        self.client.get("/events").await
    }

    pub async fn sponsors(&self) -> Result<Value> {
        self.client.get("/sponsors").await
    }

    // ============================================================================
    // Notifications and applications
    // ============================================================================

    pub async fn notifications(&self) -> Result<Value> {
        self.client.get("/notifications").await
    }

    /// Number of entries in the notifications list; non-array bodies count as zero.
    pub async fn unread_notification_count(&self) -> Result<usize> {
        let value = self.notifications().await?;
        Ok(value.as_array().map(Vec::len).unwrap_or(0))
    }

    pub async fn mark_notification_read(&self, notification_id: &str) -> Result<Value> {
        self.client
            .request(
                Method::PUT,
                &format!("/notifications/{}/read", notification_id),
                None,
            )
            .await
    }

    pub async fn submit_application(&self, application: Value) -> Result<Value> {
        self.client.post("/applications", application).await
    }

    pub async fn application_status(&self, application_id: &str) -> Result<Value> {
        self.client
            .get(&format!("/applications/{}", application_id))
            .await
    }
}

async fn file_part(path: &Path) -> Result<Part> {
    let bytes = tokio::fs::read(path).await?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .ok_or_else(|| RtmsError::validation(format!("Not a file: {}", path.display())))?;
    let mime = mime_guess::from_path(path).first_or_octet_stream();

    Part::bytes(bytes)
        .file_name(file_name)
        .mime_str(mime.essence_str())
        .map_err(|e| RtmsError::internal(format!("Invalid mime type: {}", e)))
}

/// `application/x-www-form-urlencoded` query string.
fn query_string(pairs: &[(&str, &str)]) -> String {
    let Ok(mut url) = reqwest::Url::parse("http://localhost/") else {
        return String::new();
    };
    url.query_pairs_mut().extend_pairs(pairs);
    url.query().unwrap_or_default().to_string()
}
