//! ApiClient - uniform request/response envelope for backend calls.
//!
//! Every call is fire-once: no retries, no backoff, no deduplication.

use reqwest::multipart::Form;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use rtms_core::error::{Result, RtmsError};
use serde_json::{Value, json};
use std::sync::RwLock;

/// Body of an outgoing request.
pub enum RequestBody {
    Json(Value),
    /// Multipart upload; the content type is left to reqwest.
    Multipart(Form),
}

/// HTTP client for the RTMS backend.
///
/// Holds the bearer token attached to every request. The token slot is
/// updated by the session store on login, restore and logout.
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: RwLock<Option<String>>,
}

impl ApiClient {
    /// Creates a client for `base_url` (e.g. `http://localhost:8080/api`).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: RwLock::new(None),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL for a backend path.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn set_token(&self, token: Option<&str>) {
        if let Ok(mut slot) = self.token.write() {
            *slot = token.map(str::to_string);
        }
    }

    pub fn token(&self) -> Option<String> {
        self.token.read().ok().and_then(|slot| slot.clone())
    }

    /// Sends a request with the attached token, if any.
    pub async fn request(&self, method: Method, path: &str, body: Option<RequestBody>) -> Result<Value> {
        let token = self.token();
        self.request_with_token(method, path, body, token.as_deref())
            .await
    }

    /// Sends a request with an explicit bearer token instead of the attached one.
    pub async fn request_with_token(
        &self,
        method: Method,
        path: &str,
        body: Option<RequestBody>,
        token: Option<&str>,
    ) -> Result<Value> {
        let url = self.url(path);
        tracing::debug!(method = %method, url = %url, "API request");

        let mut request = self.client.request(method.clone(), &url);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        request = attach_body(request, body);

        let result = match request.send().await {
            Ok(response) => {
                let status = response.status();
                let text = response
                    .text()
                    .await
                    .map_err(|e| transport_error(&e))?;
                interpret_response(status, &text)
            }
            Err(e) => Err(transport_error(&e)),
        };

        if let Err(err) = &result {
            tracing::warn!(method = %method, url = %url, kind = %err.kind(), "API request failed: {}", err);
        }
        result
    }

    pub async fn get(&self, path: &str) -> Result<Value> {
        self.request(Method::GET, path, None).await
    }

    pub async fn post(&self, path: &str, body: Value) -> Result<Value> {
        self.request(Method::POST, path, Some(RequestBody::Json(body)))
            .await
    }

    pub async fn put(&self, path: &str, body: Value) -> Result<Value> {
        self.request(Method::PUT, path, Some(RequestBody::Json(body)))
            .await
    }

    pub async fn delete(&self, path: &str) -> Result<Value> {
        self.request(Method::DELETE, path, None).await
    }

    /// Raw request builder for streaming endpoints.
    pub(crate) fn raw(&self, method: Method, path: &str) -> RequestBuilder {
        self.client.request(method, self.url(path))
    }
}

fn attach_body(request: RequestBuilder, body: Option<RequestBody>) -> RequestBuilder {
    match body {
        Some(RequestBody::Json(value)) => request.json(&value),
        Some(RequestBody::Multipart(form)) => request.multipart(form),
        None => request.header(reqwest::header::CONTENT_TYPE, "application/json"),
    }
}

/// Maps a transport-level failure onto the error taxonomy.
pub(crate) fn transport_error(err: &reqwest::Error) -> RtmsError {
    if err.is_connect() || err.is_timeout() {
        RtmsError::NetworkUnreachable(err.to_string())
    } else {
        RtmsError::internal(format!("Request failed: {}", err))
    }
}

/// Turns a status + body into the JSON result or a classified error.
///
/// - `204` is the contentless success sentinel `{"success": true}`.
/// - Non-2xx uses the body's `message` field, else `HTTP <status>: <reason>`.
/// - `401` is `Unauthorized`; everything else is `Http`.
pub fn interpret_response(status: StatusCode, body: &str) -> Result<Value> {
    if status.is_success() {
        if status == StatusCode::NO_CONTENT {
            return Ok(json!({ "success": true }));
        }
        return Ok(serde_json::from_str(body)?);
    }

    let message = error_message(status, body);
    if status == StatusCode::UNAUTHORIZED {
        Err(RtmsError::Unauthorized(message))
    } else {
        Err(RtmsError::http(status.as_u16(), message))
    }
}

fn error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| match status.canonical_reason() {
            Some(reason) => format!("HTTP {}: {}", status.as_u16(), reason),
            None => format!("HTTP {}", status.as_u16()),
        })
}

#[cfg(test)]
pub(crate) mod test_server {
    //! One-shot loopback HTTP server for exercising the real client.

    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::sync::oneshot;

    /// Serves a single canned response and reports the raw request it received.
    pub async fn serve_once(status_line: &str, body: &str) -> (String, oneshot::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        );
        let (tx, rx) = oneshot::channel();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let request = read_request(&mut socket).await;
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            let _ = tx.send(request);
        });

        (format!("http://{}/api", addr), rx)
    }

    async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
            let text = String::from_utf8_lossy(&buf);
            if let Some(head_end) = text.find("\r\n\r\n") {
                let content_length = text[..head_end]
                    .lines()
                    .find_map(|line| {
                        let lower = line.to_ascii_lowercase();
                        lower
                            .strip_prefix("content-length:")
                            .map(|v| v.trim().parse::<usize>().unwrap_or(0))
                    })
                    .unwrap_or(0);
                if buf.len() >= head_end + 4 + content_length {
                    break;
                }
            }
        }
        String::from_utf8_lossy(&buf).to_string()
    }
}
