//! Server-sent event stream from the backend.
//!
//! The stream is opened once with the session token. Frames are decoded
//! into [`RealtimeEvent`]s; a dropped connection ends the stream and is
//! not re-established.

use futures::StreamExt;
use futures::stream::BoxStream;
use reqwest::Method;
use rtms_core::error::{Result, RtmsError};
use rtms_core::realtime::RealtimeEvent;
use std::collections::VecDeque;

use crate::client::{ApiClient, interpret_response, transport_error};

/// Incremental decoder for the `text/event-stream` format.
///
/// Only `data:` fields matter here; `event:`, `id:`, `retry:` and comment
/// lines are skipped.
#[derive(Debug, Default)]
pub struct SseDecoder {
    line: Vec<u8>,
    data: Vec<String>,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds a chunk of bytes and returns the data of every event it completes.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        let mut completed = Vec::new();
        for &byte in chunk {
            if byte != b'\n' {
                self.line.push(byte);
                continue;
            }
            if self.line.last() == Some(&b'\r') {
                self.line.pop();
            }
            let line = String::from_utf8_lossy(&self.line).into_owned();
            self.line.clear();

            if line.is_empty() {
                if !self.data.is_empty() {
                    completed.push(self.data.join("\n"));
                    self.data.clear();
                }
            } else if let Some(value) = line.strip_prefix("data:") {
                self.data
                    .push(value.strip_prefix(' ').unwrap_or(value).to_string());
            }
        }
        completed
    }
}

/// An open event stream.
pub struct RealtimeStream {
    bytes: BoxStream<'static, reqwest::Result<Vec<u8>>>,
    decoder: SseDecoder,
    pending: VecDeque<String>,
}

impl RealtimeStream {
    /// Opens `GET /stream?token=<token>`.
    pub async fn connect(client: &ApiClient, token: &str) -> Result<Self> {
        tracing::info!(url = %client.url("/stream"), "Opening real-time stream");
        let response = client
            .raw(Method::GET, "/stream")
            .query(&[("token", token)])
            .header(reqwest::header::ACCEPT, "text/event-stream")
            .send()
            .await
            .map_err(|e| transport_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(interpret_response(status, &body)
                .err()
                .unwrap_or_else(|| RtmsError::http(status.as_u16(), "Stream rejected")));
        }

        let bytes = response
            .bytes_stream()
            .map(|chunk| chunk.map(|bytes| bytes.to_vec()))
            .boxed();
        Ok(Self::from_bytes(bytes))
    }

    fn from_bytes(bytes: BoxStream<'static, reqwest::Result<Vec<u8>>>) -> Self {
        Self {
            bytes,
            decoder: SseDecoder::new(),
            pending: VecDeque::new(),
        }
    }

    /// Next decoded event; `None` once the connection is gone.
    ///
    /// A frame that fails to decode yields an `Err` but does not end the stream.
    pub async fn next_event(&mut self) -> Option<Result<RealtimeEvent>> {
        loop {
            if let Some(data) = self.pending.pop_front() {
                return Some(RealtimeEvent::parse(&data));
            }
            match self.bytes.next().await {
                Some(Ok(chunk)) => self.pending.extend(self.decoder.push(&chunk)),
                Some(Err(e)) => {
                    tracing::warn!("Real-time stream dropped: {}", e);
                    return None;
                }
                None => {
                    tracing::info!("Real-time stream closed by server");
                    return None;
                }
            }
        }
    }
}
