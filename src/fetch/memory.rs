//! In-memory transport.
//!
//! Serves route files from a map keyed by decoded request path. Used by the
//! test suite and by hosts that embed their route files. Every request is
//! recorded so callers can assert on network behavior.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use percent_encoding::percent_decode_str;
use url::Url;

use crate::fetch::error::FetchError;
use crate::fetch::transport::{is_success, Transport, TransportResponse};

/// HTTP method of a recorded request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Head,
}

#[derive(Debug, Clone)]
enum Entry {
    File { status: u16, body: String },
    Fail(String),
}

#[derive(Debug, Default)]
struct State {
    entries: HashMap<String, Entry>,
    delays: HashMap<String, Duration>,
    requests: Vec<(Method, String)>,
}

/// A transport answering from memory. Unknown paths answer 404.
#[derive(Debug, Clone, Default)]
pub struct MemoryTransport {
    state: Arc<Mutex<State>>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` with status 200 at `path`.
    pub fn with_file(self, path: &str, body: &str) -> Self {
        self.insert(path, body);
        self
    }

    /// Answer `path` with a bare status.
    pub fn with_status(self, path: &str, status: u16) -> Self {
        self.state.lock().entries.insert(
            path.to_string(),
            Entry::File {
                status,
                body: String::new(),
            },
        );
        self
    }

    /// Fail requests for `path` without a status.
    pub fn with_failure(self, path: &str, reason: &str) -> Self {
        self.state
            .lock()
            .entries
            .insert(path.to_string(), Entry::Fail(reason.to_string()));
        self
    }

    /// Delay responses for `path`.
    pub fn with_delay(self, path: &str, delay: Duration) -> Self {
        self.state.lock().delays.insert(path.to_string(), delay);
        self
    }

    /// Serve `body` at `path`, replacing any previous entry.
    pub fn insert(&self, path: &str, body: &str) {
        self.state.lock().entries.insert(
            path.to_string(),
            Entry::File {
                status: 200,
                body: body.to_string(),
            },
        );
    }

    /// All requests so far, in order, as (method, decoded path).
    pub fn requests(&self) -> Vec<(Method, String)> {
        self.state.lock().requests.clone()
    }

    /// Number of requests (any method) for `path`.
    pub fn request_count(&self, path: &str) -> usize {
        self.state
            .lock()
            .requests
            .iter()
            .filter(|(_, p)| p == path)
            .count()
    }

    /// Decoded paths of GET requests, in order.
    pub fn gets(&self) -> Vec<String> {
        self.state
            .lock()
            .requests
            .iter()
            .filter(|(m, _)| *m == Method::Get)
            .map(|(_, p)| p.clone())
            .collect()
    }

    async fn respond(&self, method: Method, url: &Url) -> Result<(u16, String), FetchError> {
        let path = decode_path(url.path());
        let (entry, delay) = {
            let mut state = self.state.lock();
            state.requests.push((method, path.clone()));
            (state.entries.get(&path).cloned(), state.delays.get(&path).copied())
        };

        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        match entry {
            Some(Entry::File { status, body }) => Ok((status, body)),
            Some(Entry::Fail(reason)) => Err(FetchError::Transport {
                url: url.to_string(),
                reason,
            }),
            None => Ok((404, String::new())),
        }
    }
}

/// Percent-decode a URL path (`%2B` → `+`).
fn decode_path(path: &str) -> String {
    percent_decode_str(path).decode_utf8_lossy().into_owned()
}

#[async_trait]
impl Transport for MemoryTransport {
    async fn get(&self, url: &Url) -> Result<TransportResponse, FetchError> {
        let (status, body) = self.respond(Method::Get, url).await?;
        let body = if is_success(status) { body } else { String::new() };
        Ok(TransportResponse { status, body })
    }

    async fn head(&self, url: &Url) -> Result<u16, FetchError> {
        self.respond(Method::Head, url).await.map(|(status, _)| status)
    }
}
