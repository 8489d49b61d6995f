//! A mock that answers every path from a fixed script and journals what it
//! receives, in arrival order.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, State},
    http::{header, HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Router,
};
use tokio::sync::RwLock;

/// One request as the mock saw it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub content_type: Option<String>,
    pub body: Bytes,
}

/// Shared, append-only record of received requests.
#[derive(Debug, Clone, Default)]
pub struct Journal(Arc<RwLock<Vec<RecordedRequest>>>);

impl Journal {
    async fn push(&self, request: RecordedRequest) {
        self.0.write().await.push(request);
    }

    pub async fn entries(&self) -> Vec<RecordedRequest> {
        self.0.read().await.clone()
    }

    /// Blocking read for callers outside the runtime. Panics if called
    /// from within an async context.
    pub fn snapshot(&self) -> Vec<RecordedRequest> {
        self.0.blocking_read().clone()
    }

    /// Requests received for `path`, in arrival order.
    pub fn for_path(&self, path: &str) -> Vec<RecordedRequest> {
        self.snapshot()
            .into_iter()
            .filter(|request| request.path == path)
            .collect()
    }
}

#[derive(Debug, Clone)]
struct Reply {
    status: StatusCode,
    location: Option<String>,
    body: Bytes,
}

/// Canned replies keyed by path.
#[derive(Debug, Clone, Default)]
pub struct Script {
    routes: HashMap<String, Reply>,
}

impl Script {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, path: &str, status: StatusCode, body: impl Into<Bytes>) -> Self {
        let reply = Reply {
            status,
            location: None,
            body: body.into(),
        };
        self.routes.insert(path.to_string(), reply);
        self
    }

    /// Answers `path` with `303 See Other` pointing at `location`.
    pub fn redirect(mut self, path: &str, location: &str, body: impl Into<Bytes>) -> Self {
        let reply = Reply {
            status: StatusCode::SEE_OTHER,
            location: Some(location.to_string()),
            body: body.into(),
        };
        self.routes.insert(path.to_string(), reply);
        self
    }
}

#[derive(Clone)]
struct Scripted {
    script: Arc<Script>,
    journal: Journal,
}

/// Builds the scripted router together with the journal it writes to.
/// Paths missing from the script answer 404 but are still recorded. Request
/// bodies of any size are accepted.
pub fn scripted(script: Script) -> (Router, Journal) {
    let journal = Journal::default();
    let state = Scripted {
        script: Arc::new(script),
        journal: journal.clone(),
    };
    let router = Router::new()
        .fallback(replay)
        .layer(DefaultBodyLimit::disable())
        .with_state(state);
    (router, journal)
}

async fn replay(
    State(state): State<Scripted>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri.path().to_string();
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    tracing::debug!(%method, %path, bytes = body.len(), "recording request");
    state
        .journal
        .push(RecordedRequest {
            method,
            path: path.clone(),
            content_type,
            body,
        })
        .await;

    let Some(reply) = state.script.routes.get(&path) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    match &reply.location {
        Some(location) => (
            reply.status,
            [(header::LOCATION, location.clone())],
            reply.body.clone(),
        )
            .into_response(),
        None => (reply.status, reply.body.clone()).into_response(),
    }
}
