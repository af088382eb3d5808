//! Mock provider backend for integration tests
//!
//! Serves canned replies in the Ollama, `OpenAI`/Grok and Gemini formats and
//! records every request it receives.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use axum::body::Bytes;
use axum::extract::{RawQuery, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing};
use serde_json::json;
use tokio_util::sync::CancellationToken;

/// Path served in the Ollama format
pub const OLLAMA_PATH: &str = "/api/chat";
/// Path served in the `OpenAI` format
pub const OPENAI_PATH: &str = "/v1/chat/completions";
/// Path served in the Grok format
pub const GROK_PATH: &str = "/v1/grok";
/// Path served in the Gemini format
pub const GEMINI_PATH: &str = "/v1beta/models/mock:generateContent";

/// A request as seen by the mock
#[derive(Debug, Clone)]
pub struct Recorded {
    pub path: &'static str,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub query: Option<String>,
    pub body: serde_json::Value,
}

/// How the mock answers
#[derive(Debug, Clone)]
enum Behavior {
    /// Provider-shaped success reply with this content
    Reply(String),
    /// Fixed status and body
    Fail(StatusCode, String),
    /// 200 with a body that is not JSON
    NotJson,
}

/// Mock provider backend bound to an ephemeral port
pub struct MockProvider {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockState>,
}

struct MockState {
    request_count: AtomicU32,
    requests: Mutex<Vec<Recorded>>,
    behavior: Behavior,
}

impl MockProvider {
    /// Start a mock that answers with "Hello from mock provider"
    pub async fn start() -> anyhow::Result<Self> {
        Self::start_inner(Behavior::Reply("Hello from mock provider".to_owned())).await
    }

    /// Start a mock whose replies carry the given content
    pub async fn start_with_response(content: &str) -> anyhow::Result<Self> {
        Self::start_inner(Behavior::Reply(content.to_owned())).await
    }

    /// Start a mock that fails every request with `status` and `body`
    pub async fn start_failing(status: u16, body: &str) -> anyhow::Result<Self> {
        let status = StatusCode::from_u16(status)?;
        Self::start_inner(Behavior::Fail(status, body.to_owned())).await
    }

    /// Start a mock that answers 200 with plain text
    pub async fn start_not_json() -> anyhow::Result<Self> {
        Self::start_inner(Behavior::NotJson).await
    }

    async fn start_inner(behavior: Behavior) -> anyhow::Result<Self> {
        let state = Arc::new(MockState {
            request_count: AtomicU32::new(0),
            requests: Mutex::new(Vec::new()),
            behavior,
        });

        let app = Router::new()
            .route(OLLAMA_PATH, routing::post(handle_ollama))
            .route(OPENAI_PATH, routing::post(handle_openai))
            .route(GROK_PATH, routing::post(handle_grok))
            .route(GEMINI_PATH, routing::post(handle_gemini))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        Ok(Self { addr, shutdown, state })
    }

    /// Absolute URL of `path` on the mock
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    /// Number of requests received on any path
    pub fn request_count(&self) -> u32 {
        self.state.request_count.load(Ordering::Relaxed)
    }

    /// Requests received so far, oldest first
    pub fn requests(&self) -> Vec<Recorded> {
        self.state.requests.lock().unwrap().clone()
    }

    /// Most recent request
    pub fn last_request(&self) -> Recorded {
        self.requests().pop().expect("mock received no request")
    }
}

impl Drop for MockProvider {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

fn record(state: &MockState, path: &'static str, headers: &HeaderMap, query: Option<String>, body: &Bytes) {
    let header_value = |name: header::HeaderName| headers.get(name).and_then(|v| v.to_str().ok()).map(str::to_owned);

    state.request_count.fetch_add(1, Ordering::Relaxed);
    state.requests.lock().unwrap().push(Recorded {
        path,
        authorization: header_value(header::AUTHORIZATION),
        content_type: header_value(header::CONTENT_TYPE),
        query,
        body: serde_json::from_slice(body).unwrap_or(serde_json::Value::Null),
    });
}

/// Apply the failure behaviors, or build the success reply from `content`
fn respond(state: &MockState, reply: impl FnOnce(&str) -> serde_json::Value) -> Response {
    match &state.behavior {
        Behavior::Reply(content) => Json(reply(content)).into_response(),
        Behavior::Fail(status, body) => (*status, body.clone()).into_response(),
        Behavior::NotJson => (StatusCode::OK, "<html>gateway timeout</html>").into_response(),
    }
}

fn openai_reply(model: &serde_json::Value, content: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-test-123",
        "object": "chat.completion",
        "created": 1_700_000_000,
        "model": model,
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }],
        "usage": {"prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15}
    })
}

// -- Handlers --

async fn handle_ollama(
    State(state): State<Arc<MockState>>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    record(&state, OLLAMA_PATH, &headers, query, &body);
    let model = state.requests.lock().unwrap().last().map(|r| r.body["model"].clone());

    respond(&state, |content| {
        json!({
            "model": model,
            "created_at": "2024-05-01T10:00:00Z",
            "message": {"role": "assistant", "content": content},
            "done": true,
            "done_reason": "stop",
            "total_duration": 5_000_000,
            "load_duration": 1_000_000,
            "prompt_eval_count": 12,
            "prompt_eval_duration": 2_000_000,
            "eval_count": 7,
            "eval_duration": 2_000_000
        })
    })
}

async fn handle_openai(
    State(state): State<Arc<MockState>>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    record(&state, OPENAI_PATH, &headers, query, &body);
    let model = state.requests.lock().unwrap().last().map(|r| r.body["model"].clone());

    respond(&state, |content| openai_reply(&model.unwrap_or_default(), content))
}

async fn handle_grok(
    State(state): State<Arc<MockState>>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    record(&state, GROK_PATH, &headers, query, &body);
    let model = state.requests.lock().unwrap().last().map(|r| r.body["model"].clone());

    respond(&state, |content| openai_reply(&model.unwrap_or_default(), content))
}

async fn handle_gemini(
    State(state): State<Arc<MockState>>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    record(&state, GEMINI_PATH, &headers, query, &body);

    respond(&state, |content| {
        json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": content}]},
                "finishReason": "STOP"
            }],
            "usageMetadata": {"promptTokenCount": 9, "candidatesTokenCount": 4, "totalTokenCount": 13},
            "modelVersion": "gemini-1.5-flash-002"
        })
    })
}
