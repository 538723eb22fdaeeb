//! Mock upstream that stands in for the identity, payment, speech, answer
//! and notification services on a single random port

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::time::Duration;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::json;

/// Audio bytes returned by the mock speech endpoint
pub const AUDIO: &[u8] = b"ID3-mock-mp3-frames";

/// Delay applied to synthesis calls after [`MockUpstream::slow_speech`]
pub const SLOW_SPEECH_DELAY: Duration = Duration::from_millis(1_500);

/// Answer text returned by the mock chat endpoint
pub const ANSWER: &str = "Because the sky scatters blue light.";

#[derive(Default)]
struct Counters {
    auth_calls: AtomicU32,
    checkout_calls: AtomicU32,
    speech_calls: AtomicU32,
    notify_calls: AtomicU32,
    chat_calls: AtomicU32,
    fail_speech: AtomicBool,
    slow_speech: AtomicBool,
}

/// Handle to a running mock upstream
pub struct MockUpstream {
    addr: SocketAddr,
    counters: Arc<Counters>,
    _handle: tokio::task::JoinHandle<()>,
}

impl MockUpstream {
    /// Start the mock on an ephemeral port
    pub async fn start() -> anyhow::Result<Self> {
        let counters = Arc::new(Counters::default());

        let app = Router::new()
            .route("/auth/v1/user", get(auth_user))
            .route("/v1/checkout/sessions", post(create_session))
            .route("/v1/text-to-speech/{voice}", post(synthesize))
            .route("/v1/chat/completions", post(chat))
            .route("/notify", post(notify))
            .with_state(Arc::clone(&counters));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Ok(Self {
            addr,
            counters,
            _handle: handle,
        })
    }

    /// Base URL of the mock
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Make every subsequent synthesis call fail with a 500
    pub fn fail_speech(&self) {
        self.counters.fail_speech.store(true, Ordering::SeqCst);
    }

    /// Delay every subsequent synthesis call by [`SLOW_SPEECH_DELAY`]
    pub fn slow_speech(&self) {
        self.counters.slow_speech.store(true, Ordering::SeqCst);
    }

    pub fn auth_calls(&self) -> u32 {
        self.counters.auth_calls.load(Ordering::SeqCst)
    }

    pub fn checkout_calls(&self) -> u32 {
        self.counters.checkout_calls.load(Ordering::SeqCst)
    }

    pub fn speech_calls(&self) -> u32 {
        self.counters.speech_calls.load(Ordering::SeqCst)
    }

    pub fn notify_calls(&self) -> u32 {
        self.counters.notify_calls.load(Ordering::SeqCst)
    }

    pub fn chat_calls(&self) -> u32 {
        self.counters.chat_calls.load(Ordering::SeqCst)
    }
}

/// Accepts `Bearer tok_<user>` and answers with `<user>@example.com`
async fn auth_user(State(counters): State<Arc<Counters>>, headers: HeaderMap) -> Response {
    counters.auth_calls.fetch_add(1, Ordering::SeqCst);

    let user = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer tok_"));

    match user {
        Some(user) if headers.contains_key("apikey") => {
            Json(json!({ "id": user, "email": format!("{user}@example.com") })).into_response()
        }
        _ => (StatusCode::UNAUTHORIZED, Json(json!({ "msg": "invalid JWT" }))).into_response(),
    }
}

async fn create_session(State(counters): State<Arc<Counters>>) -> Json<serde_json::Value> {
    let n = counters.checkout_calls.fetch_add(1, Ordering::SeqCst) + 1;
    Json(json!({ "id": format!("cs_test_{n}"), "object": "checkout.session" }))
}

async fn synthesize(State(counters): State<Arc<Counters>>, Path(voice): Path<String>) -> Response {
    counters.speech_calls.fetch_add(1, Ordering::SeqCst);

    if counters.slow_speech.load(Ordering::SeqCst) {
        tokio::time::sleep(SLOW_SPEECH_DELAY).await;
    }

    if counters.fail_speech.load(Ordering::SeqCst) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "detail": { "status": "internal", "voice": voice } })),
        )
            .into_response();
    }

    ([("content-type", "audio/mpeg")], AUDIO).into_response()
}

async fn chat(State(counters): State<Arc<Counters>>) -> Json<serde_json::Value> {
    counters.chat_calls.fetch_add(1, Ordering::SeqCst);
    Json(json!({
        "choices": [{ "message": { "role": "assistant", "content": ANSWER } }]
    }))
}

async fn notify(State(counters): State<Arc<Counters>>) -> StatusCode {
    counters.notify_calls.fetch_add(1, Ordering::SeqCst);
    StatusCode::OK
}
