//! Purpose: Loopback HTTP server shared by the end-to-end test modules.
//! Exports: `TestServer`, `Recorded`, `Reply`.
//! Role: Stands in for the platform API so the real ureq transport and the CLI can be exercised.
//! Invariants: Binds 127.0.0.1 on an ephemeral port; nothing leaves the machine.
//! Invariants: The runtime (and with it the server) shuts down on drop.
#![allow(dead_code)]

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use std::sync::{Arc, Mutex};
use url::Url;

pub type TestResult<T> = Result<T, Box<dyn std::error::Error>>;

/// One request as the server saw it.
#[derive(Clone, Debug)]
pub struct Recorded {
    pub method: String,
    pub url: Url,
    pub authorization: Option<String>,
    pub user_agent: Option<String>,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl Recorded {
    pub fn query(&self, name: &str) -> Option<String> {
        self.url
            .query_pairs()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    }
}

pub struct Reply {
    pub status: u16,
    pub body: String,
}

impl Reply {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

type Handler = dyn Fn(&Recorded, &str) -> Reply + Send + Sync;

#[derive(Clone)]
struct ServerState {
    handler: Arc<Handler>,
    base_url: String,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

pub struct TestServer {
    base_url: String,
    requests: Arc<Mutex<Vec<Recorded>>>,
    _runtime: tokio::runtime::Runtime,
}

impl TestServer {
    /// Start a server whose replies come from `handler(request, base_url)`.
    pub fn start(
        handler: impl Fn(&Recorded, &str) -> Reply + Send + Sync + 'static,
    ) -> TestResult<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()?;
        let listener = runtime.block_on(tokio::net::TcpListener::bind("127.0.0.1:0"))?;
        let base_url = format!("http://{}/v1/", listener.local_addr()?);
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = ServerState {
            handler: Arc::new(handler),
            base_url: base_url.clone(),
            requests: Arc::clone(&requests),
        };
        let app = Router::new().fallback(handle).with_state(state);
        runtime.spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        Ok(Self {
            base_url,
            requests,
            _runtime: runtime,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests
            .lock()
            .unwrap_or_else(|poison| poison.into_inner())
            .clone()
    }
}

async fn handle(State(state): State<ServerState>, request: axum::extract::Request) -> Response {
    let (parts, body) = request.into_parts();
    let body = to_bytes(body, usize::MAX).await.unwrap_or_default();
    let header_value = |name: header::HeaderName| {
        parts
            .headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
    };
    let path_and_query = parts
        .uri
        .path_and_query()
        .map(|value| value.as_str())
        .unwrap_or("/");
    let url = match Url::parse(&format!("http://loopback{path_and_query}")) {
        Ok(url) => url,
        Err(_) => return StatusCode::BAD_REQUEST.into_response(),
    };
    let recorded = Recorded {
        method: parts.method.to_string(),
        url,
        authorization: header_value(header::AUTHORIZATION),
        user_agent: header_value(header::USER_AGENT),
        content_type: header_value(header::CONTENT_TYPE),
        body: body.to_vec(),
    };
    let reply = (state.handler)(&recorded, &state.base_url);
    state
        .requests
        .lock()
        .unwrap_or_else(|poison| poison.into_inner())
        .push(recorded);

    let status = StatusCode::from_u16(reply.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Body::from(reply.body),
    )
        .into_response()
}
