// Stub bingo-integration service shared by the integration tests.
use axum::{
    Json, Router,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
};
use serde_json::{Value, json};
use std::{
    sync::{Arc, OnceLock},
    time::Duration,
};

pub const SSO_SECRET: &str = "test-sso-secret";
pub const API_PREFIX: &str = "/api/bingo-integration";

// Global base URL used by all tests after the stub publishes its bound address.
static SERVER_URL: OnceLock<String> = OnceLock::new();
// One-time guard that ensures the stub bootstrap path runs only once.
static SERVER_READY: OnceLock<()> = OnceLock::new();

fn secret_matches(headers: &HeaderMap) -> bool {
    headers
        .get("x-sso-secret")
        .and_then(|value| value.to_str().ok())
        == Some(SSO_SECRET)
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "error": "invalid sso secret" })),
    )
        .into_response()
}

// Scripted by username so each test can pick the answer it needs.
async fn validate_user(headers: HeaderMap, Json(body): Json<Value>) -> Response {
    if !secret_matches(&headers) {
        return unauthorized();
    }

    match body["username"].as_str().unwrap_or_default() {
        "ana" => (
            StatusCode::OK,
            Json(json!({ "userId": "u1", "requiredAmount": body["requiredAmount"] })),
        )
            .into_response(),
        "broke" => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "insufficient funds" })),
        )
            .into_response(),
        "silent" => (StatusCode::FORBIDDEN, Json(json!({}))).into_response(),
        "html" => (StatusCode::OK, "<html>maintenance</html>").into_response(),
        _ => (StatusCode::OK, Json(json!({ "valid": true }))).into_response(),
    }
}

// Echoes the received payload so tests can inspect the wire format.
async fn purchase_cardboard(headers: HeaderMap, Json(body): Json<Value>) -> Response {
    if !secret_matches(&headers) {
        return unauthorized();
    }

    if body["numeroCarton"] == json!(13) {
        return (
            StatusCode::CONFLICT,
            Json(json!({ "error": "card already sold" })),
        )
            .into_response();
    }

    (StatusCode::CREATED, Json(json!({ "received": body }))).into_response()
}

fn app() -> Router {
    Router::new()
        .route(
            &format!("{API_PREFIX}/validate-user"),
            post(validate_user),
        )
        .route(
            &format!("{API_PREFIX}/purchase-cardboard"),
            post(purchase_cardboard),
        )
}

// Ensure the stub is running and return its API base URL.
pub fn ensure_server() -> String {
    SERVER_READY.get_or_init(|| {
        let published_url = Arc::new(OnceLock::<String>::new());
        let published_url_thread = Arc::clone(&published_url);
        // Spawn an OS thread so the stub outlives individual `#[tokio::test]` runtimes.
        std::thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("test runtime");
            runtime.block_on(async move {
                // Bind to an ephemeral port to avoid collisions with local services.
                let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                    .await
                    .expect("bind ephemeral test port");
                let addr = listener.local_addr().expect("get local addr");
                let _ = published_url_thread.set(format!("http://{}", addr));
                axum::serve(listener, app()).await.expect("stub server failed");
            });
        });
        wait_for_server_url_and_readiness(published_url);
    });

    let base_url = SERVER_URL.get().expect("server url should be initialized");
    format!("{base_url}{API_PREFIX}")
}

// An address nothing listens on, for transport failures.
#[allow(dead_code)]
pub fn closed_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let addr = listener.local_addr().expect("get local addr");
    drop(listener);
    format!("http://{addr}{API_PREFIX}")
}

fn wait_for_server_url_and_readiness(published_url: Arc<OnceLock<String>>) {
    let base_url = loop {
        if let Some(url) = published_url.get() {
            break url.clone();
        }
        std::thread::sleep(Duration::from_millis(10));
    };

    let _ = SERVER_URL.set(base_url.clone());

    let addr = base_url
        .strip_prefix("http://")
        .expect("base url should use http://");

    // Retry for a short period to avoid racing server bind/accept.
    for _ in 0..100 {
        if std::net::TcpStream::connect(addr).is_ok() {
            return;
        }
        std::thread::sleep(Duration::from_millis(20));
    }

    panic!("stub server did not become ready in time");
}
