#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use mentorhub_api::auth::jwt::JwtConfig;
use mentorhub_api::config::ServerConfig;
use mentorhub_api::router::build_app_router;
use mentorhub_api::state::AppState;
use mentorhub_core::booking::BookingPolicy;
use mentorhub_core::recommendation::{Suggester, SuggestionFailurePolicy};
use mentorhub_db::session_cache::MemorySessionCache;
use mentorhub_events::EventBus;
use mentorhub_suggest::MockSuggester;

pub const TEST_JWT_SECRET: &str = "test-secret-for-integration-tests";

/// Build a test `ServerConfig` with safe defaults.
///
/// No simulated latency, permissive booking policy, absorbing suggestion
/// failures, and no Gemini key.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: TEST_JWT_SECRET.to_string(),
            access_token_expiry_mins: 60,
        },
        seed_mock_data: true,
        session_cache_dir: None,
        simulated_latency_ms: 0,
        booking_policy: BookingPolicy::default(),
        suggestion_failure_policy: SuggestionFailurePolicy::Absorb,
        gemini: None,
    }
}

/// Build an [`AppState`] over a fresh store, seeded when the config asks
/// for it.
pub async fn test_state(config: ServerConfig, suggester: Arc<dyn Suggester>) -> AppState {
    let pool = mentorhub_db::create_pool();
    if config.seed_mock_data {
        mentorhub_db::seed::seed_mock_data(&pool, chrono::Utc::now())
            .await
            .expect("seeding should succeed");
    }
    AppState {
        pool,
        config: Arc::new(config),
        suggester,
        session_cache: Arc::new(MemorySessionCache::new()),
        event_bus: Arc::new(EventBus::default()),
    }
}

/// Build the full application router over a seeded store with the keyword
/// mock suggester.
pub async fn build_test_app() -> Router {
    let state = test_state(test_config(), Arc::new(MockSuggester::new())).await;
    build_app_router(state, &test_config())
}

/// Build the router around an existing state, so a test can keep a handle
/// on the store or the event bus.
pub fn build_test_app_with(state: AppState) -> Router {
    let config = (*state.config).clone();
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.unwrap()
}

fn json_request(method: &str, uri: &str, token: Option<&str>, body: serde_json::Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn empty_request(method: &str, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, empty_request("GET", uri, None)).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, empty_request("GET", uri, Some(token))).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, json_request("POST", uri, None, body)).await
}

pub async fn post_json_auth(app: Router, uri: &str, body: serde_json::Value, token: &str) -> Response {
    send(app, json_request("POST", uri, Some(token), body)).await
}

pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, empty_request("POST", uri, Some(token))).await
}

pub async fn put_json_auth(app: Router, uri: &str, body: serde_json::Value, token: &str) -> Response {
    send(app, json_request("PUT", uri, Some(token), body)).await
}

pub async fn patch_json_auth(app: Router, uri: &str, body: serde_json::Value, token: &str) -> Response {
    send(app, json_request("PATCH", uri, Some(token), body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, empty_request("DELETE", uri, Some(token))).await
}

/// Read the full response body as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Session helpers
// ---------------------------------------------------------------------------

/// Log in through the API and return the full login response.
pub async fn login(app: Router, email: &str, role: Option<&str>) -> serde_json::Value {
    let body = match role {
        Some(role) => serde_json::json!({ "email": email, "role": role }),
        None => serde_json::json!({ "email": email }),
    };
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}

/// Log in and return `(access_token, user_id)`.
pub async fn login_token(app: Router, email: &str, role: Option<&str>) -> (String, String) {
    let json = login(app, email, role).await;
    (
        json["access_token"].as_str().unwrap().to_string(),
        json["user"]["id"].as_str().unwrap().to_string(),
    )
}
