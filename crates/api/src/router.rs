//! Router assembly for the mentorhub API.
//!
//! [`build_app_router`] is shared by the binary and the integration tests,
//! so both run behind the same middleware.

use std::time::Duration;

use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, StatusCode};
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::config::ServerConfig;
use crate::routes;
use crate::state::AppState;

/// Header carrying the per-request correlation id.
const REQUEST_ID_HEADER: &str = "x-request-id";

/// Build the mentorhub [`Router`]: `/health` at the root, everything else
/// under `/api/v1`.
///
/// Layers run outermost first on the way in:
///
/// 1. CORS (answers preflights before anything else runs)
/// 2. Request id assignment
/// 3. Request/response tracing, tagged with that id
/// 4. Request id echoed on the response
/// 5. Timeout, which also caps a slow suggester round trip
/// 6. Panic recovery as a 500
pub fn build_app_router(state: AppState, config: &ServerConfig) -> Router {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1", routes::api_routes())
        // Innermost: a panicking handler becomes a 500 instead of a dropped connection.
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(config.request_timeout_secs),
        ))
        // Echo the id so clients can quote it in bug reports.
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Keeps a caller-supplied id, otherwise mints a UUID.
        .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid))
        // Outermost.
        .layer(build_cors_layer(config))
        .with_state(state)
}

/// CORS for the browser client. Bearer tokens travel in `Authorization`;
/// the request id header is exposed to scripts.
///
/// An unparsable origin in `CORS_ORIGINS` panics at startup.
pub fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let origins: Vec<_> = config
        .cors_origins
        .iter()
        .map(|origin| {
            origin
                .parse()
                .unwrap_or_else(|e| panic!("Invalid CORS origin '{origin}': {e}"))
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .expose_headers([HeaderName::from_static(REQUEST_ID_HEADER)])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600))
}
