//! Route definitions for the `/suggestions` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::suggestions;
use crate::state::AppState;

/// Routes mounted at `/suggestions` (mentee only).
///
/// ```text
/// GET /mentors         -> mentors
/// GET /group-sessions  -> group_sessions
/// GET /webinars        -> webinars
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/mentors", get(suggestions::mentors))
        .route("/group-sessions", get(suggestions::group_sessions))
        .route("/webinars", get(suggestions::webinars))
}
