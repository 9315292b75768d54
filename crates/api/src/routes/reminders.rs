//! Route definitions for the `/reminders` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::reminders;
use crate::state::AppState;

/// Routes mounted at `/reminders`.
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(reminders::create))
}
