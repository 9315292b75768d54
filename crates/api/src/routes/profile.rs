//! Route definitions for the `/profile` resource.

use axum::routing::{patch, post};
use axum::Router;

use crate::handlers::profile;
use crate::state::AppState;

/// Routes mounted at `/profile`.
///
/// ```text
/// PATCH /          -> update
/// POST  /complete  -> complete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", patch(profile::update))
        .route("/complete", post(profile::complete))
}
