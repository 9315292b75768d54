//! Route definitions for the `/bookings` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::bookings;
use crate::state::AppState;

/// Routes mounted at `/bookings`.
///
/// ```text
/// GET /                                   -> list
/// GET /version                            -> version
/// GET /{mentor_id}/{slot_id}/calendar-link -> calendar_link
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(bookings::list))
        .route("/version", get(bookings::version))
        .route(
            "/{mentor_id}/{slot_id}/calendar-link",
            get(bookings::calendar_link),
        )
}
