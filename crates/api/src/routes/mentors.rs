//! Route definitions for the `/mentors` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{bookings, mentors};
use crate::state::AppState;

/// Routes mounted at `/mentors`.
///
/// ```text
/// GET  /                                   -> list
/// GET  /{mentor_id}                        -> get_by_id
/// PUT  /me/availability                    -> update_availability (mentor)
/// POST /{mentor_id}/slots/{slot_id}/book   -> book (mentee)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(mentors::list))
        .route("/me/availability", put(mentors::update_availability))
        .route("/{mentor_id}", get(mentors::get_by_id))
        .route("/{mentor_id}/slots/{slot_id}/book", post(bookings::book))
}
