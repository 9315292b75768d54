pub mod auth;
pub mod bookings;
pub mod catalog;
pub mod health;
pub mod mentors;
pub mod profile;
pub mod reminders;
pub mod suggestions;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                                        login (public)
/// /auth/logout                                       logout (requires auth)
/// /auth/session                                      restore session
///
/// /profile/complete                                  complete profile (POST)
/// /profile                                           partial update (PATCH)
/// /me                                                get, delete
/// /users/{id}                                        profile lookup
///
/// /mentors                                           browse (?expertise, ?focus)
/// /mentors/{mentor_id}                               get
/// /mentors/me/availability                           replace open slots (PUT, mentor)
/// /mentors/{mentor_id}/slots/{slot_id}/book          book a slot (POST, mentee)
///
/// /bookings                                          caller's schedule
/// /bookings/version                                  booking version counter
/// /bookings/{mentor_id}/{slot_id}/calendar-link      calendar export (participants)
///
/// /group-sessions                                    list, create (mentor)
/// /group-sessions/{id}                               get, delete (host)
/// /webinars                                          list, create (mentor)
/// /webinars/{id}                                     get, delete (host)
///
/// /suggestions/mentors                               mentor suggestions (mentee)
/// /suggestions/group-sessions                        group session suggestions (mentee)
/// /suggestions/webinars                              webinar suggestions (mentee)
///
/// /reminders                                         reminder intake (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/profile", profile::router())
        .route(
            "/me",
            get(handlers::profile::me).delete(handlers::profile::delete_me),
        )
        .route("/users/{id}", get(handlers::profile::get_by_id))
        .nest("/mentors", mentors::router())
        .nest("/bookings", bookings::router())
        .nest("/group-sessions", catalog::group_session_router())
        .nest("/webinars", catalog::webinar_router())
        .nest("/suggestions", suggestions::router())
        .nest("/reminders", reminders::router())
}
