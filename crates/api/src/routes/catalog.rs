//! Route definitions for the `/group-sessions` and `/webinars` catalogs.

use axum::routing::get;
use axum::Router;
use mentorhub_core::catalog::{GroupSession, Webinar};

use crate::handlers::catalog;
use crate::state::AppState;

/// Routes mounted at `/group-sessions`.
///
/// ```text
/// GET    /      -> list
/// POST   /      -> create_group_session (mentor)
/// GET    /{id}  -> get_by_id
/// DELETE /{id}  -> delete (host)
/// ```
pub fn group_session_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(catalog::list::<GroupSession>).post(catalog::create_group_session),
        )
        .route(
            "/{id}",
            get(catalog::get_by_id::<GroupSession>).delete(catalog::delete::<GroupSession>),
        )
}

/// Routes mounted at `/webinars`. Same shape as [`group_session_router`].
pub fn webinar_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(catalog::list::<Webinar>).post(catalog::create_webinar),
        )
        .route(
            "/{id}",
            get(catalog::get_by_id::<Webinar>).delete(catalog::delete::<Webinar>),
        )
}
