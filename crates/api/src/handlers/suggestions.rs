//! Handlers for `/suggestions`: recommendation pipeline for the calling
//! mentee.
//!
//! Suggester calls run without holding any store lock. Failures go through
//! the configured [`SuggestionFailurePolicy`](mentorhub_core::recommendation::SuggestionFailurePolicy).

use axum::extract::State;
use axum::Json;
use mentorhub_core::catalog::{GroupSession, Webinar};
use mentorhub_core::recommendation::{
    suggest_group_sessions, suggest_mentors, suggest_webinars, CatalogSuggestion,
    MentorSuggestion,
};
use mentorhub_db::repositories::{CatalogRepo, MentorListParams, ProfileRepo};

use crate::error::AppResult;
use crate::middleware::rbac::RequireMentee;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/suggestions/mentors
pub async fn mentors(
    State(state): State<AppState>,
    RequireMentee(_, mentee): RequireMentee,
) -> AppResult<Json<DataResponse<Vec<MentorSuggestion>>>> {
    let candidates = ProfileRepo::list_mentors(&state.pool, &MentorListParams::default()).await;
    let result = suggest_mentors(state.suggester.as_ref(), Some(&mentee), &candidates).await;
    let suggestions = state
        .config
        .suggestion_failure_policy
        .apply("mentors", result)?;
    tracing::debug!(mentee_id = %mentee.id(), count = suggestions.len(), "Mentor suggestions");
    Ok(Json(DataResponse { data: suggestions }))
}

/// GET /api/v1/suggestions/group-sessions
pub async fn group_sessions(
    State(state): State<AppState>,
    RequireMentee(_, mentee): RequireMentee,
) -> AppResult<Json<DataResponse<Vec<CatalogSuggestion<GroupSession>>>>> {
    let candidates = CatalogRepo::list::<GroupSession>(&state.pool).await;
    let result = suggest_group_sessions(state.suggester.as_ref(), Some(&mentee), &candidates).await;
    let suggestions = state
        .config
        .suggestion_failure_policy
        .apply("group_sessions", result)?;
    Ok(Json(DataResponse { data: suggestions }))
}

/// GET /api/v1/suggestions/webinars
pub async fn webinars(
    State(state): State<AppState>,
    RequireMentee(_, mentee): RequireMentee,
) -> AppResult<Json<DataResponse<Vec<CatalogSuggestion<Webinar>>>>> {
    let candidates = CatalogRepo::list::<Webinar>(&state.pool).await;
    let result = suggest_webinars(state.suggester.as_ref(), Some(&mentee), &candidates).await;
    let suggestions = state
        .config
        .suggestion_failure_policy
        .apply("webinars", result)?;
    Ok(Json(DataResponse { data: suggestions }))
}
