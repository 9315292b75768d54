//! Handlers for browsing mentors and publishing availability.

use axum::extract::{Path, Query, State};
use axum::Json;
use mentorhub_core::availability::NewSlot;
use mentorhub_core::error::CoreError;
use mentorhub_core::profile::UserProfile;
use mentorhub_db::repositories::{MentorListParams, ProfileRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::facade::SessionFacade;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireMentor;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `PUT /mentors/me/availability`.
#[derive(Debug, Deserialize)]
pub struct AvailabilityRequest {
    pub slots: Vec<NewSlot>,
}

/// GET /api/v1/mentors?expertise=&focus=
pub async fn list(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(params): Query<MentorListParams>,
) -> AppResult<Json<DataResponse<Vec<UserProfile>>>> {
    let mentors = ProfileRepo::list_mentors(&state.pool, &params).await;
    Ok(Json(DataResponse { data: mentors }))
}

/// GET /api/v1/mentors/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<String>,
) -> AppResult<Json<DataResponse<UserProfile>>> {
    let mentor = ProfileRepo::find_by_id(&state.pool, &id)
        .await
        .filter(|p| p.as_mentor().is_some())
        .ok_or_else(|| AppError::Core(CoreError::not_found("Mentor", id)))?;
    Ok(Json(DataResponse { data: mentor }))
}

/// PUT /api/v1/mentors/me/availability
///
/// Replaces every open slot; booked slots are kept.
pub async fn update_availability(
    State(state): State<AppState>,
    RequireMentor(user, _): RequireMentor,
    Json(input): Json<AvailabilityRequest>,
) -> AppResult<Json<DataResponse<UserProfile>>> {
    let profile = SessionFacade::update_availability(&state, &user, input.slots).await?;
    Ok(Json(DataResponse { data: profile }))
}
