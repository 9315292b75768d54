//! Handlers for the caller's own profile and profile lookups.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use mentorhub_core::error::CoreError;
use mentorhub_core::profile::{ProfilePatch, UserProfile};
use mentorhub_db::repositories::ProfileRepo;

use crate::error::{AppError, AppResult};
use crate::facade::{CompleteProfileRequest, SessionFacade};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/profile/complete
pub async fn complete(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CompleteProfileRequest>,
) -> AppResult<Json<DataResponse<UserProfile>>> {
    let profile = SessionFacade::complete_profile(&state, &user, input).await?;
    Ok(Json(DataResponse { data: profile }))
}

/// PATCH /api/v1/profile
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Json(patch): Json<ProfilePatch>,
) -> AppResult<Json<DataResponse<UserProfile>>> {
    let profile = SessionFacade::update_profile(&state, &user, patch).await?;
    Ok(Json(DataResponse { data: profile }))
}

/// GET /api/v1/me
pub async fn me(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<UserProfile>>> {
    let profile = SessionFacade::current_profile(&state, &user).await?;
    Ok(Json(DataResponse { data: profile }))
}

/// DELETE /api/v1/me
///
/// Simulated account deletion: ends the session, keeps the record.
pub async fn delete_me(State(state): State<AppState>, user: AuthUser) -> AppResult<StatusCode> {
    SessionFacade::logout(&state, &user).await?;
    tracing::info!(user_id = %user.user_id, "Account deletion requested (simulated)");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/users/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<String>,
) -> AppResult<Json<DataResponse<UserProfile>>> {
    let profile = ProfileRepo::find_by_id(&state.pool, &id)
        .await
        .ok_or_else(|| AppError::Core(CoreError::not_found("UserProfile", id)))?;
    Ok(Json(DataResponse { data: profile }))
}
