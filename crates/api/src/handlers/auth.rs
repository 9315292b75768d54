//! Handlers for the `/auth` resource (login, logout, session restore).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::error::AppResult;
use crate::facade::{LoginRequest, LoginResponse, SessionFacade, SessionView};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/auth/login
///
/// Email-only login. Unknown emails get a new profile (signup reuses login).
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    Ok(Json(SessionFacade::login(&state, input).await?))
}

/// POST /api/v1/auth/logout
pub async fn logout(State(state): State<AppState>, user: AuthUser) -> AppResult<StatusCode> {
    SessionFacade::logout(&state, &user).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/auth/session
pub async fn session(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<SessionView>>> {
    let view = SessionFacade::restore(&state, &user).await?;
    Ok(Json(DataResponse { data: view }))
}
