//! JWT-based session extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use mentorhub_core::error::CoreError;
use mentorhub_core::types::EntityId;
use mentorhub_db::repositories::SessionRepo;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// The caller's session, from a Bearer token in the `Authorization` header.
///
/// The token must validate and its session must not have been ended by a
/// logout.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// Profile id (from `claims.sub`).
    pub user_id: EntityId,
    /// Session id (from `claims.jti`).
    pub session_id: String,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

        let claims = validate_token(token, &state.config.jwt).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })?;

        if !SessionRepo::is_active(&state.pool, &claims.jti, &claims.sub).await {
            return Err(AppError::Core(CoreError::Unauthorized(
                "Session has ended".into(),
            )));
        }

        Ok(AuthUser {
            user_id: claims.sub,
            session_id: claims.jti,
        })
    }
}
