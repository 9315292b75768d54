//! Role-based access control extractors.
//!
//! Roles can change after a token is issued (profile completion, role
//! switch on login), so each extractor checks the stored profile rather
//! than the token.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use mentorhub_core::error::CoreError;
use mentorhub_core::profile::UserProfile;
use mentorhub_core::roles::Role;
use mentorhub_db::repositories::ProfileRepo;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

async fn require_role(
    parts: &mut Parts,
    state: &AppState,
    role: Role,
) -> Result<(AuthUser, UserProfile), AppError> {
    let user = AuthUser::from_request_parts(parts, state).await?;
    let profile = ProfileRepo::find_by_id(&state.pool, &user.user_id)
        .await
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("Profile no longer exists".into())))?;

    if profile.role() != Some(role) {
        return Err(AppError::Core(CoreError::Forbidden(format!(
            "{} role required",
            capitalize(role.as_str())
        ))));
    }
    Ok((user, profile))
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Requires a mentor profile. Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn publish(RequireMentor(user, profile): RequireMentor) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireMentor(pub AuthUser, pub UserProfile);

impl FromRequestParts<AppState> for RequireMentor {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let (user, profile) = require_role(parts, state, Role::Mentor).await?;
        Ok(RequireMentor(user, profile))
    }
}

/// Requires a mentee profile. Rejects with 403 Forbidden otherwise.
pub struct RequireMentee(pub AuthUser, pub UserProfile);

impl FromRequestParts<AppState> for RequireMentee {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let (user, profile) = require_role(parts, state, Role::Mentee).await?;
        Ok(RequireMentee(user, profile))
    }
}
