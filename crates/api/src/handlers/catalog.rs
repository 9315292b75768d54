//! Handlers for the `/group-sessions` and `/webinars` catalogs.
//!
//! Read and delete handlers are generic over the record type and mounted
//! once per catalog.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use mentorhub_core::catalog::{
    CatalogItem, CreateGroupSession, CreateWebinar, GroupSession, Webinar,
};
use mentorhub_core::error::CoreError;
use mentorhub_db::repositories::{CatalogRepo, CatalogTable};
use mentorhub_events::bus::CATALOG_CHANGED;
use mentorhub_events::MarketplaceEvent;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireMentor;
use crate::response::DataResponse;
use crate::state::AppState;

fn publish_change<T: CatalogTable>(state: &AppState, item: &T, action: &str, actor: &str) {
    state.event_bus.publish(
        MarketplaceEvent::new(CATALOG_CHANGED)
            .with_source(T::ENTITY, item.id())
            .with_actor(actor)
            .with_payload(serde_json::json!({ "action": action })),
    );
}

/// GET /api/v1/group-sessions, GET /api/v1/webinars
pub async fn list<T: CatalogTable>(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<T>>>> {
    let items = CatalogRepo::list::<T>(&state.pool).await;
    Ok(Json(DataResponse { data: items }))
}

/// GET /api/v1/group-sessions/{id}, GET /api/v1/webinars/{id}
pub async fn get_by_id<T: CatalogTable>(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<String>,
) -> AppResult<Json<DataResponse<T>>> {
    let item = CatalogRepo::find::<T>(&state.pool, &id)
        .await
        .ok_or_else(|| AppError::Core(CoreError::not_found(T::ENTITY, id)))?;
    Ok(Json(DataResponse { data: item }))
}

/// DELETE /api/v1/group-sessions/{id}, DELETE /api/v1/webinars/{id}
///
/// Host only.
pub async fn delete<T: CatalogTable>(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    let removed = CatalogRepo::delete::<T>(&state.pool, &id, &user.user_id).await?;
    publish_change(&state, &removed, "deleted", &user.user_id);
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/group-sessions
pub async fn create_group_session(
    State(state): State<AppState>,
    RequireMentor(user, profile): RequireMentor,
    Json(input): Json<CreateGroupSession>,
) -> AppResult<(StatusCode, Json<DataResponse<GroupSession>>)> {
    input.validate()?;
    let record = input.into_record(profile.id(), profile.name());
    let created = CatalogRepo::create(&state.pool, record).await?;
    publish_change(&state, &created, "created", &user.user_id);
    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

/// POST /api/v1/webinars
pub async fn create_webinar(
    State(state): State<AppState>,
    RequireMentor(user, profile): RequireMentor,
    Json(input): Json<CreateWebinar>,
) -> AppResult<(StatusCode, Json<DataResponse<Webinar>>)> {
    input.validate()?;
    let record = input.into_record(profile.id(), profile.name());
    let created = CatalogRepo::create(&state.pool, record).await?;
    publish_change(&state, &created, "created", &user.user_id);
    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}
