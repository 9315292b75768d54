//! Handlers for booking slots and reading the caller's schedule.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use mentorhub_core::booking::EnrichedBooking;
use mentorhub_core::calendar::google_calendar_link;
use mentorhub_core::error::CoreError;
use mentorhub_db::repositories::BookingRepo;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::facade::SessionFacade;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireMentee;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct VersionResponse {
    pub version: u64,
}

#[derive(Debug, Serialize)]
pub struct CalendarLinkResponse {
    pub url: String,
}

/// POST /api/v1/mentors/{mentor_id}/slots/{slot_id}/book
pub async fn book(
    State(state): State<AppState>,
    RequireMentee(user, _): RequireMentee,
    Path((mentor_id, slot_id)): Path<(String, String)>,
) -> AppResult<(StatusCode, Json<DataResponse<EnrichedBooking>>)> {
    let booking = SessionFacade::confirm_booking(&state, &user, &mentor_id, &slot_id).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: booking })))
}

/// GET /api/v1/bookings
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<EnrichedBooking>>>> {
    let bookings = SessionFacade::fetch_schedule(&state, &user).await?;
    Ok(Json(DataResponse { data: bookings }))
}

/// GET /api/v1/bookings/version
pub async fn version(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<DataResponse<VersionResponse>>> {
    Ok(Json(DataResponse {
        data: VersionResponse {
            version: state.pool.version(),
        },
    }))
}

/// GET /api/v1/bookings/{mentor_id}/{slot_id}/calendar-link
///
/// Only the two participants may export a booking.
pub async fn calendar_link(
    State(state): State<AppState>,
    user: AuthUser,
    Path((mentor_id, slot_id)): Path<(String, String)>,
) -> AppResult<Json<DataResponse<CalendarLinkResponse>>> {
    let booking = BookingRepo::find(&state.pool, &mentor_id, &slot_id)
        .await
        .ok_or_else(|| {
            AppError::Core(CoreError::not_found("Booking", format!("{mentor_id}/{slot_id}")))
        })?;

    if !booking.involves(&user.user_id) {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only booking participants can export it".into(),
        )));
    }

    let url = google_calendar_link(
        &booking.title,
        booking.start_time,
        booking.end_time,
        booking.mentor.name(),
        booking.mentee.name(),
    );
    Ok(Json(DataResponse {
        data: CalendarLinkResponse { url },
    }))
}
