//! Handler for reminder request intake.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use mentorhub_core::reminder::{ReminderAck, ReminderRequest};
use mentorhub_events::bus::REMINDER_REQUESTED;
use mentorhub_events::MarketplaceEvent;
use validator::Validate;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/reminders
///
/// Accepted and logged only. No delivery, no retry.
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<ReminderRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<ReminderAck>>)> {
    input.validate()?;
    let ack = ReminderAck::for_request(&input);

    state.event_bus.publish(
        MarketplaceEvent::new(REMINDER_REQUESTED)
            .with_source("reminder", ack.id.as_str())
            .with_actor(user.user_id.as_str())
            .with_payload(serde_json::json!({
                "contact": input.contact,
                "event_title": input.event_title,
                "event_date": input.event_date,
            })),
    );
    Ok((StatusCode::ACCEPTED, Json(DataResponse { data: ack })))
}
