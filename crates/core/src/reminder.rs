//! Reminder request intake. Requests are acknowledged and logged only;
//! nothing is delivered.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::types::{new_id, EntityId, Timestamp};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ReminderRequest {
    /// Email address or phone number, taken verbatim.
    #[validate(length(min = 1, max = 200, message = "contact must not be empty"))]
    pub contact: String,
    #[validate(length(min = 1, max = 200, message = "event_title must not be empty"))]
    pub event_title: String,
    #[validate(length(min = 1, max = 100, message = "event_date must not be empty"))]
    pub event_date: String,
}

/// Receipt returned for an accepted reminder request.
#[derive(Debug, Clone, Serialize)]
pub struct ReminderAck {
    pub id: EntityId,
    pub received_at: Timestamp,
    pub message: String,
}

impl ReminderAck {
    pub fn for_request(request: &ReminderRequest) -> Self {
        Self {
            id: new_id(),
            received_at: chrono::Utc::now(),
            message: format!(
                "Reminder for '{}' on {} noted for {}",
                request.event_title, request.event_date, request.contact
            ),
        }
    }
}
