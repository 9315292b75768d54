//! Availability slots offered by mentors for one-on-one sessions.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{new_id, EntityId, Timestamp};

/// A fixed interval a mentor offers for booking.
///
/// Transitions from open to booked exactly once; a booked slot is never
/// reopened or removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilitySlot {
    pub id: EntityId,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    #[serde(default)]
    pub is_booked: bool,
    #[serde(default)]
    pub booked_by_mentee_id: Option<EntityId>,
}

impl AvailabilitySlot {
    /// An open slot. Fails when `end_time` is not after `start_time`.
    pub fn open(
        id: impl Into<EntityId>,
        start_time: Timestamp,
        end_time: Timestamp,
    ) -> Result<Self, CoreError> {
        let id = id.into();
        validate_interval(&id, start_time, end_time)?;
        Ok(Self {
            id,
            start_time,
            end_time,
            is_booked: false,
            booked_by_mentee_id: None,
        })
    }

    /// Whether `[start, end)` intersects this slot.
    pub fn overlaps(&self, start: Timestamp, end: Timestamp) -> bool {
        self.start_time < end && start < self.end_time
    }
}

/// A slot as submitted by a mentor. Booking state is never client-supplied.
#[derive(Debug, Clone, Deserialize)]
pub struct NewSlot {
    #[serde(default)]
    pub id: Option<EntityId>,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
}

fn validate_interval(id: &str, start: Timestamp, end: Timestamp) -> Result<(), CoreError> {
    if end <= start {
        return Err(CoreError::Validation(format!(
            "Slot '{id}' must end after it starts"
        )));
    }
    Ok(())
}

/// Build the replacement slot list for a mentor.
///
/// The submitted slots replace every open slot wholesale. Booked slots are
/// history and always carried over; submitting a slot whose id collides
/// with a booked one is a conflict. Ids must be unique within the result.
pub fn replace_open_slots(
    current: &[AvailabilitySlot],
    submitted: Vec<NewSlot>,
) -> Result<Vec<AvailabilitySlot>, CoreError> {
    let mut result: Vec<AvailabilitySlot> =
        current.iter().filter(|s| s.is_booked).cloned().collect();
    let mut seen: HashSet<EntityId> = result.iter().map(|s| s.id.clone()).collect();

    for slot in submitted {
        let id = slot.id.unwrap_or_else(new_id);
        if current.iter().any(|s| s.is_booked && s.id == id) {
            return Err(CoreError::Conflict(format!(
                "Slot '{id}' is already booked and cannot be replaced"
            )));
        }
        if !seen.insert(id.clone()) {
            return Err(CoreError::Validation(format!("Duplicate slot id '{id}'")));
        }
        result.push(AvailabilitySlot::open(id, slot.start_time, slot.end_time)?);
    }

    result.sort_by_key(|s| s.start_time);
    Ok(result)
}
