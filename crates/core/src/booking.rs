//! Booking ledger rules: confirming a slot and deriving enriched bookings.
//!
//! Bookings are never stored on their own. A booking is the fact that a
//! mentor's slot has `is_booked = true`, identified by `(mentor_id, slot_id)`
//! and joined with the mentee it references when listed.

use serde::{Deserialize, Serialize};

use crate::availability::AvailabilitySlot;
use crate::error::CoreError;
use crate::profile::{MentorDetails, UserProfile};
use crate::types::{EntityId, Timestamp};

/// Optional checks applied when confirming a booking.
///
/// Both are off by default: booking a past slot or overlapping another
/// booking of the same mentee is allowed unless explicitly enabled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BookingPolicy {
    pub reject_past_slots: bool,
    pub reject_overlapping: bool,
}

/// Identity of a booking.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BookingKey {
    pub mentor_id: EntityId,
    pub slot_id: EntityId,
}

/// A booking joined with both participants.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedBooking {
    pub mentor_id: EntityId,
    pub slot_id: EntityId,
    pub mentee_id: EntityId,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    pub title: String,
    pub mentor: UserProfile,
    pub mentee: UserProfile,
}

impl EnrichedBooking {
    pub fn key(&self) -> BookingKey {
        BookingKey {
            mentor_id: self.mentor_id.clone(),
            slot_id: self.slot_id.clone(),
        }
    }

    pub fn involves(&self, user_id: &str) -> bool {
        self.mentor_id == user_id || self.mentee_id == user_id
    }
}

/// Human-readable title for a one-on-one session.
pub fn session_title(mentor_name: &str, mentee_name: &str) -> String {
    format!("Mentorship session: {mentor_name} & {mentee_name}")
}

/// Mark `slot_id` in `mentor` as booked by `mentee_id`.
///
/// `mentee_bookings` are the intervals the mentee already holds; they are
/// only consulted when [`BookingPolicy::reject_overlapping`] is set. On
/// error nothing is mutated.
pub fn confirm_slot(
    mentor: &mut MentorDetails,
    mentor_id: &str,
    slot_id: &str,
    mentee_id: &str,
    policy: BookingPolicy,
    now: Timestamp,
    mentee_bookings: &[(Timestamp, Timestamp)],
) -> Result<AvailabilitySlot, CoreError> {
    let slot = mentor
        .availability
        .iter_mut()
        .find(|s| s.id == slot_id)
        .ok_or_else(|| CoreError::not_found("AvailabilitySlot", slot_id))?;

    if slot.is_booked {
        return Err(CoreError::Conflict(format!(
            "Slot '{slot_id}' of mentor '{mentor_id}' is already booked"
        )));
    }

    if policy.reject_past_slots && slot.start_time <= now {
        return Err(CoreError::Validation(format!(
            "Slot '{slot_id}' has already started"
        )));
    }

    if policy.reject_overlapping
        && mentee_bookings
            .iter()
            .any(|&(start, end)| slot.overlaps(start, end))
    {
        return Err(CoreError::Conflict(format!(
            "Slot '{slot_id}' overlaps another booking of this mentee"
        )));
    }

    slot.is_booked = true;
    slot.booked_by_mentee_id = Some(mentee_id.to_string());
    Ok(slot.clone())
}

/// Join a booked slot with its participants.
///
/// Returns `None` when the slot is open or the mentee no longer resolves;
/// dangling bookings are silently omitted from listings.
pub fn enrich(
    mentor: &UserProfile,
    slot: &AvailabilitySlot,
    mentee: Option<&UserProfile>,
) -> Option<EnrichedBooking> {
    if !slot.is_booked {
        return None;
    }
    let mentee_id = slot.booked_by_mentee_id.as_deref()?;
    let mentee = mentee.filter(|m| m.id() == mentee_id)?;

    Some(EnrichedBooking {
        mentor_id: mentor.id().to_string(),
        slot_id: slot.id.clone(),
        mentee_id: mentee_id.to_string(),
        start_time: slot.start_time,
        end_time: slot.end_time,
        title: session_title(mentor.name(), mentee.name()),
        mentor: mentor.clone(),
        mentee: mentee.clone(),
    })
}

/// Reference listing by full scan over every mentor's slots.
///
/// O(mentors x slots). The store answers the same query from its indexes;
/// this function defines the contract both must satisfy: every booking the
/// user participates in, enriched, ascending by start time.
pub fn scan_bookings_for<'a, F>(
    profiles: impl IntoIterator<Item = &'a UserProfile>,
    user_id: &str,
    resolve: F,
) -> Vec<EnrichedBooking>
where
    F: Fn(&str) -> Option<&'a UserProfile>,
{
    let mut out: Vec<EnrichedBooking> = profiles
        .into_iter()
        .filter_map(|p| p.as_mentor().map(|m| (p, m)))
        .flat_map(|(mentor, details)| {
            details
                .availability
                .iter()
                .filter(|s| s.is_booked)
                .filter_map(|slot| {
                    let mentee = slot.booked_by_mentee_id.as_deref().and_then(&resolve);
                    enrich(mentor, slot, mentee)
                })
                .collect::<Vec<_>>()
        })
        .filter(|b| b.involves(user_id))
        .collect();
    sort_by_start(&mut out);
    out
}

/// Ascending by start time; ties broken by booking key for determinism.
pub fn sort_by_start(bookings: &mut [EnrichedBooking]) {
    bookings.sort_by(|a, b| {
        a.start_time
            .cmp(&b.start_time)
            .then_with(|| a.key().cmp(&b.key()))
    });
}
