//! Repository for the booking ledger.
//!
//! Bookings are not stored separately: a booking is a slot on a mentor
//! profile with `is_booked` set. Listings go through the store's per-user
//! indexes instead of scanning every mentor.

use chrono::Utc;
use mentorhub_core::availability::{replace_open_slots, NewSlot};
use mentorhub_core::booking::{
    confirm_slot, enrich, sort_by_start, BookingKey, BookingPolicy, EnrichedBooking,
};
use mentorhub_core::error::CoreError;
use mentorhub_core::profile::UserProfile;
use mentorhub_core::types::Timestamp;

use crate::store::{Store, StoreState};

/// Outcome of a successful booking command.
#[derive(Debug, Clone)]
pub struct BookingConfirmed {
    pub booking: EnrichedBooking,
    /// Store version after this command.
    pub version: u64,
}

pub struct BookingRepo;

impl BookingRepo {
    /// Book `slot_id` of `mentor_id` for `mentee_id`.
    ///
    /// The open-check and the write happen under one write lock, so of two
    /// racing requests for the same slot exactly one succeeds and the other
    /// gets [`CoreError::Conflict`].
    pub async fn confirm(
        store: &Store,
        mentor_id: &str,
        slot_id: &str,
        mentee_id: &str,
        policy: BookingPolicy,
    ) -> Result<BookingConfirmed, CoreError> {
        let mut state = store.write().await;

        if state
            .profile_by_id(mentor_id)
            .and_then(|p| p.as_mentor())
            .is_none()
        {
            return Err(CoreError::not_found("Mentor", mentor_id));
        }
        if state
            .profile_by_id(mentee_id)
            .and_then(|p| p.as_mentee())
            .is_none()
        {
            return Err(CoreError::not_found("Mentee", mentee_id));
        }

        let held = if policy.reject_overlapping {
            mentee_intervals(&state, mentee_id)
        } else {
            Vec::new()
        };
        let now = Utc::now();

        let slot = state
            .modify_profile(mentor_id, |p| match p.as_mentor_mut() {
                Some(m) => confirm_slot(m, mentor_id, slot_id, mentee_id, policy, now, &held),
                None => Err(CoreError::not_found("Mentor", mentor_id)),
            })
            .ok_or_else(|| CoreError::not_found("Mentor", mentor_id))??;

        let booking = state
            .profile_by_id(mentor_id)
            .and_then(|mentor| enrich(mentor, &slot, state.profile_by_id(mentee_id)))
            .ok_or_else(|| CoreError::Internal("Booked slot failed to resolve".into()))?;

        let version = store.bump_version();
        tracing::info!(mentor_id, slot_id, mentee_id, version, "Slot booked");
        Ok(BookingConfirmed { booking, version })
    }

    /// Replace a mentor's open slots wholesale. Booked slots are kept.
    pub async fn replace_availability(
        store: &Store,
        mentor_id: &str,
        slots: Vec<NewSlot>,
    ) -> Result<UserProfile, CoreError> {
        let mut state = store.write().await;

        state
            .modify_profile(mentor_id, |p| match p.as_mentor_mut() {
                Some(m) => {
                    m.availability = replace_open_slots(&m.availability, slots)?;
                    Ok(())
                }
                None => Err(CoreError::Validation(
                    "Only mentors can publish availability".into(),
                )),
            })
            .ok_or_else(|| CoreError::not_found("Mentor", mentor_id))??;

        let profile = state
            .profile_by_id(mentor_id)
            .cloned()
            .ok_or_else(|| CoreError::not_found("Mentor", mentor_id))?;

        let version = store.bump_version();
        tracing::info!(mentor_id, version, "Availability replaced");
        Ok(profile)
    }

    /// Every booking `user_id` participates in, as mentor or mentee,
    /// ascending by start time. Bookings whose other party no longer
    /// resolves are omitted.
    pub async fn list_for_user(store: &Store, user_id: &str) -> Vec<EnrichedBooking> {
        let state = store.read().await;

        let mut keys: Vec<BookingKey> = state
            .booked_slot_ids_of_mentor(user_id)
            .into_iter()
            .map(|slot_id| BookingKey {
                mentor_id: user_id.to_string(),
                slot_id,
            })
            .collect();
        keys.extend(state.bookings_of_mentee(user_id));
        keys.sort();
        keys.dedup();

        let mut out: Vec<EnrichedBooking> = keys
            .iter()
            .filter_map(|k| resolve(&state, &k.mentor_id, &k.slot_id))
            .collect();
        sort_by_start(&mut out);
        out
    }

    /// One booking by key, if the slot is booked and both parties resolve.
    pub async fn find(store: &Store, mentor_id: &str, slot_id: &str) -> Option<EnrichedBooking> {
        let state = store.read().await;
        resolve(&state, mentor_id, slot_id)
    }
}

fn resolve(state: &StoreState, mentor_id: &str, slot_id: &str) -> Option<EnrichedBooking> {
    let mentor = state.profile_by_id(mentor_id)?;
    let slot = mentor
        .as_mentor()?
        .availability
        .iter()
        .find(|s| s.id == slot_id)?;
    let mentee = slot
        .booked_by_mentee_id
        .as_deref()
        .and_then(|id| state.profile_by_id(id));
    enrich(mentor, slot, mentee)
}

fn mentee_intervals(state: &StoreState, mentee_id: &str) -> Vec<(Timestamp, Timestamp)> {
    state
        .bookings_of_mentee(mentee_id)
        .iter()
        .filter_map(|k| {
            state
                .profile_by_id(&k.mentor_id)?
                .as_mentor()?
                .availability
                .iter()
                .find(|s| s.id == k.slot_id)
                .map(|s| (s.start_time, s.end_time))
        })
        .collect()
}
