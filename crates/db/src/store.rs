//! The in-memory store behind every repository.
//!
//! All state sits behind one [`tokio::sync::RwLock`]. Each repository
//! command takes the write lock once and runs to completion under it, so a
//! check-and-set such as "book this slot if it is open" is atomic and a
//! racing second caller observes the first caller's write. Queries hand out
//! clones; nothing outside this crate ever holds a reference into the maps.

use std::collections::{BTreeSet, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};

use indexmap::IndexMap;
use mentorhub_core::booking::BookingKey;
use mentorhub_core::catalog::{GroupSession, Webinar};
use mentorhub_core::profile::UserProfile;
use mentorhub_core::types::EntityId;
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::repositories::session_repo::SessionRecord;

/// Process-wide marketplace state.
#[derive(Default)]
pub struct Store {
    state: RwLock<StoreState>,
    version: AtomicU64,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Monotonic counter bumped by booking and availability commands so
    /// dependent views know to refetch. Not a concurrency token.
    pub fn version(&self) -> u64 {
        self.version.load(Ordering::SeqCst)
    }

    pub(crate) fn bump_version(&self) -> u64 {
        self.version.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub(crate) async fn read(&self) -> RwLockReadGuard<'_, StoreState> {
        self.state.read().await
    }

    pub(crate) async fn write(&self) -> RwLockWriteGuard<'_, StoreState> {
        self.state.write().await
    }
}

/// Raw maps plus the booking indexes derived from them.
#[derive(Default)]
pub struct StoreState {
    /// Keyed by email.
    profiles: HashMap<String, UserProfile>,
    email_by_id: HashMap<EntityId, String>,
    /// mentor id -> ids of that mentor's booked slots.
    booked_by_mentor: HashMap<EntityId, BTreeSet<EntityId>>,
    /// mentee id -> bookings held by that mentee.
    booked_by_mentee: HashMap<EntityId, BTreeSet<BookingKey>>,
    pub(crate) group_sessions: IndexMap<EntityId, GroupSession>,
    pub(crate) webinars: IndexMap<EntityId, Webinar>,
    /// Keyed by session id.
    pub(crate) sessions: HashMap<String, SessionRecord>,
}

impl StoreState {
    pub(crate) fn profile_by_email(&self, email: &str) -> Option<&UserProfile> {
        self.profiles.get(email)
    }

    pub(crate) fn profile_by_id(&self, id: &str) -> Option<&UserProfile> {
        self.email_by_id
            .get(id)
            .and_then(|email| self.profiles.get(email))
    }

    pub(crate) fn profiles(&self) -> impl Iterator<Item = &UserProfile> {
        self.profiles.values()
    }

    /// Insert or replace the record stored under `profile.email()`.
    ///
    /// Last write wins. Booking indexes for the record are rebuilt.
    pub(crate) fn put_profile(&mut self, profile: UserProfile) {
        let email = profile.email().to_string();
        let id = profile.id().to_string();

        if let Some(previous) = self.profiles.get(&email) {
            if previous.id() != id {
                let stale = previous.id().to_string();
                self.email_by_id.remove(&stale);
                self.unindex_mentor(&stale);
            }
        }

        self.email_by_id.insert(id.clone(), email.clone());
        self.profiles.insert(email, profile);
        self.reindex_mentor(&id);
    }

    /// Apply `f` to the profile with `id` in place, then reindex it.
    pub(crate) fn modify_profile<T>(
        &mut self,
        id: &str,
        f: impl FnOnce(&mut UserProfile) -> T,
    ) -> Option<T> {
        let email = self.email_by_id.get(id)?.clone();
        let profile = self.profiles.get_mut(&email)?;
        let out = f(profile);
        self.reindex_mentor(id);
        Some(out)
    }

    pub(crate) fn booked_slot_ids_of_mentor(&self, mentor_id: &str) -> Vec<EntityId> {
        self.booked_by_mentor
            .get(mentor_id)
            .map(|ids| ids.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub(crate) fn bookings_of_mentee(&self, mentee_id: &str) -> Vec<BookingKey> {
        self.booked_by_mentee
            .get(mentee_id)
            .map(|keys| keys.iter().cloned().collect())
            .unwrap_or_default()
    }

    fn unindex_mentor(&mut self, mentor_id: &str) {
        self.booked_by_mentor.remove(mentor_id);
        for keys in self.booked_by_mentee.values_mut() {
            keys.retain(|k| k.mentor_id != mentor_id);
        }
        self.booked_by_mentee.retain(|_, keys| !keys.is_empty());
    }

    /// Rebuild both indexes for one mentor from its current slot list.
    fn reindex_mentor(&mut self, mentor_id: &str) {
        self.unindex_mentor(mentor_id);

        let Some(mentor) = self.profile_by_id(mentor_id).and_then(|p| p.as_mentor()) else {
            return;
        };
        let booked: Vec<(EntityId, EntityId)> = mentor
            .availability
            .iter()
            .filter(|s| s.is_booked)
            .filter_map(|s| Some((s.id.clone(), s.booked_by_mentee_id.clone()?)))
            .collect();

        for (slot_id, mentee_id) in booked {
            self.booked_by_mentor
                .entry(mentor_id.to_string())
                .or_default()
                .insert(slot_id.clone());
            self.booked_by_mentee
                .entry(mentee_id)
                .or_default()
                .insert(BookingKey {
                    mentor_id: mentor_id.to_string(),
                    slot_id,
                });
        }
    }
}
