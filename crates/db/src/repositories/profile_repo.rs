//! Repository for user profiles (the profile store).

use mentorhub_core::profile::UserProfile;
use mentorhub_core::roles::MentorshipFocus;
use serde::Deserialize;

use crate::store::Store;

/// Optional filters for listing mentors.
#[derive(Debug, Default, Deserialize)]
pub struct MentorListParams {
    /// Case-insensitive match against any expertise tag.
    pub expertise: Option<String>,
    pub focus: Option<MentorshipFocus>,
}

/// Keyed access to profiles. Patch semantics live with the caller: read,
/// modify, and write back the whole record.
pub struct ProfileRepo;

impl ProfileRepo {
    /// Find a profile by email (the store key).
    pub async fn find_by_email(store: &Store, email: &str) -> Option<UserProfile> {
        store.read().await.profile_by_email(email).cloned()
    }

    /// Find a profile by its generated id.
    pub async fn find_by_id(store: &Store, id: &str) -> Option<UserProfile> {
        store.read().await.profile_by_id(id).cloned()
    }

    /// Insert or replace the record stored under the profile's email.
    ///
    /// No merge and no role validation: concurrent writers to one key
    /// resolve last-write-wins.
    pub async fn upsert(store: &Store, profile: UserProfile) -> UserProfile {
        store.write().await.put_profile(profile.clone());
        profile
    }

    /// Read-modify-write on one record under a single write lock.
    ///
    /// Returns `None` when no profile has `id`.
    pub async fn modify<T>(
        store: &Store,
        id: &str,
        f: impl FnOnce(&mut UserProfile) -> T,
    ) -> Option<(UserProfile, T)> {
        let mut state = store.write().await;
        let out = state.modify_profile(id, f)?;
        let profile = state.profile_by_id(id)?.clone();
        Some((profile, out))
    }

    /// All mentors matching `params`, ordered by name.
    pub async fn list_mentors(store: &Store, params: &MentorListParams) -> Vec<UserProfile> {
        let state = store.read().await;
        let needle = params.expertise.as_ref().map(|e| e.to_lowercase());

        let mut mentors: Vec<UserProfile> = state
            .profiles()
            .filter(|p| {
                let Some(m) = p.as_mentor() else {
                    return false;
                };
                let expertise_ok = needle.as_ref().map_or(true, |n| {
                    m.expertise.iter().any(|e| e.to_lowercase().contains(n))
                });
                let focus_ok = params
                    .focus
                    .map_or(true, |f| m.mentorship_focus.contains(&f));
                expertise_ok && focus_ok
            })
            .cloned()
            .collect();
        mentors.sort_by(|a, b| a.name().cmp(b.name()).then_with(|| a.id().cmp(b.id())));
        mentors
    }

    pub async fn count(store: &Store) -> usize {
        store.read().await.profiles().count()
    }
}
