//! Session facade: the account and booking operations the UI drives.
//!
//! Each operation re-derives the session state from the stored profile,
//! rejects out-of-order actions, commits through the repositories, writes
//! the caller's profile through to the session cache, and publishes an
//! event for dependent views.

use std::time::Duration;

use chrono::TimeZone;
use mentorhub_core::availability::NewSlot;
use mentorhub_core::booking::EnrichedBooking;
use mentorhub_core::error::CoreError;
use mentorhub_core::profile::{ProfilePatch, UserProfile};
use mentorhub_core::roles::Role;
use mentorhub_core::session::{check_action, SessionAction, SessionState};
use mentorhub_db::repositories::{BookingRepo, ProfileRepo, SessionRepo};
use mentorhub_events::bus::{
    AVAILABILITY_UPDATED, BOOKING_CONFIRMED, PROFILE_UPDATED,
};
use mentorhub_events::MarketplaceEvent;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::jwt::generate_access_token;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/login`. Doubles as signup.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    #[serde(default)]
    pub role: Option<Role>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub state: SessionState,
    pub user: UserProfile,
}

/// Request body for `POST /profile/complete`.
#[derive(Debug, Deserialize)]
pub struct CompleteProfileRequest {
    pub role: Role,
    #[serde(flatten)]
    pub profile: ProfilePatch,
}

#[derive(Debug, Serialize)]
pub struct SessionView {
    pub state: SessionState,
    pub user: UserProfile,
}

// ---------------------------------------------------------------------------
// Facade
// ---------------------------------------------------------------------------

pub struct SessionFacade;

impl SessionFacade {
    /// Log in by email, creating a bare profile on first sight.
    ///
    /// A known user who supplies a different role is switched to it; the
    /// previous role's fields are dropped. A mentor with booked slots is
    /// refused with a conflict.
    pub async fn login(state: &AppState, input: LoginRequest) -> AppResult<LoginResponse> {
        input.validate()?;
        simulate_latency(state).await;

        let email = input.email.trim().to_lowercase();
        let profile = match ProfileRepo::find_by_email(&state.pool, &email).await {
            None => {
                let created = UserProfile::new_for_email(&email, input.role);
                tracing::info!(user_id = %created.id(), role = ?input.role, "New profile created on login");
                ProfileRepo::upsert(&state.pool, created).await
            }
            Some(existing) => match input.role {
                Some(role) if existing.role() != Some(role) => {
                    let (profile, switched) =
                        ProfileRepo::modify(&state.pool, existing.id(), |p| p.switch_role(role))
                            .await
                            .ok_or_else(|| CoreError::not_found("UserProfile", existing.id()))?;
                    switched?;
                    tracing::info!(user_id = %profile.id(), from = ?existing.role(), to = %role, "Role switched on login");
                    profile
                }
                _ => existing,
            },
        };

        let role_name = profile.role().map_or("unset", Role::as_str);
        let issued = generate_access_token(profile.id(), role_name, &state.config.jwt)
            .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;
        let expires_at = chrono::Utc
            .timestamp_opt(issued.claims.exp, 0)
            .single()
            .ok_or_else(|| AppError::InternalError("Token expiry out of range".into()))?;
        SessionRepo::start(&state.pool, &issued.claims.jti, profile.id(), expires_at).await;
        write_through(state, &issued.claims.jti, &profile).await;

        tracing::info!(user_id = %profile.id(), session_id = %issued.claims.jti, "User logged in");
        Ok(LoginResponse {
            access_token: issued.token,
            expires_in: state.config.jwt.access_token_expiry_mins * 60,
            state: SessionState::for_profile(Some(&profile)),
            user: profile,
        })
    }

    /// The profile behind the session, read from the store.
    pub async fn current_profile(state: &AppState, user: &AuthUser) -> AppResult<UserProfile> {
        ProfileRepo::find_by_id(&state.pool, &user.user_id)
            .await
            .ok_or_else(|| AppError::Core(CoreError::Unauthorized("Profile no longer exists".into())))
    }

    /// Restore the session without logging in again.
    ///
    /// The store stays authoritative: bookings made by other users and
    /// edits from other sessions land there, not in this session's cache
    /// entry. The cached copy is compared against it and re-warmed when it
    /// is missing or stale.
    pub async fn restore(state: &AppState, user: &AuthUser) -> AppResult<SessionView> {
        let profile = Self::current_profile(state, user).await?;
        let cached = state
            .session_cache
            .get(&user.session_id)
            .await
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, session_id = %user.session_id, "Session cache read failed");
                None
            });
        if cached.as_ref() != Some(&profile) {
            tracing::debug!(session_id = %user.session_id, hit = cached.is_some(), "Re-warming session cache");
            write_through(state, &user.session_id, &profile).await;
        }
        Ok(SessionView {
            state: SessionState::for_profile(Some(&profile)),
            user: profile,
        })
    }

    /// Set the role and merge role-specific fields over the role defaults.
    ///
    /// Allowed while the role is unset, or as a resubmission for the same
    /// role. Completing as the other role is rejected; switching roles
    /// happens through login.
    pub async fn complete_profile(
        state: &AppState,
        user: &AuthUser,
        input: CompleteProfileRequest,
    ) -> AppResult<UserProfile> {
        simulate_latency(state).await;
        let current = Self::current_profile(state, user).await?;
        check_action(SessionState::for_profile(Some(&current)), SessionAction::CompleteProfile)?;

        if let Some(existing) = current.role() {
            if existing != input.role {
                return Err(AppError::Core(CoreError::Validation(format!(
                    "Profile is already completed as {existing}"
                ))));
            }
        }

        let (profile, result) = ProfileRepo::modify(&state.pool, &user.user_id, |p| {
            p.complete(input.role, &input.profile)
        })
        .await
        .ok_or_else(|| CoreError::not_found("UserProfile", user.user_id.as_str()))?;
        result?;

        Self::after_profile_change(state, user, &profile).await;
        Ok(profile)
    }

    /// Apply a partial update to a completed profile.
    pub async fn update_profile(
        state: &AppState,
        user: &AuthUser,
        patch: ProfilePatch,
    ) -> AppResult<UserProfile> {
        simulate_latency(state).await;
        let current = Self::current_profile(state, user).await?;
        check_action(SessionState::for_profile(Some(&current)), SessionAction::UpdateProfile)?;

        let (profile, result) = ProfileRepo::modify(&state.pool, &user.user_id, |p| p.update(&patch))
            .await
            .ok_or_else(|| CoreError::not_found("UserProfile", user.user_id.as_str()))?;
        result?;

        Self::after_profile_change(state, user, &profile).await;
        Ok(profile)
    }

    /// End the session and drop its cache entry. Also backs the simulated
    /// account deletion: nothing is removed from the store.
    pub async fn logout(state: &AppState, user: &AuthUser) -> AppResult<()> {
        let current = ProfileRepo::find_by_id(&state.pool, &user.user_id).await;
        check_action(SessionState::for_profile(current.as_ref()), SessionAction::Logout)?;

        SessionRepo::end(&state.pool, &user.session_id).await;
        state.session_cache.remove(&user.session_id).await?;
        tracing::info!(user_id = %user.user_id, session_id = %user.session_id, "User logged out");
        Ok(())
    }

    /// Book a slot for the calling mentee.
    pub async fn confirm_booking(
        state: &AppState,
        mentee: &AuthUser,
        mentor_id: &str,
        slot_id: &str,
    ) -> AppResult<EnrichedBooking> {
        simulate_latency(state).await;
        let done = BookingRepo::confirm(
            &state.pool,
            mentor_id,
            slot_id,
            &mentee.user_id,
            state.config.booking_policy,
        )
        .await?;

        write_through(state, &mentee.session_id, &done.booking.mentee).await;
        state.event_bus.publish(
            MarketplaceEvent::new(BOOKING_CONFIRMED)
                .with_source("availability_slot", slot_id)
                .with_actor(mentee.user_id.as_str())
                .with_payload(serde_json::json!({
                    "mentor_id": mentor_id,
                    "slot_id": slot_id,
                    "version": done.version,
                })),
        );
        Ok(done.booking)
    }

    /// Replace the calling mentor's open slots.
    pub async fn update_availability(
        state: &AppState,
        mentor: &AuthUser,
        slots: Vec<NewSlot>,
    ) -> AppResult<UserProfile> {
        simulate_latency(state).await;
        let profile = BookingRepo::replace_availability(&state.pool, &mentor.user_id, slots).await?;

        write_through(state, &mentor.session_id, &profile).await;
        state.event_bus.publish(
            MarketplaceEvent::new(AVAILABILITY_UPDATED)
                .with_source("mentor", mentor.user_id.as_str())
                .with_actor(mentor.user_id.as_str())
                .with_payload(serde_json::json!({ "version": state.pool.version() })),
        );
        Ok(profile)
    }

    /// Every booking the caller takes part in, earliest first.
    pub async fn fetch_schedule(state: &AppState, user: &AuthUser) -> AppResult<Vec<EnrichedBooking>> {
        simulate_latency(state).await;
        Ok(BookingRepo::list_for_user(&state.pool, &user.user_id).await)
    }

    async fn after_profile_change(state: &AppState, user: &AuthUser, profile: &UserProfile) {
        write_through(state, &user.session_id, profile).await;
        state.event_bus.publish(
            MarketplaceEvent::new(PROFILE_UPDATED)
                .with_source("user_profile", profile.id())
                .with_actor(user.user_id.as_str()),
        );
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn simulate_latency(state: &AppState) {
    let ms = state.config.simulated_latency_ms;
    if ms > 0 {
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }
}

/// The cache is not the store of record, so a failed write is logged and
/// the already committed operation still succeeds.
async fn write_through(state: &AppState, session_id: &str, profile: &UserProfile) {
    if let Err(e) = state.session_cache.put(session_id, profile).await {
        tracing::warn!(error = %e, session_id, "Session cache write failed");
    }
}
