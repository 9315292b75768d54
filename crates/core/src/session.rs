//! Per-session state machine of the account facade.
//!
//! The state is held by the client (as its session token plus the profile
//! it last read); the server derives it from the stored profile on every
//! request and uses [`check_action`] to reject out-of-order operations.

use serde::Serialize;

use crate::error::CoreError;
use crate::profile::UserProfile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Anonymous,
    /// Logged in, role unset. Profile completion is mandatory.
    ProfileIncomplete,
    ProfileComplete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionAction {
    Login,
    CompleteProfile,
    UpdateProfile,
    Logout,
}

impl SessionState {
    /// Derive the state from the profile the session resolves to.
    pub fn for_profile(profile: Option<&UserProfile>) -> Self {
        match profile {
            None => SessionState::Anonymous,
            Some(p) if p.is_complete() => SessionState::ProfileComplete,
            Some(_) => SessionState::ProfileIncomplete,
        }
    }

    fn name(self) -> &'static str {
        match self {
            SessionState::Anonymous => "anonymous",
            SessionState::ProfileIncomplete => "profile incomplete",
            SessionState::ProfileComplete => "profile complete",
        }
    }
}

/// The state an action leads to, or `None` if the action is not allowed
/// from `from`.
///
/// Login is allowed from any state (signup reuses login) and yields at
/// least `ProfileIncomplete`; a returning user whose stored profile is
/// complete is re-derived as `ProfileComplete` via [`SessionState::for_profile`].
/// Completing an already complete profile is a resubmission.
pub fn next_state(from: SessionState, action: SessionAction) -> Option<SessionState> {
    use SessionAction::*;
    use SessionState::*;

    match (from, action) {
        (_, Login) => Some(ProfileIncomplete),
        (ProfileIncomplete | ProfileComplete, CompleteProfile) => Some(ProfileComplete),
        (ProfileComplete, UpdateProfile) => Some(ProfileComplete),
        (ProfileIncomplete | ProfileComplete, Logout) => Some(Anonymous),
        _ => None,
    }
}

/// Validate that `action` may run in state `from`.
pub fn check_action(from: SessionState, action: SessionAction) -> Result<(), CoreError> {
    match next_state(from, action) {
        Some(_) => Ok(()),
        None if from == SessionState::Anonymous => {
            Err(CoreError::Unauthorized("Login required".into()))
        }
        None => Err(CoreError::Validation(format!(
            "{action:?} is not allowed while the session is {}",
            from.name()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::profile::ProfilePatch;
    use crate::roles::Role;
    use SessionAction::*;
    use SessionState::*;

    #[test]
    fn state_follows_profile_completion() {
        let mut p = UserProfile::new_for_email("a@x.com", None);
        assert_eq!(SessionState::for_profile(None), Anonymous);
        assert_eq!(SessionState::for_profile(Some(&p)), ProfileIncomplete);

        p.complete(Role::Mentee, &ProfilePatch::default()).unwrap();
        assert_eq!(SessionState::for_profile(Some(&p)), ProfileComplete);
    }

    #[test]
    fn happy_path_transitions() {
        assert_eq!(next_state(Anonymous, Login), Some(ProfileIncomplete));
        assert_eq!(
            next_state(ProfileIncomplete, CompleteProfile),
            Some(ProfileComplete)
        );
        assert_eq!(next_state(ProfileComplete, UpdateProfile), Some(ProfileComplete));
        assert_eq!(next_state(ProfileComplete, Logout), Some(Anonymous));
    }

    #[test]
    fn resubmitting_completion_is_allowed() {
        assert!(check_action(ProfileComplete, CompleteProfile).is_ok());
    }

    #[test]
    fn update_before_completion_is_rejected() {
        assert_matches!(
            check_action(ProfileIncomplete, UpdateProfile),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn anonymous_actions_need_login() {
        for action in [CompleteProfile, UpdateProfile, Logout] {
            assert_matches!(
                check_action(Anonymous, action),
                Err(CoreError::Unauthorized(_))
            );
        }
    }
}
