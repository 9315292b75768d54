//! Recommendation pipeline: profile text in, reconciled suggestions out.
//!
//! The ranking itself is delegated to an external [`Suggester`]. This module
//! prepares candidates, calls the suggester once per request, and maps what
//! comes back onto authoritative records. It never fabricates a record for a
//! returned item it cannot resolve.

pub mod pipeline;
pub mod profile_text;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::catalog::{GroupSession, Webinar};
use crate::profile::UserProfile;
use crate::types::EntityId;

pub use pipeline::{suggest_group_sessions, suggest_mentors, suggest_webinars};

/// Upper bound on items taken from a single suggester response.
pub const MAX_SUGGESTIONS: usize = 3;

// ---------------------------------------------------------------------------
// Suggester contract
// ---------------------------------------------------------------------------

/// A mentor as presented to the suggester.
///
/// `mentor_id` travels with the text so a suggester that echoes it gives a
/// stable reconciliation key; the text alone is the fallback key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MentorCandidate {
    pub mentor_id: EntityId,
    pub profile_text: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct MentorSuggestionRequest {
    pub mentee_profile: String,
    pub candidates: Vec<MentorCandidate>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CatalogSuggestionRequest<T> {
    pub mentee_profile: String,
    pub candidates: Vec<T>,
}

/// One mentor suggestion as returned by the suggester.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawMentorSuggestion {
    #[serde(default)]
    pub mentor_id: Option<EntityId>,
    pub mentor_profile_text: String,
    /// Expected in `[0, 1]`.
    pub relevance_score: f64,
    #[serde(default)]
    pub reasoning: String,
}

/// One group-session or webinar suggestion as returned by the suggester.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawCatalogSuggestion {
    pub id: EntityId,
    #[serde(default)]
    pub reasoning: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum SuggestionError {
    /// The call to the external model failed.
    #[error("Suggester request failed: {0}")]
    Upstream(String),

    /// The model answered but the answer could not be interpreted.
    #[error("Suggester returned malformed data: {0}")]
    Malformed(String),
}

/// External suggestion capability. Implementations must not mutate any
/// marketplace state.
#[async_trait]
pub trait Suggester: Send + Sync {
    async fn suggest_mentors(
        &self,
        request: &MentorSuggestionRequest,
    ) -> Result<Vec<RawMentorSuggestion>, SuggestionError>;

    async fn suggest_group_sessions(
        &self,
        request: &CatalogSuggestionRequest<GroupSession>,
    ) -> Result<Vec<RawCatalogSuggestion>, SuggestionError>;

    async fn suggest_webinars(
        &self,
        request: &CatalogSuggestionRequest<Webinar>,
    ) -> Result<Vec<RawCatalogSuggestion>, SuggestionError>;
}

// ---------------------------------------------------------------------------
// Pipeline output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MentorSuggestion {
    pub mentor: UserProfile,
    pub relevance_score: f64,
    pub reasoning: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogSuggestion<T> {
    pub item: T,
    pub reasoning: Option<String>,
}

// ---------------------------------------------------------------------------
// Failure policy
// ---------------------------------------------------------------------------

/// What the caller does with a [`SuggestionError`].
///
/// `Absorb` logs the failure and yields an empty list, so end users only
/// ever see "no suggestions". `Propagate` hands the error to the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SuggestionFailurePolicy {
    #[default]
    Absorb,
    Propagate,
}

impl SuggestionFailurePolicy {
    /// Parse `absorb` / `propagate` (case-insensitive).
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "absorb" => Some(Self::Absorb),
            "propagate" => Some(Self::Propagate),
            _ => None,
        }
    }

    pub fn apply<T>(
        self,
        kind: &'static str,
        result: Result<Vec<T>, SuggestionError>,
    ) -> Result<Vec<T>, SuggestionError> {
        match (self, result) {
            (_, Ok(items)) => Ok(items),
            (Self::Absorb, Err(e)) => {
                tracing::warn!(kind, error = %e, "Suggestion request failed, returning no suggestions");
                Ok(Vec::new())
            }
            (Self::Propagate, Err(e)) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn policy_parses_known_values() {
        assert_eq!(
            SuggestionFailurePolicy::parse("Absorb"),
            Some(SuggestionFailurePolicy::Absorb)
        );
        assert_eq!(
            SuggestionFailurePolicy::parse(" propagate "),
            Some(SuggestionFailurePolicy::Propagate)
        );
        assert_eq!(SuggestionFailurePolicy::parse("retry"), None);
    }

    #[test]
    fn absorb_turns_failure_into_empty() {
        let result: Result<Vec<u8>, _> = Err(SuggestionError::Upstream("boom".into()));
        let out = SuggestionFailurePolicy::Absorb.apply("mentors", result);
        assert_matches!(out, Ok(v) if v.is_empty());
    }

    #[test]
    fn propagate_keeps_failure_distinguishable() {
        let result: Result<Vec<u8>, _> = Err(SuggestionError::Malformed("bad json".into()));
        let out = SuggestionFailurePolicy::Propagate.apply("mentors", result);
        assert_matches!(out, Err(SuggestionError::Malformed(_)));
    }

    #[test]
    fn raw_mentor_suggestion_tolerates_missing_id() {
        let raw: RawMentorSuggestion = serde_json::from_value(serde_json::json!({
            "mentor_profile_text": "Name: A.",
            "relevance_score": 0.5,
            "reasoning": "fits"
        }))
        .unwrap();
        assert!(raw.mentor_id.is_none());
    }
}
