//! Candidate preparation, the suggester call, and reconciliation.

use std::collections::HashSet;

use validator::Validate;

use super::profile_text::{mentee_profile_text, mentor_profile_text};
use super::{
    CatalogSuggestion, CatalogSuggestionRequest, MentorCandidate, MentorSuggestion,
    MentorSuggestionRequest, RawCatalogSuggestion, RawMentorSuggestion, SuggestionError,
    Suggester, MAX_SUGGESTIONS,
};
use crate::catalog::{CatalogItem, GroupSession, Webinar};
use crate::profile::UserProfile;

// ---------------------------------------------------------------------------
// Mentors
// ---------------------------------------------------------------------------

/// Suggest mentors for `mentee` out of `mentors`, highest relevance first.
///
/// Returns an empty list without calling the suggester when there is no
/// mentee profile or no mentor candidate.
pub async fn suggest_mentors(
    suggester: &dyn Suggester,
    mentee: Option<&UserProfile>,
    mentors: &[UserProfile],
) -> Result<Vec<MentorSuggestion>, SuggestionError> {
    let Some(mentee_profile) = mentee.and_then(mentee_profile_text) else {
        return Ok(Vec::new());
    };

    let candidates = mentor_candidates(mentors);
    if candidates.is_empty() {
        return Ok(Vec::new());
    }

    let request = MentorSuggestionRequest {
        mentee_profile,
        candidates,
    };
    let raw = suggester.suggest_mentors(&request).await?;

    Ok(reconcile_mentors(raw, &request.candidates, mentors))
}

fn mentor_candidates(mentors: &[UserProfile]) -> Vec<MentorCandidate> {
    mentors
        .iter()
        .filter_map(|p| {
            mentor_profile_text(p).map(|profile_text| MentorCandidate {
                mentor_id: p.id().to_string(),
                profile_text,
            })
        })
        .collect()
}

/// Map raw suggestions back onto mentor records.
///
/// An echoed `mentor_id` naming a candidate wins; otherwise the profile text
/// must match a candidate exactly. Unresolved items, duplicates, and items
/// with a non-finite score are dropped. Scores are clamped to `[0, 1]`.
pub fn reconcile_mentors(
    raw: Vec<RawMentorSuggestion>,
    candidates: &[MentorCandidate],
    mentors: &[UserProfile],
) -> Vec<MentorSuggestion> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();

    for item in raw.into_iter().take(MAX_SUGGESTIONS) {
        let by_id = item
            .mentor_id
            .as_deref()
            .and_then(|id| candidates.iter().find(|c| c.mentor_id == id));
        let candidate = by_id.or_else(|| {
            candidates
                .iter()
                .find(|c| c.profile_text == item.mentor_profile_text)
        });

        let Some(candidate) = candidate else {
            tracing::debug!(
                text = %item.mentor_profile_text,
                "Dropping mentor suggestion that matches no candidate"
            );
            continue;
        };
        if !item.relevance_score.is_finite() {
            tracing::warn!(
                mentor_id = %candidate.mentor_id,
                "Dropping mentor suggestion with non-finite relevance score"
            );
            continue;
        }
        if !seen.insert(candidate.mentor_id.clone()) {
            continue;
        }
        let Some(mentor) = mentors.iter().find(|m| m.id() == candidate.mentor_id) else {
            continue;
        };

        out.push(MentorSuggestion {
            mentor: mentor.clone(),
            relevance_score: item.relevance_score.clamp(0.0, 1.0),
            reasoning: item.reasoning,
        });
    }

    out.sort_by(|a, b| b.relevance_score.total_cmp(&a.relevance_score));
    out
}

// ---------------------------------------------------------------------------
// Group sessions and webinars
// ---------------------------------------------------------------------------

/// Suggest group sessions for `mentee`, in the order the suggester chose.
pub async fn suggest_group_sessions(
    suggester: &dyn Suggester,
    mentee: Option<&UserProfile>,
    sessions: &[GroupSession],
) -> Result<Vec<CatalogSuggestion<GroupSession>>, SuggestionError> {
    let Some(request) = catalog_request(mentee, sessions) else {
        return Ok(Vec::new());
    };
    let raw = suggester.suggest_group_sessions(&request).await?;
    Ok(reconcile_catalog(raw, &request.candidates))
}

/// Suggest webinars for `mentee`, in the order the suggester chose.
pub async fn suggest_webinars(
    suggester: &dyn Suggester,
    mentee: Option<&UserProfile>,
    webinars: &[Webinar],
) -> Result<Vec<CatalogSuggestion<Webinar>>, SuggestionError> {
    let Some(request) = catalog_request(mentee, webinars) else {
        return Ok(Vec::new());
    };
    let raw = suggester.suggest_webinars(&request).await?;
    Ok(reconcile_catalog(raw, &request.candidates))
}

/// Build a request, or `None` when there is nothing to ask about.
fn catalog_request<T: CatalogItem>(
    mentee: Option<&UserProfile>,
    items: &[T],
) -> Option<CatalogSuggestionRequest<T>> {
    let mentee_profile = mentee.and_then(mentee_profile_text)?;
    let candidates = valid_candidates(items);
    if candidates.is_empty() {
        return None;
    }
    Some(CatalogSuggestionRequest {
        mentee_profile,
        candidates,
    })
}

/// Keep only records that pass schema validation. Rejected records are
/// logged and skipped, never reported to the caller.
pub fn valid_candidates<T: CatalogItem>(items: &[T]) -> Vec<T> {
    items
        .iter()
        .filter(|item| match item.validate() {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(
                    entity = T::ENTITY,
                    id = %item.id(),
                    error = %e,
                    "Excluding malformed suggestion candidate"
                );
                false
            }
        })
        .cloned()
        .collect()
}

/// Resolve returned ids against the candidates, preserving suggester order.
pub fn reconcile_catalog<T: CatalogItem>(
    raw: Vec<RawCatalogSuggestion>,
    candidates: &[T],
) -> Vec<CatalogSuggestion<T>> {
    let mut seen = HashSet::new();
    raw.into_iter()
        .take(MAX_SUGGESTIONS)
        .filter_map(|item| {
            let found = candidates.iter().find(|c| c.id() == item.id)?;
            if !seen.insert(item.id.clone()) {
                return None;
            }
            Some(CatalogSuggestion {
                item: found.clone(),
                reasoning: item.reasoning,
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
