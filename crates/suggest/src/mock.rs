//! Offline suggester.
//!
//! Ranks candidates by how many words they share with the mentee profile.
//! Deterministic, no network, and always echoes candidate ids verbatim.

use std::collections::BTreeSet;

use async_trait::async_trait;
use mentorhub_core::catalog::{GroupSession, Webinar};
use mentorhub_core::recommendation::{
    CatalogSuggestionRequest, MentorSuggestionRequest, RawCatalogSuggestion,
    RawMentorSuggestion, Suggester, SuggestionError, MAX_SUGGESTIONS,
};

const STOP_WORDS: &[&str] = &[
    "and", "the", "for", "with", "not", "provided", "none", "name", "bio", "into", "from",
];

fn words(text: &str) -> BTreeSet<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| w.len() >= 3)
        .map(str::to_lowercase)
        .filter(|w| !STOP_WORDS.contains(&w.as_str()))
        .collect()
}

/// Candidates ordered by shared-word count, highest first; ties keep input
/// order. Returns `(index, shared words)`.
fn rank(mentee_profile: &str, candidate_texts: &[String]) -> Vec<(usize, Vec<String>)> {
    let mentee = words(mentee_profile);
    let mut ranked: Vec<(usize, Vec<String>)> = candidate_texts
        .iter()
        .enumerate()
        .map(|(i, text)| (i, words(text).intersection(&mentee).cloned().collect()))
        .collect();
    ranked.sort_by(|a, b| b.1.len().cmp(&a.1.len()).then(a.0.cmp(&b.0)));
    ranked.truncate(MAX_SUGGESTIONS);
    ranked
}

fn reasoning(shared: &[String]) -> String {
    if shared.is_empty() {
        "A well-rounded option while your profile fills in.".to_string()
    } else {
        format!("Shares your interest in {}.", shared.join(", "))
    }
}

fn catalog_text(title: &str, description: &str, tags: &[String]) -> String {
    format!("{title} {description} {}", tags.join(" "))
}

#[derive(Debug, Default, Clone, Copy)]
pub struct MockSuggester;

impl MockSuggester {
    pub fn new() -> Self {
        Self
    }

    fn catalog(
        mentee_profile: &str,
        ids: Vec<String>,
        texts: Vec<String>,
    ) -> Vec<RawCatalogSuggestion> {
        rank(mentee_profile, &texts)
            .into_iter()
            .map(|(i, shared)| RawCatalogSuggestion {
                id: ids[i].clone(),
                reasoning: Some(reasoning(&shared)),
            })
            .collect()
    }
}

#[async_trait]
impl Suggester for MockSuggester {
    async fn suggest_mentors(
        &self,
        request: &MentorSuggestionRequest,
    ) -> Result<Vec<RawMentorSuggestion>, SuggestionError> {
        let texts: Vec<String> = request
            .candidates
            .iter()
            .map(|c| c.profile_text.clone())
            .collect();

        Ok(rank(&request.mentee_profile, &texts)
            .into_iter()
            .map(|(i, shared)| {
                let candidate = &request.candidates[i];
                RawMentorSuggestion {
                    mentor_id: Some(candidate.mentor_id.clone()),
                    mentor_profile_text: candidate.profile_text.clone(),
                    relevance_score: (0.3 + 0.15 * shared.len() as f64).min(0.95),
                    reasoning: reasoning(&shared),
                }
            })
            .collect())
    }

    async fn suggest_group_sessions(
        &self,
        request: &CatalogSuggestionRequest<GroupSession>,
    ) -> Result<Vec<RawCatalogSuggestion>, SuggestionError> {
        let ids = request.candidates.iter().map(|s| s.id.clone()).collect();
        let texts = request
            .candidates
            .iter()
            .map(|s| catalog_text(&s.title, &s.description, &s.tags))
            .collect();
        Ok(Self::catalog(&request.mentee_profile, ids, texts))
    }

    async fn suggest_webinars(
        &self,
        request: &CatalogSuggestionRequest<Webinar>,
    ) -> Result<Vec<RawCatalogSuggestion>, SuggestionError> {
        let ids = request.candidates.iter().map(|w| w.id.clone()).collect();
        let texts = request
            .candidates
            .iter()
            .map(|w| catalog_text(&w.title, &w.description, &w.tags))
            .collect();
        Ok(Self::catalog(&request.mentee_profile, ids, texts))
    }
}
