// Prompt templates for the suggestion requests.
// Placeholders in braces are substituted before sending.

pub const SYSTEM_INSTRUCTION: &str = "\
You are a mentorship matching assistant for a student mentoring marketplace. \
You only choose among the candidates you are given and never invent new ones. \
You MUST respond with valid JSON only, no markdown fences and no explanations.";

pub const MENTOR_PROMPT: &str = r#"Pick the mentors that best fit this mentee.

MENTEE PROFILE:
{mentee_profile}

CANDIDATE MENTORS (JSON array, each with "mentor_id" and "profile_text"):
{candidates}

Return at most 3 mentors as a JSON array, best match first:
[
  {
    "mentor_id": "copied exactly from the candidate",
    "mentor_profile_text": "copied exactly from the candidate",
    "relevance_score": number between 0 and 1,
    "reasoning": "one or two sentences addressed to the mentee"
  }
]"#;

pub const GROUP_SESSION_PROMPT: &str = r#"Pick the group sessions that best fit this mentee.

MENTEE PROFILE:
{mentee_profile}

AVAILABLE GROUP SESSIONS (JSON array):
{candidates}

Return at most 3 sessions as a JSON array, best match first:
[ { "id": "copied exactly from the session", "reasoning": "one sentence" } ]"#;

pub const WEBINAR_PROMPT: &str = r#"Pick the webinars that best fit this mentee.

MENTEE PROFILE:
{mentee_profile}

AVAILABLE WEBINARS (JSON array):
{candidates}

Return at most 3 webinars as a JSON array, best match first:
[ { "id": "copied exactly from the webinar", "reasoning": "one sentence" } ]"#;

/// Fill `{mentee_profile}` and `{candidates}` in `template`.
pub fn render(template: &str, mentee_profile: &str, candidates: &str) -> String {
    template
        .replace("{mentee_profile}", mentee_profile)
        .replace("{candidates}", candidates)
}
