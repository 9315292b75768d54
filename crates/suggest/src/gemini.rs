//! Gemini REST client and the [`Suggester`] built on it.
//!
//! Calls `POST {base}/{model}:generateContent` with a single user turn and
//! a system instruction, asking for a JSON response. The API key travels in
//! the `x-goog-api-key` header and never appears in a URL.

use async_trait::async_trait;
use mentorhub_core::catalog::{GroupSession, Webinar};
use mentorhub_core::recommendation::{
    CatalogSuggestionRequest, MentorSuggestionRequest, RawCatalogSuggestion,
    RawMentorSuggestion, Suggester, SuggestionError,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::parse::parse_suggestions;
use crate::prompts;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Debug, thiserror::Error)]
pub enum SuggestClientError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(reqwest::Error),

    /// Gemini returned a non-2xx status code.
    #[error("Gemini API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Gemini returned no text in its candidates")]
    EmptyResponse,

    /// The returned text was not the JSON we asked for.
    #[error("Failed to parse model output: {0}")]
    Parse(#[from] serde_json::Error),
}

impl From<reqwest::Error> for SuggestClientError {
    fn from(err: reqwest::Error) -> Self {
        SuggestClientError::Request(err.without_url())
    }
}

impl From<SuggestClientError> for SuggestionError {
    fn from(err: SuggestClientError) -> Self {
        match err {
            SuggestClientError::Parse(e) => SuggestionError::Malformed(e.to_string()),
            e @ SuggestClientError::EmptyResponse => SuggestionError::Malformed(e.to_string()),
            other => SuggestionError::Upstream(other.to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<ContentResponse>,
}

#[derive(Debug, Deserialize)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Debug, Deserialize)]
struct PartResponse {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    status: Option<String>,
}

fn build_request(system_instruction: &str, prompt: String) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content {
            role: "user".to_string(),
            parts: vec![Part { text: prompt }],
        }],
        system_instruction: Some(Content {
            role: "system".to_string(),
            parts: vec![Part {
                text: system_instruction.to_string(),
            }],
        }),
        generation_config: GenerationConfig {
            response_mime_type: "application/json",
        },
    }
}

fn extract_text(response: GenerateContentResponse) -> Result<String, SuggestClientError> {
    response
        .candidates
        .and_then(|candidates| candidates.into_iter().next())
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts.into_iter().find_map(|part| part.text))
        .ok_or(SuggestClientError::EmptyResponse)
}

fn api_error_message(body: &str) -> String {
    serde_json::from_str::<ErrorWrapper>(body)
        .map(|wrapper| {
            let msg = wrapper.error.message.unwrap_or_else(|| body.to_string());
            match wrapper.error.status {
                Some(status) if !status.is_empty() => format!("{status}: {msg}"),
                _ => msg,
            }
        })
        .unwrap_or_else(|_| body.to_string())
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// HTTP client for one Gemini model.
#[derive(Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    /// Point the client at a different endpoint (proxies, test servers).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send one prompt and return the model's text answer.
    pub async fn generate(
        &self,
        system_instruction: &str,
        prompt: String,
    ) -> Result<String, SuggestClientError> {
        let url = format!("{}/{}:generateContent", self.base_url, self.model);
        let body = build_request(system_instruction, prompt);

        let response = self
            .client
            .post(url)
            .header(API_KEY_HEADER, self.api_key.as_str())
            .json(&body)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(SuggestClientError::Api {
                status: status.as_u16(),
                message: api_error_message(&text),
            });
        }

        let parsed: GenerateContentResponse = response.json().await?;
        extract_text(parsed)
    }
}

// ---------------------------------------------------------------------------
// Suggester
// ---------------------------------------------------------------------------

/// [`Suggester`] that delegates ranking to a Gemini model.
pub struct GeminiSuggester {
    client: GeminiClient,
}

impl GeminiSuggester {
    pub fn new(client: GeminiClient) -> Self {
        Self { client }
    }

    async fn ask<C: Serialize, T: DeserializeOwned>(
        &self,
        kind: &'static str,
        template: &str,
        mentee_profile: &str,
        candidates: &[C],
    ) -> Result<Vec<T>, SuggestionError> {
        let candidates = serde_json::to_string_pretty(candidates)
            .map_err(|e| SuggestionError::Malformed(e.to_string()))?;
        let prompt = prompts::render(template, mentee_profile, &candidates);

        tracing::debug!(kind, model = self.client.model(), "Requesting suggestions");
        let text = self
            .client
            .generate(prompts::SYSTEM_INSTRUCTION, prompt)
            .await?;
        let items = parse_suggestions(&text).map_err(SuggestClientError::from)?;
        Ok(items)
    }
}

#[async_trait]
impl Suggester for GeminiSuggester {
    async fn suggest_mentors(
        &self,
        request: &MentorSuggestionRequest,
    ) -> Result<Vec<RawMentorSuggestion>, SuggestionError> {
        self.ask(
            "mentors",
            prompts::MENTOR_PROMPT,
            &request.mentee_profile,
            &request.candidates,
        )
        .await
    }

    async fn suggest_group_sessions(
        &self,
        request: &CatalogSuggestionRequest<GroupSession>,
    ) -> Result<Vec<RawCatalogSuggestion>, SuggestionError> {
        self.ask(
            "group_sessions",
            prompts::GROUP_SESSION_PROMPT,
            &request.mentee_profile,
            &request.candidates,
        )
        .await
    }

    async fn suggest_webinars(
        &self,
        request: &CatalogSuggestionRequest<Webinar>,
    ) -> Result<Vec<RawCatalogSuggestion>, SuggestionError> {
        self.ask(
            "webinars",
            prompts::WEBINAR_PROMPT,
            &request.mentee_profile,
            &request.candidates,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn request_body_uses_gemini_field_names() {
        let body = serde_json::to_value(build_request("sys", "hello".into())).unwrap();
        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(body["contents"][0]["parts"][0]["text"], "hello");
        assert_eq!(body["systemInstruction"]["parts"][0]["text"], "sys");
        assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
    }

    #[test]
    fn extract_text_takes_first_text_part() {
        let response: GenerateContentResponse = serde_json::from_value(serde_json::json!({
            "candidates": [{"content": {"parts": [{"text": "[]"}]}}]
        }))
        .unwrap();
        assert_eq!(extract_text(response).unwrap(), "[]");

        let empty: GenerateContentResponse =
            serde_json::from_value(serde_json::json!({"candidates": []})).unwrap();
        assert_matches!(extract_text(empty), Err(SuggestClientError::EmptyResponse));
    }

    #[test]
    fn api_error_message_prefers_structured_body() {
        let body = r#"{"error":{"code":429,"message":"Quota exceeded","status":"RESOURCE_EXHAUSTED"}}"#;
        assert_eq!(api_error_message(body), "RESOURCE_EXHAUSTED: Quota exceeded");
        assert_eq!(api_error_message("gateway down"), "gateway down");
    }

    #[tokio::test]
    async fn transport_error_does_not_leak_api_key() {
        let client = GeminiClient::new("SECRET-KEY-123", "m").with_base_url("http://127.0.0.1:1");

        let err = client.generate("sys", "hello".into()).await.unwrap_err();
        assert_matches!(err, SuggestClientError::Request(_));
        let message = SuggestionError::from(err).to_string();
        assert!(!message.contains("SECRET-KEY-123"), "{message}");
        assert!(!message.contains("generateContent"), "{message}");
    }

    #[test]
    fn client_errors_map_to_suggestion_errors() {
        let parse_err = serde_json::from_str::<Vec<u8>>("nope").unwrap_err();
        assert_matches!(
            SuggestionError::from(SuggestClientError::Parse(parse_err)),
            SuggestionError::Malformed(_)
        );
        assert_matches!(
            SuggestionError::from(SuggestClientError::Api {
                status: 503,
                message: "down".into()
            }),
            SuggestionError::Upstream(_)
        );
    }

    #[test]
    fn base_url_override_drops_trailing_slash() {
        let client = GeminiClient::new("k", DEFAULT_MODEL).with_base_url("http://localhost:9999/");
        assert_eq!(client.base_url, "http://localhost:9999");
    }
}
