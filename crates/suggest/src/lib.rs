//! Suggesters for the recommendation pipeline.
//!
//! - [`GeminiSuggester`] asks a Gemini model over its REST API.
//! - [`MockSuggester`] ranks candidates locally by keyword overlap and is
//!   used when no API key is configured.

pub mod gemini;
pub mod mock;
pub mod parse;
pub mod prompts;

pub use gemini::{GeminiClient, GeminiSuggester, SuggestClientError};
pub use mock::MockSuggester;
