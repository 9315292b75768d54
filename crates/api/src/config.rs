use std::path::PathBuf;

use mentorhub_core::booking::BookingPolicy;
use mentorhub_core::recommendation::SuggestionFailurePolicy;
use mentorhub_suggest::gemini::{DEFAULT_BASE_URL, DEFAULT_MODEL};

use crate::auth::jwt::JwtConfig;

/// Gemini connection settings. Absent when no API key is configured.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
}

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development except the JWT
/// secret.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    pub request_timeout_secs: u64,
    pub jwt: JwtConfig,
    /// Load demo mentors, a mentee, and catalog entries at startup.
    pub seed_mock_data: bool,
    /// Directory for the file-backed session cache; in-memory when `None`.
    pub session_cache_dir: Option<PathBuf>,
    /// Artificial delay before facade store operations.
    pub simulated_latency_ms: u64,
    pub booking_policy: BookingPolicy,
    pub suggestion_failure_policy: SuggestionFailurePolicy,
    pub gemini: Option<GeminiConfig>,
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.into())
}

fn env_flag(name: &str, default: bool) -> bool {
    match std::env::var(name) {
        Ok(v) => matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"),
        Err(_) => default,
    }
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                      | Default                 |
    /// |------------------------------|-------------------------|
    /// | `HOST`                       | `0.0.0.0`               |
    /// | `PORT`                       | `3000`                  |
    /// | `CORS_ORIGINS`               | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`       | `30`                    |
    /// | `SEED_MOCK_DATA`             | `true`                  |
    /// | `SESSION_CACHE_DIR`          | unset (in-memory)       |
    /// | `SIMULATED_LATENCY_MS`       | `0`                     |
    /// | `BOOKING_REJECT_PAST_SLOTS`  | `false`                 |
    /// | `BOOKING_REJECT_OVERLAPPING` | `false`                 |
    /// | `SUGGESTION_FAILURE_POLICY`  | `absorb`                |
    /// | `GEMINI_API_KEY`             | unset (mock suggester)  |
    /// | `GEMINI_MODEL`               | `gemini-2.0-flash`      |
    /// | `GEMINI_BASE_URL`            | Google endpoint         |
    ///
    /// JWT settings are read by [`JwtConfig::from_env`].
    pub fn from_env() -> Self {
        let host = env_or("HOST", "0.0.0.0");

        let port: u16 = env_or("PORT", "3000")
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = env_or("CORS_ORIGINS", "http://localhost:5173")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = env_or("REQUEST_TIMEOUT_SECS", "30")
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let simulated_latency_ms: u64 = env_or("SIMULATED_LATENCY_MS", "0")
            .parse()
            .expect("SIMULATED_LATENCY_MS must be a valid u64");

        let session_cache_dir = std::env::var("SESSION_CACHE_DIR")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);

        let booking_policy = BookingPolicy {
            reject_past_slots: env_flag("BOOKING_REJECT_PAST_SLOTS", false),
            reject_overlapping: env_flag("BOOKING_REJECT_OVERLAPPING", false),
        };

        let policy_raw = env_or("SUGGESTION_FAILURE_POLICY", "absorb");
        let suggestion_failure_policy = SuggestionFailurePolicy::parse(&policy_raw)
            .unwrap_or_else(|| {
                panic!("SUGGESTION_FAILURE_POLICY must be 'absorb' or 'propagate', got '{policy_raw}'")
            });

        let gemini = std::env::var("GEMINI_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty())
            .map(|api_key| GeminiConfig {
                api_key,
                model: env_or("GEMINI_MODEL", DEFAULT_MODEL),
                base_url: env_or("GEMINI_BASE_URL", DEFAULT_BASE_URL),
            });

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            jwt: JwtConfig::from_env(),
            seed_mock_data: env_flag("SEED_MOCK_DATA", true),
            session_cache_dir,
            simulated_latency_ms,
            booking_policy,
            suggestion_failure_policy,
            gemini,
        }
    }
}
