//! Interpretation of model output.
//!
//! Models often wrap JSON in markdown fences or in an object even when asked
//! not to; both are tolerated. Anything else is malformed.

use serde::de::DeserializeOwned;
use serde_json::Value;

/// Strip a surrounding ```` ``` ```` or ```` ```json ```` fence, if any.
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let body = match rest.find('\n') {
        Some(i) => &rest[i + 1..],
        None => rest,
    };
    body.strip_suffix("```").unwrap_or(body).trim()
}

/// Parse a JSON array of `T` out of model text.
///
/// Accepts a bare array or an object with a single array-valued field
/// (e.g. `{"suggestions": [...]}`).
pub fn parse_suggestions<T: DeserializeOwned>(text: &str) -> Result<Vec<T>, serde_json::Error> {
    let value: Value = serde_json::from_str(strip_code_fence(text))?;
    let array = match value {
        Value::Object(map) if map.len() == 1 => match map.into_iter().next() {
            Some((_, inner @ Value::Array(_))) => inner,
            Some((_, other)) => other,
            None => Value::Null,
        },
        other => other,
    };
    serde_json::from_value(array)
}
