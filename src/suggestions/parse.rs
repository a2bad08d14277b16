use serde_json::Value;

use crate::suggestions::error::SuggestionError;

/// Pulls a JSON value out of a model response. The response is either
/// bare JSON or a single markdown code fence wrapping the whole text.
pub fn extract_json(raw: &str) -> Result<Value, SuggestionError> {
    let trimmed = raw.trim();
    let body = strip_fence(trimmed).unwrap_or(trimmed);

    serde_json::from_str(body.trim())
        .map_err(|e| SuggestionError::MalformedResponse(e.to_string()))
}

// Whole-string fence only: ``` plus an optional language tag, the
// body, then a closing ```. Anything else is returned untouched.
fn strip_fence(text: &str) -> Option<&str> {
    let body = text.strip_prefix("```")?.strip_suffix("```")?;
    Some(body.trim_start_matches(|c: char| c.is_ascii_alphanumeric() || c == '_'))
}
