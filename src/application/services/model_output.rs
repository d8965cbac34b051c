//! Helpers for pulling JSON out of free-text model responses.

use serde::de::DeserializeOwned;

/// Removes a surrounding Markdown code fence (```` ```json ... ``` ````) if
/// the whole response is wrapped in one.
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();

    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };

    // Skip the info string (`json`, `JSON`, ...) on the opening fence line.
    let body = match rest.find('\n') {
        Some(pos) => &rest[pos + 1..],
        None => rest,
    };

    body.trim_end()
        .strip_suffix("```")
        .unwrap_or(body)
        .trim()
}

/// Parses a model response as JSON, tolerating a Markdown code fence.
pub fn parse_json<T: DeserializeOwned>(text: &str) -> Result<T, serde_json::Error> {
    serde_json::from_str(strip_code_fence(text))
}

/// Slice from the first `{` to the last `}`.
///
/// This is a heuristic for responses that wrap a JSON object in prose. It does
/// not balance braces, so prose containing braces around the object can still
/// produce a slice that fails to parse.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;

    if end < start {
        return None;
    }

    Some(&text[start..=end])
}
