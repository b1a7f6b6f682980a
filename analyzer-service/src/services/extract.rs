//! Best-effort extraction of a JSON object from a model reply.
//!
//! The model is instructed to answer with raw JSON but routinely wraps it
//! in prose or a markdown fence anyway.

/// Locate and parse the JSON object inside `raw`.
///
/// Strategy: slice from the first `{` to the last `}` when both are
/// present; otherwise strip a leading ```` ```json ```` fence and a
/// trailing ```` ``` ````. The surviving text must parse as JSON.
pub fn extract_json_object(raw: &str) -> Result<serde_json::Value, serde_json::Error> {
    let trimmed = raw.trim();

    let candidate = match (trimmed.find('{'), trimmed.rfind('}')) {
        (Some(first), Some(last)) if first <= last => &trimmed[first..=last],
        _ => {
            let stripped = trimmed.strip_prefix("```json").unwrap_or(trimmed);
            stripped.strip_suffix("```").unwrap_or(stripped).trim()
        }
    };

    serde_json::from_str(candidate)
}
