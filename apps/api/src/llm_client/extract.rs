//! Best-effort JSON extraction from free-text model replies.
//!
//! The upstream model has no guaranteed output schema, so two patterns are
//! tried in order: the interior of a ```json fenced block, then the greedy
//! span from the first `{` to the last `}`. This is an adapter, not a
//! guaranteed parser; its failures are extraction errors, kept distinct from
//! remote/network failures so callers can tell the two apart.

use serde_json::Value;

use crate::llm_client::LlmError;

/// Pulls a JSON value out of raw model output.
///
/// Returns `LlmError::NoJson` when neither pattern matches, and
/// `LlmError::Parse` when a matched span is not valid JSON. Parse failures
/// are final — never retried, never auto-corrected.
pub fn extract_json(text: &str) -> Result<Value, LlmError> {
    let span = fenced_json_block(text)
        .or_else(|| brace_span(text))
        .ok_or(LlmError::NoJson)?;
    serde_json::from_str(span).map_err(LlmError::Parse)
}

/// Interior of the first ```json fenced code block, if the fence is closed.
fn fenced_json_block(text: &str) -> Option<&str> {
    let start = text.find("```json")? + "```json".len();
    let rest = &text[start..];
    let end = rest.find("```")?;
    Some(rest[..end].trim())
}

/// Greedy span from the first `{` to the last `}`.
fn brace_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn extracts_from_json_fenced_block() {
        let text = "Here is the result:\n```json\n{\"a\":1}\n```";
        assert_eq!(extract_json(text).unwrap(), json!({"a": 1}));
    }

    #[test]
    fn fenced_block_wins_over_surrounding_braces() {
        let text = "{\"outer\": true}\n```json\n{\"inner\": true}\n```";
        assert_eq!(extract_json(text).unwrap(), json!({"inner": true}));
    }

    #[test]
    fn untagged_fence_falls_back_to_brace_span() {
        let text = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(extract_json(text).unwrap(), json!({"key": "value"}));
    }

    #[test]
    fn brace_span_is_greedy_across_prose() {
        let text = "Sure! {\"hypothesis\": \"x\", \"nested\": {\"ok\": true}} Hope that helps.";
        let value = extract_json(text).unwrap();
        assert_eq!(value["nested"]["ok"], json!(true));
    }

    #[test]
    fn fenced_array_parses() {
        let text = "```json\n[1, 2, 3]\n```";
        assert_eq!(extract_json(text).unwrap(), json!([1, 2, 3]));
    }

    #[test]
    fn no_json_anywhere_is_an_extraction_error() {
        match extract_json("no braces here") {
            Err(LlmError::NoJson) => {}
            other => panic!("expected NoJson, got {other:?}"),
        }
    }

    #[test]
    fn malformed_span_is_a_parse_error() {
        match extract_json("```json\n{not valid}\n```") {
            Err(LlmError::Parse(_)) => {}
            other => panic!("expected Parse, got {other:?}"),
        }
    }

    #[test]
    fn unclosed_fence_still_finds_brace_span() {
        let text = "```json\n{\"a\": 1}";
        assert_eq!(extract_json(text).unwrap(), json!({"a": 1}));
    }
}
