#![allow(dead_code)]

// Prompt-assembly utilities shared by every feature module.
// Feature prompt constants live next to their handlers (see launch::prompts).

use serde::Serialize;

/// Replaces each `{KEY}` placeholder in `template` with its value from
/// `context`.
///
/// Only the FIRST occurrence of a given placeholder is substituted; a
/// template that repeats a placeholder keeps later occurrences verbatim.
/// Current templates never repeat a placeholder and downstream prompts depend
/// on the exact output of this function, so the single-occurrence behavior is
/// kept deliberately rather than fixed. Unknown placeholders are left in
/// place. Values are injected as-is, without escaping.
pub fn fill_prompt(template: &str, context: &[(&str, &str)]) -> String {
    let mut result = template.to_string();
    for (key, value) in context {
        result = result.replacen(&format!("{{{key}}}"), value, 1);
    }
    result
}

/// Composes a system prompt, a pretty-printed JSON rendering of the user
/// input, and a JSON-only reply instruction.
pub fn structured_prompt<T: Serialize>(
    system_prompt: &str,
    user_input: &T,
) -> Result<String, serde_json::Error> {
    let input = serde_json::to_string_pretty(user_input)?;
    Ok(format!(
        "{system_prompt}\n\nUser Input:\n{input}\n\nRespond with valid JSON only."
    ))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn fills_each_placeholder_once() {
        let filled = fill_prompt(
            "Product: {PRODUCT}\nAudience: {AUDIENCE}",
            &[("PRODUCT", "a launch co-pilot"), ("AUDIENCE", "founders")],
        );
        assert_eq!(filled, "Product: a launch co-pilot\nAudience: founders");
    }

    #[test]
    fn repeated_placeholder_only_first_occurrence_is_replaced() {
        let filled = fill_prompt("Hello {NAME}, {NAME} again", &[("NAME", "Sam")]);
        assert_eq!(filled, "Hello Sam, {NAME} again");
    }

    #[test]
    fn unmatched_placeholders_stay_verbatim() {
        let filled = fill_prompt("Hello {NAME} from {PLACE}", &[("NAME", "Sam")]);
        assert_eq!(filled, "Hello Sam from {PLACE}");
    }

    #[test]
    fn values_are_not_escaped() {
        let filled = fill_prompt("Input: {RAW}", &[("RAW", "{\"a\": 1}")]);
        assert_eq!(filled, "Input: {\"a\": 1}");
    }

    #[test]
    fn structured_prompt_wraps_input_as_json() {
        let prompt = structured_prompt("You are a coach.", &json!({"goal": "launch"})).unwrap();
        assert!(prompt.starts_with("You are a coach.\n\nUser Input:\n"));
        assert!(prompt.contains("\"goal\": \"launch\""));
        assert!(prompt.ends_with("Respond with valid JSON only."));
    }
}
