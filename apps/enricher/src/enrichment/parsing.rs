//! Tolerant response parsing shared by every generation step.
//!
//! The model is told not to use code fences, but it sometimes does anyway.
//! Everything that turns raw generated text into a typed value goes through here.

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::llm_client::LlmError;

/// Why a single generation attempt did not produce a usable value.
#[derive(Debug, Error)]
pub enum StepError {
    #[error("generation failed: {0}")]
    Generation(#[from] LlmError),

    #[error("empty response")]
    EmptyResponse,

    #[error("response is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("response is missing required field `{0}`")]
    MissingField(&'static str),

    #[error("response has the wrong shape: {0}")]
    InvalidShape(String),
}

impl StepError {
    /// True when the reply arrived but could not be used, including an empty
    /// reply. Transport, status and configuration failures are false.
    pub fn is_malformed(&self) -> bool {
        !matches!(
            self,
            StepError::Generation(
                LlmError::Http(_) | LlmError::Api { .. } | LlmError::Config(_)
            )
        )
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from generated output.
///
/// A fence only counts when it starts the text or a line, so backticks inside
/// JSON string values are left alone. Text surrounding a fenced block is
/// discarded. Unfenced input is only trimmed.
pub fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    let open = if text.starts_with("```") {
        0
    } else {
        match text.find("\n```") {
            Some(newline) => newline + 1,
            None => return text,
        }
    };

    let after_open = &text[open + 3..];
    // Drop an info string such as `json` on the opening fence line.
    let body = match after_open.find('\n') {
        Some(newline) if is_info_string(&after_open[..newline]) => &after_open[newline + 1..],
        _ => after_open
            .strip_prefix("json")
            .or_else(|| after_open.strip_prefix("JSON"))
            .unwrap_or(after_open),
    };

    if let Some(close) = body.find("\n```") {
        return body[..close].trim();
    }
    let body = body.trim();
    body.strip_suffix("```").unwrap_or(body).trim()
}

fn is_info_string(line: &str) -> bool {
    let line = line.trim();
    line.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Rejects empty output and returns it trimmed.
pub fn require_text(raw: &str) -> Result<String, StepError> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(StepError::EmptyResponse);
    }
    Ok(text.to_string())
}

/// Decodes (possibly fenced) JSON into any deserializable type.
pub fn parse_json<T: DeserializeOwned>(raw: &str) -> Result<T, StepError> {
    let body = strip_json_fences(raw);
    if body.is_empty() {
        return Err(StepError::EmptyResponse);
    }
    Ok(serde_json::from_str(body)?)
}

/// Decodes a JSON object, returning the untyped map for field validation.
pub fn parse_json_object(raw: &str) -> Result<serde_json::Map<String, Value>, StepError> {
    match parse_json::<Value>(raw)? {
        Value::Object(map) => Ok(map),
        other => Err(StepError::InvalidShape(format!(
            "expected a JSON object, got {}",
            kind(&other)
        ))),
    }
}

/// Decodes a JSON array of strings.
pub fn parse_string_array(raw: &str) -> Result<Vec<String>, StepError> {
    let value = parse_json::<Value>(raw)?;
    if !value.is_array() {
        return Err(StepError::InvalidShape(format!(
            "expected a JSON array, got {}",
            kind(&value)
        )));
    }
    Ok(serde_json::from_value(value)?)
}

/// Reads `key` from `map` as an array of strings. Absent or non-array is an error.
pub fn required_string_array(
    map: &serde_json::Map<String, Value>,
    key: &'static str,
) -> Result<Vec<String>, StepError> {
    match map.get(key) {
        Some(value @ Value::Array(_)) => Ok(serde_json::from_value(value.clone())?),
        Some(other) => Err(StepError::InvalidShape(format!(
            "`{key}` must be an array, got {}",
            kind(other)
        ))),
        None => Err(StepError::MissingField(key)),
    }
}

/// Reads `key` as an array of strings, treating absence as empty.
pub fn optional_string_array(
    map: &serde_json::Map<String, Value>,
    key: &'static str,
) -> Result<Vec<String>, StepError> {
    match map.get(key) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(_) => required_string_array(map, key),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_json_fences_with_json_tag() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_without_tag() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_no_fences() {
        let input = "  {\"key\": \"value\"}\n";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_tag_on_same_line() {
        let input = "```json[\"a\", \"b\"]```";
        assert_eq!(strip_json_fences(input), "[\"a\", \"b\"]");
    }

    #[test]
    fn test_strip_json_fences_ignores_surrounding_prose() {
        let input = "Here you go:\n```json\n[1, 2]\n```\nHope that helps.";
        assert_eq!(strip_json_fences(input), "[1, 2]");
    }

    #[test]
    fn test_strip_json_fences_unterminated() {
        let input = "```json\n{\"a\": 1}";
        assert_eq!(strip_json_fences(input), "{\"a\": 1}");
    }

    #[test]
    fn test_backticks_inside_unfenced_json_are_kept() {
        let input = r#"{"enhancedDescription": "Wrote ``` blocks in docs", "n": 1}"#;
        assert_eq!(strip_json_fences(input), input);
        let value: Value = parse_json(input).unwrap();
        assert_eq!(value["enhancedDescription"], "Wrote ``` blocks in docs");
    }

    #[test]
    fn test_backticks_inside_fenced_json_are_kept() {
        let input = "```json\n{\"a\": \"x ``` y\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"a\": \"x ``` y\"}");
    }

    #[test]
    fn test_fenced_and_plain_parse_identically() {
        let plain = r#"{"technical": ["Rust"], "functional": [], "leadership": ["Mentoring"]}"#;
        for wrapped in [
            format!("```json\n{plain}\n```"),
            format!("```\n{plain}\n```"),
            plain.to_string(),
        ] {
            let a: Value = parse_json(&wrapped).unwrap();
            let b: Value = parse_json(plain).unwrap();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_parse_json_empty_is_empty_response() {
        assert!(matches!(
            parse_json::<Value>("```json\n```"),
            Err(StepError::EmptyResponse)
        ));
        assert!(matches!(
            parse_json::<Value>("   "),
            Err(StepError::EmptyResponse)
        ));
    }

    #[test]
    fn test_parse_json_garbage_is_invalid_json() {
        assert!(matches!(
            parse_json::<Value>("not json at all"),
            Err(StepError::InvalidJson(_))
        ));
    }

    #[test]
    fn test_parse_string_array_rejects_object() {
        let err = parse_string_array(r#"{"items": ["a"]}"#).unwrap_err();
        assert!(matches!(err, StepError::InvalidShape(_)));
    }

    #[test]
    fn test_parse_string_array_rejects_non_string_items() {
        let err = parse_string_array("[1, 2]").unwrap_err();
        assert!(matches!(err, StepError::InvalidJson(_)));
    }

    #[test]
    fn test_required_string_array_missing_and_wrong_type() {
        let map = parse_json_object(r#"{"technical": "Rust"}"#).unwrap();
        assert!(matches!(
            required_string_array(&map, "technical"),
            Err(StepError::InvalidShape(_))
        ));
        assert!(matches!(
            required_string_array(&map, "leadership"),
            Err(StepError::MissingField("leadership"))
        ));
        assert!(optional_string_array(&map, "leadership").unwrap().is_empty());
    }

    #[test]
    fn test_require_text() {
        assert!(matches!(require_text(" \n"), Err(StepError::EmptyResponse)));
        assert_eq!(require_text("  Hello.  ").unwrap(), "Hello.");
    }

    #[test]
    fn test_malformed_classification() {
        assert!(StepError::EmptyResponse.is_malformed());
        assert!(StepError::MissingField("x").is_malformed());
        assert!(StepError::Generation(LlmError::EmptyContent).is_malformed());
        assert!(!StepError::Generation(LlmError::Api {
            status: 529,
            message: "overloaded".to_string(),
        })
        .is_malformed());
    }
}
