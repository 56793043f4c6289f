//! The single gate between untyped model text and typed values.
//!
//! Model output is stripped of markdown fencing, parsed as JSON, and only then
//! decoded into a target type. Parse failures carry a bounded excerpt of the
//! raw text; nothing here ever substitutes a default object.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{CoreError, CoreResult};
use crate::util::truncate_chars;

/// Default bound on raw-output excerpts.
pub const DEFAULT_EXCERPT_CHARS: usize = 200;

static FENCE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"```[A-Za-z0-9_-]*").expect("fence pattern is valid"));

/// Remove every triple-backtick fence (with or without a language tag) and trim.
///
/// Idempotent: the output contains no fences, so a second pass only trims.
pub fn strip_code_fences(text: &str) -> String {
    FENCE_RE.replace_all(text, "").trim().to_string()
}

/// Strip fences and parse the remainder as JSON.
pub fn parse_json(raw: &str, excerpt_chars: usize) -> CoreResult<Value> {
    let cleaned = strip_code_fences(raw);
    serde_json::from_str(&cleaned).map_err(|e| CoreError::MalformedModelOutput {
        reason: e.to_string(),
        excerpt: truncate_chars(raw, excerpt_chars).to_string(),
    })
}

/// Strip, parse, then decode into `T`. Shape mismatches are schema errors.
pub fn parse_typed<T: DeserializeOwned>(raw: &str, excerpt_chars: usize) -> CoreResult<T> {
    let value = parse_json(raw, excerpt_chars)?;
    serde_json::from_value(value).map_err(|e| CoreError::SchemaValidation(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[test]
    fn test_fenced_and_bare_json_parse_identically() {
        let fenced = parse_json("```json\n{\"a\":1}\n```", 200).unwrap();
        let bare = parse_json("{\"a\":1}", 200).unwrap();
        assert_eq!(fenced, json!({"a": 1}));
        assert_eq!(fenced, bare);
    }

    #[test]
    fn test_strip_is_idempotent() {
        let once = strip_code_fences("```json\n{\"a\":1}\n```");
        let twice = strip_code_fences(&once);
        assert_eq!(once, "{\"a\":1}");
        assert_eq!(once, twice);
    }

    #[test]
    fn test_strip_plain_fence_and_whitespace() {
        assert_eq!(strip_code_fences("  ```\n[1, 2]\n```  \n"), "[1, 2]");
        assert_eq!(strip_code_fences("```JSON\n{}\n```"), "{}");
    }

    #[test]
    fn test_strip_leaves_unfenced_text_alone() {
        assert_eq!(strip_code_fences("  plain text "), "plain text");
    }

    #[test]
    fn test_malformed_output_carries_bounded_excerpt() {
        let raw = format!("Sure! Here you go: {}", "x".repeat(500));
        let err = parse_json(&raw, 40).unwrap_err();
        assert_eq!(err.kind(), "malformed_model_output");
        let excerpt = err.excerpt().unwrap();
        assert_eq!(excerpt.chars().count(), 40);
        assert!(excerpt.starts_with("Sure! Here you go"));
    }

    #[test]
    fn test_empty_response_is_malformed() {
        let err = parse_json("```json\n```", 200).unwrap_err();
        assert!(matches!(err, CoreError::MalformedModelOutput { .. }));
    }

    #[derive(Debug, Deserialize)]
    struct Envelope {
        code: String,
    }

    #[test]
    fn test_parse_typed_success() {
        let env: Envelope = parse_typed("```json\n{\"code\": \"<b>x</b>\"}\n```", 200).unwrap();
        assert_eq!(env.code, "<b>x</b>");
    }

    #[test]
    fn test_parse_typed_shape_mismatch_is_schema_error() {
        let err = parse_typed::<Envelope>("{\"html\": \"<b>x</b>\"}", 200).unwrap_err();
        assert_eq!(err.kind(), "schema_validation_error");
    }
}
