//! JSON extraction from model output
//!
//! Models rarely return bare JSON. The usual offenders are markdown code
//! fences and conversational framing around the object. Parsing tries the
//! raw text first, then strips fences, then falls back to the outermost
//! brace span before giving up.

use crate::error::{ExtractorError, ExtractorResult};

/// Parse a JSON object out of raw model output
pub fn parse_json(raw: &str) -> ExtractorResult<serde_json::Value> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ExtractorError::MalformedResponse {
            detail: "model returned empty output".to_string(),
        });
    }

    if let Ok(value) = serde_json::from_str::<serde_json::Value>(trimmed) {
        return require_object(value, trimmed);
    }

    let unfenced = strip_code_fences(trimmed);
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(unfenced) {
        return require_object(value, unfenced);
    }

    if let Some(span) = brace_span(trimmed) {
        if let Ok(value) = serde_json::from_str::<serde_json::Value>(span) {
            return require_object(value, span);
        }
    }

    Err(ExtractorError::MalformedResponse {
        detail: format!("no JSON object found in model output: {}", sample(trimmed)),
    })
}

fn require_object(value: serde_json::Value, source: &str) -> ExtractorResult<serde_json::Value> {
    if value.is_object() {
        Ok(value)
    } else {
        Err(ExtractorError::MalformedResponse {
            detail: format!("model output parsed but is not an object: {}", sample(source)),
        })
    }
}

/// Strip a surrounding markdown code fence, with or without a language tag
fn strip_code_fences(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };

    // drop the language tag line ("json", "JSON", or nothing)
    let body = match rest.find('\n') {
        Some(pos) => &rest[pos + 1..],
        None => rest,
    };

    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

/// Outermost `{`..`}` span, if both braces are present in order
fn brace_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

/// Short char-boundary-safe sample for error messages
fn sample(text: &str) -> String {
    const MAX: usize = 120;
    if text.len() <= MAX {
        return text.to_string();
    }
    let mut end = MAX;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &text[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_json() {
        let value = parse_json(r#"{"pain_points": ["slow checkout"]}"#).unwrap();
        assert_eq!(value["pain_points"][0], "slow checkout");
    }

    #[test]
    fn parses_fenced_json_with_language_tag() {
        let raw = "```json\n{\"benefits\": [\"saves time\"]}\n```";
        let value = parse_json(raw).unwrap();
        assert_eq!(value["benefits"][0], "saves time");
    }

    #[test]
    fn parses_fenced_json_without_language_tag() {
        let raw = "```\n{\"objections\": []}\n```";
        assert!(parse_json(raw).unwrap().is_object());
    }

    #[test]
    fn parses_json_with_surrounding_prose() {
        let raw = "Here is the extraction you asked for:\n{\"personas\": []}\nLet me know!";
        assert!(parse_json(raw).unwrap().is_object());
    }

    #[test]
    fn rejects_empty_output() {
        let err = parse_json("   ").unwrap_err();
        assert_eq!(err.class(), "malformed_response");
    }

    #[test]
    fn rejects_prose_without_json() {
        let err = parse_json("I could not analyze this website.").unwrap_err();
        assert_eq!(err.class(), "malformed_response");
    }

    #[test]
    fn rejects_top_level_array() {
        let err = parse_json(r#"["a", "b"]"#).unwrap_err();
        assert_eq!(err.class(), "malformed_response");
    }

    #[test]
    fn error_sample_respects_char_boundaries() {
        let raw = "é".repeat(400);
        let err = parse_json(&raw).unwrap_err();
        assert_eq!(err.class(), "malformed_response");
    }
}
