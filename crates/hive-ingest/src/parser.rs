//! Parse extractor output into candidate hexes

use crate::error::IngestError;
use crate::types::ExtractionResponse;
use tracing::debug;

/// How much of an unparseable response is quoted in the error
const ERROR_EXCERPT_CHARS: usize = 200;

/// Parse and shape-check an extractor response.
///
/// Any failure is a chunk-level error: malformed JSON, a missing field, an
/// unknown hex type or a candidate breaking the name/hint rules.
pub fn parse_extraction_response(response: &str) -> Result<ExtractionResponse, IngestError> {
    let json_str = strip_code_fence(response);

    let value: serde_json::Value = serde_json::from_str(json_str).map_err(|e| {
        IngestError::JsonParse(format!(
            "{} in response starting {:?}",
            e,
            excerpt(response)
        ))
    })?;

    let parsed: ExtractionResponse = serde_json::from_value(value)
        .map_err(|e| IngestError::InvalidResponse(e.to_string()))?;

    for candidate in &parsed.hexes {
        candidate.validate().map_err(IngestError::InvalidResponse)?;
    }

    debug!("Parsed {} hex candidates", parsed.hexes.len());
    Ok(parsed)
}

/// Remove an optional ```` ``` ```` / ```` ```json ```` wrapper
fn strip_code_fence(response: &str) -> &str {
    let trimmed = response.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };

    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let rest = rest.strip_prefix('\n').unwrap_or(rest);
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    rest.strip_suffix('\n').unwrap_or(rest)
}

fn excerpt(response: &str) -> String {
    response.chars().take(ERROR_EXCERPT_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use hive_domain::HexKind;

    const VALID: &str = r#"{
        "hexes": [
            {
                "id": "React Hooks",
                "name": "React Hooks",
                "type": "data",
                "description": "Using hooks",
                "entryHints": ["react hooks", "useState"],
                "tags": ["react"],
                "contents": { "data": { "summary": "state in functions" } },
                "edges": [
                    {
                        "id": "to-effects",
                        "to": "use-effect",
                        "when": { "intent": "side effects" },
                        "priority": 60,
                        "description": "Effects"
                    }
                ]
            }
        ],
        "summary": "One hex about hooks"
    }"#;

    #[test]
    fn test_parse_valid_json() {
        let parsed = parse_extraction_response(VALID).unwrap();
        assert_eq!(parsed.hexes.len(), 1);
        assert_eq!(parsed.summary, "One hex about hooks");

        let hex = &parsed.hexes[0];
        assert_eq!(hex.kind, HexKind::Data);
        assert_eq!(hex.entry_hints.len(), 2);
        assert_eq!(hex.edges[0].priority, 60.0);
        assert_eq!(hex.edges[0].when.intent.as_deref(), Some("side effects"));
    }

    #[test]
    fn test_parse_json_with_markdown_wrapper() {
        let wrapped = format!("```json\n{}\n```", VALID);
        assert!(parse_extraction_response(&wrapped).is_ok());

        let bare_fence = format!("```\n{}\n```", VALID);
        assert!(parse_extraction_response(&bare_fence).is_ok());
    }

    #[test]
    fn test_parse_invalid_json() {
        let err = parse_extraction_response("Sorry, I can't help with that").unwrap_err();
        assert!(matches!(err, IngestError::JsonParse(_)));
        assert!(err.to_string().contains("Sorry"));
    }

    #[test]
    fn test_missing_summary() {
        let err = parse_extraction_response(r#"{"hexes": []}"#).unwrap_err();
        assert!(matches!(err, IngestError::InvalidResponse(_)));
    }

    #[test]
    fn test_array_instead_of_object() {
        let err = parse_extraction_response("[]").unwrap_err();
        assert!(matches!(err, IngestError::InvalidResponse(_)));
    }

    #[test]
    fn test_candidate_without_hints_fails_whole_response() {
        let response = VALID.replace(r#"["react hooks", "useState"]"#, "[]");
        let err = parse_extraction_response(&response).unwrap_err();
        assert!(matches!(err, IngestError::InvalidResponse(_)));
    }

    #[test]
    fn test_string_priority_is_rejected() {
        let response = VALID.replace("\"priority\": 60", "\"priority\": \"high\"");
        assert!(parse_extraction_response(&response).is_err());
    }

    #[test]
    fn test_empty_hex_list_is_valid() {
        let parsed = parse_extraction_response(r#"{"hexes": [], "summary": "nothing"}"#).unwrap();
        assert!(parsed.hexes.is_empty());
    }

    #[test]
    fn test_strip_code_fence() {
        assert_eq!(strip_code_fence("  {}  "), "{}");
        assert_eq!(strip_code_fence("```json\n{}\n```"), "{}");
        assert_eq!(strip_code_fence("```{}```"), "{}");
    }
}
