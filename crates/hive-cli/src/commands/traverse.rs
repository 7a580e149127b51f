//! Traverse command implementation.

use crate::cli::TraverseArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use hive_domain::traits::CorpusReader;
use hive_domain::Payload;
use hive_store::StoreError;
use serde_json::Value;

/// Execute the traverse command.
pub fn execute_traverse<S>(args: &TraverseArgs, store: &S, formatter: &Formatter) -> Result<String>
where
    S: CorpusReader<Error = StoreError>,
{
    let payload = parse_payload(args.payload.as_deref())?;
    let hex = store
        .get_hex(&args.id)?
        .ok_or_else(|| CliError::NotFound(args.id.clone()))?;

    let traversals = hex.traverse(&args.intent, &payload);
    formatter.format_traversals(&traversals)
}

fn parse_payload(raw: Option<&str>) -> Result<Payload> {
    let Some(raw) = raw else {
        return Ok(Payload::new());
    };

    match serde_json::from_str(raw)? {
        Value::Object(map) => Ok(map),
        other => Err(CliError::InvalidInput(format!(
            "Payload must be a JSON object, got {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_payload() {
        assert!(parse_payload(None).unwrap().is_empty());

        let payload = parse_payload(Some(r#"{"user": "ada"}"#)).unwrap();
        assert_eq!(payload["user"], "ada");

        assert!(matches!(parse_payload(Some("[1, 2]")), Err(CliError::InvalidInput(_))));
        assert!(matches!(parse_payload(Some("{oops")), Err(CliError::Serialization(_))));
    }
}
