//! Best-effort parsing of almost-JSON text.
//!
//! The repair is a narrow textual rewrite: bare `key:` tokens gain quotes and
//! single quotes become double quotes. It does not understand the grammar and
//! can mangle string contents, so it only runs after a strict parse fails.

use std::sync::OnceLock;

use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::error::CodecError;

fn bare_key() -> &'static Regex {
    static BARE_KEY: OnceLock<Regex> = OnceLock::new();
    BARE_KEY.get_or_init(|| Regex::new(r"([A-Za-z0-9_]+) ?:").expect("bare key pattern is valid"))
}

/// Parses `text` as JSON, retrying once with quoted keys and double quotes.
///
/// # Errors
/// Returns [`CodecError::InvalidInput`] when the repaired text still fails
/// to parse.
pub fn parse_lenient(text: &str) -> Result<Value, CodecError> {
    let strict_err = match serde_json::from_str(text) {
        Ok(value) => return Ok(value),
        Err(err) => err,
    };
    debug!(error = %strict_err, "strict JSON parse failed, attempting repair");

    let repaired = repair(text);
    serde_json::from_str(&repaired).map_err(|err| {
        debug!(error = %err, "repaired JSON still invalid");
        CodecError::InvalidInput(format!("not recoverable as JSON: {}", err))
    })
}

/// Runs [`parse_lenient`] and deserializes the result into `T`.
pub fn parse_lenient_as<T: DeserializeOwned>(text: &str) -> Result<T, CodecError> {
    let value = parse_lenient(text)?;
    serde_json::from_value(value).map_err(|err| CodecError::InvalidInput(err.to_string()))
}

fn repair(text: &str) -> String {
    let quoted = bare_key().replace_all(text, "\"$1\":");
    let mut fixed = quoted.replace('\'', "\"");
    // One stray character after the closing brace, e.g. a statement `;`.
    let trimmed_len = fixed.trim_end().len();
    fixed.truncate(trimmed_len);
    let mut tail = fixed.chars().rev();
    if let (Some(last), Some('}')) = (tail.next(), tail.next()) {
        if last != '}' {
            fixed.truncate(fixed.len() - last.len_utf8());
        }
    }
    fixed
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[test]
    fn valid_json_is_untouched() {
        let text = r#"{"url": "http://example.com", "n": [1, 2]}"#;
        assert_eq!(
            parse_lenient(text).unwrap(),
            json!({"url": "http://example.com", "n": [1, 2]})
        );
    }

    #[test]
    fn bare_keys_are_quoted() {
        assert_eq!(parse_lenient("{a: 1}").unwrap(), json!({"a": 1}));
        assert_eq!(
            parse_lenient("{first : 1, second_2: true}").unwrap(),
            json!({"first": 1, "second_2": true})
        );
    }

    #[test]
    fn single_quotes_become_double() {
        assert_eq!(
            parse_lenient("{'name': 'blockkit', mode: 'cbc'}").unwrap(),
            json!({"name": "blockkit", "mode": "cbc"})
        );
    }

    #[test]
    fn trailing_statement_terminator_is_dropped() {
        assert_eq!(parse_lenient("{a: 1};\n").unwrap(), json!({"a": 1}));
    }

    #[test]
    fn unrecoverable_input_is_rejected() {
        for text in ["", "{a: }", "not json at all", "{a: [1, 2}"] {
            assert!(
                matches!(parse_lenient(text), Err(CodecError::InvalidInput(_))),
                "text={:?}",
                text
            );
        }
    }

    #[test]
    fn typed_recovery() {
        #[derive(Debug, Deserialize, PartialEq)]
        struct Settings {
            rounds: u32,
        }
        let settings: Settings = parse_lenient_as("{rounds: 16}").unwrap();
        assert_eq!(settings, Settings { rounds: 16 });
        assert!(parse_lenient_as::<Settings>("{other: 1}").is_err());
    }
}
