use serde_json::{Map, Value};

/// A decoded candidate line, classified by shape.
///
/// The legacy/current schema split is decided here once, as an explicit
/// variant, so the normalizer never does runtime type probing.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedValue {
    /// Legacy positional schema: question, answer, options.
    Sequence(Vec<Value>),
    /// Current keyed schema.
    Mapping(Map<String, Value>),
    /// Well-formed JSON that is neither a sequence nor a mapping.
    Scalar(Value),
}

/// Splits sanitized text into trimmed, non-empty candidate lines. The
/// returned iterator is lazy; calling again yields a fresh pass.
pub fn candidate_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines().map(str::trim).filter(|line| !line.is_empty())
}

/// Attempts to decode one candidate line as a self-contained JSON value.
pub fn decode_line(line: &str) -> serde_json::Result<DecodedValue> {
    let value: Value = serde_json::from_str(line)?;
    Ok(match value {
        Value::Array(items) => DecodedValue::Sequence(items),
        Value::Object(map) => DecodedValue::Mapping(map),
        other => DecodedValue::Scalar(other),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn blank_and_whitespace_lines_are_dropped() {
        let lines: Vec<&str> = candidate_lines("first\n\n   \n\tsecond  \n").collect();
        assert_eq!(lines, vec!["first", "second"]);
    }

    #[test]
    fn iterator_restarts_from_the_top() {
        let text = "a\nb";
        assert_eq!(candidate_lines(text).count(), 2);
        assert_eq!(candidate_lines(text).count(), 2);
    }

    #[test]
    fn classifies_shapes() {
        assert_eq!(
            decode_line("[1, 2, 3]").unwrap(),
            DecodedValue::Sequence(vec![json!(1), json!(2), json!(3)])
        );
        assert!(matches!(
            decode_line("{\"question\": \"Q?\"}").unwrap(),
            DecodedValue::Mapping(_)
        ));
        assert_eq!(
            decode_line("\"bare\"").unwrap(),
            DecodedValue::Scalar(json!("bare"))
        );
        assert_eq!(decode_line("42").unwrap(), DecodedValue::Scalar(json!(42)));
        assert_eq!(
            decode_line("null").unwrap(),
            DecodedValue::Scalar(Value::Null)
        );
    }

    #[test]
    fn malformed_line_is_an_error_not_a_panic() {
        assert!(decode_line("not json").is_err());
        assert!(decode_line("{\"unterminated\": ").is_err());
    }
}
