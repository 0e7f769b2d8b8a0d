use std::fmt;

use serde_json::{Map, Value};

use crate::constants::SINGLE_QUESTION_TYPE;
use crate::domain::QuestionRecord;

use super::decode::DecodedValue;

/// Why a decoded line was rejected instead of becoming a question record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    UndecodableLine,
    ShortSequence(usize),
    MissingField(&'static str),
    UnsupportedShape,
}

impl SkipReason {
    /// Short label for metrics.
    pub fn label(&self) -> &'static str {
        match self {
            SkipReason::UndecodableLine => "undecodable_line",
            SkipReason::ShortSequence(_) => "short_sequence",
            SkipReason::MissingField(_) => "missing_field",
            SkipReason::UnsupportedShape => "unsupported_shape",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::UndecodableLine => write!(f, "line is not well-formed JSON"),
            SkipReason::ShortSequence(len) => {
                write!(f, "positional record has {} elements, need at least 3", len)
            }
            SkipReason::MissingField(field) => {
                write!(f, "record is missing a usable '{}' field", field)
            }
            SkipReason::UnsupportedShape => {
                write!(f, "value is neither a keyed record nor a positional record")
            }
        }
    }
}

/// Converts one decoded value into the canonical record shape, or reports
/// why it cannot be.
pub fn normalize_value(value: DecodedValue) -> Result<QuestionRecord, SkipReason> {
    match value {
        DecodedValue::Sequence(items) => from_legacy_sequence(items),
        DecodedValue::Mapping(map) => from_mapping(map),
        DecodedValue::Scalar(_) => Err(SkipReason::UnsupportedShape),
    }
}

/// Legacy positional schema: positions 0..3 are (question, answer, options).
/// Anything further is not part of the schema and is dropped.
fn from_legacy_sequence(mut items: Vec<Value>) -> Result<QuestionRecord, SkipReason> {
    if items.len() < 3 {
        return Err(SkipReason::ShortSequence(items.len()));
    }

    let options = items.remove(2);
    let answer = items.remove(1);
    let question = match items.remove(0) {
        Value::String(text) if !text.trim().is_empty() => text,
        _ => return Err(SkipReason::MissingField("question")),
    };
    if !has_answer_content(&answer) {
        return Err(SkipReason::MissingField("answer"));
    }

    Ok(QuestionRecord {
        kind: SINGLE_QUESTION_TYPE.to_string(),
        question,
        answer,
        options: Some(options),
        extra: Map::new(),
    })
}

/// Current keyed schema. Accepted only with usable `type`, `question` and
/// `answer` fields; remaining keys pass through untouched.
fn from_mapping(mut map: Map<String, Value>) -> Result<QuestionRecord, SkipReason> {
    let kind = match map.remove("type") {
        Some(Value::String(text)) if !text.trim().is_empty() => text,
        _ => return Err(SkipReason::MissingField("type")),
    };
    let question = match map.remove("question") {
        Some(Value::String(text)) if !text.trim().is_empty() => text,
        _ => return Err(SkipReason::MissingField("question")),
    };
    let answer = match map.remove("answer") {
        Some(value) if has_answer_content(&value) => value,
        _ => return Err(SkipReason::MissingField("answer")),
    };
    let options = map.remove("options");

    Ok(QuestionRecord {
        kind,
        question,
        answer,
        options,
        extra: map,
    })
}

/// An answer may be text or a structured answer key; null and blank text
/// carry no content.
fn has_answer_content(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(text) => !text.trim().is_empty(),
        _ => true,
    }
}
