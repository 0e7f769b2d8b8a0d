use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Canonical representation of one quiz question after normalization.
///
/// The field set is open: anything beyond the declared keys survives
/// round-trips untouched through `extra`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QuestionRecord {
    /// Category tag, e.g. "single", "multiple", "judge".
    #[serde(rename = "type")]
    pub kind: String,
    pub question: String,
    /// Answer text or a structured answer key.
    pub answer: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Named, ordered collection of question records; the unit of persistence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizDocument {
    pub name: String,
    pub questions: Vec<QuestionRecord>,
    pub created_at: DateTime<Utc>,
}

impl QuizDocument {
    pub fn new(name: impl Into<String>, questions: Vec<QuestionRecord>) -> Self {
        Self {
            name: name.into(),
            questions,
            created_at: Utc::now(),
        }
    }
}

/// Entry in a quiz listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QuizSummary {
    pub id: String,
    pub name: String,
}
