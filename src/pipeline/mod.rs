//! Response normalization pipeline.
//!
//! Four stages over a raw model reply: sanitize the text, decode candidate
//! lines, normalize each decoded value into the canonical record shape, and
//! aggregate the survivors in original line order. A malformed line is
//! skipped and logged; it never aborts the rest of the batch.

pub mod decode;
pub mod normalize;
pub mod sanitize;

use tracing::{info, warn};

use crate::domain::QuestionRecord;
use crate::error::{QuizError, Result};
use crate::observability::metrics;

pub use decode::DecodedValue;
pub use normalize::SkipReason;

/// Output of one pipeline run: accepted records in original line order.
#[derive(Debug, Clone)]
pub struct NormalizedReply {
    pub records: Vec<QuestionRecord>,
    pub accepted: usize,
}

/// Runs the full pipeline over a raw model reply.
///
/// Per-line problems are absorbed here. The only error this returns is the
/// empty-result signal, raised when no line survives normalization — an
/// empty quiz is never a valid outcome of a conversion.
pub fn normalize_reply(raw: &str) -> Result<NormalizedReply> {
    let text = sanitize::strip_code_fences(raw);

    let mut records = Vec::new();
    for line in decode::candidate_lines(text) {
        let decoded = match decode::decode_line(line) {
            Ok(value) => value,
            Err(_) => {
                skip(line, &SkipReason::UndecodableLine);
                continue;
            }
        };

        match normalize::normalize_value(decoded) {
            Ok(record) => records.push(record),
            Err(reason) => skip(line, &reason),
        }
    }

    if records.is_empty() {
        metrics::pipeline::reply_empty();
        return Err(QuizError::EmptyReply);
    }

    let accepted = records.len();
    metrics::pipeline::records_accepted(accepted as u64);
    info!("normalized {} questions from reply", accepted);
    Ok(NormalizedReply { records, accepted })
}

fn skip(line: &str, reason: &SkipReason) {
    warn!("skipping line: {} ({})", line, reason);
    metrics::pipeline::line_skipped(reason.label());
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn mixed_reply_keeps_valid_lines_in_order() {
        let raw = "{\"type\":\"single\",\"question\":\"2+2?\",\"answer\":\"4\"}\nnotjson\n[\"3+3?\",\"6\",[\"5\",\"6\",\"7\"]]";

        let reply = normalize_reply(raw).unwrap();

        assert_eq!(reply.accepted, 2);
        assert_eq!(reply.records[0].question, "2+2?");
        assert_eq!(reply.records[0].answer, json!("4"));
        assert_eq!(reply.records[1].question, "3+3?");
        assert_eq!(reply.records[1].kind, "single");
        assert_eq!(reply.records[1].options, Some(json!(["5", "6", "7"])));
    }

    #[test]
    fn fenced_reply_is_unwrapped_before_decoding() {
        let raw = "```json\n{\"type\":\"single\",\"question\":\"Q?\",\"answer\":\"A\"}\n```";

        let reply = normalize_reply(raw).unwrap();

        assert_eq!(reply.accepted, 1);
        assert_eq!(reply.records[0].question, "Q?");
    }

    #[test]
    fn bad_line_does_not_affect_later_lines() {
        let raw = "garbage\n{\"type\":\"single\",\"question\":\"Q1?\",\"answer\":\"A\"}\n{broken\n{\"type\":\"single\",\"question\":\"Q2?\",\"answer\":\"B\"}";

        let reply = normalize_reply(raw).unwrap();

        assert_eq!(reply.accepted, 2);
        assert_eq!(reply.records[0].question, "Q1?");
        assert_eq!(reply.records[1].question, "Q2?");
    }

    #[test]
    fn unparsable_reply_signals_empty_result() {
        let raw = "\n\n# just a comment\nnot json either\n\n";

        let err = normalize_reply(raw).unwrap_err();

        assert!(matches!(err, QuizError::EmptyReply));
    }

    #[test]
    fn empty_reply_signals_empty_result() {
        assert!(matches!(
            normalize_reply("").unwrap_err(),
            QuizError::EmptyReply
        ));
        assert!(matches!(
            normalize_reply("```json\n```").unwrap_err(),
            QuizError::EmptyReply
        ));
    }
}
