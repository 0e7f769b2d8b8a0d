/// Question type constants shared between the pipeline and persisted quizzes.

/// Type tag assigned to legacy positional records, which carry no tag of
/// their own.
pub const SINGLE_QUESTION_TYPE: &str = "single";

/// File extension for persisted quiz documents.
pub const QUIZ_FILE_EXT: &str = "json";
