//! Quiz persistence: a storage trait with filesystem and in-memory backends.

pub mod fs;
pub mod in_memory;

pub use fs::FsQuizStore;
pub use in_memory::InMemoryQuizStore;

use async_trait::async_trait;

use crate::domain::{QuizDocument, QuizSummary};
use crate::error::Result;

#[async_trait]
pub trait QuizStore: Send + Sync {
    /// Persists a quiz under its name. Refuses an already-used name.
    async fn save_quiz(&self, quiz: &QuizDocument) -> Result<()>;

    /// Fetches a quiz by name.
    async fn get_quiz(&self, name: &str) -> Result<Option<QuizDocument>>;

    /// Lists stored quizzes, most recently stored first.
    async fn list_quizzes(&self) -> Result<Vec<QuizSummary>>;
}
