use std::sync::Arc;

use tracing::info;

use crate::app::convert_use_case::ConvertUseCase;
use crate::domain::QuizDocument;
use crate::error::Result;
use crate::storage::QuizStore;

/// Use case for creating a named quiz from free-form text: convert, then
/// persist under the caller-supplied name.
pub struct CreateQuizUseCase {
    convert: Arc<ConvertUseCase>,
    store: Arc<dyn QuizStore>,
}

impl CreateQuizUseCase {
    pub fn new(convert: Arc<ConvertUseCase>, store: Arc<dyn QuizStore>) -> Self {
        Self { convert, store }
    }

    /// Returns the number of questions stored under `name`.
    pub async fn create(&self, name: &str, content: &str) -> Result<usize> {
        let reply = self.convert.convert(content).await?;
        let quiz = QuizDocument::new(name, reply.records);
        self.store.save_quiz(&quiz).await?;
        info!("stored quiz '{}' with {} questions", name, reply.accepted);
        Ok(reply.accepted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::ports::ModelBackendPort;
    use crate::error::QuizError;
    use crate::storage::InMemoryQuizStore;
    use async_trait::async_trait;

    struct MockBackend {
        reply: String,
    }

    #[async_trait]
    impl ModelBackendPort for MockBackend {
        async fn complete(&self, _system: &str, _user: &str) -> Result<String> {
            Ok(self.reply.clone())
        }
    }

    fn use_case_with_store(reply: &str) -> (CreateQuizUseCase, Arc<InMemoryQuizStore>) {
        let convert = Arc::new(ConvertUseCase::new(
            Arc::new(MockBackend {
                reply: reply.to_string(),
            }),
            "instruction".to_string(),
        ));
        let store = Arc::new(InMemoryQuizStore::new());
        (CreateQuizUseCase::new(convert, store.clone()), store)
    }

    #[tokio::test]
    async fn creates_and_persists_a_quiz() {
        let (use_case, store) = use_case_with_store(
            "{\"type\":\"single\",\"question\":\"Q1?\",\"answer\":\"A\"}\n{\"type\":\"single\",\"question\":\"Q2?\",\"answer\":\"B\"}",
        );

        let count = use_case.create("midterm", "some text").await.unwrap();

        assert_eq!(count, 2);
        let stored = store.get_quiz("midterm").await.unwrap().unwrap();
        assert_eq!(stored.questions.len(), 2);
        assert_eq!(stored.questions[0].question, "Q1?");
    }

    #[tokio::test]
    async fn empty_conversion_stores_nothing() {
        let (use_case, store) = use_case_with_store("no structured lines");

        let err = use_case.create("midterm", "some text").await.unwrap_err();

        assert!(matches!(err, QuizError::EmptyReply));
        assert!(store.get_quiz("midterm").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_name_is_refused() {
        let (use_case, _store) =
            use_case_with_store("{\"type\":\"single\",\"question\":\"Q?\",\"answer\":\"A\"}");

        use_case.create("midterm", "text").await.unwrap();
        let err = use_case.create("midterm", "text").await.unwrap_err();

        assert!(matches!(err, QuizError::QuizExists(_)));
    }
}
