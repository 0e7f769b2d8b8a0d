use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tracing::debug;

use super::QuizStore;
use crate::domain::{QuizDocument, QuizSummary};
use crate::error::{QuizError, Result};

/// In-memory storage implementation for development/testing
pub struct InMemoryQuizStore {
    quizzes: Arc<Mutex<HashMap<String, QuizDocument>>>,
}

impl Default for InMemoryQuizStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryQuizStore {
    pub fn new() -> Self {
        Self {
            quizzes: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl QuizStore for InMemoryQuizStore {
    async fn save_quiz(&self, quiz: &QuizDocument) -> Result<()> {
        let mut quizzes = self.quizzes.lock().unwrap();
        if quizzes.contains_key(&quiz.name) {
            return Err(QuizError::QuizExists(quiz.name.clone()));
        }
        quizzes.insert(quiz.name.clone(), quiz.clone());

        debug!("stored quiz '{}' in memory", quiz.name);
        Ok(())
    }

    async fn get_quiz(&self, name: &str) -> Result<Option<QuizDocument>> {
        let quizzes = self.quizzes.lock().unwrap();
        Ok(quizzes.get(name).cloned())
    }

    async fn list_quizzes(&self) -> Result<Vec<QuizSummary>> {
        let quizzes = self.quizzes.lock().unwrap();
        let mut all: Vec<&QuizDocument> = quizzes.values().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(all
            .into_iter()
            .map(|quiz| QuizSummary {
                id: quiz.name.clone(),
                name: quiz.name.clone(),
            })
            .collect())
    }
}
