use std::path::PathBuf;
use std::time::SystemTime;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use super::QuizStore;
use crate::constants::QUIZ_FILE_EXT;
use crate::domain::{QuestionRecord, QuizDocument, QuizSummary};
use crate::error::{QuizError, Result};
use crate::observability::metrics;

/// Filesystem-backed quiz storage.
///
/// Each quiz lives in `<dir>/<name>.json` holding the bare question array,
/// the exchange format the web front end consumes directly.
pub struct FsQuizStore {
    dir: PathBuf,
}

impl FsQuizStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn quiz_path(&self, name: &str) -> Result<PathBuf> {
        validate_name(name)?;
        Ok(self.dir.join(format!("{}.{}", name, QUIZ_FILE_EXT)))
    }
}

/// Quiz names become file names; restrict them to a safe alphabet.
fn validate_name(name: &str) -> Result<()> {
    let ok = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '-' | '_' | ' '));
    if ok {
        Ok(())
    } else {
        Err(QuizError::InvalidQuizName(name.to_string()))
    }
}

#[async_trait]
impl QuizStore for FsQuizStore {
    async fn save_quiz(&self, quiz: &QuizDocument) -> Result<()> {
        let path = self.quiz_path(&quiz.name)?;
        fs::create_dir_all(&self.dir).await?;

        let body = serde_json::to_vec_pretty(&quiz.questions)?;

        // create_new gives name-level mutual exclusion: two concurrent
        // creations under one name must not race to last-write-wins.
        let mut open = fs::OpenOptions::new();
        open.write(true).create_new(true);
        let mut file = match open.open(&path).await {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                metrics::store::write_error();
                return Err(QuizError::QuizExists(quiz.name.clone()));
            }
            Err(e) => {
                metrics::store::write_error();
                return Err(e.into());
            }
        };

        if let Err(e) = file.write_all(&body).await {
            metrics::store::write_error();
            return Err(e.into());
        }

        if let Err(e) = file.flush().await {
            metrics::store::write_error();
            return Err(e.into());
        }

        metrics::store::write_success();
        debug!("stored quiz '{}' at {}", quiz.name, path.display());
        Ok(())
    }

    async fn get_quiz(&self, name: &str) -> Result<Option<QuizDocument>> {
        let path = self.quiz_path(name)?;

        let bytes = match fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let questions: Vec<QuestionRecord> = serde_json::from_slice(&bytes)?;
        let created_at = fs::metadata(&path)
            .await
            .ok()
            .and_then(|m| m.modified().ok())
            .map(DateTime::<Utc>::from)
            .unwrap_or_else(Utc::now);

        Ok(Some(QuizDocument {
            name: name.to_string(),
            questions,
            created_at,
        }))
    }

    async fn list_quizzes(&self) -> Result<Vec<QuizSummary>> {
        let mut entries = match fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut found: Vec<(String, SystemTime)> = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(QUIZ_FILE_EXT) {
                continue;
            }
            let stem = match path.file_stem().and_then(|s| s.to_str()) {
                Some(stem) => stem.to_string(),
                None => continue,
            };
            let modified = entry
                .metadata()
                .await
                .ok()
                .and_then(|m| m.modified().ok())
                .unwrap_or(SystemTime::UNIX_EPOCH);
            found.push((stem, modified));
        }

        // Newest quizzes first, as the front end shows them on top
        found.sort_by(|a, b| b.1.cmp(&a.1));

        Ok(found
            .into_iter()
            .map(|(name, _)| QuizSummary {
                id: name.clone(),
                name,
            })
            .collect())
    }
}
