use std::path::PathBuf;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use tokio::fs;
use tracing::debug;

use crate::app::ports::ReplyArchivePort;
use crate::error::Result;

/// Writes each raw backend response envelope to a timestamped JSON file
/// under the history directory, for offline inspection of model replies.
pub struct FsReplyArchive {
    dir: PathBuf,
}

impl FsReplyArchive {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait]
impl ReplyArchivePort for FsReplyArchive {
    async fn record(&self, envelope: &Value) -> Result<()> {
        fs::create_dir_all(&self.dir).await?;

        // Millisecond stamp keeps concurrent conversions from colliding
        let stamp = Utc::now().format("%Y%m%d_%H%M%S%3f");
        let path = self.dir.join(format!("response_{}.json", stamp));
        fs::write(&path, serde_json::to_vec_pretty(envelope)?).await?;

        debug!("archived backend reply to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[tokio::test]
    async fn writes_envelope_to_history_dir() {
        let dir = tempdir().unwrap();
        let archive = FsReplyArchive::new(dir.path().join("history"));

        archive
            .record(&json!({"choices": [{"message": {"content": "hi"}}]}))
            .await
            .unwrap();

        let mut entries = std::fs::read_dir(dir.path().join("history"))
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect::<Vec<_>>();
        entries.sort();

        assert_eq!(entries.len(), 1);
        assert!(entries[0].starts_with("response_"));
        assert!(entries[0].ends_with(".json"));
    }
}
