use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{info, warn};

use crate::app::ports::{ModelBackendPort, ReplyArchivePort};
use crate::config::BackendConfig;
use crate::error::{QuizError, Result};
use crate::observability::metrics;

/// OpenAI-compatible chat-completion client. DeepSeek speaks the same wire
/// format, so one adapter covers both. Requests are always non-streaming.
pub struct ChatBackend {
    client: Client,
    base_url: String,
    model: String,
    api_key: String,
    temperature: f64,
    timeout: Duration,
    archive: Option<Arc<dyn ReplyArchivePort>>,
}

impl ChatBackend {
    pub fn new(config: &BackendConfig, api_key: String) -> Self {
        Self {
            client: Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key,
            temperature: config.temperature,
            timeout: Duration::from_secs(config.timeout_seconds),
            archive: None,
        }
    }

    /// Attaches an archive that receives each raw response envelope.
    pub fn with_archive(mut self, archive: Arc<dyn ReplyArchivePort>) -> Self {
        self.archive = Some(archive);
        self
    }
}

#[async_trait]
impl ModelBackendPort for ChatBackend {
    async fn complete(&self, system: &str, user: &str) -> Result<String> {
        let payload = serde_json::json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": system},
                {"role": "user", "content": user}
            ],
            "stream": false,
            "temperature": self.temperature,
        });

        let url = format!("{}/chat/completions", self.base_url);
        let start = Instant::now();
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .timeout(self.timeout)
            .send()
            .await?;
        metrics::backend::request_duration(start.elapsed().as_secs_f64());

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            metrics::backend::request_error();
            return Err(QuizError::Backend {
                message: format!("backend returned status {}: {}", status, body),
            });
        }

        let envelope: Value = response.json().await?;

        if let Some(archive) = &self.archive {
            // Archive failures must not fail the conversion
            if let Err(e) = archive.record(&envelope).await {
                warn!("failed to archive backend reply: {}", e);
            }
        }

        let content = envelope
            .get("choices")
            .and_then(|c| c.get(0))
            .and_then(|c| c.get("message"))
            .and_then(|m| m.get("content"))
            .and_then(|c| c.as_str());

        match content {
            Some(text) if !text.trim().is_empty() => {
                metrics::backend::request_success();
                info!("received {} bytes of reply from model backend", text.len());
                Ok(text.to_string())
            }
            _ => {
                metrics::backend::request_error();
                Err(QuizError::Backend {
                    message: "backend reply contained no content".to_string(),
                })
            }
        }
    }
}
