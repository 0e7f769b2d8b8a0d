use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

/// Outbound boundary to the chat-completion model backend.
///
/// Adapters own transport details (endpoint, credentials, response
/// envelope); callers see reply text or a fatal backend error.
#[async_trait]
pub trait ModelBackendPort: Send + Sync {
    /// Sends one non-streaming completion request and returns the reply text.
    async fn complete(&self, system: &str, user: &str) -> Result<String>;
}

/// Sink for raw backend response envelopes, kept for offline inspection.
/// Callers never depend on archiving succeeding.
#[async_trait]
pub trait ReplyArchivePort: Send + Sync {
    async fn record(&self, envelope: &Value) -> Result<()>;
}
