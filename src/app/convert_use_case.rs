use std::sync::Arc;

use tracing::info;

use crate::app::ports::ModelBackendPort;
use crate::error::Result;
use crate::pipeline::{self, NormalizedReply};

/// Use case for converting free-form quiz text into normalized question
/// records.
///
/// The system prompt and backend handle are injected at construction, so
/// instances are independently testable; nothing here is process-global.
pub struct ConvertUseCase {
    backend: Arc<dyn ModelBackendPort>,
    system_prompt: String,
}

impl ConvertUseCase {
    pub fn new(backend: Arc<dyn ModelBackendPort>, system_prompt: String) -> Self {
        Self {
            backend,
            system_prompt,
        }
    }

    /// Performs exactly one backend call and runs the normalization pipeline
    /// over the reply. Backend failure is fatal to the invocation; per-line
    /// problems are absorbed by the pipeline.
    pub async fn convert(&self, text: &str) -> Result<NormalizedReply> {
        info!("requesting conversion from model backend");
        let raw = self.backend.complete(&self.system_prompt, text).await?;
        pipeline::normalize_reply(&raw)
    }
}
