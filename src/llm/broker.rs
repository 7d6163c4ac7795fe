use crate::error::{ChemistError, Result};
use crate::llm::gateway::LlmGateway;
use crate::llm::models::{ContentPart, ImagePart};
use crate::prompt::INPUT_PROMPT;
use std::sync::Arc;
use tracing::{debug, info};

/// Turns an uploaded image into one model request and returns the model's text
pub struct AnalysisBroker {
    model: String,
    prompt: String,
    gateway: Arc<dyn LlmGateway>,
}

impl AnalysisBroker {
    /// Create a broker that sends [`INPUT_PROMPT`] ahead of every image
    pub fn new(model: impl Into<String>, gateway: Arc<dyn LlmGateway>) -> Self {
        Self {
            model: model.into(),
            prompt: INPUT_PROMPT.to_string(),
            gateway,
        }
    }

    /// Replace the instructional prompt
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Assemble the ordered request parts.
    ///
    /// `[prompt, image]` when `user_input` is empty, `[prompt, image, user_input]` otherwise.
    /// Only the first packaged image is sent.
    pub fn build_parts(&self, image: &[ImagePart], user_input: &str) -> Result<Vec<ContentPart>> {
        let first = image.first().ok_or(ChemistError::NoFileUploaded)?;

        let mut parts = vec![ContentPart::text(self.prompt.as_str()), first.clone().into()];
        if !user_input.is_empty() {
            parts.push(ContentPart::text(user_input));
        }

        Ok(parts)
    }

    /// Run one analysis. Exactly one gateway call; failures are returned unchanged.
    pub async fn analyze(&self, image: &[ImagePart], user_input: &str) -> Result<String> {
        let parts = self.build_parts(image, user_input)?;

        info!("Requesting tablet analysis from {}", self.model);
        debug!(
            part_count = parts.len(),
            image_bytes = image[0].data.len(),
            mime_type = %image[0].mime_type,
            "Built analysis request"
        );

        self.gateway.complete(&self.model, &parts).await
    }
}
