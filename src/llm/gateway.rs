use crate::error::Result;
use crate::llm::models::ContentPart;
use async_trait::async_trait;

/// Abstract interface for multimodal model providers
///
/// One call, one network round trip: implementations must not retry or stream.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Send the ordered parts to `model` and return the generated text
    async fn complete(&self, model: &str, parts: &[ContentPart]) -> Result<String>;
}
