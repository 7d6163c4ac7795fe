use crate::error::{ChemistError, Result};
use crate::llm::gateway::LlmGateway;
use crate::llm::models::ContentPart;
use async_trait::async_trait;
use std::sync::Mutex;

// Deterministic gateway that records every request it receives
pub(crate) struct MockGateway {
    reply: std::result::Result<String, String>,
    calls: Mutex<Vec<(String, Vec<ContentPart>)>>,
}

impl MockGateway {
    pub(crate) fn replying(text: impl Into<String>) -> Self {
        Self {
            reply: Ok(text.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn failing(message: impl Into<String>) -> Self {
        Self {
            reply: Err(message.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub(crate) fn calls(&self) -> Vec<Vec<ContentPart>> {
        self.calls.lock().unwrap().iter().map(|(_, parts)| parts.clone()).collect()
    }

    pub(crate) fn models(&self) -> Vec<String> {
        self.calls.lock().unwrap().iter().map(|(model, _)| model.clone()).collect()
    }
}

#[async_trait]
impl LlmGateway for MockGateway {
    async fn complete(&self, model: &str, parts: &[ContentPart]) -> Result<String> {
        self.calls.lock().unwrap().push((model.to_string(), parts.to_vec()));

        match &self.reply {
            Ok(text) => Ok(text.clone()),
            Err(message) => Err(ChemistError::GatewayError(message.clone())),
        }
    }
}
