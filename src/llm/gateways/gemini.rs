//! Gemini gateway for image analysis.
//!
//! Talks to the `generateContent` endpoint of the Generative Language API with inline
//! image data. One request per call, no retries and no streaming.

use crate::config::{ApiKey, AppConfig};
use crate::error::{ChemistError, Result};
use crate::llm::gateway::LlmGateway;
use crate::llm::models::ContentPart;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, info};

/// Configuration for connecting to the Gemini API.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: ApiKey,
    pub base_url: String,
}

impl GeminiConfig {
    /// `None` when the application has no API key configured.
    pub fn from_app_config(config: &AppConfig) -> Option<Self> {
        config.api_key.clone().map(|api_key| Self {
            api_key,
            base_url: config.base_url.clone(),
        })
    }
}

/// Gateway for Google's hosted Gemini models.
pub struct GeminiGateway {
    client: Client,
    config: GeminiConfig,
}

impl GeminiGateway {
    pub fn with_config(config: GeminiConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    pub fn with_api_key_and_base_url(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self::with_config(GeminiConfig {
            api_key: ApiKey::new(api_key),
            base_url: base_url.into(),
        })
    }

    fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            model
        )
    }
}

#[async_trait]
impl LlmGateway for GeminiGateway {
    async fn complete(&self, model: &str, parts: &[ContentPart]) -> Result<String> {
        info!("Delegating to Gemini for analysis");
        debug!("Model: {}, Part count: {}", model, parts.len());

        let body = serde_json::json!({
            "contents": [{
                "role": "user",
                "parts": adapt_parts_to_gemini(parts),
            }]
        });

        let response = self
            .client
            .post(self.endpoint(model))
            .header("x-goog-api-key", self.config.api_key.expose())
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(ChemistError::GatewayError(format!(
                "Gemini API error: {} - {}",
                status, error_text
            )));
        }

        let response_body: Value = response.json().await?;
        extract_text(&response_body)
    }
}

// Part adapter for the Gemini wire format
fn adapt_parts_to_gemini(parts: &[ContentPart]) -> Vec<Value> {
    parts
        .iter()
        .map(|part| match part {
            ContentPart::Text(text) => serde_json::json!({ "text": text }),
            ContentPart::Image(image) => serde_json::json!({ "inline_data": image }),
        })
        .collect()
}

// Concatenate the text of every part of the first candidate
fn extract_text(body: &Value) -> Result<String> {
    let candidate = match body["candidates"].as_array().and_then(|c| c.first()) {
        Some(candidate) => candidate,
        None => {
            return Err(match body["promptFeedback"]["blockReason"].as_str() {
                Some(reason) => {
                    ChemistError::GatewayError(format!("Prompt was blocked: {}", reason))
                }
                None => ChemistError::GatewayError("No candidates in response".to_string()),
            });
        }
    };

    let texts: Vec<&str> = candidate["content"]["parts"]
        .as_array()
        .map(|parts| parts.iter().filter_map(|p| p["text"].as_str()).collect())
        .unwrap_or_default();

    if texts.is_empty() {
        let reason = candidate["finishReason"].as_str().unwrap_or("UNKNOWN");
        return Err(ChemistError::GatewayError(format!(
            "Response contained no text (finish reason: {})",
            reason
        )));
    }

    Ok(texts.concat())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::models::ImagePart;

    fn sample_parts() -> Vec<ContentPart> {
        vec![
            ContentPart::text("Describe the tablets"),
            ImagePart::new("image/png", b"abc".to_vec()).into(),
        ]
    }

    #[test]
    fn test_config_from_app_config() {
        let app = AppConfig {
            api_key: Some(ApiKey::new("key")),
            base_url: "http://localhost:1234".to_string(),
            ..Default::default()
        };
        let config = GeminiConfig::from_app_config(&app).unwrap();
        assert_eq!(config.base_url, "http://localhost:1234");

        assert!(GeminiConfig::from_app_config(&AppConfig::default()).is_none());
    }

    #[test]
    fn test_endpoint() {
        let gateway = GeminiGateway::with_api_key_and_base_url("key", "http://example.com/v1beta/");
        assert_eq!(
            gateway.endpoint("gemini-1.5-flash"),
            "http://example.com/v1beta/models/gemini-1.5-flash:generateContent"
        );
    }

    #[test]
    fn test_adapt_parts_to_gemini() {
        let mut parts = sample_parts();
        parts.push(ContentPart::text("They are white"));

        let result = adapt_parts_to_gemini(&parts);

        assert_eq!(result.len(), 3);
        assert_eq!(result[0]["text"], "Describe the tablets");
        assert_eq!(result[1]["inline_data"]["mime_type"], "image/png");
        assert_eq!(result[1]["inline_data"]["data"], "YWJj");
        assert_eq!(result[2]["text"], "They are white");
    }

    #[test]
    fn test_extract_text_joins_parts() {
        let body = serde_json::json!({
            "candidates": [{
                "content": {"parts": [{"text": "1. Aspirin"}, {"text": " 2. Ibuprofen"}]},
                "finishReason": "STOP"
            }]
        });
        assert_eq!(extract_text(&body).unwrap(), "1. Aspirin 2. Ibuprofen");
    }

    #[test]
    fn test_extract_text_blocked_prompt() {
        let body = serde_json::json!({ "promptFeedback": { "blockReason": "SAFETY" } });
        let err = extract_text(&body).unwrap_err();
        assert_eq!(err.to_string(), "LLM gateway error: Prompt was blocked: SAFETY");
    }

    #[test]
    fn test_extract_text_no_candidates() {
        let err = extract_text(&serde_json::json!({})).unwrap_err();
        assert!(err.to_string().contains("No candidates"));
    }

    #[test]
    fn test_extract_text_candidate_without_text() {
        let body = serde_json::json!({
            "candidates": [{ "finishReason": "RECITATION" }]
        });
        let err = extract_text(&body).unwrap_err();
        assert!(err.to_string().contains("RECITATION"));
    }

    #[tokio::test]
    async fn test_complete_sends_inline_image() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/models/gemini-1.5-flash:generateContent")
            .match_header("x-goog-api-key", "test-key")
            .match_body(mockito::Matcher::Json(serde_json::json!({
                "contents": [{
                    "role": "user",
                    "parts": [
                        {"text": "Describe the tablets"},
                        {"inline_data": {"mime_type": "image/png", "data": "YWJj"}}
                    ]
                }]
            })))
            .with_status(200)
            .with_body(r#"{"candidates":[{"content":{"parts":[{"text":"Paracetamol"}]}}]}"#)
            .create();

        let gateway = GeminiGateway::with_api_key_and_base_url("test-key", server.url());
        let result = gateway.complete("gemini-1.5-flash", &sample_parts()).await;

        mock.assert();
        assert_eq!(result.unwrap(), "Paracetamol");
    }

    #[tokio::test]
    async fn test_complete_error_status() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/models/gemini-1.5-flash:generateContent")
            .with_status(400)
            .with_body("API key not valid")
            .create();

        let gateway = GeminiGateway::with_api_key_and_base_url("bad-key", server.url());
        let result = gateway.complete("gemini-1.5-flash", &sample_parts()).await;

        mock.assert();
        let err = result.unwrap_err();
        assert!(matches!(err, ChemistError::GatewayError(_)));
        assert!(err.to_string().contains("400"));
        assert!(err.to_string().contains("API key not valid"));
    }

    #[tokio::test]
    async fn test_complete_malformed_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/models/gemini-1.5-flash:generateContent")
            .with_status(200)
            .with_body("not json")
            .create();

        let gateway = GeminiGateway::with_api_key_and_base_url("key", server.url());
        let result = gateway.complete("gemini-1.5-flash", &sample_parts()).await;

        mock.assert();
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_complete_network_failure() {
        let gateway = GeminiGateway::with_api_key_and_base_url("key", "http://127.0.0.1:1");
        let result = gateway.complete("gemini-1.5-flash", &sample_parts()).await;

        assert!(matches!(result, Err(ChemistError::HttpError(_))));
    }
}
