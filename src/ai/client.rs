//! Chat-completion API client
//!
//! Failures never escape this boundary as anything but [`ModelError`]; the
//! variant display texts are the fixed, human-readable sentinels shown in
//! place of model output.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::ModelConfig;

/// Errors surfaced by [`ModelClient::complete`].
///
/// Callers branch on the variant instead of string-matching the happy-path
/// return value.
#[derive(Debug, Clone, Error)]
pub enum ModelError {
    /// No API key configured; the client is a non-functional stub.
    #[error("Model client not configured. Set [model].api_key or MAILMIND_API_KEY.")]
    NotConfigured,
    /// Transport-level failure before an HTTP status was received.
    #[error("Request to model endpoint failed: {0}")]
    Request(String),
    /// Non-success HTTP status from the API.
    #[error("Model API error ({status}): {message}")]
    Api { status: u16, message: String },
    /// Response body could not be decoded.
    #[error("Failed to parse model response: {0}")]
    InvalidResponse(String),
    /// Well-formed response with no completion choices.
    #[error("No response content from model")]
    EmptyResponse,
}

/// Client for an OpenRouter-compatible chat completions endpoint
#[derive(Clone)]
pub struct ModelClient {
    client: Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<Message>,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Serialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: String,
}

impl ModelClient {
    /// Create a new client. A missing API key yields a degraded client whose
    /// every call returns [`ModelError::NotConfigured`] rather than a
    /// constructor error.
    pub fn new(config: &ModelConfig) -> Self {
        Self {
            client: Client::new(),
            api_key: config.resolve_api_key(),
            model: config.model.clone(),
            base_url: config.base_url.clone(),
            max_tokens: config.max_tokens,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Send a chat completion request for one email body.
    ///
    /// With `json_mode` the API is asked to produce a JSON object response.
    /// Returns the trimmed completion text.
    pub async fn complete(
        &self,
        system_prompt: &str,
        content: &str,
        json_mode: bool,
    ) -> Result<String, ModelError> {
        let Some(ref api_key) = self.api_key else {
            return Err(ModelError::NotConfigured);
        };

        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                Message {
                    role: "system".to_string(),
                    content: system_prompt.to_string(),
                },
                Message {
                    role: "user".to_string(),
                    content: format!("Process the following email content:\n\n{}", content),
                },
            ],
            max_tokens: self.max_tokens,
            response_format: json_mode.then_some(ResponseFormat {
                kind: "json_object",
            }),
        };

        let response = self
            .client
            .post(&self.base_url)
            .header("Authorization", format!("Bearer {}", api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| ModelError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "model API returned an error");
            return Err(ModelError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| ModelError::InvalidResponse(e.to_string()))?;

        chat_response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content.trim().to_string())
            .ok_or(ModelError::EmptyResponse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unconfigured_client() -> ModelClient {
        let config = ModelConfig {
            api_key: None,
            ..ModelConfig::default()
        };
        // The env fallback must not leak into tests
        assert!(std::env::var("MAILMIND_API_KEY").is_err());
        ModelClient::new(&config)
    }

    #[tokio::test]
    async fn test_unconfigured_client_returns_sentinel() {
        let client = unconfigured_client();
        assert!(!client.is_configured());

        let text = client.complete("system", "content", false).await;
        assert!(matches!(text, Err(ModelError::NotConfigured)));

        let json = client.complete("system", "content", true).await;
        assert!(matches!(json, Err(ModelError::NotConfigured)));
    }

    #[test]
    fn test_sentinel_text_is_human_readable() {
        let message = ModelError::NotConfigured.to_string();
        assert!(message.contains("not configured"));
        assert!(message.contains("MAILMIND_API_KEY"));
    }

    #[test]
    fn test_json_mode_request_shape() {
        let request = ChatRequest {
            model: "m".to_string(),
            messages: vec![],
            max_tokens: 16,
            response_format: Some(ResponseFormat {
                kind: "json_object",
            }),
        };
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["response_format"]["type"], "json_object");

        let request = ChatRequest {
            response_format: None,
            ..request
        };
        let body = serde_json::to_value(&request).unwrap();
        assert!(body.get("response_format").is_none());
    }
}
