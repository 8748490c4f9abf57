//! LLM backend abstraction and implementations.
//!
//! Enum dispatch over an OpenAI-compatible chat completions API and the
//! Anthropic Messages API. Both speak HTTP via `reqwest` and return the
//! model's free text.

use serde_json::Value;

use crate::config::{BackendType, LlmBackendConfig};
use crate::error::AdvisorError;
use crate::prompt::RenderedPrompt;

/// Token ceiling for one piece of advice.
const MAX_TOKENS: u32 = 256;

/// An LLM backend that answers a rendered prompt.
#[derive(Debug)]
pub enum LlmBackend {
    /// OpenAI-compatible chat completions API.
    OpenAi(HttpBackend),
    /// Anthropic Messages API.
    Anthropic(HttpBackend),
}

/// Connection details shared by both backends.
#[derive(Debug)]
pub struct HttpBackend {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    model: String,
}

impl HttpBackend {
    fn new(config: &LlmBackendConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        }
    }
}

impl LlmBackend {
    /// Create a backend from configuration.
    pub fn new(config: &LlmBackendConfig) -> Self {
        let http = HttpBackend::new(config);
        match config.backend_type {
            BackendType::OpenAi => Self::OpenAi(http),
            BackendType::Anthropic => Self::Anthropic(http),
        }
    }

    /// Human-readable name for logging.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::OpenAi(_) => "openai-compatible",
            Self::Anthropic(_) => "anthropic",
        }
    }

    /// Send a prompt and return the response text.
    pub async fn complete(&self, prompt: &RenderedPrompt) -> Result<String, AdvisorError> {
        let backend = self.name();
        let request = match self {
            Self::OpenAi(http) => http
                .client
                .post(format!("{}/chat/completions", http.api_url))
                .bearer_auth(&http.api_key)
                .json(&openai_body(&http.model, prompt)),
            Self::Anthropic(http) => http
                .client
                .post(format!("{}/messages", http.api_url))
                .header("x-api-key", &http.api_key)
                .header("anthropic-version", "2023-06-01")
                .json(&anthropic_body(&http.model, prompt)),
        };

        let response = request
            .send()
            .await
            .map_err(|source| AdvisorError::Request { backend, source })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|e| format!("unable to read error body: {e}"));
            return Err(AdvisorError::Status {
                backend,
                status: status.as_u16(),
                body,
            });
        }

        let json: Value = response
            .json()
            .await
            .map_err(|source| AdvisorError::Request { backend, source })?;

        match self {
            Self::OpenAi(_) => extract_openai_content(&json),
            Self::Anthropic(_) => extract_anthropic_content(&json),
        }
    }
}

fn openai_body(model: &str, prompt: &RenderedPrompt) -> Value {
    serde_json::json!({
        "model": model,
        "messages": [
            {"role": "system", "content": prompt.system},
            {"role": "user", "content": prompt.user}
        ],
        "temperature": 0.8,
        "max_tokens": MAX_TOKENS
    })
}

fn anthropic_body(model: &str, prompt: &RenderedPrompt) -> Value {
    serde_json::json!({
        "model": model,
        "max_tokens": MAX_TOKENS,
        "system": prompt.system,
        "messages": [
            {"role": "user", "content": prompt.user}
        ]
    })
}

/// Extract the text from an `OpenAI` chat completions response.
fn extract_openai_content(json: &Value) -> Result<String, AdvisorError> {
    json.get("choices")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("message"))
        .and_then(|m| m.get("content"))
        .and_then(Value::as_str)
        .map(ToOwned::to_owned)
        .ok_or(AdvisorError::MalformedResponse {
            backend: "openai-compatible",
            path: "choices[0].message.content",
        })
}

/// Extract the text from an Anthropic Messages API response.
fn extract_anthropic_content(json: &Value) -> Result<String, AdvisorError> {
    json.get("content")
        .and_then(|c| c.get(0))
        .and_then(|b| b.get("text"))
        .and_then(Value::as_str)
        .map(ToOwned::to_owned)
        .ok_or(AdvisorError::MalformedResponse {
            backend: "anthropic",
            path: "content[0].text",
        })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn prompt() -> RenderedPrompt {
        RenderedPrompt {
            system: "be a tree".to_owned(),
            user: "what now".to_owned(),
        }
    }

    #[test]
    fn extract_openai_content_valid() {
        let json = serde_json::json!({
            "choices": [{"message": {"content": "Plant corn while prices are high."}}]
        });
        assert_eq!(
            extract_openai_content(&json).unwrap(),
            "Plant corn while prices are high."
        );
    }

    #[test]
    fn extract_openai_content_missing_choices() {
        let json = serde_json::json!({"error": "rate_limit"});
        assert!(matches!(
            extract_openai_content(&json),
            Err(AdvisorError::MalformedResponse { .. })
        ));
    }

    #[test]
    fn extract_anthropic_content_valid() {
        let json = serde_json::json!({
            "content": [{"type": "text", "text": "Rest today."}]
        });
        assert_eq!(extract_anthropic_content(&json).unwrap(), "Rest today.");
    }

    #[test]
    fn extract_anthropic_content_missing() {
        let json = serde_json::json!({"content": []});
        assert!(extract_anthropic_content(&json).is_err());
    }

    #[test]
    fn request_bodies_place_the_system_prompt() {
        let openai = openai_body("m", &prompt());
        assert_eq!(openai["messages"][0]["role"], "system");
        assert_eq!(openai["messages"][1]["content"], "what now");

        let anthropic = anthropic_body("m", &prompt());
        assert_eq!(anthropic["system"], "be a tree");
        assert_eq!(anthropic["messages"].as_array().unwrap().len(), 1);
        assert_eq!(anthropic["max_tokens"], MAX_TOKENS);
    }

    #[test]
    fn backend_dispatches_on_type() {
        let mut config = LlmBackendConfig {
            backend_type: BackendType::OpenAi,
            api_url: "https://api.openai.com/v1".to_owned(),
            api_key: "test".to_owned(),
            model: "test-model".to_owned(),
        };
        assert_eq!(LlmBackend::new(&config).name(), "openai-compatible");
        config.backend_type = BackendType::Anthropic;
        assert_eq!(LlmBackend::new(&config).name(), "anthropic");
    }
}
