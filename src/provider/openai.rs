//! OpenAI-compatible chat completion provider.
//!
//! Serves both `openai` and `openrouter`; they differ only in the default base
//! URL. A profile `base_url` overrides the default for either.

use crate::config::Profile;
use crate::conversation::Message;
use crate::error::ProviderError;
use crate::provider::handle::{validate_profile, ChatModel, ModelHandle, ProviderFactory};
use async_trait::async_trait;
use serde_json::{json, Map, Value};
use std::fmt;

pub const OPENAI: &str = "openai";
pub const OPENROUTER: &str = "openrouter";
pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// Factory for OpenAI-compatible endpoints.
#[derive(Debug, Clone)]
pub struct OpenAiCompatible {
    provider: &'static str,
    default_base_url: &'static str,
}

impl OpenAiCompatible {
    pub fn openai() -> Self {
        Self {
            provider: OPENAI,
            default_base_url: OPENAI_BASE_URL,
        }
    }

    pub fn openrouter() -> Self {
        Self {
            provider: OPENROUTER,
            default_base_url: OPENROUTER_BASE_URL,
        }
    }

    pub fn default_base_url(&self) -> &'static str {
        self.default_base_url
    }
}

impl ProviderFactory for OpenAiCompatible {
    fn create_model(&self, profile: &Profile) -> Result<ModelHandle, ProviderError> {
        let settings = validate_profile(profile)?;

        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| ProviderError::Connection(format!("Failed to create OpenAI model: {}", e)))?;

        let endpoint_base = profile
            .base_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or(self.default_base_url)
            .trim_end_matches('/')
            .to_string();

        tracing::debug!(
            "Created {} model {} at {}",
            self.provider,
            profile.model,
            endpoint_base
        );

        Ok(Box::new(OpenAiChatModel {
            provider: self.provider.to_string(),
            model: profile.model.clone(),
            api_key: profile.api_key.clone(),
            base_url: profile.base_url.clone(),
            endpoint_base,
            settings,
            client,
        }))
    }
}

/// Model handle talking to `<base>/chat/completions`.
pub struct OpenAiChatModel {
    provider: String,
    model: String,
    api_key: String,
    base_url: Option<String>,
    endpoint_base: String,
    settings: Option<Map<String, Value>>,
    client: reqwest::Client,
}

impl OpenAiChatModel {
    pub fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.endpoint_base)
    }

    /// Request body: instructions as the system message, then the history.
    /// Settings are merged in without replacing `model` or `messages`.
    pub fn build_request_body(&self, instructions: &str, history: &[Message]) -> Value {
        let mut messages = Vec::with_capacity(history.len() + 1);
        if !instructions.is_empty() {
            messages.push(json!({ "role": "system", "content": instructions }));
        }
        for message in history {
            messages.push(json!({ "role": message.role.as_str(), "content": message.content }));
        }

        let mut body = Map::new();
        body.insert("model".to_string(), Value::String(self.model.clone()));
        body.insert("messages".to_string(), Value::Array(messages));
        if let Some(settings) = &self.settings {
            for (key, value) in settings {
                if !body.contains_key(key) {
                    body.insert(key.clone(), value.clone());
                }
            }
        }
        Value::Object(body)
    }

    /// Extract the first choice's message content.
    pub fn parse_response(response_body: &Value) -> Result<String, ProviderError> {
        let choice = response_body
            .get("choices")
            .and_then(|c| c.as_array())
            .and_then(|c| c.first())
            .ok_or_else(|| {
                ProviderError::Request("missing choices array in response".to_string())
            })?;

        choice
            .get("message")
            .and_then(|m| m.get("content"))
            .and_then(|c| c.as_str())
            .map(str::to_string)
            .ok_or_else(|| ProviderError::Request("missing message content in choice".to_string()))
    }
}

impl fmt::Debug for OpenAiChatModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiChatModel")
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("endpoint", &self.endpoint())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl ChatModel for OpenAiChatModel {
    fn provider_name(&self) -> &str {
        &self.provider
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    fn settings(&self) -> Option<&Map<String, Value>> {
        self.settings.as_ref()
    }

    async fn complete(
        &self,
        instructions: &str,
        history: &[Message],
    ) -> Result<String, ProviderError> {
        let body = self.build_request_body(instructions, history);
        tracing::debug!("POST {} ({} messages)", self.endpoint(), history.len());

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(ProviderError::Request(format!(
                "{} returned {}: {}",
                self.provider, status, text
            )));
        }

        let value: Value = response
            .json()
            .await
            .map_err(|e| ProviderError::Request(format!("invalid response body: {}", e)))?;
        Self::parse_response(&value)
    }
}
