//! Model handle and provider factory contracts.

use crate::config::Profile;
use crate::conversation::Message;
use crate::error::ProviderError;
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::fmt::Debug;

/// A constructed, callable model.
///
/// Records the parameters it was built from so callers can inspect which
/// provider and model they are talking to.
#[async_trait]
pub trait ChatModel: Send + Sync + Debug {
    /// Registry name of the provider that built this handle.
    fn provider_name(&self) -> &str;

    fn model_name(&self) -> &str;

    fn base_url(&self) -> Option<&str>;

    fn settings(&self) -> Option<&Map<String, Value>>;

    /// Produce the next assistant reply for `history` under `instructions`.
    async fn complete(&self, instructions: &str, history: &[Message])
        -> Result<String, ProviderError>;
}

/// Owned model handle, held solely by its consumer.
pub type ModelHandle = Box<dyn ChatModel>;

/// The factory capability a provider unit must expose.
pub trait ProviderFactory: Send + Sync {
    fn create_model(&self, profile: &Profile) -> Result<ModelHandle, ProviderError>;
}

impl<F> ProviderFactory for F
where
    F: Fn(&Profile) -> Result<ModelHandle, ProviderError> + Send + Sync,
{
    fn create_model(&self, profile: &Profile) -> Result<ModelHandle, ProviderError> {
        self(profile)
    }
}

/// Shared parameter checks for provider implementations.
///
/// Returns the settings as a mapping when present.
pub fn validate_profile(profile: &Profile) -> Result<Option<Map<String, Value>>, ProviderError> {
    if profile.api_key.is_empty() {
        return Err(ProviderError::InvalidCredential("API key is required".to_string()));
    }
    if profile.model.is_empty() {
        return Err(ProviderError::InvalidModelName("Model name is required".to_string()));
    }
    match &profile.settings {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Object(map)) => Ok(Some(map.clone())),
        Some(_) => Err(ProviderError::InvalidSettingsShape(
            "Settings must be a mapping or absent".to_string(),
        )),
    }
}
