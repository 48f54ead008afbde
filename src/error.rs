//! Error types for tmuxbot.
//!
//! Errors are split by the layer that raises them:
//! - [`ProviderError`]: raised by a provider implementation (bad credential,
//!   bad model name, client construction, request failures).
//! - [`RegistryError`]: provider lookup failures in the registry.
//! - [`ResolveError`]: what the model factory raises to its callers.
//! - [`ConfigError`]: configuration loading.
//! - [`SessionError`]: a single chat turn.
//! - [`ApiError`]: the application/CLI layer.

use std::path::PathBuf;
use thiserror::Error;

/// Failures raised by a provider implementation.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("{0}")]
    InvalidCredential(String),

    #[error("{0}")]
    InvalidModelName(String),

    #[error("{0}")]
    InvalidSettingsShape(String),

    #[error("{0}")]
    Connection(String),

    #[error("Request failed: {0}")]
    Request(String),

    #[error("{0}")]
    Other(String),
}

/// Provider lookup failures.
///
/// Both variants surface to callers as [`ResolveError::UnsupportedProvider`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// No implementation unit is registered under the name.
    #[error(
        "Unsupported provider specified: '{provider}'. Could not find provider module '{lookup_key}'"
    )]
    ProviderNotFound { provider: String, lookup_key: String },

    /// The unit exists but exposes no model factory.
    #[error(
        "Provider module '{provider}' does not have a 'create_model' function (loaded from '{lookup_key}')"
    )]
    ProviderMalformed { provider: String, lookup_key: String },
}

impl RegistryError {
    pub fn provider(&self) -> &str {
        match self {
            RegistryError::ProviderNotFound { provider, .. }
            | RegistryError::ProviderMalformed { provider, .. } => provider,
        }
    }

    pub fn lookup_key(&self) -> &str {
        match self {
            RegistryError::ProviderNotFound { lookup_key, .. }
            | RegistryError::ProviderMalformed { lookup_key, .. } => lookup_key,
        }
    }
}

/// Errors raised while resolving an agent role to a model handle.
///
/// Missing roles and profiles are not errors; see `model::Resolution`.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error(transparent)]
    UnsupportedProvider(#[from] RegistryError),

    #[error("An unexpected error occurred while loading provider '{provider}': {source}")]
    ProviderConstructionFailed {
        provider: String,
        #[source]
        source: ProviderError,
    },
}

impl ResolveError {
    /// Name of the provider the failure belongs to.
    pub fn provider(&self) -> &str {
        match self {
            ResolveError::UnsupportedProvider(err) => err.provider(),
            ResolveError::ProviderConstructionFailed { provider, .. } => provider,
        }
    }
}

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Failures of a single chat turn.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("No response within {0} seconds")]
    Timeout(u64),
}

/// Application-level errors surfaced by the CLI.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error(transparent)]
    Load(#[from] ConfigError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// An agent role or its profile is missing from the configuration.
    #[error("{0}")]
    NotConfigured(String),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}
