//! Typed configuration: profiles, agent roles and conversation limits.

use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

pub const DEFAULT_MAX_HISTORY: usize = 100;
pub const DEFAULT_CONVERSATION_TIMEOUT: u64 = 300;

/// A named bundle of model parameters.
///
/// `api_key` and `model` may be empty after load; providers reject empty
/// values when a model is built from the profile.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Registry key of the provider implementation.
    pub provider: String,

    #[serde(default)]
    pub api_key: String,

    #[serde(default)]
    pub model: String,

    #[serde(default)]
    pub base_url: Option<String>,

    /// Free-form provider settings. Providers expect a mapping.
    #[serde(default)]
    pub settings: Option<Value>,
}

impl Profile {
    pub fn new(provider: impl Into<String>, api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            api_key: api_key.into(),
            model: model.into(),
            base_url: None,
            settings: None,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_settings(mut self, settings: Value) -> Self {
        self.settings = Some(settings);
        self
    }
}

impl fmt::Debug for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let api_key = if self.api_key.is_empty() { "" } else { "<redacted>" };
        f.debug_struct("Profile")
            .field("provider", &self.provider)
            .field("api_key", &api_key)
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("settings", &self.settings)
            .finish()
    }
}

/// Binding of an agent role to a profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentRoleConfig {
    pub profile: String,

    #[serde(default)]
    pub instructions: Option<String>,

    /// Profiles tried in order when `profile` is not configured.
    #[serde(default)]
    pub fallbacks: Option<Vec<String>>,
}

/// Fully loaded application configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppConfig {
    pub profiles: BTreeMap<String, Profile>,
    pub agents: BTreeMap<String, AgentRoleConfig>,
    pub max_history: usize,
    /// Seconds to wait for a single model reply.
    pub conversation_timeout: u64,
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            profiles: BTreeMap::new(),
            agents: BTreeMap::new(),
            max_history: DEFAULT_MAX_HISTORY,
            conversation_timeout: DEFAULT_CONVERSATION_TIMEOUT,
            logging: LoggingConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn profile(&self, name: &str) -> Option<&Profile> {
        self.profiles.get(name)
    }

    pub fn agent(&self, role: &str) -> Option<&AgentRoleConfig> {
        self.agents.get(role)
    }

    /// Agent roles that reference `profile` directly or as a fallback.
    pub fn roles_using(&self, profile: &str) -> Vec<&str> {
        self.agents
            .iter()
            .filter(|(_, agent)| {
                agent.profile == profile
                    || agent
                        .fallbacks
                        .as_ref()
                        .map(|f| f.iter().any(|p| p == profile))
                        .unwrap_or(false)
            })
            .map(|(role, _)| role.as_str())
            .collect()
    }

    pub fn with_profile(mut self, name: impl Into<String>, profile: Profile) -> Self {
        self.profiles.insert(name.into(), profile);
        self
    }

    pub fn with_agent(mut self, role: impl Into<String>, profile: impl Into<String>) -> Self {
        self.agents.insert(
            role.into(),
            AgentRoleConfig {
                profile: profile.into(),
                instructions: None,
                fallbacks: None,
            },
        );
        self
    }
}

/// Scalars and logging as merged by the `config` crate, before normalization.
///
/// Scalars are kept loose so that a bad value falls back to its default
/// instead of failing the whole load. Profiles and agents are not read here:
/// the `config` crate lowercases map keys, and their names are user-chosen.
#[derive(Debug, Deserialize)]
pub(crate) struct RawConfig {
    #[serde(default)]
    max_history: Option<Value>,
    #[serde(default)]
    conversation_timeout: Option<Value>,
    #[serde(default)]
    logging: LoggingConfig,
}

/// The name-keyed sections of one config file, keys as written.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct NamedSections {
    #[serde(default)]
    pub(crate) profiles: BTreeMap<String, Profile>,
    #[serde(default)]
    pub(crate) agents: BTreeMap<String, AgentRoleConfig>,
}

impl NamedSections {
    /// Layer `other` on top: an entry replaces any earlier entry of the same name.
    pub(crate) fn merge(&mut self, other: NamedSections) {
        self.profiles.extend(other.profiles);
        self.agents.extend(other.agents);
    }
}

impl RawConfig {
    pub(crate) fn normalize(self, named: NamedSections) -> AppConfig {
        let max_history =
            positive_value("max_history", self.max_history.as_ref(), DEFAULT_MAX_HISTORY as u64);
        let conversation_timeout = positive_value(
            "conversation_timeout",
            self.conversation_timeout.as_ref(),
            DEFAULT_CONVERSATION_TIMEOUT,
        );
        AppConfig {
            profiles: named.profiles,
            agents: named.agents,
            max_history: usize::try_from(max_history).unwrap_or(DEFAULT_MAX_HISTORY),
            conversation_timeout,
            logging: self.logging,
        }
    }
}

fn positive_value(key: &str, value: Option<&Value>, default: u64) -> u64 {
    let parsed = match value {
        None | Some(Value::Null) => return default,
        Some(Value::Number(n)) => n.as_u64(),
        Some(Value::String(s)) => parse_positive(s),
        Some(_) => None,
    };
    match parsed.filter(|n| *n > 0) {
        Some(n) => n,
        None => {
            let shown = value.map(Value::to_string).unwrap_or_default();
            tracing::warn!("Invalid {} value: {}; using default {}", key, shown, default);
            default
        }
    }
}

/// Parse a strictly positive integer.
pub(crate) fn parse_positive(raw: &str) -> Option<u64> {
    raw.trim().parse::<u64>().ok().filter(|n| *n > 0)
}
