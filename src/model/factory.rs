//! Model factory: agent role -> profile -> provider -> model handle.
//!
//! Missing configuration is an expected state and comes back as a
//! [`Resolution`] variant. Provider failures are raised as [`ResolveError`].

use crate::config::{AppConfig, Profile};
use crate::error::ResolveError;
use crate::provider::{ModelHandle, ProviderRegistry};
use std::fmt;
use std::sync::Arc;

/// Outcome of resolving an agent role.
pub enum Resolution {
    Resolved(ModelHandle),
    /// No agent entry exists for the role.
    RoleNotConfigured { role: String },
    /// The role names a profile that does not exist.
    ProfileNotConfigured { role: String, profile: String },
}

impl Resolution {
    pub fn into_model(self) -> Option<ModelHandle> {
        match self {
            Resolution::Resolved(model) => Some(model),
            _ => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Resolution::Resolved(_))
    }
}

impl fmt::Debug for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resolution::Resolved(model) => f.debug_tuple("Resolved").field(model).finish(),
            Resolution::RoleNotConfigured { role } => f
                .debug_struct("RoleNotConfigured")
                .field("role", role)
                .finish(),
            Resolution::ProfileNotConfigured { role, profile } => f
                .debug_struct("ProfileNotConfigured")
                .field("role", role)
                .field("profile", profile)
                .finish(),
        }
    }
}

/// Builds model handles for agent roles.
///
/// Every call constructs a fresh, independent handle.
#[derive(Debug, Clone)]
pub struct ModelFactory {
    config: Arc<AppConfig>,
    registry: Arc<ProviderRegistry>,
}

impl ModelFactory {
    pub fn new(config: AppConfig, registry: Arc<ProviderRegistry>) -> Self {
        Self {
            config: Arc::new(config),
            registry,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    /// Resolve `role` to a model handle.
    pub fn resolve(&self, role: &str) -> Result<Resolution, ResolveError> {
        let agent = match self.config.agent(role) {
            Some(agent) => agent,
            None => {
                tracing::error!("Agent configuration not found: {}", role);
                return Ok(Resolution::RoleNotConfigured {
                    role: role.to_string(),
                });
            }
        };

        match self.config.profile(&agent.profile) {
            Some(profile) => self.build(profile).map(Resolution::Resolved),
            None => {
                tracing::debug!(
                    "Profile '{}' for agent '{}' is not configured",
                    agent.profile,
                    role
                );
                Ok(Resolution::ProfileNotConfigured {
                    role: role.to_string(),
                    profile: agent.profile.clone(),
                })
            }
        }
    }

    /// Option view of [`resolve`](Self::resolve): `None` when the role or its
    /// profile is not configured.
    pub fn create_model(&self, role: &str) -> Result<Option<ModelHandle>, ResolveError> {
        self.resolve(role).map(Resolution::into_model)
    }

    /// Like [`resolve`](Self::resolve), but when the bound profile is missing
    /// the role's fallbacks are tried in order.
    ///
    /// Only a missing profile triggers a fallback; provider errors are raised.
    pub fn resolve_with_fallbacks(&self, role: &str) -> Result<Resolution, ResolveError> {
        let resolution = self.resolve(role)?;
        let (role, missing) = match resolution {
            Resolution::ProfileNotConfigured { role, profile } => (role, profile),
            other => return Ok(other),
        };

        let fallbacks = self
            .config
            .agent(&role)
            .and_then(|agent| agent.fallbacks.as_deref())
            .unwrap_or_default();
        for name in fallbacks {
            if let Some(profile) = self.config.profile(name) {
                tracing::info!(
                    "Profile '{}' for agent '{}' is not configured; using fallback '{}'",
                    missing,
                    role,
                    name
                );
                return self.build(profile).map(Resolution::Resolved);
            }
        }

        Ok(Resolution::ProfileNotConfigured {
            role,
            profile: missing,
        })
    }

    /// Build a handle straight from a named profile.
    pub fn resolve_profile(&self, name: &str) -> Result<Option<ModelHandle>, ResolveError> {
        match self.config.profile(name) {
            Some(profile) => self.build(profile).map(Some),
            None => Ok(None),
        }
    }

    fn build(&self, profile: &Profile) -> Result<ModelHandle, ResolveError> {
        tracing::debug!("Using profile: {}:{}", profile.provider, profile.model);

        let factory = self.registry.load(&profile.provider)?;
        factory.create_model(profile).map_err(|source| {
            let err = ResolveError::ProviderConstructionFailed {
                provider: profile.provider.clone(),
                source,
            };
            tracing::error!("{}", err);
            err
        })
    }
}
