//! Provider registry: maps provider names to loaders of implementation units.
//!
//! A loader is run on every lookup, so a unit always reflects the loader's
//! current behavior. Lookups fail with [`RegistryError`] when no loader is
//! registered or when the unit it yields has no model factory.

use crate::error::RegistryError;
use crate::provider::handle::ProviderFactory;
use crate::provider::openai;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Namespace used to build lookup keys (`providers.<name>`).
pub const LOOKUP_NAMESPACE: &str = "providers";

/// An implementation unit produced by a loader.
#[derive(Clone)]
pub struct ProviderUnit {
    pub name: String,
    pub create_model: Option<Arc<dyn ProviderFactory>>,
}

impl ProviderUnit {
    pub fn with_factory(name: impl Into<String>, factory: Arc<dyn ProviderFactory>) -> Self {
        Self {
            name: name.into(),
            create_model: Some(factory),
        }
    }

    /// A unit that exposes no factory capability.
    pub fn without_factory(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            create_model: None,
        }
    }
}

impl fmt::Debug for ProviderUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderUnit")
            .field("name", &self.name)
            .field("has_factory", &self.create_model.is_some())
            .finish()
    }
}

pub type ProviderLoader = Arc<dyn Fn() -> ProviderUnit + Send + Sync>;

/// Lookup key for a provider name.
pub fn lookup_key(provider: &str) -> String {
    format!("{}.{}", LOOKUP_NAMESPACE, provider)
}

/// Registry of provider loaders.
///
/// Shareable behind an `Arc`; registration and lookup both take `&self`.
pub struct ProviderRegistry {
    loaders: RwLock<BTreeMap<String, ProviderLoader>>,
}

impl ProviderRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            loaders: RwLock::new(BTreeMap::new()),
        }
    }

    /// Create a registry with the built-in providers (`openai`, `openrouter`).
    pub fn with_builtins() -> Self {
        let registry = Self::new();
        registry.register(openai::OPENAI, openai::OpenAiCompatible::openai());
        registry.register(openai::OPENROUTER, openai::OpenAiCompatible::openrouter());
        registry
    }

    /// Register a factory under `name`, replacing any previous registration.
    pub fn register<F>(&self, name: &str, factory: F)
    where
        F: ProviderFactory + 'static,
    {
        let factory: Arc<dyn ProviderFactory> = Arc::new(factory);
        let unit_name = name.to_string();
        self.register_loader(
            name,
            Arc::new(move || ProviderUnit::with_factory(unit_name.clone(), factory.clone())),
        );
    }

    /// Register a raw loader under `name`.
    pub fn register_loader(&self, name: &str, loader: ProviderLoader) {
        tracing::debug!("Registered provider loader: {}", lookup_key(name));
        self.loaders.write().insert(name.to_string(), loader);
    }

    /// Remove a provider. Returns whether it was registered.
    pub fn unregister(&self, name: &str) -> bool {
        self.loaders.write().remove(name).is_some()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.loaders.read().contains_key(name)
    }

    /// Registered provider names, sorted.
    pub fn names(&self) -> Vec<String> {
        self.loaders.read().keys().cloned().collect()
    }

    /// Load the factory capability for `name`.
    pub fn load(&self, name: &str) -> Result<Arc<dyn ProviderFactory>, RegistryError> {
        let key = lookup_key(name);
        // Clone the loader out so the lock is not held while it runs.
        let loader = self.loaders.read().get(name).cloned();
        let loader = match loader {
            Some(loader) => loader,
            None => {
                let err = RegistryError::ProviderNotFound {
                    provider: name.to_string(),
                    lookup_key: key,
                };
                tracing::error!("{}", err);
                return Err(err);
            }
        };

        let unit = loader();
        tracing::debug!("Successfully loaded provider unit: {}", key);
        match unit.create_model {
            Some(factory) => Ok(factory),
            None => {
                let err = RegistryError::ProviderMalformed {
                    provider: name.to_string(),
                    lookup_key: key,
                };
                tracing::error!("{}", err);
                Err(err)
            }
        }
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("providers", &self.names())
            .finish()
    }
}
