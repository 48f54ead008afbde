use crate::config::sources::environment::profile_env_prefix;
use crate::config::Profile;
use crate::error::ResolveError;
use crate::model::ModelFactory;
use crate::provider::profile::{endpoint_url_is_valid, ValidationResult};
use serde_json::Value;

const PLACEHOLDER_SUFFIX: &str = "-here";

pub struct ProfileDiagnostics;

impl ProfileDiagnostics {
    pub fn api_key_status(profile: &Profile) -> &'static str {
        if profile.api_key.is_empty() {
            "Not set"
        } else if is_placeholder(&profile.api_key) {
            "Placeholder"
        } else {
            "Set"
        }
    }

    /// Validate one profile against the registry without contacting the provider.
    pub fn validate(factory: &ModelFactory, profile_name: &str) -> ValidationResult {
        let config = factory.config();
        let registry = factory.registry();
        let mut result = ValidationResult::new(profile_name.to_string());

        let profile = match config.profile(profile_name) {
            Some(profile) => profile,
            None => {
                result.add_error("Profile not found in configuration".to_string());
                return result;
            }
        };

        if registry.contains(&profile.provider) {
            result.add_check(&format!("Provider '{}' is registered", profile.provider), true);
        } else {
            result.add_error(format!(
                "Provider '{}' is not registered (available: {})",
                profile.provider,
                registry.names().join(", ")
            ));
        }

        let env_prefix = profile_env_prefix(profile_name);
        if profile.api_key.is_empty() {
            result.add_error(format!(
                "API key not set (add api_key or set {}API_KEY)",
                env_prefix
            ));
        } else {
            result.add_check("API key is set", true);
            if is_placeholder(&profile.api_key) {
                result.add_warning("API key looks like a template placeholder".to_string());
            }
        }

        if profile.model.is_empty() {
            result.add_error("Model name cannot be empty".to_string());
        } else {
            result.add_check("Model is not empty", true);
        }

        match &profile.base_url {
            Some(url) if endpoint_url_is_valid(url) => {
                result.add_check("Base URL is valid", true);
            }
            Some(url) => result.add_error(format!("Invalid base URL: {}", url)),
            None => result.add_check("Base URL (optional)", true),
        }

        match &profile.settings {
            None | Some(Value::Null) => {}
            Some(Value::Object(_)) => result.add_check("Settings is a mapping", true),
            Some(_) => result.add_error("Settings must be a mapping".to_string()),
        }

        if result.is_valid() {
            match factory.resolve_profile(profile_name) {
                Ok(_) => result.add_check("Model handle can be constructed", true),
                Err(ResolveError::ProviderConstructionFailed { source, .. }) => {
                    result.add_error(format!("Model construction failed: {}", source))
                }
                Err(e) => result.add_error(e.to_string()),
            }
        }

        if config.roles_using(profile_name).is_empty() {
            result.add_warning("Profile is not used by any agent".to_string());
        }

        result
    }

    /// Validate every configured profile, in name order.
    pub fn validate_all(factory: &ModelFactory) -> Vec<ValidationResult> {
        factory
            .config()
            .profiles
            .keys()
            .map(|name| Self::validate(factory, name))
            .collect()
    }
}

fn is_placeholder(api_key: &str) -> bool {
    api_key.starts_with("your-") && api_key.ends_with(PLACEHOLDER_SUFFIX)
}
