//! Starter `config.yaml` written by `tmuxbot init`.

use crate::config::sources::workspace_file::LEGACY_JSON;
use crate::error::ApiError;
use serde_json::json;
use std::path::{Path, PathBuf};

pub const TEMPLATE_FILE: &str = "config.yaml";

const HEADER: &str = "\
# TmuxBot Profile-Based Configuration
# Profiles describe a provider, model and credential; agents bind a role to a profile.
# Environment variables: use TMUXBOT_PROFILE_{PROFILE_NAME}_{PARAMETER} to override settings
#   (PARAMETER is API_KEY, MODEL or BASE_URL; PROFILE_NAME is upper-cased with '-' as '_')
";

/// Render the template document.
pub fn render() -> Result<String, ApiError> {
    let data = json!({
        "profiles": {
            "openai-gpt-4o": {
                "provider": "openai",
                "model": "gpt-4o",
                "api_key": "your-openai-api-key-here",
                "base_url": null,
                "settings": null,
            },
            "openai-gpt-4o-mini": {
                "provider": "openai",
                "model": "gpt-4o-mini",
                "api_key": "your-openai-api-key-here",
                "base_url": null,
                "settings": null,
            },
        },
        "agents": {
            "primary": {
                "profile": "openai-gpt-4o",
                "instructions": "You are TmuxBot's primary coordination agent.",
                "fallbacks": null,
            },
            "coder": {
                "profile": "openai-gpt-4o",
                "instructions": "Focus on code quality and best practices.",
                "fallbacks": ["openai-gpt-4o-mini"],
            },
        },
        "max_history": 100,
        "conversation_timeout": 300,
    });

    let body = serde_yaml::to_string(&data)
        .map_err(|e| ApiError::Serialization(format!("Failed to render template: {}", e)))?;
    Ok(format!("{}\n{}", HEADER, body))
}

/// Write the template into `dir`.
///
/// Refuses when `config.yaml` or the legacy `config.json` already exists,
/// unless `force` is set.
pub fn write(dir: &Path, force: bool) -> Result<PathBuf, ApiError> {
    let target = dir.join(TEMPLATE_FILE);
    if !force {
        for existing in [target.clone(), dir.join(LEGACY_JSON)] {
            if existing.exists() {
                return Err(ApiError::ConfigError(format!(
                    "{} already exists (use --force to overwrite)",
                    existing.display()
                )));
            }
        }
    }

    std::fs::write(&target, render()?)?;
    tracing::info!("Created {} template", target.display());
    Ok(target)
}
