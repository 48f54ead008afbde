//! Environment variable overlay: TMUXBOT_* scalars and per-profile overrides.
//!
//! Applied on the typed configuration after the file layers are merged, so a
//! rejected value leaves the file (or default) value in place.

use crate::config::schema::{parse_positive, AppConfig};

pub const MAX_HISTORY_VAR: &str = "TMUXBOT_MAX_HISTORY";
pub const CONVERSATION_TIMEOUT_VAR: &str = "TMUXBOT_CONVERSATION_TIMEOUT";
pub const PROFILE_VAR_PREFIX: &str = "TMUXBOT_PROFILE_";

/// Apply overrides read from the process environment.
pub fn apply_overrides(config: &mut AppConfig) {
    apply_overrides_with(config, |key| std::env::var(key).ok());
}

/// Apply overrides using `lookup` to read variables.
///
/// Empty values are treated as unset.
pub fn apply_overrides_with<F>(config: &mut AppConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let lookup = |key: &str| lookup(key).filter(|v| !v.is_empty());

    if let Some(raw) = lookup(MAX_HISTORY_VAR) {
        match parse_positive(&raw).and_then(|n| usize::try_from(n).ok()) {
            Some(n) => config.max_history = n,
            None => tracing::warn!("Invalid {} value: {}", MAX_HISTORY_VAR, raw),
        }
    }

    if let Some(raw) = lookup(CONVERSATION_TIMEOUT_VAR) {
        match parse_positive(&raw) {
            Some(n) => config.conversation_timeout = n,
            None => tracing::warn!("Invalid {} value: {}", CONVERSATION_TIMEOUT_VAR, raw),
        }
    }

    for (name, profile) in config.profiles.iter_mut() {
        let prefix = profile_env_prefix(name);
        if let Some(api_key) = lookup(&format!("{}API_KEY", prefix)) {
            tracing::debug!("Profile '{}' api_key overridden by {}API_KEY", name, prefix);
            profile.api_key = api_key;
        }
        if let Some(model) = lookup(&format!("{}MODEL", prefix)) {
            tracing::debug!("Profile '{}' model overridden by {}MODEL", name, prefix);
            profile.model = model;
        }
        if let Some(base_url) = lookup(&format!("{}BASE_URL", prefix)) {
            tracing::debug!("Profile '{}' base_url overridden by {}BASE_URL", name, prefix);
            profile.base_url = Some(base_url);
        }
    }
}

/// Variable prefix for a profile: `TMUXBOT_PROFILE_<NAME>_`.
///
/// The name is upper-cased and `-` / `.` become `_`.
pub fn profile_env_prefix(profile_name: &str) -> String {
    let normalized: String = profile_name
        .chars()
        .map(|c| match c {
            '-' | '.' => '_',
            other => other.to_ascii_uppercase(),
        })
        .collect();
    format!("{}{}_", PROFILE_VAR_PREFIX, normalized)
}
