//! ConfigLoader facade delegating to merge service.

use super::merge::service::MergeService;
use super::AppConfig;
use crate::error::ConfigError;
use std::path::Path;

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from the workspace, global file and environment.
    pub fn load(workspace_root: &Path) -> Result<AppConfig, ConfigError> {
        MergeService::load(workspace_root, None)
    }

    /// Load configuration, using `path` in place of the workspace file lookup.
    pub fn load_from_file(workspace_root: &Path, path: &Path) -> Result<AppConfig, ConfigError> {
        MergeService::load(workspace_root, Some(path))
    }

    /// Load with an optional explicit file, as the CLI does with `--config`.
    pub fn load_with(workspace_root: &Path, explicit: Option<&Path>) -> Result<AppConfig, ConfigError> {
        MergeService::load(workspace_root, explicit)
    }

    /// Create default configuration.
    pub fn default() -> AppConfig {
        AppConfig::default()
    }
}
