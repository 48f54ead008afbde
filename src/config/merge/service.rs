//! MergeService: orchestrates sources, applies merge policy, deserializes to AppConfig.

use crate::config::paths::xdg_root;
use crate::config::schema::{AppConfig, NamedSections, RawConfig};
use crate::config::sources::{environment, global_file, named_sections, workspace_file};
use crate::error::ConfigError;
use std::path::Path;

use super::merge_policy;

/// Merge service for config composition.
pub struct MergeService;

impl MergeService {
    /// Load config from workspace and standard sources.
    /// Precedence: defaults (lowest) -> global file -> workspace file -> environment (highest).
    pub fn load(workspace_root: &Path, explicit: Option<&Path>) -> Result<AppConfig, ConfigError> {
        let global = xdg_root::global_config_path();
        Self::load_layers(global.as_deref(), workspace_root, explicit)
    }

    /// Load with an explicit global file location (None skips the global layer).
    pub fn load_layers(
        global: Option<&Path>,
        workspace_root: &Path,
        explicit: Option<&Path>,
    ) -> Result<AppConfig, ConfigError> {
        let mut config = Self::load_files(global, workspace_root, explicit)?;
        environment::apply_overrides(&mut config);
        Ok(config)
    }

    /// File layers only, without the environment overlay.
    pub fn load_files(
        global: Option<&Path>,
        workspace_root: &Path,
        explicit: Option<&Path>,
    ) -> Result<AppConfig, ConfigError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder, global)?;
        let (builder, source) = workspace_file::add_to_builder(builder, workspace_root, explicit)?;

        let raw: RawConfig = builder.build()?.try_deserialize()?;

        // Named sections bypass the builder so profile and role names keep their case.
        let mut named = NamedSections::default();
        for path in global.filter(|p| p.is_file()).into_iter().chain(source.as_deref()) {
            named.merge(named_sections::read(path)?);
        }

        if let Some(source) = &source {
            tracing::info!("Loaded configuration from {}", source.display());
        }
        Ok(raw.normalize(named))
    }
}
