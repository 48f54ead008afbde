//! Global config file source: $XDG_CONFIG_HOME/tmuxbot/config.yaml (optional).

use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, File};
use std::path::Path;

use super::file_format;

/// Add the global file to the builder if `path` is given. A missing file is skipped.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    path: Option<&Path>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    match path {
        Some(path) => {
            if path.exists() {
                tracing::debug!("Using global configuration {}", path.display());
            }
            Ok(builder.add_source(File::from(path).format(file_format(path)).required(false)))
        }
        None => Ok(builder),
    }
}
