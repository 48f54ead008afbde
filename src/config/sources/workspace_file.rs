//! Workspace config file source.
//!
//! An explicit `--config` path wins. Otherwise the first of `config.yaml`,
//! `config.yml` and the legacy `config.json` found in the workspace is used.
//! Files without a `.json` extension are read as YAML.

use crate::error::ConfigError;
use config::builder::DefaultState;
use config::{ConfigBuilder, File};

use super::file_format;
use std::path::{Path, PathBuf};

pub const CANDIDATES: [&str; 3] = ["config.yaml", "config.yml", "config.json"];
pub const LEGACY_JSON: &str = "config.json";

/// First candidate file present in `workspace_root`.
pub fn locate(workspace_root: &Path) -> Option<PathBuf> {
    CANDIDATES
        .iter()
        .map(|name| workspace_root.join(name))
        .find(|path| path.is_file())
}

/// Add the workspace file to the builder; returns the file used, if any.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    workspace_root: &Path,
    explicit: Option<&Path>,
) -> Result<(ConfigBuilder<DefaultState>, Option<PathBuf>), ConfigError> {
    let path = match explicit {
        Some(path) => {
            if !path.is_file() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            path.to_path_buf()
        }
        None => match locate(workspace_root) {
            Some(path) => path,
            None => {
                tracing::debug!(
                    "No configuration file in {}; using defaults",
                    workspace_root.display()
                );
                return Ok((builder, None));
            }
        },
    };

    if is_legacy_json(&path) {
        tracing::info!(
            "Loading legacy JSON configuration {}; run `tmuxbot migrate` to convert it to YAML",
            path.display()
        );
    }

    let builder = builder.add_source(
        File::from(path.as_path())
            .format(file_format(&path))
            .required(true),
    );
    Ok((builder, Some(path)))
}

fn is_legacy_json(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("json")
}
