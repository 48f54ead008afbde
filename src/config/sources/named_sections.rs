//! Profiles and agents read straight from a config file.
//!
//! Profile and role names are user-chosen map keys. They are deserialized
//! here with serde so they keep their case; the `config` crate lowercases keys.

use crate::config::schema::NamedSections;
use crate::config::sources::file_format;
use crate::error::ConfigError;
use config::FileFormat;
use std::path::Path;

/// Read the `profiles` and `agents` sections of `path`.
pub(crate) fn read(path: &Path) -> Result<NamedSections, ConfigError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::Invalid(format!("{}: {}", path.display(), e)))?;
    if content.trim().is_empty() {
        return Ok(NamedSections::default());
    }

    let parsed = match file_format(path) {
        FileFormat::Json => serde_json::from_str(&content).map_err(|e| e.to_string()),
        _ => match serde_yaml::from_str::<serde_yaml::Value>(&content) {
            Ok(serde_yaml::Value::Null) => Ok(NamedSections::default()),
            Ok(value) => serde_yaml::from_value(value).map_err(|e| e.to_string()),
            Err(e) => Err(e.to_string()),
        },
    };
    parsed.map_err(|e| ConfigError::Invalid(format!("{}: {}", path.display(), e)))
}
