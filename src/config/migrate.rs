//! JSON to YAML configuration migration.
//!
//! Converts `config.json` to `config.yaml` and `profiles/*.json` to
//! `profiles/*.yaml`. `_comment` / `_comments` keys are lifted out of the data
//! and written as leading YAML comment lines.

use crate::error::ApiError;
use serde_json::{Map, Value};
use std::fmt;
use std::path::{Path, PathBuf};

const COMMENT_KEYS: [&str; 2] = ["_comment", "_comments"];

#[derive(Debug, Clone, Copy)]
pub struct MigrationOptions {
    /// Replace an existing `config.yaml`.
    pub overwrite: bool,
    /// Keep `config.json` as `config.json.bak` instead of removing it.
    pub backup: bool,
}

impl Default for MigrationOptions {
    fn default() -> Self {
        Self {
            overwrite: false,
            backup: true,
        }
    }
}

/// Outcome of a migration run.
#[derive(Debug, Clone, Default)]
pub struct MigrationReport {
    pub migrated: Vec<(PathBuf, PathBuf)>,
    pub skipped: Vec<(PathBuf, String)>,
    pub failed: Vec<(PathBuf, String)>,
    pub backups: Vec<PathBuf>,
}

impl MigrationReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

impl fmt::Display for MigrationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.migrated.is_empty() && self.skipped.is_empty() && self.failed.is_empty() {
            return write!(f, "Nothing to migrate");
        }
        let mut lines = Vec::new();
        for (from, to) in &self.migrated {
            lines.push(format!("Migrated {} -> {}", from.display(), to.display()));
        }
        for backup in &self.backups {
            lines.push(format!("Backed up to {}", backup.display()));
        }
        for (path, reason) in &self.skipped {
            lines.push(format!("Skipped {}: {}", path.display(), reason));
        }
        for (path, reason) in &self.failed {
            lines.push(format!("Failed {}: {}", path.display(), reason));
        }
        lines.push(format!(
            "{} migrated, {} skipped, {} failed",
            self.migrated.len(),
            self.skipped.len(),
            self.failed.len()
        ));
        write!(f, "{}", lines.join("\n"))
    }
}

/// Migrate the main config and the profiles directory under `dir`.
pub fn migrate_workspace(dir: &Path, options: MigrationOptions) -> MigrationReport {
    let mut report = MigrationReport::default();
    migrate_main_config(dir, options, &mut report);
    migrate_profile_directory(&dir.join("profiles"), &mut report);
    report
}

fn migrate_main_config(dir: &Path, options: MigrationOptions, report: &mut MigrationReport) {
    let json_file = dir.join("config.json");
    let yaml_file = dir.join("config.yaml");

    if !json_file.exists() {
        tracing::debug!("No config.json found in {}", dir.display());
        return;
    }
    if yaml_file.exists() && !options.overwrite {
        report
            .skipped
            .push((json_file, "config.yaml already exists (use --overwrite)".to_string()));
        return;
    }

    let result = read_json(&json_file)
        .and_then(|data| json_to_yaml_with_comments(&data))
        .and_then(|yaml| std::fs::write(&yaml_file, yaml).map_err(ApiError::from));
    if let Err(e) = result {
        tracing::warn!("Failed to migrate {}: {}", json_file.display(), e);
        report.failed.push((json_file, e.to_string()));
        return;
    }

    report.migrated.push((json_file.clone(), yaml_file));
    if options.backup {
        let backup = json_file.with_extension("json.bak");
        match std::fs::rename(&json_file, &backup) {
            Ok(()) => report.backups.push(backup),
            Err(e) => report.failed.push((json_file, format!("backup failed: {}", e))),
        }
    } else if let Err(e) = std::fs::remove_file(&json_file) {
        report.failed.push((json_file, format!("remove failed: {}", e)));
    }
}

fn migrate_profile_directory(profiles_dir: &Path, report: &mut MigrationReport) {
    let entries = match std::fs::read_dir(profiles_dir) {
        Ok(entries) => entries,
        Err(_) => return,
    };

    let mut json_files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().and_then(|e| e.to_str()) == Some("json"))
        .collect();
    json_files.sort();

    for json_file in json_files {
        let yaml_file = json_file.with_extension("yaml");
        if yaml_file.exists() {
            report
                .skipped
                .push((json_file, "YAML version exists".to_string()));
            continue;
        }

        let result = read_json(&json_file)
            .and_then(|data| {
                serde_yaml::to_string(&data).map_err(|e| ApiError::Serialization(e.to_string()))
            })
            .and_then(|yaml| std::fs::write(&yaml_file, yaml).map_err(ApiError::from))
            .and_then(|()| std::fs::remove_file(&json_file).map_err(ApiError::from));
        match result {
            Ok(()) => report.migrated.push((json_file, yaml_file)),
            Err(e) => {
                tracing::warn!("Failed to migrate {}: {}", json_file.display(), e);
                report.failed.push((json_file, e.to_string()));
            }
        }
    }
}

fn read_json(path: &Path) -> Result<Value, ApiError> {
    let content = std::fs::read_to_string(path)?;
    serde_json::from_str(&content)
        .map_err(|e| ApiError::Serialization(format!("Invalid JSON in {}: {}", path.display(), e)))
}

/// Render `data` as YAML, lifting `_comment` / `_comments` entries into
/// leading `# ` comment lines.
pub fn json_to_yaml_with_comments(data: &Value) -> Result<String, ApiError> {
    let mut comments = Vec::new();
    let cleaned = match data {
        Value::Object(map) => Value::Object(extract_comments(map, &mut comments)),
        other => other.clone(),
    };
    let body =
        serde_yaml::to_string(&cleaned).map_err(|e| ApiError::Serialization(e.to_string()))?;
    if comments.is_empty() {
        Ok(body)
    } else {
        Ok(format!("{}\n\n{}", comments.join("\n"), body))
    }
}

fn extract_comments(map: &Map<String, Value>, comments: &mut Vec<String>) -> Map<String, Value> {
    let comment = COMMENT_KEYS
        .iter()
        .filter_map(|key| map.get(*key))
        .find(|value| is_truthy(value));
    match comment {
        Some(Value::Object(entries)) => {
            for (key, value) in entries {
                comments.push(format!("# {}: {}", key, plain(value)));
            }
        }
        Some(Value::String(text)) => comments.push(format!("# {}", text)),
        _ => {}
    }

    let mut cleaned = Map::new();
    for (key, value) in map {
        if COMMENT_KEYS.contains(&key.as_str()) {
            continue;
        }
        let value = match value {
            Value::Object(inner) => Value::Object(extract_comments(inner, comments)),
            other => other.clone(),
        };
        cleaned.insert(key.clone(), value);
    }
    cleaned
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        Value::Object(m) => !m.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Number(_) => true,
    }
}

fn plain(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
