//! Configuration sources, lowest precedence first.

pub mod environment;
pub mod global_file;
pub mod named_sections;
pub mod workspace_file;

use config::FileFormat;
use std::path::Path;

/// Format of a config file: JSON for `.json`, YAML for anything else,
/// including paths without an extension.
pub fn file_format(path: &Path) -> FileFormat {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => FileFormat::Json,
        _ => FileFormat::Yaml,
    }
}
