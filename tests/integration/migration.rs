use std::fs;

use tempfile::TempDir;
use tmuxbot::config::merge::service::MergeService;
use tmuxbot::config::migrate::{migrate_workspace, MigrationOptions};

use crate::integration::support::{workspace, write_file};

const LEGACY_CONFIG: &str = r#"{
  "_comment": "TmuxBot configuration",
  "profiles": {
    "openai-gpt-4o": {
      "_comments": { "note": "set the key via env" },
      "provider": "openai",
      "model": "gpt-4o",
      "api_key": "sk-legacy"
    }
  },
  "agents": { "primary": { "profile": "openai-gpt-4o" } },
  "max_history": 40
}"#;

#[test]
fn migrated_yaml_loads_like_the_json() {
    let temp_dir = TempDir::new().unwrap();
    let root = workspace(&temp_dir);
    write_file(&root, "config.json", LEGACY_CONFIG);
    let before = MergeService::load_files(None, &root, None).unwrap();

    let report = migrate_workspace(&root, MigrationOptions::default());
    assert!(report.is_success(), "{report}");
    assert_eq!(report.migrated.len(), 1);
    assert_eq!(report.backups, vec![root.join("config.json.bak")]);
    assert!(!root.join("config.json").exists());

    let yaml = fs::read_to_string(root.join("config.yaml")).unwrap();
    assert!(yaml.starts_with("# TmuxBot configuration\n"));
    assert!(yaml.contains("# note: set the key via env"));
    assert!(!yaml.contains("_comment"));

    let after = MergeService::load_files(None, &root, None).unwrap();
    assert_eq!(before.profiles, after.profiles);
    assert_eq!(after.max_history, 40);
}

#[test]
fn existing_yaml_is_skipped_without_overwrite() {
    let temp_dir = TempDir::new().unwrap();
    let root = workspace(&temp_dir);
    write_file(&root, "config.json", LEGACY_CONFIG);
    write_file(&root, "config.yaml", "max_history: 3\n");

    let report = migrate_workspace(&root, MigrationOptions::default());
    assert!(report.migrated.is_empty());
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(fs::read_to_string(root.join("config.yaml")).unwrap(), "max_history: 3\n");

    let report = migrate_workspace(
        &root,
        MigrationOptions {
            overwrite: true,
            backup: false,
        },
    );
    assert_eq!(report.migrated.len(), 1);
    assert!(report.backups.is_empty());
    assert!(!root.join("config.json").exists());
    assert!(!root.join("config.json.bak").exists());
}

#[test]
fn profile_directory_files_are_converted() {
    let temp_dir = TempDir::new().unwrap();
    let root = workspace(&temp_dir);
    let profiles = root.join("profiles");
    write_file(&profiles, "a.json", r#"{ "provider": "openai" }"#);
    write_file(&profiles, "b.json", r#"{ "provider": "openrouter" }"#);
    write_file(&profiles, "b.yaml", "provider: openrouter\n");
    write_file(&profiles, "c.json", "{ not json");

    let report = migrate_workspace(&root, MigrationOptions::default());
    assert_eq!(report.migrated.len(), 1);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.failed.len(), 1);
    assert!(!report.is_success());
    assert!(profiles.join("a.yaml").exists());
    assert!(!profiles.join("a.json").exists());
    assert!(profiles.join("c.json").exists());
    assert!(report.to_string().ends_with("1 migrated, 1 skipped, 1 failed"));
}

#[test]
fn nothing_to_migrate() {
    let temp_dir = TempDir::new().unwrap();
    let root = workspace(&temp_dir);
    let report = migrate_workspace(&root, MigrationOptions::default());
    assert!(report.is_success());
    assert_eq!(report.to_string(), "Nothing to migrate");
}
