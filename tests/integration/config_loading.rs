use tempfile::TempDir;
use tmuxbot::config::merge::service::MergeService;
use tmuxbot::config::{ConfigLoader, DEFAULT_CONVERSATION_TIMEOUT, DEFAULT_MAX_HISTORY};
use tmuxbot::error::ConfigError;

use crate::integration::support::{with_env, with_xdg_env, workspace, write_file, MOCK_CONFIG_YAML};

#[test]
fn empty_workspace_loads_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let root = workspace(&temp_dir);
    let config = MergeService::load_files(None, &root, None).unwrap();
    assert!(config.profiles.is_empty());
    assert!(config.agents.is_empty());
    assert_eq!(config.max_history, DEFAULT_MAX_HISTORY);
    assert_eq!(config.conversation_timeout, DEFAULT_CONVERSATION_TIMEOUT);
}

#[test]
fn yaml_workspace_file_is_loaded() {
    let temp_dir = TempDir::new().unwrap();
    let root = workspace(&temp_dir);
    write_file(&root, "config.yaml", MOCK_CONFIG_YAML);

    let config = MergeService::load_files(None, &root, None).unwrap();
    let profile = config.profile("mock").unwrap();
    assert_eq!(profile.provider, "mock_provider");
    assert_eq!(profile.model, "mock-gpt-1");
    assert_eq!(config.agent("primary").unwrap().profile, "mock");
    assert_eq!(config.max_history, 20);
    assert_eq!(config.conversation_timeout, 30);
}

#[test]
fn yaml_preferred_over_json_and_json_still_loads() {
    let temp_dir = TempDir::new().unwrap();
    let root = workspace(&temp_dir);
    write_file(&root, "config.json", r#"{ "max_history": 7 }"#);

    let from_json = MergeService::load_files(None, &root, None).unwrap();
    assert_eq!(from_json.max_history, 7);

    write_file(&root, "config.yaml", "max_history: 9\n");
    let from_yaml = MergeService::load_files(None, &root, None).unwrap();
    assert_eq!(from_yaml.max_history, 9);
}

#[test]
fn workspace_file_overrides_global_file() {
    let temp_dir = TempDir::new().unwrap();
    let root = workspace(&temp_dir);
    let global = write_file(
        temp_dir.path(),
        "global/config.yaml",
        "max_history: 11\nconversation_timeout: 12\n",
    );
    write_file(&root, "config.yaml", "max_history: 13\n");

    let config = MergeService::load_files(Some(&global), &root, None).unwrap();
    assert_eq!(config.max_history, 13);
    assert_eq!(config.conversation_timeout, 12);
}

#[test]
fn explicit_missing_file_is_not_found() {
    let temp_dir = TempDir::new().unwrap();
    let root = workspace(&temp_dir);
    let missing = root.join("nope.yaml");
    let err = MergeService::load_files(None, &root, Some(&missing)).unwrap_err();
    assert!(matches!(err, ConfigError::NotFound(path) if path == missing));
}

#[test]
fn explicit_file_replaces_workspace_lookup() {
    let temp_dir = TempDir::new().unwrap();
    let root = workspace(&temp_dir);
    write_file(&root, "config.yaml", "max_history: 5\n");
    let explicit = write_file(temp_dir.path(), "elsewhere.yaml", "max_history: 6\n");

    let config = MergeService::load_files(None, &root, Some(&explicit)).unwrap();
    assert_eq!(config.max_history, 6);
}

#[test]
fn invalid_scalars_fall_back_to_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let root = workspace(&temp_dir);
    write_file(&root, "config.yaml", "max_history: -4\nconversation_timeout: soon\n");

    let config = MergeService::load_files(None, &root, None).unwrap();
    assert_eq!(config.max_history, DEFAULT_MAX_HISTORY);
    assert_eq!(config.conversation_timeout, DEFAULT_CONVERSATION_TIMEOUT);
}

#[test]
fn profile_without_provider_fails_to_load() {
    let temp_dir = TempDir::new().unwrap();
    let root = workspace(&temp_dir);
    write_file(&root, "config.yaml", "profiles:\n  bad:\n    model: m\n");
    assert!(MergeService::load_files(None, &root, None).is_err());
}

#[test]
fn environment_overrides_profile_and_scalars() {
    let temp_dir = TempDir::new().unwrap();
    let root = workspace(&temp_dir);
    write_file(&root, "config.yaml", MOCK_CONFIG_YAML);

    let config = with_env(
        &[
            ("TMUXBOT_PROFILE_MOCK_API_KEY", "from-env"),
            ("TMUXBOT_PROFILE_MOCK_MODEL", "mock-gpt-2"),
            ("TMUXBOT_PROFILE_MOCK_BASE_URL", "http://localhost:9000/v1"),
            ("TMUXBOT_MAX_HISTORY", "50"),
            ("TMUXBOT_CONVERSATION_TIMEOUT", "not-a-number"),
        ],
        || MergeService::load_layers(None, &root, None).unwrap(),
    );

    let profile = config.profile("mock").unwrap();
    assert_eq!(profile.api_key, "from-env");
    assert_eq!(profile.model, "mock-gpt-2");
    assert_eq!(profile.base_url.as_deref(), Some("http://localhost:9000/v1"));
    assert_eq!(config.max_history, 50);
    // Rejected override keeps the file value.
    assert_eq!(config.conversation_timeout, 30);
}

#[test]
fn loader_facade_reads_global_file_from_xdg() {
    let temp_dir = TempDir::new().unwrap();
    let root = workspace(&temp_dir);
    write_file(
        &temp_dir.path().join("xdg"),
        "tmuxbot/config.yaml",
        "conversation_timeout: 77\n",
    );

    let config = with_xdg_env(&temp_dir, || ConfigLoader::load(&root).unwrap());
    assert_eq!(config.conversation_timeout, 77);
}

#[test]
fn mixed_case_names_survive_loading() {
    let temp_dir = TempDir::new().unwrap();
    let root = workspace(&temp_dir);
    write_file(
        &root,
        "config.yaml",
        "\
profiles:
  OpenAI-Main:
    provider: openai
    api_key: k
    model: gpt-4o
    settings:
      maxTokens: 256
  gpt-4.1:
    provider: openai
    api_key: k
    model: gpt-4.1
agents:
  Primary:
    profile: OpenAI-Main
  dotted:
    profile: gpt-4.1
max_history: 12
",
    );

    let config = MergeService::load_files(None, &root, None).unwrap();
    let profiles: Vec<&str> = config.profiles.keys().map(String::as_str).collect();
    assert_eq!(profiles, vec!["OpenAI-Main", "gpt-4.1"]);
    let agents: Vec<&str> = config.agents.keys().map(String::as_str).collect();
    assert_eq!(agents, vec!["Primary", "dotted"]);

    let bound = &config.agent("Primary").unwrap().profile;
    let settings = config.profile(bound).unwrap().settings.as_ref().unwrap();
    assert!(settings.get("maxTokens").is_some());
    assert_eq!(config.max_history, 12);
}

#[test]
fn workspace_profile_replaces_global_profile_of_same_name() {
    let temp_dir = TempDir::new().unwrap();
    let root = workspace(&temp_dir);
    let global = write_file(
        temp_dir.path(),
        "global/config.yaml",
        "\
profiles:
  Shared:
    provider: openai
    model: from-global
  GlobalOnly:
    provider: openai
",
    );
    write_file(
        &root,
        "config.yaml",
        "profiles:\n  Shared:\n    provider: openrouter\n    model: from-workspace\n",
    );

    let config = MergeService::load_files(Some(&global), &root, None).unwrap();
    assert_eq!(config.profile("Shared").unwrap().model, "from-workspace");
    assert!(config.profile("GlobalOnly").is_some());
}

#[test]
fn explicit_file_without_extension_reads_as_yaml() {
    let temp_dir = TempDir::new().unwrap();
    let root = workspace(&temp_dir);
    let explicit = write_file(
        temp_dir.path(),
        "mybot",
        "profiles:\n  Main:\n    provider: openai\nconversation_timeout: 42\n",
    );

    let config = MergeService::load_files(None, &root, Some(&explicit)).unwrap();
    assert_eq!(config.conversation_timeout, 42);
    assert!(config.profile("Main").is_some());
}
