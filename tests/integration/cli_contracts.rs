use std::fs;
use std::sync::Arc;

use clap::Parser;
use tempfile::TempDir;
use tmuxbot::error::ApiError;
use tmuxbot::provider::ProviderRegistry;
use tmuxbot::testing::stub_factory;
use tmuxbot::tooling::cli::{Cli, CliContext, Commands};

use crate::integration::support::{with_xdg_env, workspace, write_file, MOCK_CONFIG_YAML};

fn mock_context(root: std::path::PathBuf) -> CliContext {
    let registry = ProviderRegistry::new();
    registry.register("mock_provider", stub_factory);
    CliContext::with_registry(root, None, Arc::new(registry))
}

#[test]
fn parse_valid_command_matrix() {
    let cases: Vec<Vec<&str>> = vec![
        vec!["tmuxbot"],
        vec!["tmuxbot", "chat"],
        vec!["tmuxbot", "chat", "--agent", "coder"],
        vec!["tmuxbot", "init", "--force"],
        vec!["tmuxbot", "migrate", "--overwrite", "--no-backup"],
        vec!["tmuxbot", "check", "--format", "json"],
        vec!["tmuxbot", "providers"],
        vec!["tmuxbot", "--workdir", "/tmp", "--config", "/tmp/c.yaml", "check"],
        vec!["tmuxbot", "--log-level", "debug", "--log-output", "stderr", "chat"],
    ];

    for args in cases {
        let parsed = Cli::try_parse_from(args.clone());
        assert!(parsed.is_ok(), "expected valid parse for args: {args:?}");
    }
}

#[test]
fn parse_rejects_unknown_commands_and_flags() {
    assert!(Cli::try_parse_from(["tmuxbot", "serve"]).is_err());
    assert!(Cli::try_parse_from(["tmuxbot", "chat", "--model", "x"]).is_err());
    assert!(Cli::try_parse_from(["tmuxbot", "check", "--format"]).is_err());
}

#[test]
fn default_command_is_primary_chat() {
    let cli = Cli::try_parse_from(["tmuxbot"]).unwrap();
    assert_eq!(
        cli.resolved_command(),
        Commands::Chat {
            agent: "primary".to_string()
        }
    );
    let cli = Cli::try_parse_from(["tmuxbot", "chat", "--agent", "devops"]).unwrap();
    assert_eq!(
        cli.resolved_command(),
        Commands::Chat {
            agent: "devops".to_string()
        }
    );
}

#[test]
fn init_then_check_json_contract() {
    let temp_dir = TempDir::new().unwrap();
    with_xdg_env(&temp_dir, || {
        let root = workspace(&temp_dir);
        let cli = CliContext::new(root.clone(), None);

        let output = cli.execute(&Commands::Init { force: false }).unwrap();
        assert!(output.contains("config.yaml"));
        assert!(output.contains("TMUXBOT_PROFILE_OPENAI_GPT_4O_API_KEY"));
        assert!(root.join("config.yaml").exists());
        assert!(cli.execute(&Commands::Init { force: false }).is_err());

        let output = cli
            .execute(&Commands::Check {
                format: "json".to_string(),
            })
            .unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        let profiles = parsed.get("profiles").and_then(|v| v.as_array()).unwrap();
        assert_eq!(profiles.len(), 2);
        for profile in profiles {
            assert!(profile.get("name").and_then(|v| v.as_str()).is_some());
            assert!(profile.get("valid").and_then(|v| v.as_bool()).is_some());
            assert!(profile.get("checks").and_then(|v| v.as_array()).is_some());
            let warnings = profile.get("warnings").and_then(|v| v.as_array()).unwrap();
            assert!(!warnings.is_empty(), "placeholder key should warn");
        }
        let agents = parsed.get("agents").and_then(|v| v.as_array()).unwrap();
        assert_eq!(agents.len(), 2);
        assert!(agents
            .iter()
            .all(|a| a.get("ready").and_then(|v| v.as_bool()) == Some(true)));
        assert_eq!(parsed.get("max_history").and_then(|v| v.as_u64()), Some(100));
    });
}

#[test]
fn check_text_reports_agents_table() {
    let temp_dir = TempDir::new().unwrap();
    with_xdg_env(&temp_dir, || {
        let root = workspace(&temp_dir);
        write_file(&root, "config.yaml", MOCK_CONFIG_YAML);
        let cli = mock_context(root);

        let output = cli
            .execute(&Commands::Check {
                format: "text".to_string(),
            })
            .unwrap();
        assert!(output.contains("Profile: mock"));
        assert!(output.contains("Profile: broken"));
        assert!(output.contains("ready (mock_provider:mock-gpt-1)"));
        assert!(output.contains("Unsupported provider specified"));
        assert!(output.contains("profile 'nowhere' not configured"));
        assert!(output.contains("1/3 agents ready"));

        let err = cli
            .execute(&Commands::Check {
                format: "xml".to_string(),
            })
            .unwrap_err();
        assert!(err.to_string().contains("Invalid format"));
    });
}

#[test]
fn chat_preflight_reports_model_or_hint() {
    let temp_dir = TempDir::new().unwrap();
    with_xdg_env(&temp_dir, || {
        let root = workspace(&temp_dir);
        write_file(&root, "config.yaml", MOCK_CONFIG_YAML);
        let cli = mock_context(root);

        let output = cli
            .execute(&Commands::Chat {
                agent: "primary".to_string(),
            })
            .unwrap();
        assert_eq!(output, "Agent 'primary' ready (mock_provider:mock-gpt-1)");

        let err = cli
            .execute(&Commands::Chat {
                agent: "researcher".to_string(),
            })
            .unwrap_err();
        assert!(matches!(err, ApiError::NotConfigured(_)));

        let err = cli
            .execute(&Commands::Chat {
                agent: "orphan".to_string(),
            })
            .unwrap_err();
        assert!(matches!(&err, ApiError::NotConfigured(msg) if msg.contains("nowhere")));

        let err = cli
            .execute(&Commands::Chat {
                agent: "devops".to_string(),
            })
            .unwrap_err();
        assert!(matches!(err, ApiError::Resolve(_)));
    });
}

#[test]
fn providers_lists_builtins() {
    let temp_dir = TempDir::new().unwrap();
    let cli = CliContext::new(workspace(&temp_dir), None);
    let output = cli.execute(&Commands::Providers).unwrap();
    assert!(output.contains("openai"));
    assert!(output.contains("openrouter"));
    assert!(output.contains("Total: 2 provider(s)"));
}

#[test]
fn migrate_command_reports_and_fails_on_errors() {
    let temp_dir = TempDir::new().unwrap();
    let root = workspace(&temp_dir);
    let cli = CliContext::new(root.clone(), None);

    write_file(&root, "config.json", r#"{ "max_history": 8 }"#);
    let output = cli
        .execute(&Commands::Migrate {
            overwrite: false,
            no_backup: false,
        })
        .unwrap();
    assert!(output.contains("1 migrated, 0 skipped, 0 failed"));
    assert!(root.join("config.json.bak").exists());

    write_file(&root, "profiles/bad.json", "{");
    let err = cli
        .execute(&Commands::Migrate {
            overwrite: false,
            no_backup: false,
        })
        .unwrap_err();
    assert!(err.to_string().contains("Migration completed with errors"));
    assert!(fs::read_to_string(root.join("profiles/bad.json")).is_ok());
}
