//! CLI Tooling
//!
//! Command-line interface for tmuxbot. Every non-interactive command runs
//! through [`CliContext::execute`] and returns its rendered output.

use crate::agent::{Agent, ChatSession, SessionDeps};
use crate::config::migrate::{migrate_workspace, MigrationOptions};
use crate::config::sources::environment::profile_env_prefix;
use crate::config::{template, AppConfig, ConfigLoader};
use crate::error::ApiError;
use crate::model::{ModelFactory, Resolution};
use crate::provider::{ProfileDiagnostics, ProviderRegistry, ValidationResult};
use clap::{Parser, Subcommand};
use comfy_table::Table;
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;

pub const DEFAULT_ROLE: &str = "primary";

/// TmuxBot - terminal conversational assistant
#[derive(Parser, Debug)]
#[command(name = "tmuxbot")]
#[command(about = "Terminal conversational assistant with profile-based model providers")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Working directory holding config.yaml
    #[arg(long, default_value = ".")]
    pub workdir: PathBuf,

    /// Configuration file path (overrides the workspace config lookup)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// The command to run; `chat` with the default role when none is given.
    pub fn resolved_command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Chat {
            agent: DEFAULT_ROLE.to_string(),
        })
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Start an interactive chat session (default)
    Chat {
        /// Agent role to chat with
        #[arg(long, default_value = DEFAULT_ROLE)]
        agent: String,
    },
    /// Write a starter config.yaml
    Init {
        /// Overwrite an existing configuration
        #[arg(long)]
        force: bool,
    },
    /// Convert JSON configuration files to YAML
    Migrate {
        /// Replace an existing config.yaml
        #[arg(long)]
        overwrite: bool,
        /// Remove config.json instead of keeping config.json.bak
        #[arg(long)]
        no_backup: bool,
    },
    /// Validate profiles and report agent resolution status
    Check {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// List registered provider implementations
    Providers,
}

/// CLI context: working directory, config location and provider registry.
pub struct CliContext {
    workdir: PathBuf,
    config_path: Option<PathBuf>,
    registry: Arc<ProviderRegistry>,
}

impl CliContext {
    /// Create a context with the built-in providers.
    pub fn new(workdir: PathBuf, config_path: Option<PathBuf>) -> Self {
        Self::with_registry(workdir, config_path, Arc::new(ProviderRegistry::with_builtins()))
    }

    pub fn with_registry(
        workdir: PathBuf,
        config_path: Option<PathBuf>,
        registry: Arc<ProviderRegistry>,
    ) -> Self {
        Self {
            workdir,
            config_path,
            registry,
        }
    }

    pub fn workdir(&self) -> &PathBuf {
        &self.workdir
    }

    /// Load configuration for this context.
    pub fn load_config(&self) -> Result<AppConfig, ApiError> {
        Ok(ConfigLoader::load_with(&self.workdir, self.config_path.as_deref())?)
    }

    /// Resolve `role` and open a chat session against it.
    pub fn open_session(&self, config: AppConfig, role: &str) -> Result<ChatSession, ApiError> {
        let factory = self.model_factory(config);
        let agent = match Agent::build(&factory, role)? {
            Some(agent) => agent,
            None => return Err(not_configured(factory.config(), role)),
        };
        let config = factory.config();
        Ok(ChatSession::new(
            agent,
            config.max_history,
            config.conversation_timeout,
            SessionDeps::from_env(),
        ))
    }

    pub fn model_factory(&self, config: AppConfig) -> ModelFactory {
        ModelFactory::new(config, Arc::clone(&self.registry))
    }

    /// Execute a CLI command
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        tracing::debug!("Executing {:?}", command);
        match command {
            Commands::Chat { agent } => {
                let session = self.open_session(self.load_config()?, agent)?;
                let model = session.agent().model();
                Ok(format!(
                    "Agent '{}' ready ({}:{})",
                    agent,
                    model.provider_name(),
                    model.model_name()
                ))
            }
            Commands::Init { force } => {
                let path = template::write(&self.workdir, *force)?;
                Ok(format_init_summary(&path))
            }
            Commands::Migrate {
                overwrite,
                no_backup,
            } => {
                let options = MigrationOptions {
                    overwrite: *overwrite,
                    backup: !*no_backup,
                };
                let report = migrate_workspace(&self.workdir, options);
                if report.is_success() {
                    Ok(report.to_string())
                } else {
                    Err(ApiError::ConfigError(format!(
                        "Migration completed with errors:\n{}",
                        report
                    )))
                }
            }
            Commands::Check { format } => {
                let factory = self.model_factory(self.load_config()?);
                let results = ProfileDiagnostics::validate_all(&factory);
                let statuses = agent_statuses(&factory);
                match format.as_str() {
                    "text" => Ok(format_check_text(&results, &statuses)),
                    "json" => format_check_json(factory.config(), &results, &statuses),
                    other => Err(ApiError::ConfigError(format!(
                        "Invalid format: {} (must be 'text' or 'json')",
                        other
                    ))),
                }
            }
            Commands::Providers => Ok(format_provider_list(&self.registry.names())),
        }
    }
}

/// Hint for a role that is absent or bound to an absent profile.
fn not_configured(config: &AppConfig, role: &str) -> ApiError {
    match config.agent(role) {
        None => ApiError::NotConfigured(format!(
            "Agent '{}' is not configured. Add it under `agents:` in config.yaml or run `tmuxbot init`.",
            role
        )),
        Some(agent) => ApiError::NotConfigured(format!(
            "Profile '{}' used by agent '{}' is not configured. Add it under `profiles:` in config.yaml.",
            agent.profile, role
        )),
    }
}

fn agent_statuses(factory: &ModelFactory) -> Vec<AgentStatus> {
    factory
        .config()
        .agents
        .iter()
        .map(|(role, agent)| {
            let (ready, status) = match factory.resolve_with_fallbacks(role) {
                Ok(Resolution::Resolved(model)) => (
                    true,
                    format!("ready ({}:{})", model.provider_name(), model.model_name()),
                ),
                Ok(Resolution::ProfileNotConfigured { profile, .. }) => {
                    (false, format!("profile '{}' not configured", profile))
                }
                Ok(Resolution::RoleNotConfigured { .. }) => {
                    (false, "not configured".to_string())
                }
                Err(e) => (false, e.to_string()),
            };
            AgentStatus {
                role: role.clone(),
                profile: agent.profile.clone(),
                ready,
                status,
            }
        })
        .collect()
}

/// Resolution status of one configured agent role.
#[derive(Debug, Clone)]
struct AgentStatus {
    role: String,
    profile: String,
    ready: bool,
    status: String,
}

/// Format initialization summary
fn format_init_summary(path: &std::path::Path) -> String {
    let mut output = format!("Created {}\n\n", path.display());
    output.push_str("Next steps:\n");
    output.push_str(&format!(
        "  1. Replace the placeholder api_key values, or set {}API_KEY\n",
        profile_env_prefix("openai-gpt-4o")
    ));
    output.push_str("  2. Run 'tmuxbot check' to validate the configuration\n");
    output.push_str("  3. Run 'tmuxbot' to start chatting\n");
    output
}

/// Format profile validation result
fn format_validation_result(result: &ValidationResult) -> String {
    let mut output = format!("Profile: {}\n", result.profile_name);

    for (description, passed) in &result.checks {
        let mark = if *passed { "✓" } else { "✗" };
        output.push_str(&format!("  {} {}\n", mark, description));
    }
    for error in &result.errors {
        output.push_str(&format!("  ✗ {}\n", error));
    }
    for warning in &result.warnings {
        output.push_str(&format!("  ! {}\n", warning));
    }

    output.push_str(&format!(
        "  Validation {}: {}/{} checks passed, {} errors found\n",
        if result.is_valid() { "passed" } else { "failed" },
        result.passed_checks(),
        result.total_checks(),
        result.errors.len()
    ));
    output
}

fn format_check_text(results: &[ValidationResult], statuses: &[AgentStatus]) -> String {
    if results.is_empty() && statuses.is_empty() {
        return "No profiles or agents configured.\n\nRun 'tmuxbot init' to create config.yaml."
            .to_string();
    }

    let mut output = String::new();
    for result in results {
        output.push_str(&format_validation_result(result));
        output.push('\n');
    }

    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.set_header(vec!["Agent", "Profile", "Status"]);
    for status in statuses {
        table.add_row(vec![&status.role, &status.profile, &status.status]);
    }
    output.push_str(&table.to_string());

    let valid = results.iter().filter(|r| r.is_valid()).count();
    let ready = statuses.iter().filter(|s| s.ready).count();
    output.push_str(&format!(
        "\n\nSummary: {}/{} profiles valid, {}/{} agents ready\n",
        valid,
        results.len(),
        ready,
        statuses.len()
    ));
    output
}

fn format_check_json(
    config: &AppConfig,
    results: &[ValidationResult],
    statuses: &[AgentStatus],
) -> Result<String, ApiError> {
    let profiles: Vec<_> = results
        .iter()
        .map(|result| {
            json!({
                "name": result.profile_name,
                "valid": result.is_valid(),
                "checks": result
                    .checks
                    .iter()
                    .map(|(description, passed)| json!({ "description": description, "passed": passed }))
                    .collect::<Vec<_>>(),
                "errors": result.errors,
                "warnings": result.warnings,
            })
        })
        .collect();
    let agents: Vec<_> = statuses
        .iter()
        .map(|status| {
            json!({
                "role": status.role,
                "profile": status.profile,
                "ready": status.ready,
                "status": status.status,
            })
        })
        .collect();
    let out = json!({
        "profiles": profiles,
        "agents": agents,
        "max_history": config.max_history,
        "conversation_timeout": config.conversation_timeout,
    });
    serde_json::to_string_pretty(&out).map_err(|e| ApiError::Serialization(e.to_string()))
}

/// Format provider list
fn format_provider_list(names: &[String]) -> String {
    if names.is_empty() {
        return "No providers registered.".to_string();
    }
    let mut output = String::from("Registered Providers:\n");
    for name in names {
        output.push_str(&format!("  {}\n", name));
    }
    output.push_str(&format!("\nTotal: {} provider(s)\n", names.len()));
    output
}
