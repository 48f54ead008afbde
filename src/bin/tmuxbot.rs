//! TmuxBot CLI Binary
//!
//! Starts the interactive chat by default; subcommands cover setup and
//! diagnostics.

use anyhow::Context;
use clap::Parser;
use std::process;
use tmuxbot::config::AppConfig;
use tmuxbot::error::{ApiError, ConfigError};
use tmuxbot::logging;
use tmuxbot::tooling::cli::{Cli, CliContext, Commands};
use tmuxbot::tooling::repl;

fn main() {
    let cli = Cli::parse();
    let context = CliContext::new(cli.workdir.clone(), cli.config.clone());

    // Load warnings surface on stderr before the configured logger exists.
    let loaded = tracing::subscriber::with_default(logging::bootstrap_subscriber(), || {
        context.load_config()
    });

    let logging_config = loaded
        .as_ref()
        .map(|config| config.logging.clone())
        .unwrap_or_default()
        .with_overrides(
            cli.log_level.clone(),
            cli.log_format.clone(),
            cli.log_output.clone(),
            cli.log_file.clone(),
        );
    if let Err(e) = logging::init_logging(Some(&logging_config)) {
        eprintln!("Warning: {}", e);
    }

    let result = match cli.resolved_command() {
        Commands::Chat { agent } => chat(&context, loaded, &agent),
        command => context
            .execute(&command)
            .map(|output| println!("{}", output))
            .map_err(anyhow::Error::from),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn chat(
    context: &CliContext,
    loaded: Result<AppConfig, ApiError>,
    role: &str,
) -> anyhow::Result<()> {
    let config = loaded.map_err(|e| match e {
        ApiError::Load(ConfigError::NotFound(path)) => ApiError::NotConfigured(format!(
            "Configuration file not found: {}. Run `tmuxbot init` to create one.",
            path.display()
        )),
        other => other,
    })?;

    let session = match context.open_session(config, role) {
        Ok(session) => session,
        Err(e @ (ApiError::Resolve(_) | ApiError::NotConfigured(_))) => {
            tracing::error!("Agent initialization failed: {}", e);
            eprintln!("{}", repl::render_init_error(&e));
            process::exit(1);
        }
        Err(e) => return Err(e.into()),
    };

    repl::run(session).context("chat session ended unexpectedly")
}
