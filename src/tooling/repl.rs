//! Interactive chat loop.
//!
//! Input parsing and rendering are plain functions so they can be tested
//! without a terminal; [`run`] wires them to `dialoguer` and a tokio runtime.

use crate::agent::ChatSession;
use crate::config::sources::environment::PROFILE_VAR_PREFIX;
use crate::error::ApiError;
use dialoguer::Input;
use owo_colors::OwoColorize;

/// One line of user input, classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplInput {
    Exit,
    Clear,
    History,
    Help,
    Empty,
    Message(String),
}

/// Classify a raw input line.
pub fn parse_input(line: &str) -> ReplInput {
    let trimmed = line.trim();
    match trimmed {
        "" => ReplInput::Empty,
        "/exit" | "/quit" => ReplInput::Exit,
        "/clear" => ReplInput::Clear,
        "/history" => ReplInput::History,
        "/help" => ReplInput::Help,
        _ => ReplInput::Message(trimmed.to_string()),
    }
}

pub fn render_banner() -> String {
    format!(
        "{}\n{}",
        "TmuxBot".bold().cyan(),
        "Type /help for commands, /exit or Ctrl-D to leave.".dimmed()
    )
}

pub fn render_ready(session: &ChatSession) -> String {
    let model = session.agent().model();
    format!(
        "{} agent '{}' using {}:{}",
        "Ready:".green().bold(),
        session.agent().role(),
        model.provider_name(),
        model.model_name()
    )
}

pub fn render_help() -> String {
    [
        "/exit, /quit  leave the session",
        "/clear        forget the conversation so far",
        "/history      show the conversation buffer",
        "/help         show this message",
    ]
    .join("\n")
}

/// Remediation text for a failed agent initialization.
pub fn render_init_error(err: &ApiError) -> String {
    match err {
        ApiError::NotConfigured(hint) => format!("Configuration error: {}", hint),
        other => format!(
            "Failed to initialize agent: {}\n\n\
             Please check:\n  \
             - API keys are set (config.yaml or {}<NAME>_API_KEY)\n  \
             - Network connectivity to the provider\n  \
             - Model names are valid for the provider\n\n\
             Run 'tmuxbot check' for details.",
            other, PROFILE_VAR_PREFIX
        ),
    }
}

fn render_history(session: &ChatSession) -> String {
    let summary = session.summary();
    let mut output = format!(
        "{} of {} messages\n",
        summary.message_count, summary.max_messages
    );
    for message in session.history() {
        output.push_str(&format!("[{}] {}\n", message.role, message.content));
    }
    output
}

/// Run the chat loop until the user exits.
///
/// Input errors (Ctrl-C, Ctrl-D, closed terminal) end the loop. A failed
/// turn is reported and the loop continues.
pub fn run(mut session: ChatSession) -> Result<(), ApiError> {
    let runtime = tokio::runtime::Runtime::new()?;
    println!("{}", render_banner());
    println!("{}\n", render_ready(&session));

    loop {
        let line = match Input::<String>::new()
            .with_prompt("you")
            .allow_empty(true)
            .interact_text()
        {
            Ok(line) => line,
            Err(e) => {
                tracing::debug!("Input closed: {}", e);
                break;
            }
        };

        match parse_input(&line) {
            ReplInput::Exit => break,
            ReplInput::Empty => continue,
            ReplInput::Help => println!("{}", render_help()),
            ReplInput::Clear => {
                session.clear();
                println!("{}", "Conversation cleared.".dimmed());
            }
            ReplInput::History => print!("{}", render_history(&session)),
            ReplInput::Message(text) => match runtime.block_on(session.send(&text)) {
                Ok(reply) => println!("{} {}\n", "bot:".cyan().bold(), reply),
                Err(e) => {
                    tracing::warn!("Turn failed: {}", e);
                    eprintln!("{} {}", "Error:".red().bold(), e);
                }
            },
        }
    }

    println!("Goodbye.");
    Ok(())
}
