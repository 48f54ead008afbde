//! Chat session: one agent plus its conversation buffer.

use crate::agent::Agent;
use crate::conversation::{ContextSummary, ConversationBuffer, Message, MessageRole};
use crate::error::SessionError;
use std::path::PathBuf;
use std::time::Duration;

/// Environment facts handed to the agent with every turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionDeps {
    pub current_user: String,
    pub working_directory: PathBuf,
}

impl SessionDeps {
    /// Gather from `USER` and the current directory, defaulting to
    /// `unknown` and `.`.
    pub fn from_env() -> Self {
        let current_user = std::env::var("USER")
            .ok()
            .filter(|user| !user.is_empty())
            .unwrap_or_else(|| "unknown".to_string());
        let working_directory = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self {
            current_user,
            working_directory,
        }
    }

    fn context_line(&self) -> String {
        format!(
            "Current user: {}. Working directory: {}.",
            self.current_user,
            self.working_directory.display()
        )
    }
}

/// An interactive conversation with one agent.
#[derive(Debug)]
pub struct ChatSession {
    agent: Agent,
    buffer: ConversationBuffer,
    turn_timeout: Duration,
    deps: SessionDeps,
}

impl ChatSession {
    pub fn new(agent: Agent, max_history: usize, timeout_secs: u64, deps: SessionDeps) -> Self {
        Self {
            agent,
            buffer: ConversationBuffer::new(max_history),
            turn_timeout: Duration::from_secs(timeout_secs),
            deps,
        }
    }

    pub fn agent(&self) -> &Agent {
        &self.agent
    }

    /// Send one user message and wait for the reply.
    ///
    /// The user message stays in the history even if the turn fails.
    pub async fn send(&mut self, input: &str) -> Result<String, SessionError> {
        self.buffer.append(MessageRole::User, input);
        let instructions = format!("{}\n\n{}", self.agent.instructions(), self.deps.context_line());
        let history = self.buffer.snapshot();

        let reply = tokio::time::timeout(
            self.turn_timeout,
            self.agent.model().complete(&instructions, &history),
        )
        .await
        .map_err(|_| SessionError::Timeout(self.turn_timeout.as_secs()))??;

        self.buffer.append(MessageRole::Assistant, reply.clone());
        tracing::debug!(
            "Turn complete for agent '{}' ({} messages)",
            self.agent.role(),
            self.buffer.len()
        );
        Ok(reply)
    }

    pub fn history(&self) -> Vec<Message> {
        self.buffer.snapshot()
    }

    pub fn recent(&self, n: usize) -> Vec<Message> {
        self.buffer.recent(n)
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    pub fn summary(&self) -> ContextSummary {
        self.buffer.summary()
    }
}
