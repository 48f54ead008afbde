//! Agent Runtime
//!
//! An [`Agent`] pairs a resolved model handle with the instructions for its
//! role. A [`ChatSession`] drives turns against one agent over a bounded
//! conversation buffer.

pub mod instructions;
pub mod session;

pub use instructions::{default_instructions, instructions_for};
pub use session::{ChatSession, SessionDeps};

use crate::error::ResolveError;
use crate::model::ModelFactory;
use crate::provider::{ChatModel, ModelHandle};

/// A model handle bound to an agent role and its instructions.
#[derive(Debug)]
pub struct Agent {
    role: String,
    model: ModelHandle,
    instructions: String,
}

impl Agent {
    pub fn new(role: impl Into<String>, model: ModelHandle, instructions: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            model,
            instructions: instructions.into(),
        }
    }

    /// Build the agent for `role`.
    ///
    /// Uses the role's fallbacks when its profile is missing. Returns `None`
    /// when neither the role nor any usable profile is configured.
    pub fn build(factory: &ModelFactory, role: &str) -> Result<Option<Agent>, ResolveError> {
        let model = match factory.resolve_with_fallbacks(role)?.into_model() {
            Some(model) => model,
            None => return Ok(None),
        };
        let instructions = instructions_for(factory.config(), role);
        tracing::info!(
            "Agent '{}' using {}:{}",
            role,
            model.provider_name(),
            model.model_name()
        );
        Ok(Some(Agent::new(role, model, instructions)))
    }

    pub fn role(&self) -> &str {
        &self.role
    }

    pub fn model(&self) -> &dyn ChatModel {
        self.model.as_ref()
    }

    pub fn instructions(&self) -> &str {
        &self.instructions
    }
}
