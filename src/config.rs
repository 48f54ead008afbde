//! Configuration System
//!
//! Layered configuration built with the `config` crate: built-in defaults, the
//! global file, the workspace file (YAML preferred, legacy JSON accepted) and
//! finally environment overrides.

pub mod facade;
pub mod merge;
pub mod migrate;
pub mod paths;
pub mod schema;
pub mod sources;
pub mod template;

pub use facade::ConfigLoader;
pub use paths::xdg_root as xdg;
pub use schema::{
    AgentRoleConfig, AppConfig, Profile, DEFAULT_CONVERSATION_TIMEOUT, DEFAULT_MAX_HISTORY,
};
