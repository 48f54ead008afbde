//! Built-in defaults, the lowest layer of every merge.

use crate::config::schema::{DEFAULT_CONVERSATION_TIMEOUT, DEFAULT_MAX_HISTORY};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError};

/// Builder seeded with default scalar values.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("max_history", DEFAULT_MAX_HISTORY as i64)?
        .set_default("conversation_timeout", DEFAULT_CONVERSATION_TIMEOUT as i64)
}
