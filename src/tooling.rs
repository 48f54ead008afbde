//! Tooling
//!
//! Command-line surface: argument parsing, one-shot commands and the
//! interactive chat loop.

pub mod cli;
pub mod repl;

pub use cli::{Cli, CliContext, Commands};
