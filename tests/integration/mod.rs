//! Integration tests: configuration loading, model resolution, CLI contracts

mod buffer_properties;
mod cli_contracts;
mod config_loading;
mod migration;
mod support;
