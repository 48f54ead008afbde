//! TmuxBot: terminal conversational assistant
//!
//! Agent roles are bound to named profiles; each profile names a provider
//! implementation that the [`provider::ProviderRegistry`] loads on demand.
//! The [`model::ModelFactory`] resolves role -> profile -> provider -> model
//! handle and reports each failure kind distinctly.

pub mod agent;
pub mod config;
pub mod conversation;
pub mod error;
pub mod logging;
pub mod model;
pub mod provider;
pub mod testing;
pub mod tooling;
