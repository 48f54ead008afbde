//! Model resolution for agent roles.

pub mod factory;

pub use factory::{ModelFactory, Resolution};
