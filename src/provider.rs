//! Model Providers
//!
//! A provider turns a configuration [`Profile`](crate::config::Profile) into a
//! callable [`ModelHandle`]. Providers are found by name through the
//! [`ProviderRegistry`].

pub mod diagnostics;
pub mod handle;
pub mod openai;
pub mod profile;
pub mod registry;

pub use diagnostics::ProfileDiagnostics;
pub use handle::{ChatModel, ModelHandle, ProviderFactory};
pub use profile::ValidationResult;
pub use registry::{ProviderLoader, ProviderRegistry, ProviderUnit};
