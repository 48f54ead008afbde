pub mod validation;

pub use validation::{endpoint_url_is_valid, ValidationResult};
