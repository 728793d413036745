//! Form Input Validation
//!
//! The input-collection layer's contract: one known label per categorical
//! attribute and one number per numeric attribute, each inside its declared
//! domain. Checked before assembly so the pipeline never sees stray input.

mod error;
mod validator;

pub use error::ValidationError;
pub use validator::{ValidationConfig, ValidationResult, Validator};
