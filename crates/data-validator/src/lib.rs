//! Form Validation
//!
//! Checks and normalizes the roll number, name and marks fields submitted
//! through the student forms.

mod error;
mod validator;

pub use error::ValidationError;
pub use validator::{RecordUpdate, ValidationConfig, Validator};
