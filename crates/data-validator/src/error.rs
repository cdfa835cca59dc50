//! Validation Error Types

use storage::RollNumber;
use thiserror::Error;

/// Reasons a submitted form field is rejected.
///
/// The display text is shown verbatim next to the form.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Roll number is not made of decimal digits
    #[error("Roll No must be an integer!")]
    RollNotInteger,

    /// Roll number already taken
    #[error("Roll No {0} already exists!")]
    RollExists(RollNumber),

    /// Name empty or containing non-letters
    #[error("Invalid name! Only alphabets allowed.")]
    InvalidName,

    /// Marks not parseable as a number
    #[error("Invalid marks! Enter a number.")]
    MarksNotNumber,

    /// Marks outside the allowed range
    #[error("Marks must be between {min} and {max}.")]
    MarksOutOfRange { value: f64, min: f64, max: f64 },
}

impl ValidationError {
    /// Form field the error belongs to
    pub fn field(&self) -> &'static str {
        match self {
            Self::RollNotInteger | Self::RollExists(_) => "roll_no",
            Self::InvalidName => "name",
            Self::MarksNotNumber | Self::MarksOutOfRange { .. } => "marks",
        }
    }
}
