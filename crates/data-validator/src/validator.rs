//! Field Validator

use crate::error::ValidationError;
use storage::{RecordStore, RollNumber, StudentRecord};

/// Validation configuration
#[derive(Debug, Clone)]
pub struct ValidationConfig {
    /// Marks valid range, inclusive on both ends
    pub marks_range: (f64, f64),
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            marks_range: (0.0, 100.0),
        }
    }
}

/// Changes accepted from an update form.
///
/// `None` leaves the stored field as it is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordUpdate {
    pub name: Option<String>,
    pub marks: Option<f64>,
}

impl RecordUpdate {
    /// Whether the update touches no field
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.marks.is_none()
    }

    /// Apply the accepted fields to `record`
    pub fn apply(self, record: &mut StudentRecord) {
        if let Some(name) = self.name {
            record.name = name;
        }
        if let Some(marks) = self.marks {
            record.marks = marks;
        }
    }
}

/// Validator for student form fields
#[derive(Debug, Clone)]
pub struct Validator {
    config: ValidationConfig,
}

impl Validator {
    /// Create a new validator with given config
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Parse a roll number made only of ASCII decimal digits
    pub fn validate_roll_number(&self, input: &str) -> Result<RollNumber, ValidationError> {
        if input.is_empty() || !input.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ValidationError::RollNotInteger);
        }
        // Digits only, so the sole failure left is overflow.
        input
            .parse::<u64>()
            .map(RollNumber)
            .map_err(|_| ValidationError::RollNotInteger)
    }

    /// Reject a roll number that is already a key in `store`
    pub fn check_unique(&self, roll_no: RollNumber, store: &RecordStore) -> Result<(), ValidationError> {
        if store.contains(roll_no) {
            Err(ValidationError::RollExists(roll_no))
        } else {
            Ok(())
        }
    }

    /// Validate a name, returning it trimmed
    pub fn validate_name(&self, input: &str) -> Result<String, ValidationError> {
        let trimmed = input.trim();
        let mut letters = trimmed.chars().filter(|c| *c != ' ').peekable();
        if letters.peek().is_none() || !letters.all(char::is_alphabetic) {
            return Err(ValidationError::InvalidName);
        }
        Ok(trimmed.to_string())
    }

    /// Parse marks and check them against the configured range
    pub fn validate_marks(&self, input: &str) -> Result<f64, ValidationError> {
        let value = input
            .trim()
            .parse::<f64>()
            .map_err(|_| ValidationError::MarksNotNumber)?;

        let (min, max) = self.config.marks_range;
        // NaN fails the range check as well.
        if (min..=max).contains(&value) {
            Ok(value)
        } else {
            Err(ValidationError::MarksOutOfRange { value, min, max })
        }
    }

    /// Validate a creation form against the current store.
    ///
    /// Checks run in order: roll number format, roll number uniqueness,
    /// name, marks. The first failure is returned.
    pub fn validate_new_student(
        &self,
        store: &RecordStore,
        roll_no: &str,
        name: &str,
        marks: &str,
    ) -> Result<(RollNumber, StudentRecord), ValidationError> {
        let roll_no = self.validate_roll_number(roll_no)?;
        self.check_unique(roll_no, store)?;
        let name = self.validate_name(name)?;
        let marks = self.validate_marks(marks)?;
        Ok((roll_no, StudentRecord { name, marks }))
    }

    /// Validate an update form.
    ///
    /// Blank fields are skipped; the name is checked before the marks.
    pub fn validate_update(&self, name: &str, marks: &str) -> Result<RecordUpdate, ValidationError> {
        let name = if name.trim().is_empty() {
            None
        } else {
            Some(self.validate_name(name)?)
        };
        let marks = if marks.trim().is_empty() {
            None
        } else {
            Some(self.validate_marks(marks)?)
        };
        Ok(RecordUpdate { name, marks })
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(ValidationConfig::default())
    }
}
