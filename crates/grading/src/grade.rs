//! Letter Grades

use std::fmt;

/// Lower bound (inclusive) of the A band
const A_THRESHOLD: f64 = 80.0;
/// Lower bound (inclusive) of the B band
const B_THRESHOLD: f64 = 60.0;
/// Lower bound (inclusive) of the C band
const C_THRESHOLD: f64 = 40.0;

/// Letter grade derived from marks; never stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Grade {
    A,
    B,
    C,
    Fail,
}

impl Grade {
    /// Classify marks, first matching band from the top wins
    pub fn from_marks(marks: f64) -> Self {
        if marks >= A_THRESHOLD {
            Grade::A
        } else if marks >= B_THRESHOLD {
            Grade::B
        } else if marks >= C_THRESHOLD {
            Grade::C
        } else {
            Grade::Fail
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::Fail => "Fail",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shorthand for [`Grade::from_marks`]
pub fn grade(marks: f64) -> Grade {
    Grade::from_marks(marks)
}
