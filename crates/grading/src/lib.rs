//! Grade Classification
//!
//! Maps a student's marks onto a letter grade using fixed bands.

mod grade;

pub use grade::{grade, Grade};
