//! Storage Layer
//!
//! Student records kept as a single JSON document, read and rewritten whole.

mod record;
mod repository;

pub use record::{RecordStore, RollNumber, StudentRecord};
pub use repository::JsonFileStore;

use thiserror::Error;

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    SerializationError(String),
}
