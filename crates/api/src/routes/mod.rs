//! HTTP Routes

pub mod health;
pub mod students;

use storage::{JsonFileStore, RecordStore};

use crate::error::ApiError;

/// Load every record on the blocking pool
pub(crate) async fn load_records(store: &JsonFileStore) -> Result<RecordStore, ApiError> {
    let store = store.clone();
    Ok(tokio::task::spawn_blocking(move || store.load()).await?)
}

/// Write every record on the blocking pool
pub(crate) async fn save_records(store: &JsonFileStore, records: RecordStore) -> Result<(), ApiError> {
    let store = store.clone();
    tokio::task::spawn_blocking(move || store.save(&records)).await??;
    Ok(())
}
