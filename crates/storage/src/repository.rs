//! JSON File Repository

use crate::{RecordStore, StorageError};
use serde::Serialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use uuid::Uuid;

/// Handle to the JSON document holding every student record.
///
/// Cheap to clone; it only carries the path. Each operation loads the whole
/// document and mutating operations write it back whole.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store backed by the file at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load every record.
    ///
    /// A missing, unreadable or malformed file yields an empty store.
    pub fn load(&self) -> RecordStore {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No data file at {}, starting empty", self.path.display());
                return RecordStore::new();
            }
            Err(e) => {
                warn!("Failed to read {}: {}; treating as empty", self.path.display(), e);
                return RecordStore::new();
            }
        };

        match serde_json::from_slice::<RecordStore>(&bytes) {
            Ok(store) => {
                debug!("Loaded {} records from {}", store.len(), self.path.display());
                store
            }
            Err(e) => {
                warn!("Malformed data file {}: {}; treating as empty", self.path.display(), e);
                RecordStore::new()
            }
        }
    }

    /// Overwrite the file with the full contents of `store`
    pub fn save(&self, store: &RecordStore) -> Result<(), StorageError> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        store
            .serialize(&mut serializer)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        atomic_write(&self.path, &buf)?;

        debug!("Saved {} records to {}", store.len(), self.path.display());
        Ok(())
    }
}

/// Write through a temp file unique to this call, then rename over `path`.
///
/// Overlapping saves each rename their own file, so the last rename wins.
fn atomic_write(path: &Path, data: &[u8]) -> Result<(), StorageError> {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let tmp = path.with_file_name(format!(".{}.{}.tmp", file_name, Uuid::new_v4()));

    if let Err(e) = fs::write(&tmp, data).and_then(|()| fs::rename(&tmp, path)) {
        let _ = fs::remove_file(&tmp);
        return Err(e.into());
    }
    Ok(())
}
