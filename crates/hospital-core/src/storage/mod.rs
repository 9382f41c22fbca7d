//! Key-value persistence for named collections.
//!
//! Every collection lives under one key as a JSON array. Writes always
//! replace the whole array; there are no deltas and no cross-key
//! transactions.

mod memory;
mod schema;
mod sqlite;

pub use memory::*;
pub use schema::*;
pub use sqlite::*;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

/// Storage backend errors.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Storage lock poisoned")]
    LockPoisoned,
}

pub type StorageResult<T> = Result<T, StorageError>;

/// A flat string-to-string namespace, the equivalent of browser local storage.
///
/// Implementations must make each single call atomic; nothing coordinates
/// sequences of calls, so two handles over the same data overwrite each
/// other's collections (last write wins).
pub trait StorageBackend: Send + Sync {
    /// Read the raw value under `key`.
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Replace the value under `key`.
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Remove `key`. Returns whether it existed.
    fn remove(&self, key: &str) -> StorageResult<bool>;

    /// All keys currently present, sorted.
    fn keys(&self) -> StorageResult<Vec<String>>;
}

/// Load the collection stored under `key`.
///
/// An absent or unparseable slot loads as an empty collection. Only backend
/// failures are reported as errors.
pub fn load_collection<T: DeserializeOwned>(
    backend: &dyn StorageBackend,
    key: &str,
) -> StorageResult<Vec<T>> {
    let Some(raw) = backend.get(key)? else {
        return Ok(Vec::new());
    };

    match serde_json::from_str(&raw) {
        Ok(records) => Ok(records),
        Err(e) => {
            tracing::warn!(key, error = %e, "Malformed collection in storage, treating as empty");
            Ok(Vec::new())
        }
    }
}

/// Serialize `records` and overwrite the slot under `key`.
pub fn save_collection<T: Serialize>(
    backend: &dyn StorageBackend,
    key: &str,
    records: &[T],
) -> StorageResult<()> {
    let raw = serde_json::to_string(records)?;
    backend.set(key, &raw)?;
    tracing::debug!(key, count = records.len(), "Collection written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Row {
        id: u32,
        name: String,
    }

    #[test]
    fn test_missing_slot_is_empty() {
        let backend = MemoryStorage::new();
        let rows: Vec<Row> = load_collection(&backend, "rs_missing").unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_malformed_slot_is_empty() {
        let backend = MemoryStorage::new();
        backend.set("rs_pasien", "{not json").unwrap();
        let rows: Vec<Row> = load_collection(&backend, "rs_pasien").unwrap();
        assert!(rows.is_empty());

        // Wrong shape is treated the same way
        backend.set("rs_pasien", r#"{"id": 1}"#).unwrap();
        let rows: Vec<Row> = load_collection(&backend, "rs_pasien").unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let backend = MemoryStorage::new();
        let rows = vec![
            Row { id: 2, name: "b".into() },
            Row { id: 1, name: "a".into() },
        ];
        save_collection(&backend, "rows", &rows).unwrap();

        let loaded: Vec<Row> = load_collection(&backend, "rows").unwrap();
        assert_eq!(loaded, rows);
    }

    #[test]
    fn test_save_overwrites_whole_slot() {
        let backend = MemoryStorage::new();
        save_collection(&backend, "rows", &[Row { id: 1, name: "a".into() }]).unwrap();
        save_collection::<Row>(&backend, "rows", &[]).unwrap();

        assert_eq!(backend.get("rows").unwrap().as_deref(), Some("[]"));
    }
}
