//! SQLite-backed local storage file.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use rusqlite::{Connection, OptionalExtension};

use super::{StorageBackend, StorageError, StorageResult, SCHEMA};

/// Local storage persisted in a single SQLite file.
///
/// Several handles may open the same file. They behave like browser tabs
/// sharing local storage: each write is atomic, but nothing stops one handle
/// from overwriting a collection another handle just changed.
pub struct LocalStorage {
    conn: Mutex<Connection>,
}

impl LocalStorage {
    /// Open storage at path, creating if needed.
    pub fn open<P: AsRef<Path>>(path: P) -> StorageResult<Self> {
        let conn = Connection::open(path)?;
        conn.busy_timeout(Duration::from_secs(5))?;
        Self::initialize(conn)
    }

    /// Create in-memory storage (for testing).
    pub fn open_in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::initialize(conn)
    }

    fn initialize(conn: Connection) -> StorageResult<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> StorageResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| StorageError::LockPoisoned)
    }
}

impl StorageBackend for LocalStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        self.conn()?
            .query_row("SELECT value FROM kv_store WHERE key = ?", [key], |row| {
                row.get(0)
            })
            .optional()
            .map_err(Into::into)
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.conn()?.execute(
            r#"
            INSERT INTO kv_store (key, value, updated_at)
            VALUES (?1, ?2, datetime('now'))
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
            [key, value],
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<bool> {
        let rows_affected = self
            .conn()?
            .execute("DELETE FROM kv_store WHERE key = ?", [key])?;
        Ok(rows_affected > 0)
    }

    fn keys(&self) -> StorageResult<Vec<String>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare("SELECT key FROM kv_store ORDER BY key")?;
        let rows = stmt.query_map([], |row| row.get(0))?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_in_memory() {
        let storage = LocalStorage::open_in_memory();
        assert!(storage.is_ok());
    }

    #[test]
    fn test_set_get_overwrite() {
        let storage = LocalStorage::open_in_memory().unwrap();
        assert_eq!(storage.get("rs_users").unwrap(), None);

        storage.set("rs_users", "[]").unwrap();
        storage.set("rs_users", "[{\"id\":1}]").unwrap();
        assert_eq!(storage.get("rs_users").unwrap().as_deref(), Some("[{\"id\":1}]"));
    }

    #[test]
    fn test_remove_and_keys() {
        let storage = LocalStorage::open_in_memory().unwrap();
        storage.set("b", "1").unwrap();
        storage.set("a", "2").unwrap();
        assert_eq!(storage.keys().unwrap(), vec!["a".to_string(), "b".to_string()]);

        assert!(storage.remove("a").unwrap());
        assert!(!storage.remove("a").unwrap());
        assert_eq!(storage.keys().unwrap(), vec!["b".to_string()]);
    }

    #[test]
    fn test_reopen_file_keeps_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("local.db");

        {
            let storage = LocalStorage::open(&path).unwrap();
            storage.set("currentUser", "{}").unwrap();
        }

        let storage = LocalStorage::open(&path).unwrap();
        assert_eq!(storage.get("currentUser").unwrap().as_deref(), Some("{}"));
    }
}
