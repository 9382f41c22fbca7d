//! Domain store: entity repositories over the key-value storage.
//!
//! Each operation loads the whole collection, changes it in memory and
//! writes it back. Nothing is cached between calls.

mod collection;
mod doctors;
mod line_items;
mod medical_records;
mod patients;
mod registrations;
mod seed;
mod session;
mod transactions;
mod users;

pub use collection::*;
pub use doctors::*;
pub use registrations::*;
pub use seed::*;
pub use session::*;
pub use users::*;

use std::path::Path;
use std::sync::Arc;

use thiserror::Error;

use crate::config::StoreConfig;
use crate::models::Id;
use crate::storage::{LocalStorage, MemoryStorage, StorageBackend, StorageError};

/// Store errors.
#[derive(Error, Debug)]
pub enum DbError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Constraint violation: {0}")]
    Constraint(String),

    #[error("Username already taken: {0}")]
    DuplicateUsername(String),

    #[error("Invalid {entity} transition on {id}: {from} -> {to} (current status: {current})")]
    InvalidTransition {
        entity: &'static str,
        id: Id,
        current: String,
        from: String,
        to: String,
    },
}

pub type DbResult<T> = Result<T, DbError>;

/// Handle to the hospital domain store.
///
/// Cloning the backend `Arc` into two stores models two browser tabs over
/// the same local storage.
pub struct HospitalStore {
    backend: Arc<dyn StorageBackend>,
    config: StoreConfig,
}

impl HospitalStore {
    /// Open a store backed by the SQLite file at path, creating if needed.
    pub fn open<P: AsRef<Path>>(path: P) -> DbResult<Self> {
        let backend = LocalStorage::open(path)?;
        Ok(Self::with_backend(Arc::new(backend), StoreConfig::default()))
    }

    /// Create a store over volatile memory (for testing).
    pub fn open_in_memory() -> DbResult<Self> {
        Ok(Self::with_backend(
            Arc::new(MemoryStorage::new()),
            StoreConfig::default(),
        ))
    }

    /// Create a store over an existing backend.
    pub fn with_backend(backend: Arc<dyn StorageBackend>, config: StoreConfig) -> Self {
        Self { backend, config }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Shared handle to the underlying storage.
    pub fn backend(&self) -> Arc<dyn StorageBackend> {
        Arc::clone(&self.backend)
    }

    /// Generic repository for one entity type.
    pub fn collection<T: Record>(&self) -> Collection<'_, T> {
        Collection::new(self.backend.as_ref(), self.config.key(T::COLLECTION))
    }

    /// Fail with a constraint violation unless a `T` with `id` exists.
    pub(crate) fn require<T: Record>(&self, id: Id) -> DbResult<T> {
        self.collection::<T>().find_by_id(id)?.ok_or_else(|| {
            DbError::Constraint(format!("{} {} does not exist", T::ENTITY, id))
        })
    }
}
