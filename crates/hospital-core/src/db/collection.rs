//! Generic repository over one persisted collection.

use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{DbError, DbResult};
use crate::models::Id;
use crate::storage::{self, StorageBackend};

/// A foreign-key reference used for lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ForeignKey {
    Patient(Id),
    Doctor(Id),
    Registration(Id),
    Transaction(Id),
}

/// An entity stored in its own collection.
pub trait Record: Serialize + DeserializeOwned + Clone {
    /// Collection name (without key prefix).
    const COLLECTION: &'static str;
    /// Human-readable entity name for messages.
    const ENTITY: &'static str;

    fn id(&self) -> Id;

    /// Whether this record points at `key`.
    fn references(&self, _key: ForeignKey) -> bool {
        false
    }
}

/// Repository over the collection of `T`.
///
/// Records keep insertion order; nothing is sorted implicitly.
pub struct Collection<'a, T> {
    backend: &'a dyn StorageBackend,
    key: String,
    _marker: PhantomData<T>,
}

impl<'a, T: Record> Collection<'a, T> {
    pub(crate) fn new(backend: &'a dyn StorageBackend, key: String) -> Self {
        Self {
            backend,
            key,
            _marker: PhantomData,
        }
    }

    /// Storage key of this collection.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// All records in stored order.
    pub fn list(&self) -> DbResult<Vec<T>> {
        Ok(storage::load_collection(self.backend, &self.key)?)
    }

    /// Overwrite the collection.
    pub fn save(&self, records: &[T]) -> DbResult<()> {
        Ok(storage::save_collection(self.backend, &self.key, records)?)
    }

    pub fn find_by_id(&self, id: Id) -> DbResult<Option<T>> {
        Ok(self.list()?.into_iter().find(|r| r.id() == id))
    }

    /// Records pointing at `key`, in stored order.
    pub fn find_by_foreign_key(&self, key: ForeignKey) -> DbResult<Vec<T>> {
        self.find_by(|r| r.references(key))
    }

    /// Records matching `pred`, in stored order.
    pub fn find_by(&self, pred: impl Fn(&T) -> bool) -> DbResult<Vec<T>> {
        Ok(self.list()?.into_iter().filter(|r| pred(r)).collect())
    }

    /// Id for the next insert: one past the current maximum, or 1.
    pub fn next_id(records: &[T]) -> DbResult<Id> {
        match records.iter().map(Record::id).max() {
            None => Ok(1),
            Some(max) => max.checked_add(1).ok_or_else(|| {
                DbError::Constraint(format!("{} id space exhausted", T::ENTITY))
            }),
        }
    }

    /// Append the record built from the assigned id and persist.
    pub fn insert_with(&self, build: impl FnOnce(Id) -> T) -> DbResult<T> {
        let mut records = self.list()?;
        let record = build(Self::next_id(&records)?);
        records.push(record.clone());
        self.save(&records)?;
        Ok(record)
    }

    /// Mutate the record with `id` in place and persist.
    ///
    /// Returns `None` without writing when no record has `id`.
    pub fn update_with(&self, id: Id, change: impl FnOnce(&mut T)) -> DbResult<Option<T>> {
        self.try_update(id, |record| {
            change(record);
            Ok(())
        })
    }

    /// Like [`Collection::update_with`], but `change` may reject the update,
    /// in which case nothing is written.
    pub fn try_update(
        &self,
        id: Id,
        change: impl FnOnce(&mut T) -> DbResult<()>,
    ) -> DbResult<Option<T>> {
        let mut records = self.list()?;
        let Some(record) = records.iter_mut().find(|r| r.id() == id) else {
            return Ok(None);
        };
        change(record)?;
        let updated = record.clone();
        self.save(&records)?;
        Ok(Some(updated))
    }

    /// Remove the record with `id`. Returns `false` without writing if absent.
    pub fn delete(&self, id: Id) -> DbResult<bool> {
        Ok(self.delete_where(|r| r.id() == id)? > 0)
    }

    /// Remove every record matching `pred`; returns how many went.
    pub fn delete_where(&self, pred: impl Fn(&T) -> bool) -> DbResult<usize> {
        let mut records = self.list()?;
        let before = records.len();
        records.retain(|r| !pred(r));
        let removed = before - records.len();
        if removed > 0 {
            self.save(&records)?;
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::HospitalStore;
    use crate::models::{Insurance, NewPatient, Patient, PatientUpdate};

    fn setup_store() -> HospitalStore {
        HospitalStore::open_in_memory().unwrap()
    }

    fn patient(name: &str) -> NewPatient {
        NewPatient::new(name.into(), 30, Insurance::General)
    }

    #[test]
    fn test_first_id_is_one() {
        let store = setup_store();
        let created = store.add_patient(patient("A")).unwrap();
        assert_eq!(created.id, 1);
    }

    #[test]
    fn test_id_is_max_plus_one() {
        let store = setup_store();
        let mut seeded = vec![
            patient("A").with_id(4),
            patient("B").with_id(9),
            patient("C").with_id(2),
        ];
        store.collection::<Patient>().save(&seeded).unwrap();

        let created = store.add_patient(patient("D")).unwrap();
        assert_eq!(created.id, 10);

        seeded.push(created);
        assert_eq!(store.list_patients().unwrap(), seeded);
    }

    #[test]
    fn test_id_reused_after_deleting_max() {
        let store = setup_store();
        store.add_patient(patient("A")).unwrap();
        let b = store.add_patient(patient("B")).unwrap();
        assert_eq!(b.id, 2);

        assert!(store.delete_patient(2).unwrap());
        let c = store.add_patient(patient("C")).unwrap();
        assert_eq!(c.id, 2);
    }

    #[test]
    fn test_update_missing_is_noop() {
        let store = setup_store();
        store.add_patient(patient("A")).unwrap();
        let key = store.collection::<Patient>().key().to_string();
        let before = store.backend().get(&key).unwrap();

        let updated = store
            .update_patient(
                99,
                PatientUpdate {
                    age: Some(1),
                    ..Default::default()
                },
            )
            .unwrap();

        assert!(!updated);
        assert_eq!(store.backend().get(&key).unwrap(), before);
    }

    #[test]
    fn test_delete_is_idempotent() {
        let store = setup_store();
        store.add_patient(patient("A")).unwrap();
        store.add_patient(patient("B")).unwrap();

        assert!(store.delete_patient(1).unwrap());
        let after_first = store.list_patients().unwrap();

        assert!(!store.delete_patient(1).unwrap());
        assert_eq!(store.list_patients().unwrap(), after_first);
        assert_eq!(after_first.len(), 1);
    }

    #[test]
    fn test_try_update_rejection_writes_nothing() {
        let store = setup_store();
        store.add_patient(patient("A")).unwrap();

        let result = store.collection::<Patient>().try_update(1, |p| {
            p.age = 99;
            Err(DbError::Constraint("nope".into()))
        });

        assert!(result.is_err());
        assert_eq!(store.get_patient(1).unwrap().unwrap().age, 30);
    }
}
