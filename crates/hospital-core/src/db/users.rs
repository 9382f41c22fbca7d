//! User accounts, authentication and patient self-registration.

use super::{DbError, DbResult, ForeignKey, HospitalStore, Record};
use crate::config::USERS;
use crate::models::{Credentials, Doctor, Id, NewPatient, NewUser, Patient, User, UserUpdate};

impl Record for User {
    const COLLECTION: &'static str = USERS;
    const ENTITY: &'static str = "user";

    fn id(&self) -> Id {
        self.id
    }

    fn references(&self, key: ForeignKey) -> bool {
        match key {
            ForeignKey::Patient(id) => self.patient_id == Some(id),
            ForeignKey::Doctor(id) => self.doctor_id == Some(id),
            _ => false,
        }
    }
}

/// Sign-up form submitted from the patient portal.
#[derive(Debug, Clone, PartialEq)]
pub struct SelfRegistration {
    pub patient: NewPatient,
    pub credentials: Credentials,
}

impl HospitalStore {
    /// List all accounts in stored order.
    pub fn list_users(&self) -> DbResult<Vec<User>> {
        self.collection::<User>().list()
    }

    pub fn get_user(&self, id: Id) -> DbResult<Option<User>> {
        self.collection::<User>().find_by_id(id)
    }

    /// Accounts linked to `key` (a patient or a doctor).
    pub fn users_by_foreign_key(&self, key: ForeignKey) -> DbResult<Vec<User>> {
        self.collection::<User>().find_by_foreign_key(key)
    }

    /// Whether any account already uses `username`, ignoring case.
    pub fn username_taken(&self, username: &str) -> DbResult<bool> {
        Ok(self
            .list_users()?
            .iter()
            .any(|u| u.username_eq_ignore_case(username)))
    }

    /// Insert an account. Linked patient / doctor must exist.
    ///
    /// Username uniqueness is not checked here; the sign-up and provisioning
    /// entry points do that.
    pub fn add_user(&self, user: NewUser) -> DbResult<User> {
        if let Some(patient_id) = user.patient_id {
            self.require::<Patient>(patient_id)?;
        }
        if let Some(doctor_id) = user.doctor_id {
            self.require::<Doctor>(doctor_id)?;
        }

        self.collection::<User>().insert_with(|id| User {
            id,
            username: user.username,
            password: user.password,
            role: user.role,
            patient_id: user.patient_id,
            doctor_id: user.doctor_id,
        })
    }

    pub fn update_user(&self, id: Id, update: UserUpdate) -> DbResult<bool> {
        Ok(self
            .collection::<User>()
            .update_with(id, |u| update.apply(u))?
            .is_some())
    }

    pub fn delete_user(&self, id: Id) -> DbResult<bool> {
        self.collection::<User>().delete(id)
    }

    /// Find the account whose username and password both match exactly.
    pub fn authenticate(&self, username: &str, password: &str) -> DbResult<Option<User>> {
        Ok(self
            .list_users()?
            .into_iter()
            .find(|u| u.username == username && u.password == password))
    }

    /// Create a patient and its login in one step.
    ///
    /// The username is checked case-insensitively against every existing
    /// account first; on a clash nothing is written.
    pub fn register_patient(&self, registration: SelfRegistration) -> DbResult<(Patient, User)> {
        let SelfRegistration {
            patient,
            credentials,
        } = registration;

        let username = credentials.username.trim().to_string();
        if username.is_empty() {
            return Err(DbError::Constraint("username must not be empty".into()));
        }
        if self.username_taken(&username)? {
            tracing::warn!(username = %username, "Sign-up rejected: username taken");
            return Err(DbError::DuplicateUsername(username));
        }

        let patient = self.add_patient(patient)?;
        let user = self.add_user(NewUser::patient(username, credentials.password, patient.id))?;
        tracing::info!(patient_id = patient.id, user_id = user.id, "Patient self-registered");
        Ok((patient, user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Insurance, NewDoctor, Role};

    fn setup_store() -> HospitalStore {
        HospitalStore::open_in_memory().unwrap()
    }

    fn signup(username: &str) -> SelfRegistration {
        SelfRegistration {
            patient: NewPatient::new("Budi Santoso".into(), 45, Insurance::Private),
            credentials: Credentials::new(username, "rahasia"),
        }
    }

    #[test]
    fn test_register_patient_links_account() {
        let store = setup_store();

        let (patient, user) = store.register_patient(signup("budi")).unwrap();
        assert_eq!(user.role, Role::Patient);
        assert_eq!(user.patient_id, Some(patient.id));
        assert_eq!(
            store.users_by_foreign_key(ForeignKey::Patient(patient.id)).unwrap(),
            vec![user]
        );
    }

    #[test]
    fn test_register_duplicate_username_any_case() {
        let store = setup_store();
        store.register_patient(signup("budi")).unwrap();

        let err = store.register_patient(signup("BUDI")).unwrap_err();
        assert!(matches!(err, DbError::DuplicateUsername(ref name) if name == "BUDI"));
        assert_eq!(store.list_patients().unwrap().len(), 1);
        assert_eq!(store.list_users().unwrap().len(), 1);
    }

    #[test]
    fn test_register_blank_username() {
        let store = setup_store();
        let err = store.register_patient(signup("   ")).unwrap_err();
        assert!(matches!(err, DbError::Constraint(_)));
        assert!(store.list_patients().unwrap().is_empty());
    }

    #[test]
    fn test_authenticate_is_exact() {
        let store = setup_store();
        store.register_patient(signup("budi")).unwrap();

        assert!(store.authenticate("budi", "rahasia").unwrap().is_some());
        assert!(store.authenticate("Budi", "rahasia").unwrap().is_none());
        assert!(store.authenticate("budi", "RAHASIA").unwrap().is_none());
        assert!(store.authenticate("nobody", "rahasia").unwrap().is_none());
    }

    #[test]
    fn test_add_user_requires_linked_record() {
        let store = setup_store();

        let err = store
            .add_user(NewUser::patient("ghost".into(), "1".into(), 7))
            .unwrap_err();
        assert!(matches!(err, DbError::Constraint(_)));

        let err = store
            .add_user(NewUser::doctor("ghost".into(), "1".into(), 7))
            .unwrap_err();
        assert!(matches!(err, DbError::Constraint(_)));

        let doctor = store.add_doctor(NewDoctor::new("dr. A", "Umum")).unwrap();
        assert!(store
            .add_user(NewUser::doctor("dra".into(), "1".into(), doctor.id))
            .is_ok());
    }

    #[test]
    fn test_update_user_password() {
        let store = setup_store();
        let user = store
            .add_user(NewUser::admin("kasir1".into(), "123".into()))
            .unwrap();

        store
            .update_user(
                user.id,
                UserUpdate {
                    password: Some("baru".into()),
                    ..Default::default()
                },
            )
            .unwrap();

        assert!(store.authenticate("kasir1", "123").unwrap().is_none());
        assert!(store.authenticate("kasir1", "baru").unwrap().is_some());
    }
}
