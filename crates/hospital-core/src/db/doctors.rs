//! Doctor repository operations and login provisioning.

use super::{DbError, DbResult, ForeignKey, HospitalStore, Record};
use crate::config::DOCTORS;
use crate::models::{Credentials, Doctor, DoctorUpdate, Id, NewDoctor, NewUser, User};

impl Record for Doctor {
    const COLLECTION: &'static str = DOCTORS;
    const ENTITY: &'static str = "doctor";

    fn id(&self) -> Id {
        self.id
    }
}

/// Result of [`HospitalStore::create_doctor_with_account`].
#[derive(Debug, Clone, PartialEq)]
pub struct ProvisionedDoctor {
    pub doctor: Doctor,
    /// Login created alongside the doctor, if credentials were given
    pub account: Option<User>,
}

impl HospitalStore {
    /// List all doctors in stored order.
    pub fn list_doctors(&self) -> DbResult<Vec<Doctor>> {
        self.collection::<Doctor>().list()
    }

    /// Get a doctor by ID.
    pub fn get_doctor(&self, id: Id) -> DbResult<Option<Doctor>> {
        self.collection::<Doctor>().find_by_id(id)
    }

    /// Insert a new doctor without a login.
    pub fn add_doctor(&self, doctor: NewDoctor) -> DbResult<Doctor> {
        let created = self
            .collection::<Doctor>()
            .insert_with(|id| doctor.with_id(id))?;
        tracing::info!(doctor_id = created.id, "Doctor added");
        Ok(created)
    }

    /// Shallow-merge `update` into a doctor. The linked login is untouched.
    pub fn update_doctor(&self, id: Id, update: DoctorUpdate) -> DbResult<bool> {
        Ok(self
            .collection::<Doctor>()
            .update_with(id, |d| update.apply(d))?
            .is_some())
    }

    /// Delete a doctor together with every login linked to it.
    pub fn delete_doctor(&self, id: Id) -> DbResult<bool> {
        let deleted = self.collection::<Doctor>().delete(id)?;
        if deleted {
            let accounts = self
                .collection::<User>()
                .delete_where(|u| u.references(ForeignKey::Doctor(id)))?;
            tracing::info!(doctor_id = id, accounts, "Doctor deleted");
        }
        Ok(deleted)
    }

    /// Create a doctor and, when `credentials` carries a username, a doctor
    /// login pointing at it.
    ///
    /// A blank password falls back to the configured default. A taken
    /// username is rejected before anything is written.
    pub fn create_doctor_with_account(
        &self,
        doctor: NewDoctor,
        credentials: Option<Credentials>,
    ) -> DbResult<ProvisionedDoctor> {
        let credentials = credentials.and_then(|c| {
            let username = c.username.trim().to_string();
            (!username.is_empty()).then(|| {
                let password = match c.password.trim() {
                    "" => self.config().default_doctor_password.clone(),
                    p => p.to_string(),
                };
                Credentials::new(username, password)
            })
        });

        if let Some(c) = &credentials {
            if self.username_taken(&c.username)? {
                return Err(DbError::DuplicateUsername(c.username.clone()));
            }
        }

        let doctor = self.add_doctor(doctor)?;
        let account = match credentials {
            Some(c) => {
                let user = self.add_user(NewUser::doctor(c.username, c.password, doctor.id))?;
                tracing::info!(doctor_id = doctor.id, user_id = user.id, "Doctor login provisioned");
                Some(user)
            }
            None => None,
        };

        Ok(ProvisionedDoctor { doctor, account })
    }
}
