//! Registration repository and the verification / examination lifecycle.

use chrono::NaiveDate;

use super::{DbError, DbResult, ForeignKey, HospitalStore, Record};
use crate::config::REGISTRATIONS;
use crate::models::{
    Doctor, ExaminationFindings, Id, MedicalRecord, NewMedicalRecord, NewRegistration, Patient,
    Registration, RegistrationStatus, RegistrationUpdate,
};

impl Record for Registration {
    const COLLECTION: &'static str = REGISTRATIONS;
    const ENTITY: &'static str = "registration";

    fn id(&self) -> Id {
        self.id
    }

    fn references(&self, key: ForeignKey) -> bool {
        matches!(key, ForeignKey::Patient(id) if id == self.patient_id)
    }
}

/// An approved registration due today, with its patient.
#[derive(Debug, Clone, PartialEq)]
pub struct QueueEntry {
    pub registration: Registration,
    pub patient: Patient,
}

fn invalid_transition(
    id: Id,
    current: RegistrationStatus,
    from: RegistrationStatus,
    to: RegistrationStatus,
) -> DbError {
    tracing::warn!(
        registration_id = id,
        current = %current,
        from = %from,
        to = %to,
        "Registration transition rejected"
    );
    DbError::InvalidTransition {
        entity: Registration::ENTITY,
        id,
        current: current.to_string(),
        from: from.to_string(),
        to: to.to_string(),
    }
}

impl HospitalStore {
    /// List all registrations in stored order.
    pub fn list_registrations(&self) -> DbResult<Vec<Registration>> {
        self.collection::<Registration>().list()
    }

    pub fn get_registration(&self, id: Id) -> DbResult<Option<Registration>> {
        self.collection::<Registration>().find_by_id(id)
    }

    /// Registrations of one patient, in stored order.
    pub fn registrations_for_patient(&self, patient_id: Id) -> DbResult<Vec<Registration>> {
        self.collection::<Registration>()
            .find_by_foreign_key(ForeignKey::Patient(patient_id))
    }

    /// Registrations waiting for admin verification.
    pub fn pending_registrations(&self) -> DbResult<Vec<Registration>> {
        self.collection::<Registration>()
            .find_by(|r| r.status == RegistrationStatus::PendingVerification)
    }

    /// Submit a registration; it starts as pending verification.
    pub fn add_registration(&self, registration: NewRegistration) -> DbResult<Registration> {
        self.require::<Patient>(registration.patient_id)?;
        let created = self
            .collection::<Registration>()
            .insert_with(|id| registration.with_id(id))?;
        tracing::info!(
            registration_id = created.id,
            patient_id = created.patient_id,
            "Registration submitted"
        );
        Ok(created)
    }

    /// Shallow-merge non-status fields. Returns `false` if not found.
    pub fn update_registration(&self, id: Id, update: RegistrationUpdate) -> DbResult<bool> {
        Ok(self
            .collection::<Registration>()
            .update_with(id, |r| update.apply(r))?
            .is_some())
    }

    /// Move a registration from `from` to `to`.
    ///
    /// Fails with [`DbError::InvalidTransition`] if the stored status is not
    /// `from` or the lifecycle has no such edge, and with
    /// [`DbError::NotFound`] if the registration does not exist.
    pub fn transition_registration(
        &self,
        id: Id,
        from: RegistrationStatus,
        to: RegistrationStatus,
    ) -> DbResult<Registration> {
        let updated = self.collection::<Registration>().try_update(id, |r| {
            if r.status != from || !from.can_transition_to(to) {
                return Err(invalid_transition(id, r.status, from, to));
            }
            r.status = to;
            Ok(())
        })?;

        let updated = updated.ok_or_else(|| DbError::NotFound(format!("registration {}", id)))?;
        tracing::info!(registration_id = id, from = %from, to = %to, "Registration transitioned");
        Ok(updated)
    }

    /// Admin approves a pending registration.
    pub fn approve_registration(&self, id: Id) -> DbResult<Registration> {
        self.transition_registration(
            id,
            RegistrationStatus::PendingVerification,
            RegistrationStatus::Approved,
        )
    }

    /// Admin rejects a pending registration.
    pub fn reject_registration(&self, id: Id) -> DbResult<Registration> {
        self.transition_registration(
            id,
            RegistrationStatus::PendingVerification,
            RegistrationStatus::Rejected,
        )
    }

    /// Doctor records the examination for an approved registration.
    ///
    /// Adds the medical record for the registration's patient and marks the
    /// registration complete. Everything is validated before the first write.
    pub fn complete_examination(
        &self,
        registration_id: Id,
        doctor_id: Id,
        findings: ExaminationFindings,
    ) -> DbResult<MedicalRecord> {
        let registration = self
            .get_registration(registration_id)?
            .ok_or_else(|| DbError::NotFound(format!("registration {}", registration_id)))?;

        let (from, to) = (
            RegistrationStatus::Approved,
            RegistrationStatus::ExaminationComplete,
        );
        if registration.status != from {
            return Err(invalid_transition(registration_id, registration.status, from, to));
        }
        self.require::<Doctor>(doctor_id)?;

        let record = self.add_medical_record(NewMedicalRecord::new(
            registration.patient_id,
            doctor_id,
            findings,
        ))?;
        self.transition_registration(registration_id, from, to)?;
        Ok(record)
    }

    /// Approved registrations with a visit on `date`, earliest first.
    ///
    /// Registrations whose patient no longer exists are skipped.
    pub fn todays_queue(&self, date: NaiveDate) -> DbResult<Vec<QueueEntry>> {
        let patients = self.list_patients()?;
        let mut queue: Vec<QueueEntry> = self
            .collection::<Registration>()
            .find_by(|r| r.status == RegistrationStatus::Approved && r.visit_date() == date)?
            .into_iter()
            .filter_map(|registration| {
                let patient = patients
                    .iter()
                    .find(|p| p.id == registration.patient_id)?
                    .clone();
                Some(QueueEntry {
                    registration,
                    patient,
                })
            })
            .collect();
        queue.sort_by_key(|entry| entry.registration.visit_datetime);
        Ok(queue)
    }
}
