//! Medical record repository. Records are append-only.

use std::cmp::Reverse;

use super::{DbResult, ForeignKey, HospitalStore, Record};
use crate::config::MEDICAL_RECORDS;
use crate::models::{Doctor, Id, MedicalRecord, NewMedicalRecord, Patient};

impl Record for MedicalRecord {
    const COLLECTION: &'static str = MEDICAL_RECORDS;
    const ENTITY: &'static str = "medical record";

    fn id(&self) -> Id {
        self.id
    }

    fn references(&self, key: ForeignKey) -> bool {
        match key {
            ForeignKey::Patient(id) => self.patient_id == id,
            ForeignKey::Doctor(id) => self.doctor_id == id,
            _ => false,
        }
    }
}

impl HospitalStore {
    pub fn list_medical_records(&self) -> DbResult<Vec<MedicalRecord>> {
        self.collection::<MedicalRecord>().list()
    }

    pub fn get_medical_record(&self, id: Id) -> DbResult<Option<MedicalRecord>> {
        self.collection::<MedicalRecord>().find_by_id(id)
    }

    /// Records of one patient, in stored order.
    pub fn medical_records_for_patient(&self, patient_id: Id) -> DbResult<Vec<MedicalRecord>> {
        self.collection::<MedicalRecord>()
            .find_by_foreign_key(ForeignKey::Patient(patient_id))
    }

    /// Records written by one doctor, in stored order.
    pub fn medical_records_by_doctor(&self, doctor_id: Id) -> DbResult<Vec<MedicalRecord>> {
        self.collection::<MedicalRecord>()
            .find_by_foreign_key(ForeignKey::Doctor(doctor_id))
    }

    /// A patient's records, most recent visit first.
    pub fn patient_history(&self, patient_id: Id) -> DbResult<Vec<MedicalRecord>> {
        let mut records = self.medical_records_for_patient(patient_id)?;
        records.sort_by_key(|r| Reverse(r.visit_datetime));
        Ok(records)
    }

    /// Store a medical record. Patient and doctor must exist.
    pub fn add_medical_record(&self, record: NewMedicalRecord) -> DbResult<MedicalRecord> {
        self.require::<Patient>(record.patient_id)?;
        self.require::<Doctor>(record.doctor_id)?;

        let created = self
            .collection::<MedicalRecord>()
            .insert_with(|id| record.with_id(id))?;
        tracing::info!(
            record_id = created.id,
            patient_id = created.patient_id,
            doctor_id = created.doctor_id,
            "Medical record added"
        );
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbError;
    use crate::models::{ExaminationFindings, Insurance, NewDoctor, NewPatient};
    use chrono::NaiveDateTime;

    fn setup_store() -> HospitalStore {
        HospitalStore::open_in_memory().unwrap()
    }

    fn record_at(patient_id: Id, doctor_id: Id, when: &str) -> NewMedicalRecord {
        let mut record = NewMedicalRecord::new(
            patient_id,
            doctor_id,
            ExaminationFindings {
                complaint: "Nyeri sendi".into(),
                examination_result: "Peradangan ringan".into(),
                prescription: "Ibuprofen 400mg 3x1".into(),
                additional_notes: String::new(),
            },
        );
        record.visit_datetime = NaiveDateTime::parse_from_str(when, "%Y-%m-%dT%H:%M:%S").unwrap();
        record
    }

    #[test]
    fn test_lookups_by_patient_and_doctor() {
        let store = setup_store();
        let budi = store
            .add_patient(NewPatient::new("Budi".into(), 45, Insurance::Private))
            .unwrap();
        let siti = store
            .add_patient(NewPatient::new("Siti".into(), 32, Insurance::General))
            .unwrap();
        let andi = store.add_doctor(NewDoctor::new("dr. Andi", "Umum")).unwrap();
        let budi_dr = store.add_doctor(NewDoctor::new("dr. Budi", "Penyakit Dalam")).unwrap();

        let first = store
            .add_medical_record(record_at(budi.id, andi.id, "2025-11-20T09:00:00"))
            .unwrap();
        store
            .add_medical_record(record_at(siti.id, budi_dr.id, "2025-11-21T09:00:00"))
            .unwrap();
        let third = store
            .add_medical_record(record_at(budi.id, budi_dr.id, "2025-11-24T09:00:00"))
            .unwrap();

        let for_budi = store.medical_records_for_patient(budi.id).unwrap();
        assert_eq!(for_budi, vec![first.clone(), third.clone()]);

        let history = store.patient_history(budi.id).unwrap();
        assert_eq!(history, vec![third, first]);

        assert_eq!(store.medical_records_by_doctor(budi_dr.id).unwrap().len(), 2);
        assert_eq!(store.medical_records_by_doctor(andi.id).unwrap().len(), 1);
    }

    #[test]
    fn test_add_requires_patient_and_doctor() {
        let store = setup_store();
        let patient = store
            .add_patient(NewPatient::new("Budi".into(), 45, Insurance::Private))
            .unwrap();

        let err = store
            .add_medical_record(record_at(patient.id, 1, "2025-11-20T09:00:00"))
            .unwrap_err();
        assert!(matches!(err, DbError::Constraint(_)));
        assert!(store.list_medical_records().unwrap().is_empty());
    }
}
