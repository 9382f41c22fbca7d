//! Medical records written by doctors after an examination.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::Id;

/// Outcome of one completed examination. Immutable once stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MedicalRecord {
    pub id: Id,
    #[serde(rename = "pasien_id")]
    pub patient_id: Id,
    #[serde(rename = "dokter_id")]
    pub doctor_id: Id,
    #[serde(rename = "tanggal_kunjungan", deserialize_with = "super::timestamp::deserialize")]
    pub visit_datetime: NaiveDateTime,
    #[serde(rename = "keluhan")]
    pub complaint: String,
    #[serde(rename = "hasil_pemeriksaan")]
    pub examination_result: String,
    #[serde(rename = "resep_obat")]
    pub prescription: String,
    #[serde(rename = "catatan_tambahan")]
    pub additional_notes: String,
}

/// What the doctor wrote down during the examination.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ExaminationFindings {
    pub complaint: String,
    pub examination_result: String,
    pub prescription: String,
    pub additional_notes: String,
}

/// Data for a new medical record (id assigned by the store).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewMedicalRecord {
    pub patient_id: Id,
    pub doctor_id: Id,
    pub visit_datetime: NaiveDateTime,
    pub findings: ExaminationFindings,
}

impl NewMedicalRecord {
    /// Record for an examination happening now.
    pub fn new(patient_id: Id, doctor_id: Id, findings: ExaminationFindings) -> Self {
        Self {
            patient_id,
            doctor_id,
            visit_datetime: super::local_now(),
            findings,
        }
    }

    pub(crate) fn with_id(self, id: Id) -> MedicalRecord {
        MedicalRecord {
            id,
            patient_id: self.patient_id,
            doctor_id: self.doctor_id,
            visit_datetime: self.visit_datetime,
            complaint: self.findings.complaint,
            examination_result: self.findings.examination_result,
            prescription: self.findings.prescription,
            additional_notes: self.findings.additional_notes,
        }
    }
}
