//! Visit registrations and their verification lifecycle.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::{Id, ParseLabelError};

/// Registration status.
///
/// ```text
/// PendingVerification ──► Approved ──► ExaminationComplete
///          │
///          └────────────► Rejected
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum RegistrationStatus {
    /// Submitted by the patient, waiting for admin verification
    #[serde(rename = "Menunggu Verifikasi")]
    PendingVerification,
    /// Verified by admin, patient may be examined
    #[serde(rename = "Disetujui")]
    Approved,
    /// Declined by admin
    #[serde(rename = "Ditolak")]
    Rejected,
    /// Doctor has recorded the examination
    #[serde(rename = "Selesai Diperiksa")]
    ExaminationComplete,
}

impl RegistrationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RegistrationStatus::PendingVerification => "Menunggu Verifikasi",
            RegistrationStatus::Approved => "Disetujui",
            RegistrationStatus::Rejected => "Ditolak",
            RegistrationStatus::ExaminationComplete => "Selesai Diperiksa",
        }
    }

    /// Whether `self -> next` is an edge of the lifecycle.
    pub fn can_transition_to(&self, next: RegistrationStatus) -> bool {
        use RegistrationStatus::*;
        matches!(
            (self, next),
            (PendingVerification, Approved)
                | (PendingVerification, Rejected)
                | (Approved, ExaminationComplete)
        )
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            RegistrationStatus::Rejected | RegistrationStatus::ExaminationComplete
        )
    }
}

impl fmt::Display for RegistrationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RegistrationStatus {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Menunggu Verifikasi" | "PendingVerification" => {
                Ok(RegistrationStatus::PendingVerification)
            }
            "Disetujui" | "Approved" => Ok(RegistrationStatus::Approved),
            "Ditolak" | "Rejected" => Ok(RegistrationStatus::Rejected),
            "Selesai Diperiksa" | "ExaminationComplete" => {
                Ok(RegistrationStatus::ExaminationComplete)
            }
            _ => Err(ParseLabelError::new("registration status", s)),
        }
    }
}

/// A patient's request to be seen at a department.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Registration {
    pub id: Id,
    #[serde(rename = "pasien_id")]
    pub patient_id: Id,
    #[serde(rename = "tanggal_daftar", deserialize_with = "super::timestamp::deserialize")]
    pub registration_date: NaiveDateTime,
    #[serde(rename = "jadwal_kunjungan", deserialize_with = "super::timestamp::deserialize")]
    pub visit_datetime: NaiveDateTime,
    /// Polyclinic, e.g. "Poli Umum"
    #[serde(rename = "tujuan_poli")]
    pub target_department: String,
    #[serde(rename = "status_pendaftaran")]
    pub status: RegistrationStatus,
}

impl Registration {
    pub fn visit_date(&self) -> NaiveDate {
        self.visit_datetime.date()
    }
}

/// Data for a new registration. New registrations always start as
/// [`RegistrationStatus::PendingVerification`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewRegistration {
    pub patient_id: Id,
    pub registration_date: NaiveDateTime,
    pub visit_datetime: NaiveDateTime,
    pub target_department: String,
}

impl NewRegistration {
    /// Registration submitted now for a visit at `visit_datetime`.
    pub fn new(patient_id: Id, visit_datetime: NaiveDateTime, target_department: String) -> Self {
        Self {
            patient_id,
            registration_date: super::local_now(),
            visit_datetime,
            target_department,
        }
    }

    pub(crate) fn with_id(self, id: Id) -> Registration {
        Registration {
            id,
            patient_id: self.patient_id,
            registration_date: self.registration_date,
            visit_datetime: self.visit_datetime,
            target_department: self.target_department,
            status: RegistrationStatus::PendingVerification,
        }
    }
}

/// Partial update for a registration. Status is changed only through
/// validated transitions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegistrationUpdate {
    pub visit_datetime: Option<NaiveDateTime>,
    pub target_department: Option<String>,
}

impl RegistrationUpdate {
    pub fn apply(self, registration: &mut Registration) {
        if let Some(v) = self.visit_datetime {
            registration.visit_datetime = v;
        }
        if let Some(v) = self.target_department {
            registration.target_department = v;
        }
    }
}
