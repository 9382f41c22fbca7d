//! Doctor models.

use serde::{Deserialize, Serialize};

use super::Id;

/// A practising doctor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Doctor {
    pub id: Id,
    #[serde(rename = "nama")]
    pub name: String,
    #[serde(rename = "spesialis")]
    pub specialty: String,
    /// Free-text schedule, e.g. "Senin-Jumat: 08:00-15:00"
    #[serde(rename = "jadwal_praktek")]
    pub practice_schedule: String,
}

/// Data for a new doctor (id assigned by the store).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewDoctor {
    pub name: String,
    pub specialty: String,
    pub practice_schedule: String,
}

impl NewDoctor {
    pub fn new(name: impl Into<String>, specialty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            specialty: specialty.into(),
            practice_schedule: String::new(),
        }
    }

    pub(crate) fn with_id(self, id: Id) -> Doctor {
        Doctor {
            id,
            name: self.name,
            specialty: self.specialty,
            practice_schedule: self.practice_schedule,
        }
    }
}

/// Partial update for a doctor.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DoctorUpdate {
    pub name: Option<String>,
    pub specialty: Option<String>,
    pub practice_schedule: Option<String>,
}

impl DoctorUpdate {
    pub fn apply(self, doctor: &mut Doctor) {
        if let Some(v) = self.name {
            doctor.name = v;
        }
        if let Some(v) = self.specialty {
            doctor.specialty = v;
        }
        if let Some(v) = self.practice_schedule {
            doctor.practice_schedule = v;
        }
    }
}
