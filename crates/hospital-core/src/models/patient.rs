//! Patient models.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{Id, ParseLabelError};

/// Insurance coverage of a patient.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Insurance {
    /// National health insurance
    #[serde(rename = "BPJS")]
    Bpjs,
    /// Private insurer
    Private,
    /// Self-paying
    #[serde(rename = "Umum")]
    General,
}

impl Insurance {
    pub fn as_str(&self) -> &'static str {
        match self {
            Insurance::Bpjs => "BPJS",
            Insurance::Private => "Private",
            Insurance::General => "Umum",
        }
    }
}

impl fmt::Display for Insurance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Insurance {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "bpjs" => Ok(Insurance::Bpjs),
            "private" => Ok(Insurance::Private),
            "umum" | "general" => Ok(Insurance::General),
            _ => Err(ParseLabelError::new("insurance", s)),
        }
    }
}

/// A registered patient.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Patient {
    pub id: Id,
    /// Full name
    #[serde(rename = "nama")]
    pub full_name: String,
    /// National identity number (NIK)
    #[serde(rename = "nik")]
    pub national_id: String,
    #[serde(rename = "umur")]
    pub age: u32,
    #[serde(rename = "alamat")]
    pub address: String,
    #[serde(rename = "no_hp")]
    pub phone: String,
    #[serde(rename = "asuransi")]
    pub insurance: Insurance,
    /// Most recent complaint, pre-filled into the next examination
    #[serde(rename = "keluhan_terakhir")]
    pub last_complaint: String,
}

impl Patient {
    /// Whether `query` (already lowercased) appears in the name or complaint.
    pub fn matches_text(&self, query: &str) -> bool {
        self.full_name.to_lowercase().contains(query)
            || self.last_complaint.to_lowercase().contains(query)
    }
}

/// Data for a new patient (id assigned by the store).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewPatient {
    pub full_name: String,
    pub national_id: String,
    pub age: u32,
    pub address: String,
    pub phone: String,
    pub insurance: Insurance,
    pub last_complaint: String,
}

impl NewPatient {
    /// Create with the required fields; the rest start empty.
    pub fn new(full_name: String, age: u32, insurance: Insurance) -> Self {
        Self {
            full_name,
            national_id: String::new(),
            age,
            address: String::new(),
            phone: String::new(),
            insurance,
            last_complaint: String::new(),
        }
    }

    pub(crate) fn with_id(self, id: Id) -> Patient {
        Patient {
            id,
            full_name: self.full_name,
            national_id: self.national_id,
            age: self.age,
            address: self.address,
            phone: self.phone,
            insurance: self.insurance,
            last_complaint: self.last_complaint,
        }
    }
}

/// Partial update for a patient; `None` fields are left as stored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatientUpdate {
    pub full_name: Option<String>,
    pub national_id: Option<String>,
    pub age: Option<u32>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub insurance: Option<Insurance>,
    pub last_complaint: Option<String>,
}

impl PatientUpdate {
    /// Shallow-merge the set fields over `patient`.
    pub fn apply(self, patient: &mut Patient) {
        if let Some(v) = self.full_name {
            patient.full_name = v;
        }
        if let Some(v) = self.national_id {
            patient.national_id = v;
        }
        if let Some(v) = self.age {
            patient.age = v;
        }
        if let Some(v) = self.address {
            patient.address = v;
        }
        if let Some(v) = self.phone {
            patient.phone = v;
        }
        if let Some(v) = self.insurance {
            patient.insurance = v;
        }
        if let Some(v) = self.last_complaint {
            patient.last_complaint = v;
        }
    }
}
