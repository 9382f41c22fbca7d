//! Patient repository operations.

use strsim::jaro_winkler;

use super::{DbResult, HospitalStore, Record};
use crate::config::PATIENTS;
use crate::models::{Id, NewPatient, Patient, PatientUpdate};

/// Minimum Jaro-Winkler similarity for a typo-tolerant name match.
const FUZZY_NAME_THRESHOLD: f64 = 0.85;

impl Record for Patient {
    const COLLECTION: &'static str = PATIENTS;
    const ENTITY: &'static str = "patient";

    fn id(&self) -> Id {
        self.id
    }
}

impl HospitalStore {
    /// List all patients in stored order.
    pub fn list_patients(&self) -> DbResult<Vec<Patient>> {
        self.collection::<Patient>().list()
    }

    /// Get a patient by ID.
    pub fn get_patient(&self, id: Id) -> DbResult<Option<Patient>> {
        self.collection::<Patient>().find_by_id(id)
    }

    /// Insert a new patient.
    pub fn add_patient(&self, patient: NewPatient) -> DbResult<Patient> {
        let created = self
            .collection::<Patient>()
            .insert_with(|id| patient.with_id(id))?;
        tracing::info!(patient_id = created.id, "Patient added");
        Ok(created)
    }

    /// Shallow-merge `update` into a patient. Returns `false` if not found.
    pub fn update_patient(&self, id: Id, update: PatientUpdate) -> DbResult<bool> {
        Ok(self
            .collection::<Patient>()
            .update_with(id, |p| update.apply(p))?
            .is_some())
    }

    /// Delete a patient. Linked accounts and records are left in place.
    pub fn delete_patient(&self, id: Id) -> DbResult<bool> {
        let deleted = self.collection::<Patient>().delete(id)?;
        if deleted {
            tracing::info!(patient_id = id, "Patient deleted");
        }
        Ok(deleted)
    }

    /// Search patients by name or last complaint.
    ///
    /// Case-insensitive substring matches come first in stored order,
    /// followed by near-miss name matches ranked by similarity.
    pub fn search_patients(&self, query: &str, limit: usize) -> DbResult<Vec<Patient>> {
        let patients = self.list_patients()?;
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Ok(patients.into_iter().take(limit).collect());
        }

        let (mut results, rest): (Vec<Patient>, Vec<Patient>) =
            patients.into_iter().partition(|p| p.matches_text(&query));

        let mut fuzzy: Vec<(f64, Patient)> = rest
            .into_iter()
            .filter_map(|p| {
                let score = name_similarity(&query, &p.full_name);
                (score >= FUZZY_NAME_THRESHOLD).then_some((score, p))
            })
            .collect();
        fuzzy.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));

        results.extend(fuzzy.into_iter().map(|(_, p)| p));
        results.truncate(limit);
        Ok(results)
    }
}

/// Best similarity between `query` and the full name or any single word of it.
fn name_similarity(query: &str, name: &str) -> f64 {
    let name = name.to_lowercase();
    name.split_whitespace()
        .map(|word| jaro_winkler(query, word))
        .fold(jaro_winkler(query, &name), f64::max)
}
