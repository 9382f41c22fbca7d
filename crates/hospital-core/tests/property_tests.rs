//! Property tests for id assignment, persistence and lookups.

use hospital_admin_core::db::{ForeignKey, HospitalStore};
use hospital_admin_core::models::{
    Doctor, Insurance, NewPatient, NewTransaction, Patient, Transaction,
};
use proptest::prelude::*;
use proptest::test_runner::Config;

fn doctor(id: u32) -> Doctor {
    Doctor {
        id,
        name: format!("dr. {}", id),
        specialty: "Umum".into(),
        practice_schedule: String::new(),
    }
}

proptest! {
    #![proptest_config(Config::with_cases(64))]

    #[test]
    fn next_id_is_max_plus_one(ids in prop::collection::vec(1_u32..10_000, 0..20)) {
        let store = HospitalStore::open_in_memory().unwrap();
        let doctors: Vec<Doctor> = ids.iter().copied().map(doctor).collect();
        store.collection::<Doctor>().save(&doctors).unwrap();

        let created = store
            .add_doctor(hospital_admin_core::models::NewDoctor::new("dr. Baru", "Anak"))
            .unwrap();
        let expected = ids.iter().copied().max().map_or(1, |max| max + 1);
        prop_assert_eq!(created.id, expected);
    }

    #[test]
    fn save_then_list_round_trips(
        names in prop::collection::vec("[A-Za-z ]{1,24}", 0..12),
        ages in prop::collection::vec(0_u32..120, 12),
    ) {
        let store = HospitalStore::open_in_memory().unwrap();
        let patients: Vec<Patient> = names
            .iter()
            .zip(&ages)
            .enumerate()
            .map(|(i, (name, age))| Patient {
                id: i as u32 + 1,
                full_name: name.clone(),
                national_id: String::new(),
                age: *age,
                address: String::new(),
                phone: String::new(),
                insurance: Insurance::Private,
                last_complaint: String::new(),
            })
            .collect();

        store.collection::<Patient>().save(&patients).unwrap();
        prop_assert_eq!(store.list_patients().unwrap(), patients);
    }

    #[test]
    fn foreign_key_lookup_keeps_stored_order(owners in prop::collection::vec(1_u32..4, 0..16)) {
        let store = HospitalStore::open_in_memory().unwrap();
        for i in 1..=3 {
            store
                .add_patient(NewPatient::new(format!("Pasien {}", i), 30, Insurance::Bpjs))
                .unwrap();
        }
        for (cost, owner) in owners.iter().enumerate() {
            store
                .add_transaction(NewTransaction::new(*owner, cost as u64))
                .unwrap();
        }

        for patient_id in 1..=3 {
            let found: Vec<u64> = store
                .collection::<Transaction>()
                .find_by_foreign_key(ForeignKey::Patient(patient_id))
                .unwrap()
                .into_iter()
                .map(|t| t.total_cost)
                .collect();
            let expected: Vec<u64> = owners
                .iter()
                .enumerate()
                .filter(|(_, owner)| **owner == patient_id)
                .map(|(cost, _)| cost as u64)
                .collect();
            prop_assert_eq!(found, expected);
        }
    }

    #[test]
    fn update_on_missing_id_changes_nothing(missing in 4_u32..1_000) {
        let store = HospitalStore::open_in_memory().unwrap();
        for i in 1..=3 {
            store
                .add_patient(NewPatient::new(format!("Pasien {}", i), 30, Insurance::Bpjs))
                .unwrap();
        }
        let before = store.backend().get("rs_pasien").unwrap();

        let updated = store
            .update_patient(missing, hospital_admin_core::models::PatientUpdate {
                age: Some(99),
                ..Default::default()
            })
            .unwrap();
        prop_assert!(!updated);
        prop_assert!(!store.delete_patient(missing).unwrap());
        prop_assert_eq!(store.backend().get("rs_pasien").unwrap(), before);
    }
}
