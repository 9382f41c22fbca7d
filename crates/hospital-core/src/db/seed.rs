//! Explicit store initialization from a set of default records.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::{DbResult, HospitalStore, Record};
use crate::models::{
    Doctor, Insurance, MedicalRecord, NewLineItem, Patient, PaymentMethod, Registration,
    RegistrationStatus, Role, Transaction, TransactionLineItem, TransactionStatus, User,
};

/// Default records written by [`HospitalStore::initialize`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSeed {
    pub users: Vec<User>,
    pub patients: Vec<Patient>,
    pub doctors: Vec<Doctor>,
    pub registrations: Vec<Registration>,
    pub medical_records: Vec<MedicalRecord>,
    pub transactions: Vec<Transaction>,
    pub line_items: Vec<TransactionLineItem>,
}

impl HospitalStore {
    /// Overwrite every collection with the seed's records.
    pub fn initialize(&self, seed: &StoreSeed) -> DbResult<()> {
        self.collection::<User>().save(&seed.users)?;
        self.collection::<Patient>().save(&seed.patients)?;
        self.collection::<Doctor>().save(&seed.doctors)?;
        self.collection::<Registration>().save(&seed.registrations)?;
        self.collection::<MedicalRecord>().save(&seed.medical_records)?;
        self.collection::<Transaction>().save(&seed.transactions)?;
        self.collection::<TransactionLineItem>().save(&seed.line_items)?;
        tracing::info!(
            users = seed.users.len(),
            patients = seed.patients.len(),
            doctors = seed.doctors.len(),
            "Store initialized"
        );
        Ok(())
    }

    /// Seed only the collections that have never been written.
    ///
    /// Returns how many collections were filled.
    pub fn initialize_missing(&self, seed: &StoreSeed) -> DbResult<usize> {
        let filled = [
            self.seed_if_absent(&seed.users)?,
            self.seed_if_absent(&seed.patients)?,
            self.seed_if_absent(&seed.doctors)?,
            self.seed_if_absent(&seed.registrations)?,
            self.seed_if_absent(&seed.medical_records)?,
            self.seed_if_absent(&seed.transactions)?,
            self.seed_if_absent(&seed.line_items)?,
        ]
        .into_iter()
        .filter(|written| *written)
        .count();
        tracing::info!(collections = filled, "Missing collections seeded");
        Ok(filled)
    }

    fn seed_if_absent<T: Record>(&self, records: &[T]) -> DbResult<bool> {
        let collection = self.collection::<T>();
        if self.backend.get(collection.key())?.is_some() {
            return Ok(false);
        }
        collection.save(records)?;
        Ok(true)
    }
}

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .and_then(|date| date.and_hms_opt(h, min, 0))
        .unwrap_or_default()
}

fn user(id: u32, username: &str, role: Role, linked: Option<u32>) -> User {
    User {
        id,
        username: username.to_string(),
        password: "123".to_string(),
        role,
        patient_id: linked.filter(|_| role == Role::Patient),
        doctor_id: linked.filter(|_| role == Role::Doctor),
    }
}

impl StoreSeed {
    /// Demo data: three patients, two doctors and their history.
    pub fn demo() -> Self {
        let users = vec![
            user(1, "pasien1", Role::Patient, Some(1)),
            user(2, "pasien2", Role::Patient, Some(2)),
            user(3, "pasien3", Role::Patient, Some(3)),
            user(4, "dokter1", Role::Doctor, Some(1)),
            user(5, "dokter2", Role::Doctor, Some(2)),
            user(6, "admin1", Role::Admin, None),
            user(7, "rahmat", Role::Patient, Some(1)),
            user(8, "siti", Role::Patient, Some(2)),
            user(9, "budi", Role::Patient, Some(3)),
            user(10, "drandi", Role::Doctor, Some(1)),
            user(11, "drbudi", Role::Doctor, Some(2)),
            user(12, "admin2", Role::Admin, None),
            user(13, "kasir1", Role::Admin, None),
        ];

        let patients = vec![
            Patient {
                id: 1,
                full_name: "Rahmat Hidayat".into(),
                national_id: "3201012345678901".into(),
                age: 25,
                address: "Jl. Mawar No. 10, Jakarta Selatan".into(),
                phone: "081234567890".into(),
                insurance: Insurance::Bpjs,
                last_complaint: "Demam dan batuk".into(),
            },
            Patient {
                id: 2,
                full_name: "Siti Aminah".into(),
                national_id: "3201012345678902".into(),
                age: 32,
                address: "Jl. Melati No. 5, Jakarta Pusat".into(),
                phone: "081298765432".into(),
                insurance: Insurance::General,
                last_complaint: "Sakit kepala berkepanjangan".into(),
            },
            Patient {
                id: 3,
                full_name: "Budi Santoso".into(),
                national_id: "3201012345678903".into(),
                age: 45,
                address: "Jl. Anggrek No. 15, Jakarta Timur".into(),
                phone: "081234509876".into(),
                insurance: Insurance::Private,
                last_complaint: "Nyeri sendi".into(),
            },
        ];

        let doctors = vec![
            Doctor {
                id: 1,
                name: "dr. Andi Pratama".into(),
                specialty: "Umum".into(),
                practice_schedule: "Senin-Jumat: 08:00-15:00".into(),
            },
            Doctor {
                id: 2,
                name: "dr. Budi Setiawan, Sp.PD".into(),
                specialty: "Penyakit Dalam".into(),
                practice_schedule: "Senin-Kamis: 10:00-14:00".into(),
            },
        ];

        let registrations = vec![
            Registration {
                id: 1,
                patient_id: 1,
                registration_date: at(2025, 11, 25, 8, 30),
                visit_datetime: at(2025, 11, 25, 10, 0),
                target_department: "Poli Umum".into(),
                status: RegistrationStatus::PendingVerification,
            },
            Registration {
                id: 2,
                patient_id: 2,
                registration_date: at(2025, 11, 24, 9, 0),
                visit_datetime: at(2025, 11, 25, 11, 0),
                target_department: "Poli Penyakit Dalam".into(),
                status: RegistrationStatus::Approved,
            },
            Registration {
                id: 3,
                patient_id: 3,
                registration_date: at(2025, 11, 23, 14, 0),
                visit_datetime: at(2025, 11, 24, 9, 0),
                target_department: "Poli Umum".into(),
                status: RegistrationStatus::ExaminationComplete,
            },
        ];

        let medical_records = vec![
            MedicalRecord {
                id: 1,
                patient_id: 3,
                doctor_id: 1,
                visit_datetime: at(2025, 11, 24, 9, 30),
                complaint: "Nyeri sendi pada lutut kanan".into(),
                examination_result: "Peradangan ringan pada sendi lutut, tanpa kerusakan struktural."
                    .into(),
                prescription: "Ibuprofen 400mg 3x1, Vitamin D 1000IU 1x1".into(),
                additional_notes: "Kurangi aktivitas berat, kompres dingin, kontrol 1 minggu".into(),
            },
            MedicalRecord {
                id: 2,
                patient_id: 2,
                doctor_id: 2,
                visit_datetime: at(2025, 11, 20, 11, 0),
                complaint: "Sakit kepala berkepanjangan, mual".into(),
                examination_result: "Tekanan darah 140/90, tension headache dengan hipertensi ringan."
                    .into(),
                prescription: "Paracetamol 500mg 3x1, Amlodipine 5mg 1x1".into(),
                additional_notes: "Kurangi stres, istirahat cukup, diet rendah garam".into(),
            },
        ];

        let transactions = vec![
            Transaction {
                id: 1,
                patient_id: 1,
                registration_id: Some(1),
                total_cost: 150_000,
                payment_method: PaymentMethod::Cash,
                status: TransactionStatus::ReadyToPay,
                date: at(2025, 11, 25, 8, 30),
            },
            Transaction {
                id: 2,
                patient_id: 2,
                registration_id: Some(2),
                total_cost: 250_000,
                payment_method: PaymentMethod::Qris,
                status: TransactionStatus::Paid,
                date: at(2025, 11, 24, 9, 0),
            },
            Transaction {
                id: 3,
                patient_id: 3,
                registration_id: Some(3),
                total_cost: 320_000,
                payment_method: PaymentMethod::BankTransfer,
                status: TransactionStatus::Paid,
                date: at(2025, 11, 24, 9, 0),
            },
        ];

        let line_items = [
            (2, "Paracetamol 500mg", 5_000, 10),
            (2, "Amlodipine 5mg", 8_000, 10),
            (3, "Ibuprofen 400mg", 6_000, 15),
            (3, "Vitamin D 1000IU", 12_000, 10),
        ]
        .into_iter()
        .zip(1..)
        .map(|((transaction_id, drug_name, unit_price, quantity), id)| {
            NewLineItem::new(transaction_id, drug_name, unit_price, quantity)
                .with_id(id)
        })
        .collect();

        Self {
            users,
            patients,
            doctors,
            registrations,
            medical_records,
            transactions,
            line_items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{COLLECTIONS, PATIENTS};
    use crate::models::NewPatient;

    #[test]
    fn test_initialize_writes_every_collection() {
        let store = HospitalStore::open_in_memory().unwrap();
        store.initialize(&StoreSeed::demo()).unwrap();

        let keys = store.backend().keys().unwrap();
        for name in COLLECTIONS {
            assert!(keys.contains(&store.config().key(name)), "missing {name}");
        }
        assert_eq!(store.list_users().unwrap().len(), 13);
        assert_eq!(store.list_line_items().unwrap()[3].subtotal, 120_000);
    }

    #[test]
    fn test_initialize_overwrites() {
        let store = HospitalStore::open_in_memory().unwrap();
        store
            .add_patient(NewPatient::new("Temp".into(), 1, Insurance::General))
            .unwrap();

        store.initialize(&StoreSeed::demo()).unwrap();
        let names: Vec<_> = store
            .list_patients()
            .unwrap()
            .into_iter()
            .map(|p| p.full_name)
            .collect();
        assert!(!names.contains(&"Temp".to_string()));
    }

    #[test]
    fn test_initialize_missing_keeps_existing() {
        let store = HospitalStore::open_in_memory().unwrap();
        store
            .add_patient(NewPatient::new("Temp".into(), 1, Insurance::General))
            .unwrap();

        let filled = store.initialize_missing(&StoreSeed::demo()).unwrap();
        assert_eq!(filled, COLLECTIONS.len() - 1);
        assert_eq!(store.list_patients().unwrap().len(), 1);
        assert_eq!(store.list_doctors().unwrap().len(), 2);

        // Second run finds everything present
        assert_eq!(store.initialize_missing(&StoreSeed::demo()).unwrap(), 0);
        assert!(store
            .backend()
            .get(&store.config().key(PATIENTS))
            .unwrap()
            .is_some());
    }

    #[test]
    fn test_seed_from_json() {
        let seed: StoreSeed = serde_json::from_str(
            r#"{"doctors": [{"id": 5, "nama": "dr. Sari", "spesialis": "Anak", "jadwal_praktek": ""}]}"#,
        )
        .unwrap();
        assert_eq!(seed.doctors.len(), 1);
        assert!(seed.users.is_empty());

        let store = HospitalStore::open_in_memory().unwrap();
        store.initialize(&seed).unwrap();
        assert_eq!(store.get_doctor(5).unwrap().unwrap().name, "dr. Sari");
    }

    #[test]
    fn test_demo_links_are_consistent() {
        let seed = StoreSeed::demo();
        for user in &seed.users {
            if let Some(pid) = user.patient_id {
                assert!(seed.patients.iter().any(|p| p.id == pid));
            }
            if let Some(did) = user.doctor_id {
                assert!(seed.doctors.iter().any(|d| d.id == did));
            }
        }
        assert!(seed.users.iter().all(|u| u.patient_id.is_none() || u.doctor_id.is_none()));
    }
}
