//! Hospital Admin Core Library
//!
//! Local-first domain store for a small hospital's patient, doctor, visit
//! and billing records, persisted as JSON collections in a flat key-value
//! store.
//!
//! # Architecture
//!
//! ```text
//!   Patient portal      Doctor portal      Admin portal
//!          │                  │                  │
//!          └──────────────────┼──────────────────┘
//!                             ▼
//!                  ┌─────────────────────┐
//!                  │   HospitalStore     │  repositories, id assignment,
//!                  │   (db module)       │  FK checks, state machines
//!                  └──────────┬──────────┘
//!                             │ load / save whole collection
//!                             ▼
//!                  ┌─────────────────────┐
//!                  │   StorageBackend    │  rs_users, rs_pasien, ...
//!                  │ (SQLite or memory)  │  currentUser
//!                  └─────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`config`]: Store layout, defaults and logging setup
//! - [`storage`]: Key-value backends and collection (de)serialization
//! - [`models`]: Domain types (Patient, Registration, Transaction, etc.)
//! - [`db`]: Entity repositories and cross-entity rules
//! - [`report`]: Dashboard summary and patient statements

pub mod config;
pub mod db;
pub mod models;
pub mod report;
pub mod storage;

// Re-export commonly used types
pub use config::StoreConfig;
pub use db::{AuthError, DbError, DbResult, HospitalStore, StoreSeed};
pub use models::{
    Doctor, Insurance, MedicalRecord, Patient, PaymentMethod, Registration, RegistrationStatus,
    Role, Session, Transaction, TransactionLineItem, TransactionStatus, User,
};
pub use report::{HospitalSummary, PatientStatement};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::{Arc, Mutex};

use chrono::{NaiveDate, NaiveDateTime};

use models::{
    Credentials, DoctorUpdate, ExaminationFindings, NewDoctor, NewLineItem, NewPatient,
    NewRegistration, NewTransaction, ParseLabelError, PatientUpdate,
};

const FFI_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
const FFI_DATE_FORMAT: &str = "%Y-%m-%d";

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum HospitalError {
    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Username already taken: {0}")]
    DuplicateUsername(String),

    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    #[error("Login failed: {0}")]
    AuthFailed(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<DbError> for HospitalError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound(what) => HospitalError::NotFound(what),
            DbError::Constraint(_) => HospitalError::InvalidInput(e.to_string()),
            DbError::DuplicateUsername(name) => HospitalError::DuplicateUsername(name),
            DbError::InvalidTransition { .. } => HospitalError::InvalidTransition(e.to_string()),
            DbError::Storage(_) => HospitalError::StorageError(e.to_string()),
        }
    }
}

impl From<AuthError> for HospitalError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::Db(db) => db.into(),
            other => HospitalError::AuthFailed(other.to_string()),
        }
    }
}

impl From<ParseLabelError> for HospitalError {
    fn from(e: ParseLabelError) -> Self {
        HospitalError::InvalidInput(e.to_string())
    }
}

impl From<serde_json::Error> for HospitalError {
    fn from(e: serde_json::Error) -> Self {
        HospitalError::SerializationError(e.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for HospitalError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        HospitalError::StorageError(format!("Lock poisoned: {}", e))
    }
}

fn parse_datetime(value: &str) -> Result<NaiveDateTime, HospitalError> {
    models::parse_timestamp(value)
        .ok_or_else(|| HospitalError::InvalidInput(format!("unrecognized datetime {:?}", value)))
}

fn parse_date(value: &str) -> Result<NaiveDate, HospitalError> {
    NaiveDate::parse_from_str(value, FFI_DATE_FORMAT)
        .map_err(|e| HospitalError::InvalidInput(format!("date {:?}: {}", value, e)))
}

fn format_datetime(value: NaiveDateTime) -> String {
    value.format(FFI_DATETIME_FORMAT).to_string()
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Open or create a store backed by the SQLite file at the given path.
#[uniffi::export]
pub fn open_store(path: String) -> Result<Arc<HospitalCore>, HospitalError> {
    let store = HospitalStore::open(&path)?;
    Ok(Arc::new(HospitalCore {
        store: Arc::new(Mutex::new(store)),
    }))
}

/// Create an in-memory store (for testing).
#[uniffi::export]
pub fn open_store_in_memory() -> Result<Arc<HospitalCore>, HospitalError> {
    let store = HospitalStore::open_in_memory()?;
    Ok(Arc::new(HospitalCore {
        store: Arc::new(Mutex::new(store)),
    }))
}

/// Install the default log subscriber.
#[uniffi::export]
pub fn init_logging() {
    config::init_logging();
}

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe store wrapper for FFI.
#[derive(uniffi::Object)]
pub struct HospitalCore {
    store: Arc<Mutex<HospitalStore>>,
}

#[uniffi::export]
impl HospitalCore {
    // =========================================================================
    // Initialization
    // =========================================================================

    /// Overwrite every collection with the demo records.
    pub fn initialize_demo(&self) -> Result<(), HospitalError> {
        let store = self.store.lock()?;
        store.initialize(&StoreSeed::demo())?;
        Ok(())
    }

    /// Seed demo records into collections that were never written.
    pub fn initialize_missing_demo(&self) -> Result<u32, HospitalError> {
        let store = self.store.lock()?;
        let filled = store.initialize_missing(&StoreSeed::demo())?;
        Ok(filled as u32)
    }

    // =========================================================================
    // Session Operations
    // =========================================================================

    /// Log in on the portal named by `role` ("pasien", "dokter" or "admin").
    pub fn login(
        &self,
        username: String,
        password: String,
        role: String,
    ) -> Result<FfiSession, HospitalError> {
        let role: Role = role.parse()?;
        let store = self.store.lock()?;
        let session = store.login(&username, &password, role)?;
        Ok(session.into())
    }

    /// Restore the persisted login, if any.
    pub fn restore_session(&self) -> Result<Option<FfiSession>, HospitalError> {
        let store = self.store.lock()?;
        Ok(store.restore_session()?.map(|s| s.into()))
    }

    pub fn logout(&self) -> Result<(), HospitalError> {
        let store = self.store.lock()?;
        store.logout()?;
        Ok(())
    }

    /// Create a patient and its login in one step.
    pub fn register_patient(
        &self,
        patient: FfiNewPatient,
        username: String,
        password: String,
    ) -> Result<FfiPatient, HospitalError> {
        let new_patient = patient.try_into()?;
        let store = self.store.lock()?;
        let (patient, _) = store.register_patient(db::SelfRegistration {
            patient: new_patient,
            credentials: Credentials::new(username, password),
        })?;
        Ok(patient.into())
    }

    // =========================================================================
    // Patient Operations
    // =========================================================================

    pub fn list_patients(&self) -> Result<Vec<FfiPatient>, HospitalError> {
        let store = self.store.lock()?;
        let patients = store.list_patients()?;
        Ok(patients.into_iter().map(|p| p.into()).collect())
    }

    pub fn get_patient(&self, id: u32) -> Result<Option<FfiPatient>, HospitalError> {
        let store = self.store.lock()?;
        Ok(store.get_patient(id)?.map(|p| p.into()))
    }

    /// Create a patient record without a login.
    pub fn add_patient(&self, patient: FfiNewPatient) -> Result<FfiPatient, HospitalError> {
        let new_patient = patient.try_into()?;
        let store = self.store.lock()?;
        Ok(store.add_patient(new_patient)?.into())
    }

    /// Replace the editable fields of a patient. Returns `false` if missing.
    pub fn update_patient(&self, id: u32, patient: FfiNewPatient) -> Result<bool, HospitalError> {
        let fields: NewPatient = patient.try_into()?;
        let store = self.store.lock()?;
        let updated = store.update_patient(
            id,
            PatientUpdate {
                full_name: Some(fields.full_name),
                national_id: Some(fields.national_id),
                age: Some(fields.age),
                address: Some(fields.address),
                phone: Some(fields.phone),
                insurance: Some(fields.insurance),
                last_complaint: Some(fields.last_complaint),
            },
        )?;
        Ok(updated)
    }

    pub fn delete_patient(&self, id: u32) -> Result<bool, HospitalError> {
        let store = self.store.lock()?;
        Ok(store.delete_patient(id)?)
    }

    /// Search patients by name or complaint, tolerating typos in names.
    pub fn search_patients(
        &self,
        query: String,
        limit: u32,
    ) -> Result<Vec<FfiPatient>, HospitalError> {
        let store = self.store.lock()?;
        let patients = store.search_patients(&query, limit as usize)?;
        Ok(patients.into_iter().map(|p| p.into()).collect())
    }

    // =========================================================================
    // Doctor Operations
    // =========================================================================

    pub fn list_doctors(&self) -> Result<Vec<FfiDoctor>, HospitalError> {
        let store = self.store.lock()?;
        let doctors = store.list_doctors()?;
        Ok(doctors.into_iter().map(|d| d.into()).collect())
    }

    pub fn get_doctor(&self, id: u32) -> Result<Option<FfiDoctor>, HospitalError> {
        let store = self.store.lock()?;
        Ok(store.get_doctor(id)?.map(|d| d.into()))
    }

    /// Create a doctor, with a login when `username` is given.
    pub fn create_doctor(
        &self,
        name: String,
        specialty: String,
        practice_schedule: String,
        username: Option<String>,
        password: Option<String>,
    ) -> Result<FfiDoctor, HospitalError> {
        let mut doctor = NewDoctor::new(name, specialty);
        doctor.practice_schedule = practice_schedule;
        let credentials =
            username.map(|u| Credentials::new(u, password.unwrap_or_default()));

        let store = self.store.lock()?;
        let provisioned = store.create_doctor_with_account(doctor, credentials)?;
        Ok(provisioned.doctor.into())
    }

    pub fn update_doctor(&self, doctor: FfiDoctor) -> Result<bool, HospitalError> {
        let store = self.store.lock()?;
        let updated = store.update_doctor(
            doctor.id,
            DoctorUpdate {
                name: Some(doctor.name),
                specialty: Some(doctor.specialty),
                practice_schedule: Some(doctor.practice_schedule),
            },
        )?;
        Ok(updated)
    }

    /// Delete a doctor and its logins.
    pub fn delete_doctor(&self, id: u32) -> Result<bool, HospitalError> {
        let store = self.store.lock()?;
        Ok(store.delete_doctor(id)?)
    }

    // =========================================================================
    // Registration Operations
    // =========================================================================

    pub fn list_registrations(&self) -> Result<Vec<FfiRegistration>, HospitalError> {
        let store = self.store.lock()?;
        let registrations = store.list_registrations()?;
        Ok(registrations.into_iter().map(|r| r.into()).collect())
    }

    pub fn registrations_for_patient(
        &self,
        patient_id: u32,
    ) -> Result<Vec<FfiRegistration>, HospitalError> {
        let store = self.store.lock()?;
        let registrations = store.registrations_for_patient(patient_id)?;
        Ok(registrations.into_iter().map(|r| r.into()).collect())
    }

    pub fn pending_registrations(&self) -> Result<Vec<FfiRegistration>, HospitalError> {
        let store = self.store.lock()?;
        let registrations = store.pending_registrations()?;
        Ok(registrations.into_iter().map(|r| r.into()).collect())
    }

    /// Request a visit; `visit_datetime` is `YYYY-MM-DDTHH:MM:SS`.
    pub fn create_registration(
        &self,
        patient_id: u32,
        visit_datetime: String,
        target_department: String,
    ) -> Result<FfiRegistration, HospitalError> {
        let visit = parse_datetime(&visit_datetime)?;
        let store = self.store.lock()?;
        let registration =
            store.add_registration(NewRegistration::new(patient_id, visit, target_department))?;
        Ok(registration.into())
    }

    pub fn approve_registration(&self, id: u32) -> Result<FfiRegistration, HospitalError> {
        let store = self.store.lock()?;
        Ok(store.approve_registration(id)?.into())
    }

    pub fn reject_registration(&self, id: u32) -> Result<FfiRegistration, HospitalError> {
        let store = self.store.lock()?;
        Ok(store.reject_registration(id)?.into())
    }

    /// Record the examination for an approved registration.
    pub fn complete_examination(
        &self,
        registration_id: u32,
        doctor_id: u32,
        findings: FfiFindings,
    ) -> Result<FfiMedicalRecord, HospitalError> {
        let store = self.store.lock()?;
        let record = store.complete_examination(registration_id, doctor_id, findings.into())?;
        Ok(record.into())
    }

    /// Approved visits on `date` (`YYYY-MM-DD`), earliest first.
    pub fn queue_for_date(&self, date: String) -> Result<Vec<FfiQueueEntry>, HospitalError> {
        let date = parse_date(&date)?;
        let store = self.store.lock()?;
        let queue = store.todays_queue(date)?;
        Ok(queue
            .into_iter()
            .map(|entry| FfiQueueEntry {
                registration: entry.registration.into(),
                patient: entry.patient.into(),
            })
            .collect())
    }

    // =========================================================================
    // Medical Record Operations
    // =========================================================================

    /// A patient's examinations, newest first.
    pub fn patient_history(
        &self,
        patient_id: u32,
    ) -> Result<Vec<FfiMedicalRecord>, HospitalError> {
        let store = self.store.lock()?;
        let records = store.patient_history(patient_id)?;
        Ok(records.into_iter().map(|r| r.into()).collect())
    }

    pub fn medical_records_by_doctor(
        &self,
        doctor_id: u32,
    ) -> Result<Vec<FfiMedicalRecord>, HospitalError> {
        let store = self.store.lock()?;
        let records = store.medical_records_by_doctor(doctor_id)?;
        Ok(records.into_iter().map(|r| r.into()).collect())
    }

    // =========================================================================
    // Transaction Operations
    // =========================================================================

    /// All transactions, most recent first.
    pub fn list_transactions(&self) -> Result<Vec<FfiTransaction>, HospitalError> {
        let store = self.store.lock()?;
        let transactions = store.list_transactions_newest_first()?;
        Ok(transactions.into_iter().map(|t| t.into()).collect())
    }

    pub fn transactions_for_patient(
        &self,
        patient_id: u32,
    ) -> Result<Vec<FfiTransaction>, HospitalError> {
        let store = self.store.lock()?;
        let transactions = store.transactions_for_patient(patient_id)?;
        Ok(transactions.into_iter().map(|t| t.into()).collect())
    }

    /// Bill a patient, optionally for one of their registrations.
    pub fn create_transaction(
        &self,
        patient_id: u32,
        registration_id: Option<u32>,
        total_cost: u64,
    ) -> Result<FfiTransaction, HospitalError> {
        let mut transaction = NewTransaction::new(patient_id, total_cost);
        if let Some(id) = registration_id {
            transaction = transaction.for_registration(id);
        }
        let store = self.store.lock()?;
        Ok(store.add_transaction(transaction)?.into())
    }

    /// Delete a transaction and its line items.
    pub fn delete_transaction(&self, id: u32) -> Result<bool, HospitalError> {
        let store = self.store.lock()?;
        Ok(store.delete_transaction(id)?)
    }

    /// Patient reports payment with `method` ("Cash", "QRIS" or "Transfer").
    pub fn confirm_payment(&self, id: u32, method: String) -> Result<FfiTransaction, HospitalError> {
        let method: PaymentMethod = method.parse()?;
        let store = self.store.lock()?;
        Ok(store.confirm_payment(id, method)?.into())
    }

    pub fn verify_payment(&self, id: u32) -> Result<FfiTransaction, HospitalError> {
        let store = self.store.lock()?;
        Ok(store.verify_payment(id)?.into())
    }

    pub fn mark_paid(&self, id: u32) -> Result<FfiTransaction, HospitalError> {
        let store = self.store.lock()?;
        Ok(store.mark_paid(id)?.into())
    }

    // =========================================================================
    // Line Item Operations
    // =========================================================================

    pub fn add_line_item(
        &self,
        transaction_id: u32,
        drug_name: String,
        unit_price: u64,
        quantity: u32,
    ) -> Result<FfiLineItem, HospitalError> {
        let store = self.store.lock()?;
        let item =
            store.add_line_item(NewLineItem::new(transaction_id, drug_name, unit_price, quantity))?;
        Ok(item.into())
    }

    pub fn line_items_for_transaction(
        &self,
        transaction_id: u32,
    ) -> Result<Vec<FfiLineItem>, HospitalError> {
        let store = self.store.lock()?;
        let items = store.line_items_for_transaction(transaction_id)?;
        Ok(items.into_iter().map(|i| i.into()).collect())
    }

    // =========================================================================
    // Report Operations
    // =========================================================================

    pub fn summary(&self) -> Result<FfiSummary, HospitalError> {
        let store = self.store.lock()?;
        Ok(HospitalSummary::collect(&store)?.into())
    }

    /// Export a patient's statement as JSON.
    pub fn export_statement_json(&self, patient_id: u32) -> Result<String, HospitalError> {
        let store = self.store.lock()?;
        let statement = PatientStatement::for_patient(&store, patient_id)?;
        Ok(statement.to_json()?)
    }

    /// Export a patient's statement as CSV.
    pub fn export_statement_csv(&self, patient_id: u32) -> Result<String, HospitalError> {
        let store = self.store.lock()?;
        let statement = PatientStatement::for_patient(&store, patient_id)?;
        Ok(statement.to_csv())
    }
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe patient.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPatient {
    pub id: u32,
    pub full_name: String,
    pub national_id: String,
    pub age: u32,
    pub address: String,
    pub phone: String,
    pub insurance: String,
    pub last_complaint: String,
}

impl From<Patient> for FfiPatient {
    fn from(patient: Patient) -> Self {
        Self {
            id: patient.id,
            full_name: patient.full_name,
            national_id: patient.national_id,
            age: patient.age,
            address: patient.address,
            phone: patient.phone,
            insurance: patient.insurance.to_string(),
            last_complaint: patient.last_complaint,
        }
    }
}

/// FFI-safe patient data without an id.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiNewPatient {
    pub full_name: String,
    pub national_id: String,
    pub age: u32,
    pub address: String,
    pub phone: String,
    /// "BPJS", "Umum" or "Private"
    pub insurance: String,
    pub last_complaint: String,
}

impl TryFrom<FfiNewPatient> for NewPatient {
    type Error = HospitalError;

    fn try_from(patient: FfiNewPatient) -> Result<Self, Self::Error> {
        Ok(NewPatient {
            full_name: patient.full_name,
            national_id: patient.national_id,
            age: patient.age,
            address: patient.address,
            phone: patient.phone,
            insurance: patient.insurance.parse::<Insurance>()?,
            last_complaint: patient.last_complaint,
        })
    }
}

/// FFI-safe doctor.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiDoctor {
    pub id: u32,
    pub name: String,
    pub specialty: String,
    pub practice_schedule: String,
}

impl From<Doctor> for FfiDoctor {
    fn from(doctor: Doctor) -> Self {
        Self {
            id: doctor.id,
            name: doctor.name,
            specialty: doctor.specialty,
            practice_schedule: doctor.practice_schedule,
        }
    }
}

/// FFI-safe registration.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiRegistration {
    pub id: u32,
    pub patient_id: u32,
    pub registration_date: String,
    pub visit_datetime: String,
    pub target_department: String,
    pub status: String,
}

impl From<Registration> for FfiRegistration {
    fn from(registration: Registration) -> Self {
        Self {
            id: registration.id,
            patient_id: registration.patient_id,
            registration_date: format_datetime(registration.registration_date),
            visit_datetime: format_datetime(registration.visit_datetime),
            target_department: registration.target_department,
            status: registration.status.to_string(),
        }
    }
}

/// FFI-safe queue row.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiQueueEntry {
    pub registration: FfiRegistration,
    pub patient: FfiPatient,
}

/// FFI-safe examination findings.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiFindings {
    pub complaint: String,
    pub examination_result: String,
    pub prescription: String,
    pub additional_notes: String,
}

impl From<FfiFindings> for ExaminationFindings {
    fn from(findings: FfiFindings) -> Self {
        ExaminationFindings {
            complaint: findings.complaint,
            examination_result: findings.examination_result,
            prescription: findings.prescription,
            additional_notes: findings.additional_notes,
        }
    }
}

/// FFI-safe medical record.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiMedicalRecord {
    pub id: u32,
    pub patient_id: u32,
    pub doctor_id: u32,
    pub visit_datetime: String,
    pub complaint: String,
    pub examination_result: String,
    pub prescription: String,
    pub additional_notes: String,
}

impl From<MedicalRecord> for FfiMedicalRecord {
    fn from(record: MedicalRecord) -> Self {
        Self {
            id: record.id,
            patient_id: record.patient_id,
            doctor_id: record.doctor_id,
            visit_datetime: format_datetime(record.visit_datetime),
            complaint: record.complaint,
            examination_result: record.examination_result,
            prescription: record.prescription,
            additional_notes: record.additional_notes,
        }
    }
}

/// FFI-safe transaction.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiTransaction {
    pub id: u32,
    pub patient_id: u32,
    pub registration_id: Option<u32>,
    pub total_cost: u64,
    pub payment_method: String,
    pub status: String,
    pub date: String,
}

impl From<Transaction> for FfiTransaction {
    fn from(transaction: Transaction) -> Self {
        Self {
            id: transaction.id,
            patient_id: transaction.patient_id,
            registration_id: transaction.registration_id,
            total_cost: transaction.total_cost,
            payment_method: transaction.payment_method.to_string(),
            status: transaction.status.to_string(),
            date: format_datetime(transaction.date),
        }
    }
}

/// FFI-safe line item.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiLineItem {
    pub id: u32,
    pub transaction_id: u32,
    pub drug_name: String,
    pub unit_price: u64,
    pub quantity: u32,
    pub subtotal: u64,
}

impl From<TransactionLineItem> for FfiLineItem {
    fn from(item: TransactionLineItem) -> Self {
        Self {
            id: item.id,
            transaction_id: item.transaction_id,
            drug_name: item.drug_name,
            unit_price: item.unit_price,
            quantity: item.quantity,
            subtotal: item.subtotal,
        }
    }
}

/// FFI-safe session.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiSession {
    pub user_id: u32,
    pub username: String,
    pub role: String,
    pub patient_id: Option<u32>,
    pub doctor_id: Option<u32>,
}

impl From<Session> for FfiSession {
    fn from(session: Session) -> Self {
        let role = session.role().to_string();
        match session {
            Session::Patient {
                user_id,
                username,
                patient_id,
            } => Self {
                user_id,
                username,
                role,
                patient_id: Some(patient_id),
                doctor_id: None,
            },
            Session::Doctor {
                user_id,
                username,
                doctor_id,
            } => Self {
                user_id,
                username,
                role,
                patient_id: None,
                doctor_id: Some(doctor_id),
            },
            Session::Admin { user_id, username } => Self {
                user_id,
                username,
                role,
                patient_id: None,
                doctor_id: None,
            },
        }
    }
}

/// FFI-safe dashboard summary.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiSummary {
    pub total_transactions: u64,
    pub total_revenue: u64,
    pub total_patients: u64,
    pub total_examinations: u64,
    pub total_registrations: u64,
    pub pending_registrations: u64,
    pub approved_registrations: u64,
    pub paid_transactions: u64,
    pub unpaid_transactions: u64,
}

impl From<HospitalSummary> for FfiSummary {
    fn from(summary: HospitalSummary) -> Self {
        Self {
            total_transactions: summary.total_transactions as u64,
            total_revenue: summary.total_revenue,
            total_patients: summary.total_patients as u64,
            total_examinations: summary.total_examinations as u64,
            total_registrations: summary.total_registrations as u64,
            pending_registrations: summary.pending_registrations as u64,
            approved_registrations: summary.approved_registrations as u64,
            paid_transactions: summary.paid_transactions as u64,
            unpaid_transactions: summary.unpaid_transactions as u64,
        }
    }
}
