//! End-to-end portal scenarios over one store.

use chrono::{NaiveDate, NaiveDateTime};
use hospital_admin_core::db::{DbError, HospitalStore, SelfRegistration};
use hospital_admin_core::models::{
    Credentials, ExaminationFindings, Insurance, NewDoctor, NewLineItem, NewPatient,
    NewRegistration, NewTransaction, PaymentMethod, RegistrationStatus, Role, Session,
    TransactionStatus,
};
use hospital_admin_core::report::{HospitalSummary, PatientStatement};

fn at(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S").unwrap()
}

fn sign_up(store: &HospitalStore, name: &str, username: &str) -> u32 {
    let (patient, _) = store
        .register_patient(SelfRegistration {
            patient: NewPatient::new(name.to_string(), 30, Insurance::Bpjs),
            credentials: Credentials::new(username, "123"),
        })
        .unwrap();
    patient.id
}

#[test]
fn test_registration_lifecycle() {
    let store = HospitalStore::open_in_memory().unwrap();
    let patient_id = sign_up(&store, "Rahmat Hidayat", "rahmat");
    let doctor = store
        .create_doctor_with_account(NewDoctor::new("dr. Andi Pratama", "Umum"), None)
        .unwrap()
        .doctor;

    // Patient books a visit
    let registration = store
        .add_registration(NewRegistration::new(
            patient_id,
            at("2025-11-25T10:00:00"),
            "Poli Umum".into(),
        ))
        .unwrap();
    assert_eq!(registration.status, RegistrationStatus::PendingVerification);
    assert_eq!(store.pending_registrations().unwrap().len(), 1);

    // Doctor cannot examine before approval
    let err = store
        .complete_examination(registration.id, doctor.id, ExaminationFindings::default())
        .unwrap_err();
    assert!(matches!(err, DbError::InvalidTransition { .. }));
    assert!(store.list_medical_records().unwrap().is_empty());

    // Admin approves, visit shows in the day's queue
    store.approve_registration(registration.id).unwrap();
    let queue = store
        .todays_queue(NaiveDate::from_ymd_opt(2025, 11, 25).unwrap())
        .unwrap();
    assert_eq!(queue.len(), 1);
    assert_eq!(queue[0].patient.full_name, "Rahmat Hidayat");

    // Doctor records the examination
    let record = store
        .complete_examination(
            registration.id,
            doctor.id,
            ExaminationFindings {
                complaint: "Demam dan batuk".into(),
                examination_result: "ISPA ringan".into(),
                prescription: "Paracetamol 500mg 3x1".into(),
                additional_notes: String::new(),
            },
        )
        .unwrap();
    assert_eq!(record.patient_id, patient_id);
    assert_eq!(
        store.get_registration(registration.id).unwrap().unwrap().status,
        RegistrationStatus::ExaminationComplete
    );
    assert_eq!(store.patient_history(patient_id).unwrap(), vec![record]);

    // Terminal: neither approval nor rejection applies any more
    assert!(store.approve_registration(registration.id).is_err());
    assert!(store.reject_registration(registration.id).is_err());
}

#[test]
fn test_payment_flow() {
    let store = HospitalStore::open_in_memory().unwrap();
    let patient_id = sign_up(&store, "Siti Aminah", "siti");

    let tx = store
        .add_transaction(NewTransaction::new(patient_id, 130_000))
        .unwrap();
    store
        .add_line_item(NewLineItem::new(tx.id, "Paracetamol 500mg", 5_000, 10))
        .unwrap();
    store
        .add_line_item(NewLineItem::new(tx.id, "Amlodipine 5mg", 8_000, 10))
        .unwrap();
    assert_eq!(store.line_item_total(tx.id).unwrap(), 130_000);

    let statement = PatientStatement::for_patient(&store, patient_id).unwrap();
    assert_eq!(statement.outstanding, 130_000);

    // Patient pays by transfer, cashier verifies
    let pending = store
        .confirm_payment(tx.id, PaymentMethod::BankTransfer)
        .unwrap();
    assert_eq!(pending.status, TransactionStatus::PendingVerification);
    let paid = store.verify_payment(tx.id).unwrap();
    assert_eq!(paid.status, TransactionStatus::Paid);
    assert_eq!(paid.payment_method, PaymentMethod::BankTransfer);

    let statement = PatientStatement::for_patient(&store, patient_id).unwrap();
    assert_eq!(statement.total_paid, 130_000);
    assert_eq!(statement.outstanding, 0);
    assert_eq!(HospitalSummary::collect(&store).unwrap().total_revenue, 130_000);

    // No going back
    assert!(store.confirm_payment(tx.id, PaymentMethod::Cash).is_err());
    assert_eq!(
        store.get_transaction(tx.id).unwrap().unwrap().payment_method,
        PaymentMethod::BankTransfer
    );
}

#[test]
fn test_doctor_provisioning() {
    let store = HospitalStore::open_in_memory().unwrap();

    let provisioned = store
        .create_doctor_with_account(
            NewDoctor::new("dr. Budi Setiawan, Sp.PD", "Penyakit Dalam"),
            Some(Credentials::new("drbudi", "")),
        )
        .unwrap();
    let account = provisioned.account.unwrap();
    assert_eq!(account.role, Role::Doctor);
    assert_eq!(account.doctor_id, Some(provisioned.doctor.id));
    assert_eq!(account.password, "123");

    let session = store.login("drbudi", "123", Role::Doctor).unwrap();
    assert_eq!(
        session,
        Session::Doctor {
            user_id: account.id,
            username: "drbudi".into(),
            doctor_id: provisioned.doctor.id,
        }
    );
    assert_eq!(store.restore_session().unwrap(), Some(session));

    // Removing the doctor removes the login too
    assert!(store.delete_doctor(provisioned.doctor.id).unwrap());
    assert!(store.list_users().unwrap().is_empty());
    assert!(store.login("drbudi", "123", Role::Doctor).is_err());
}

#[test]
fn test_duplicate_username() {
    let store = HospitalStore::open_in_memory().unwrap();
    sign_up(&store, "Budi Santoso", "budi");
    let users_before = store.list_users().unwrap();
    let patients_before = store.list_patients().unwrap();

    let err = store
        .register_patient(SelfRegistration {
            patient: NewPatient::new("Budi Lain".into(), 50, Insurance::General),
            credentials: Credentials::new("Budi", "456"),
        })
        .unwrap_err();
    assert!(matches!(err, DbError::DuplicateUsername(_)));

    let err = store
        .create_doctor_with_account(
            NewDoctor::new("dr. Budi", "Umum"),
            Some(Credentials::new("BUDI", "x")),
        )
        .unwrap_err();
    assert!(matches!(err, DbError::DuplicateUsername(_)));

    assert_eq!(store.list_users().unwrap(), users_before);
    assert_eq!(store.list_patients().unwrap(), patients_before);
    assert!(store.list_doctors().unwrap().is_empty());
}
