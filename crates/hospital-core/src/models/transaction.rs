//! Billing transactions and drug line items.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::{Id, ParseLabelError};

/// How the patient pays.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum PaymentMethod {
    Cash,
    /// Indonesian standard QR payment
    #[serde(rename = "QRIS")]
    Qris,
    #[serde(rename = "Transfer")]
    BankTransfer,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::Qris => "QRIS",
            PaymentMethod::BankTransfer => "Transfer",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cash" => Ok(PaymentMethod::Cash),
            "qris" => Ok(PaymentMethod::Qris),
            "transfer" | "banktransfer" => Ok(PaymentMethod::BankTransfer),
            _ => Err(ParseLabelError::new("payment method", s)),
        }
    }
}

/// Payment status.
///
/// ```text
/// ReadyToPay ──► PendingVerification ──► Paid
///     │                                   ▲
///     └───────────── (admin) ─────────────┘
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TransactionStatus {
    #[serde(rename = "Siap Dibayar")]
    ReadyToPay,
    /// Patient reports having paid, cashier has not verified yet
    #[serde(rename = "Menunggu Verifikasi")]
    PendingVerification,
    #[serde(rename = "Lunas")]
    Paid,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::ReadyToPay => "Siap Dibayar",
            TransactionStatus::PendingVerification => "Menunggu Verifikasi",
            TransactionStatus::Paid => "Lunas",
        }
    }

    /// Whether `self -> next` is an edge of the payment lifecycle.
    pub fn can_transition_to(&self, next: TransactionStatus) -> bool {
        use TransactionStatus::*;
        matches!(
            (self, next),
            (ReadyToPay, PendingVerification) | (ReadyToPay, Paid) | (PendingVerification, Paid)
        )
    }

    pub fn is_paid(&self) -> bool {
        matches!(self, TransactionStatus::Paid)
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionStatus {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Siap Dibayar" | "ReadyToPay" => Ok(TransactionStatus::ReadyToPay),
            "Menunggu Verifikasi" | "PendingVerification" => {
                Ok(TransactionStatus::PendingVerification)
            }
            "Lunas" | "Paid" => Ok(TransactionStatus::Paid),
            _ => Err(ParseLabelError::new("transaction status", s)),
        }
    }
}

/// Billing record for one patient.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: Id,
    #[serde(rename = "pasien_id")]
    pub patient_id: Id,
    #[serde(rename = "pendaftaran_id", default, skip_serializing_if = "Option::is_none")]
    pub registration_id: Option<Id>,
    /// Whole rupiah
    #[serde(rename = "total_biaya")]
    pub total_cost: u64,
    #[serde(rename = "metode_pembayaran")]
    pub payment_method: PaymentMethod,
    #[serde(rename = "status_pembayaran")]
    pub status: TransactionStatus,
    #[serde(rename = "tanggal", deserialize_with = "super::timestamp::deserialize")]
    pub date: NaiveDateTime,
}

/// Data for a new transaction (id assigned by the store).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewTransaction {
    pub patient_id: Id,
    pub registration_id: Option<Id>,
    pub total_cost: u64,
    pub payment_method: PaymentMethod,
    pub status: TransactionStatus,
    pub date: NaiveDateTime,
}

impl NewTransaction {
    /// Unpaid cash bill dated now.
    pub fn new(patient_id: Id, total_cost: u64) -> Self {
        Self {
            patient_id,
            registration_id: None,
            total_cost,
            payment_method: PaymentMethod::Cash,
            status: TransactionStatus::ReadyToPay,
            date: super::local_now(),
        }
    }

    /// Link the bill to the registration it charges for.
    pub fn for_registration(mut self, registration_id: Id) -> Self {
        self.registration_id = Some(registration_id);
        self
    }

    pub(crate) fn with_id(self, id: Id) -> Transaction {
        Transaction {
            id,
            patient_id: self.patient_id,
            registration_id: self.registration_id,
            total_cost: self.total_cost,
            payment_method: self.payment_method,
            status: self.status,
            date: self.date,
        }
    }
}

/// Partial update for a transaction. Status is changed only through
/// validated transitions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionUpdate {
    pub registration_id: Option<Id>,
    pub total_cost: Option<u64>,
    pub payment_method: Option<PaymentMethod>,
    pub date: Option<NaiveDateTime>,
}

impl TransactionUpdate {
    pub fn apply(self, transaction: &mut Transaction) {
        if let Some(v) = self.registration_id {
            transaction.registration_id = Some(v);
        }
        if let Some(v) = self.total_cost {
            transaction.total_cost = v;
        }
        if let Some(v) = self.payment_method {
            transaction.payment_method = v;
        }
        if let Some(v) = self.date {
            transaction.date = v;
        }
    }
}

/// One priced drug entry on a transaction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransactionLineItem {
    pub id: Id,
    #[serde(rename = "transaksi_id")]
    pub transaction_id: Id,
    #[serde(rename = "nama_obat")]
    pub drug_name: String,
    #[serde(rename = "harga_satuan")]
    pub unit_price: u64,
    #[serde(rename = "jumlah")]
    pub quantity: u32,
    /// Always `unit_price * quantity`
    pub subtotal: u64,
}

/// Data for a new line item; the subtotal is computed by the store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewLineItem {
    pub transaction_id: Id,
    pub drug_name: String,
    pub unit_price: u64,
    pub quantity: u32,
}

impl NewLineItem {
    pub fn new(transaction_id: Id, drug_name: impl Into<String>, unit_price: u64, quantity: u32) -> Self {
        Self {
            transaction_id,
            drug_name: drug_name.into(),
            unit_price,
            quantity,
        }
    }

    /// `unit_price * quantity`, saturating on overflow.
    pub fn subtotal(&self) -> u64 {
        self.unit_price.saturating_mul(u64::from(self.quantity))
    }

    pub(crate) fn with_id(self, id: Id) -> TransactionLineItem {
        let subtotal = self.subtotal();
        TransactionLineItem {
            id,
            transaction_id: self.transaction_id,
            drug_name: self.drug_name,
            unit_price: self.unit_price,
            quantity: self.quantity,
            subtotal,
        }
    }
}

/// Partial update for a line item; the subtotal is recomputed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineItemUpdate {
    pub drug_name: Option<String>,
    pub unit_price: Option<u64>,
    pub quantity: Option<u32>,
}

impl LineItemUpdate {
    pub fn apply(self, item: &mut TransactionLineItem) {
        if let Some(v) = self.drug_name {
            item.drug_name = v;
        }
        if let Some(v) = self.unit_price {
            item.unit_price = v;
        }
        if let Some(v) = self.quantity {
            item.quantity = v;
        }
        item.subtotal = item.unit_price.saturating_mul(u64::from(item.quantity));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use TransactionStatus::*;

    #[test]
    fn test_payment_edges() {
        assert!(ReadyToPay.can_transition_to(PendingVerification));
        assert!(ReadyToPay.can_transition_to(Paid));
        assert!(PendingVerification.can_transition_to(Paid));

        assert!(!Paid.can_transition_to(ReadyToPay));
        assert!(!Paid.can_transition_to(PendingVerification));
        assert!(!PendingVerification.can_transition_to(ReadyToPay));
        assert!(!ReadyToPay.can_transition_to(ReadyToPay));
    }

    #[test]
    fn test_method_labels() {
        assert_eq!(serde_json::to_string(&PaymentMethod::BankTransfer).unwrap(), "\"Transfer\"");
        assert_eq!("qris".parse::<PaymentMethod>().unwrap(), PaymentMethod::Qris);
    }

    #[test]
    fn test_line_item_subtotal_computed() {
        let item = NewLineItem::new(2, "Paracetamol 500mg", 5000, 10).with_id(1);
        assert_eq!(item.subtotal, 50_000);
    }

    #[test]
    fn test_registration_id_omitted_when_absent() {
        let tx = NewTransaction::new(1, 150_000).with_id(1);
        let json = serde_json::to_value(&tx).unwrap();
        assert!(json.get("pendaftaran_id").is_none());
        assert_eq!(json["status_pembayaran"], "Siap Dibayar");
    }

    #[test]
    fn test_front_end_date_parses() {
        let json = r#"{
            "id": 7,
            "pasien_id": 1,
            "total_biaya": 150000,
            "metode_pembayaran": "Cash",
            "status_pembayaran": "Siap Dibayar",
            "tanggal": "2025-11-25T08:30:00.123Z"
        }"#;
        let tx: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(tx.registration_id, None);
        assert_eq!(tx.date, crate::models::parse_timestamp("2025-11-25T08:30:00Z").unwrap());
    }

    #[test]
    fn test_unparseable_date_rejected() {
        let json = r#"{"id": 7, "pasien_id": 1, "total_biaya": 1,
            "metode_pembayaran": "Cash", "status_pembayaran": "Lunas", "tanggal": "kemarin"}"#;
        assert!(serde_json::from_str::<Transaction>(json).is_err());
    }
}
