//! Per-patient billing statement.

use std::cmp::Reverse;

use serde::{Deserialize, Serialize};

use crate::db::{DbError, DbResult, HospitalStore};
use crate::models::{Id, Patient, Transaction, TransactionLineItem};

/// One bill with its drug items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementEntry {
    pub transaction: Transaction,
    pub line_items: Vec<TransactionLineItem>,
}

/// A patient's bills, newest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientStatement {
    pub patient: Patient,
    pub entries: Vec<StatementEntry>,
    pub total_billed: u64,
    pub total_paid: u64,
    /// Billed amount not yet paid
    pub outstanding: u64,
}

impl PatientStatement {
    /// Build the statement for `patient_id`.
    pub fn for_patient(store: &HospitalStore, patient_id: Id) -> DbResult<Self> {
        let patient = store
            .get_patient(patient_id)?
            .ok_or_else(|| DbError::NotFound(format!("patient {}", patient_id)))?;

        let mut transactions = store.transactions_for_patient(patient_id)?;
        transactions.sort_by_key(|t| Reverse(t.date));

        let all_items = store.list_line_items()?;
        let entries: Vec<StatementEntry> = transactions
            .into_iter()
            .map(|transaction| StatementEntry {
                line_items: all_items
                    .iter()
                    .filter(|item| item.transaction_id == transaction.id)
                    .cloned()
                    .collect(),
                transaction,
            })
            .collect();

        let total_billed = entries
            .iter()
            .map(|e| e.transaction.total_cost)
            .fold(0, u64::saturating_add);
        let total_paid = entries
            .iter()
            .filter(|e| e.transaction.status.is_paid())
            .map(|e| e.transaction.total_cost)
            .fold(0, u64::saturating_add);

        Ok(Self {
            patient,
            entries,
            total_billed,
            total_paid,
            outstanding: total_billed.saturating_sub(total_paid),
        })
    }

    /// Export to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Export to CSV, one row per line item. Bills without items get one
    /// row with empty item columns.
    pub fn to_csv(&self) -> String {
        let mut csv = String::new();

        csv.push_str("transaction_id,date,status,method,total_cost,drug,unit_price,quantity,subtotal\n");

        for entry in &self.entries {
            let tx = &entry.transaction;
            let prefix = format!(
                "{},{},{},{},{}",
                tx.id,
                tx.date.format("%Y-%m-%d %H:%M"),
                escape_csv(tx.status.as_str()),
                escape_csv(tx.payment_method.as_str()),
                tx.total_cost,
            );
            if entry.line_items.is_empty() {
                csv.push_str(&format!("{},,,,\n", prefix));
            }
            for item in &entry.line_items {
                csv.push_str(&format!(
                    "{},{},{},{},{}\n",
                    prefix,
                    escape_csv(&item.drug_name),
                    item.unit_price,
                    item.quantity,
                    item.subtotal,
                ));
            }
        }

        csv
    }
}

/// Escape a string for CSV output.
fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
