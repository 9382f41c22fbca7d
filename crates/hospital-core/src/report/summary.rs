//! Dashboard totals across the whole store.

use serde::{Deserialize, Serialize};

use crate::db::{DbResult, HospitalStore};
use crate::models::RegistrationStatus;

/// Counts shown on the admin dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HospitalSummary {
    pub total_transactions: usize,
    /// Sum of `total_cost` over paid transactions, saturating
    pub total_revenue: u64,
    pub total_patients: usize,
    pub total_examinations: usize,
    pub total_registrations: usize,
    pub pending_registrations: usize,
    pub approved_registrations: usize,
    pub paid_transactions: usize,
    pub unpaid_transactions: usize,
}

impl HospitalSummary {
    /// Compute the summary from the current store contents.
    pub fn collect(store: &HospitalStore) -> DbResult<Self> {
        let transactions = store.list_transactions()?;
        let registrations = store.list_registrations()?;

        let (paid, unpaid): (Vec<_>, Vec<_>) =
            transactions.iter().partition(|t| t.status.is_paid());
        let count_status = |status: RegistrationStatus| {
            registrations.iter().filter(|r| r.status == status).count()
        };

        Ok(Self {
            total_transactions: transactions.len(),
            total_revenue: paid
                .iter()
                .map(|t| t.total_cost)
                .fold(0, u64::saturating_add),
            total_patients: store.list_patients()?.len(),
            total_examinations: store.list_medical_records()?.len(),
            total_registrations: registrations.len(),
            pending_registrations: count_status(RegistrationStatus::PendingVerification),
            approved_registrations: count_status(RegistrationStatus::Approved),
            paid_transactions: paid.len(),
            unpaid_transactions: unpaid.len(),
        })
    }

    /// Export to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
