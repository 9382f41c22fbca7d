//! Transaction repository and the payment lifecycle.

use std::cmp::Reverse;

use super::{DbError, DbResult, ForeignKey, HospitalStore, Record};
use crate::config::TRANSACTIONS;
use crate::models::{
    Id, NewTransaction, Patient, PaymentMethod, Registration, Transaction, TransactionLineItem,
    TransactionStatus, TransactionUpdate,
};

impl Record for Transaction {
    const COLLECTION: &'static str = TRANSACTIONS;
    const ENTITY: &'static str = "transaction";

    fn id(&self) -> Id {
        self.id
    }

    fn references(&self, key: ForeignKey) -> bool {
        match key {
            ForeignKey::Patient(id) => self.patient_id == id,
            ForeignKey::Registration(id) => self.registration_id == Some(id),
            _ => false,
        }
    }
}

/// Check `from -> to` against the stored status of `transaction`.
fn check_transition(
    transaction: &Transaction,
    from: TransactionStatus,
    to: TransactionStatus,
) -> DbResult<()> {
    if transaction.status == from && from.can_transition_to(to) {
        return Ok(());
    }
    tracing::warn!(
        transaction_id = transaction.id,
        current = %transaction.status,
        from = %from,
        to = %to,
        "Payment transition rejected"
    );
    Err(DbError::InvalidTransition {
        entity: Transaction::ENTITY,
        id: transaction.id,
        current: transaction.status.to_string(),
        from: from.to_string(),
        to: to.to_string(),
    })
}

impl HospitalStore {
    /// List all transactions in stored order.
    pub fn list_transactions(&self) -> DbResult<Vec<Transaction>> {
        self.collection::<Transaction>().list()
    }

    /// List all transactions, most recent first.
    pub fn list_transactions_newest_first(&self) -> DbResult<Vec<Transaction>> {
        let mut transactions = self.list_transactions()?;
        transactions.sort_by_key(|t| Reverse(t.date));
        Ok(transactions)
    }

    pub fn get_transaction(&self, id: Id) -> DbResult<Option<Transaction>> {
        self.collection::<Transaction>().find_by_id(id)
    }

    /// Transactions of one patient, in stored order.
    pub fn transactions_for_patient(&self, patient_id: Id) -> DbResult<Vec<Transaction>> {
        self.collection::<Transaction>()
            .find_by_foreign_key(ForeignKey::Patient(patient_id))
    }

    /// Sum of `total_cost` over a patient's paid transactions, saturating.
    pub fn paid_total_for_patient(&self, patient_id: Id) -> DbResult<u64> {
        Ok(self
            .transactions_for_patient(patient_id)?
            .iter()
            .filter(|t| t.status.is_paid())
            .map(|t| t.total_cost)
            .fold(0, u64::saturating_add))
    }

    /// Record a bill. The patient must exist; a linked registration must
    /// exist and belong to the same patient.
    pub fn add_transaction(&self, transaction: NewTransaction) -> DbResult<Transaction> {
        self.require::<Patient>(transaction.patient_id)?;
        if let Some(registration_id) = transaction.registration_id {
            let registration = self.require::<Registration>(registration_id)?;
            if registration.patient_id != transaction.patient_id {
                return Err(DbError::Constraint(format!(
                    "registration {} belongs to patient {}, not {}",
                    registration_id, registration.patient_id, transaction.patient_id
                )));
            }
        }

        let created = self
            .collection::<Transaction>()
            .insert_with(|id| transaction.with_id(id))?;
        tracing::info!(
            transaction_id = created.id,
            patient_id = created.patient_id,
            total_cost = created.total_cost,
            "Transaction added"
        );
        Ok(created)
    }

    /// Shallow-merge non-status fields. Returns `false` if not found.
    pub fn update_transaction(&self, id: Id, update: TransactionUpdate) -> DbResult<bool> {
        Ok(self
            .collection::<Transaction>()
            .update_with(id, |t| update.apply(t))?
            .is_some())
    }

    /// Delete a transaction and its line items.
    pub fn delete_transaction(&self, id: Id) -> DbResult<bool> {
        let deleted = self.collection::<Transaction>().delete(id)?;
        if deleted {
            let items = self
                .collection::<TransactionLineItem>()
                .delete_where(|item| item.references(ForeignKey::Transaction(id)))?;
            tracing::info!(transaction_id = id, line_items = items, "Transaction deleted");
        }
        Ok(deleted)
    }

    /// Move a transaction from `from` to `to`, validating the stored status.
    pub fn transition_transaction(
        &self,
        id: Id,
        from: TransactionStatus,
        to: TransactionStatus,
    ) -> DbResult<Transaction> {
        self.change_payment(id, |t| {
            check_transition(t, from, to)?;
            t.status = to;
            Ok(())
        })
    }

    /// Patient reports payment with `method`; awaits cashier verification.
    pub fn confirm_payment(&self, id: Id, method: PaymentMethod) -> DbResult<Transaction> {
        self.change_payment(id, |t| {
            check_transition(
                t,
                TransactionStatus::ReadyToPay,
                TransactionStatus::PendingVerification,
            )?;
            t.status = TransactionStatus::PendingVerification;
            t.payment_method = method;
            Ok(())
        })
    }

    /// Cashier verifies a payment the patient reported.
    pub fn verify_payment(&self, id: Id) -> DbResult<Transaction> {
        self.transition_transaction(
            id,
            TransactionStatus::PendingVerification,
            TransactionStatus::Paid,
        )
    }

    /// Admin marks an unpaid transaction as paid from either open state.
    pub fn mark_paid(&self, id: Id) -> DbResult<Transaction> {
        self.change_payment(id, |t| {
            check_transition(t, t.status, TransactionStatus::Paid)?;
            t.status = TransactionStatus::Paid;
            Ok(())
        })
    }

    fn change_payment(
        &self,
        id: Id,
        change: impl FnOnce(&mut Transaction) -> DbResult<()>,
    ) -> DbResult<Transaction> {
        let updated = self
            .collection::<Transaction>()
            .try_update(id, change)?
            .ok_or_else(|| DbError::NotFound(format!("transaction {}", id)))?;
        tracing::info!(
            transaction_id = id,
            status = %updated.status,
            method = %updated.payment_method,
            "Payment status changed"
        );
        Ok(updated)
    }
}
