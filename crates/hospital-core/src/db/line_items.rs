//! Drug line items attached to transactions.

use super::{DbResult, ForeignKey, HospitalStore, Record};
use crate::config::LINE_ITEMS;
use crate::models::{Id, LineItemUpdate, NewLineItem, Transaction, TransactionLineItem};

impl Record for TransactionLineItem {
    const COLLECTION: &'static str = LINE_ITEMS;
    const ENTITY: &'static str = "line item";

    fn id(&self) -> Id {
        self.id
    }

    fn references(&self, key: ForeignKey) -> bool {
        matches!(key, ForeignKey::Transaction(id) if id == self.transaction_id)
    }
}

impl HospitalStore {
    pub fn list_line_items(&self) -> DbResult<Vec<TransactionLineItem>> {
        self.collection::<TransactionLineItem>().list()
    }

    pub fn get_line_item(&self, id: Id) -> DbResult<Option<TransactionLineItem>> {
        self.collection::<TransactionLineItem>().find_by_id(id)
    }

    /// Items of one transaction, in stored order.
    pub fn line_items_for_transaction(&self, transaction_id: Id) -> DbResult<Vec<TransactionLineItem>> {
        self.collection::<TransactionLineItem>()
            .find_by_foreign_key(ForeignKey::Transaction(transaction_id))
    }

    /// Sum of item subtotals for one transaction, saturating at `u64::MAX`.
    pub fn line_item_total(&self, transaction_id: Id) -> DbResult<u64> {
        Ok(self
            .line_items_for_transaction(transaction_id)?
            .iter()
            .map(|item| item.subtotal)
            .fold(0, u64::saturating_add))
    }

    /// Add an item to an existing transaction. The subtotal is computed here.
    pub fn add_line_item(&self, item: NewLineItem) -> DbResult<TransactionLineItem> {
        self.require::<Transaction>(item.transaction_id)?;
        self.collection::<TransactionLineItem>()
            .insert_with(|id| item.with_id(id))
    }

    /// Shallow-merge `update`, recomputing the subtotal.
    pub fn update_line_item(&self, id: Id, update: LineItemUpdate) -> DbResult<bool> {
        Ok(self
            .collection::<TransactionLineItem>()
            .update_with(id, |item| update.apply(item))?
            .is_some())
    }

    pub fn delete_line_item(&self, id: Id) -> DbResult<bool> {
        self.collection::<TransactionLineItem>().delete(id)
    }
}
