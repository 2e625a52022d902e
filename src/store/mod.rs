//! Persistence seam used by the services.
//!
//! `Database` is the production implementation. Writes take `&mut self`
//! because batch inserts run inside a single SQL transaction.

use crate::error::Result;
use crate::models::{Category, Transaction, TransactionType};

#[cfg(test)]
pub(crate) mod memory;

pub(crate) trait Store {
    /// Every stored transaction, oldest first.
    fn transactions(&self) -> Result<Vec<Transaction>>;

    fn transactions_by_type(&self, kind: TransactionType) -> Result<Vec<Transaction>>;

    fn transaction_by_id(&self, id: i64) -> Result<Option<Transaction>>;

    /// Persist one transaction and return it with its assigned id.
    fn insert_transaction(&mut self, txn: &Transaction) -> Result<Transaction>;

    /// Persist a batch, returning the stored rows in input order.
    fn insert_transactions(&mut self, txns: &[Transaction]) -> Result<Vec<Transaction>>;

    fn delete_transaction(&mut self, id: i64) -> Result<()>;

    fn categories(&self) -> Result<Vec<Category>>;

    /// Persist a batch of categories, returning them with assigned ids.
    fn insert_categories(&mut self, categories: &[Category]) -> Result<Vec<Category>>;
}
