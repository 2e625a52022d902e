use crate::error::Result;
use crate::models::{Category, Transaction, TransactionType};

use super::Store;

/// Vec-backed store for service tests.
#[derive(Debug, Default)]
pub(crate) struct MemoryStore {
    pub(crate) transactions: Vec<Transaction>,
    pub(crate) categories: Vec<Category>,
    /// Titles that `insert_categories` accepts but never reports back.
    lost_category_titles: Vec<String>,
    next_id: i64,
}

impl MemoryStore {
    pub(crate) fn losing_categories(titles: &[&str]) -> Self {
        Self {
            lost_category_titles: titles.iter().map(|t| t.to_string()).collect(),
            ..Self::default()
        }
    }

    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

impl Store for MemoryStore {
    fn transactions(&self) -> Result<Vec<Transaction>> {
        Ok(self.transactions.clone())
    }

    fn transactions_by_type(&self, kind: TransactionType) -> Result<Vec<Transaction>> {
        Ok(self
            .transactions
            .iter()
            .filter(|t| t.kind == kind)
            .cloned()
            .collect())
    }

    fn transaction_by_id(&self, id: i64) -> Result<Option<Transaction>> {
        Ok(self.transactions.iter().find(|t| t.id == Some(id)).cloned())
    }

    fn insert_transaction(&mut self, txn: &Transaction) -> Result<Transaction> {
        let mut stored = txn.clone();
        stored.id = Some(self.next_id());
        self.transactions.push(stored.clone());
        Ok(stored)
    }

    fn insert_transactions(&mut self, txns: &[Transaction]) -> Result<Vec<Transaction>> {
        txns.iter().map(|t| self.insert_transaction(t)).collect()
    }

    fn delete_transaction(&mut self, id: i64) -> Result<()> {
        self.transactions.retain(|t| t.id != Some(id));
        Ok(())
    }

    fn categories(&self) -> Result<Vec<Category>> {
        Ok(self.categories.clone())
    }

    fn insert_categories(&mut self, categories: &[Category]) -> Result<Vec<Category>> {
        let mut created = Vec::with_capacity(categories.len());
        for cat in categories {
            let mut stored = cat.clone();
            stored.id = Some(self.next_id());
            self.categories.push(stored.clone());
            if !self.lost_category_titles.contains(&stored.title) {
                created.push(stored);
            }
        }
        Ok(created)
    }
}
