//! Bulk import of a CSV upload.
//!
//! Steps run in order: parse, reconcile categories, validate the batch against
//! the current balance, then insert the transactions in one batch. Categories
//! are committed before the balance check, so a rejected import keeps any
//! categories it created.

use rust_decimal::Decimal;
use std::collections::{HashMap, HashSet};

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::{Category, Transaction};
use crate::services::get_balance;
use crate::store::Store;

use super::csv_import::{CsvImporter, CsvTransaction};

/// Import `file_name` from the upload directory and return the stored
/// transactions in file order.
pub(crate) fn import_transactions<S: Store>(
    store: &mut S,
    config: &Config,
    file_name: &str,
) -> Result<Vec<Transaction>> {
    let path = config.upload_path(file_name);
    tracing::info!(path = %path.display(), "importing transactions");

    let rows = CsvImporter::load(&path)?;
    let categories = reconcile_categories(store, &rows)?;
    validate_batch(store, &rows)?;
    let stored = materialize(store, &rows, &categories)?;

    tracing::info!(parsed = rows.len(), imported = stored.len(), "import complete");
    Ok(stored)
}

/// Distinct category titles in first-seen order. Exact, case-sensitive.
pub(crate) fn distinct_category_titles(rows: &[CsvTransaction]) -> Vec<&str> {
    let mut seen = HashSet::new();
    rows.iter()
        .map(|r| r.category.as_str())
        .filter(|title| seen.insert(*title))
        .collect()
}

/// Create the batch's categories that the store does not have yet and return
/// the existing ones followed by the new ones.
fn reconcile_categories<S: Store>(store: &mut S, rows: &[CsvTransaction]) -> Result<Vec<Category>> {
    let mut existing = store.categories()?;
    let known: HashSet<&str> = existing.iter().map(|c| c.title.as_str()).collect();

    let missing: Vec<Category> = distinct_category_titles(rows)
        .into_iter()
        .filter(|title| !known.contains(title))
        .map(|title| Category::new(title.to_string()))
        .collect();

    if !missing.is_empty() {
        let created = store.insert_categories(&missing)?;
        tracing::info!(count = created.len(), "categories created");
        existing.extend(created);
    }
    Ok(existing)
}

/// Net effect of the batch on the total balance. `None` if the sum leaves
/// the decimal range.
pub(crate) fn net_delta(rows: &[CsvTransaction]) -> Option<Decimal> {
    rows.iter()
        .try_fold(Decimal::ZERO, |total, row| total.checked_add(row.signed_value()))
}

fn validate_batch<S: Store>(store: &S, rows: &[CsvTransaction]) -> Result<()> {
    let balance = get_balance(store)?;
    let delta = net_delta(rows).ok_or_else(|| {
        tracing::warn!(rows = rows.len(), "import rejected: batch total out of range");
        AppError::Overflow("import batch total".into())
    })?;

    // A negative delta that overflows past the total is an overdraw anyway.
    let overdrawn = balance
        .total
        .checked_add(delta)
        .map_or(true, |after| after < Decimal::ZERO);
    if delta < Decimal::ZERO && overdrawn {
        tracing::warn!(total = %balance.total, %delta, "import rejected");
        return Err(AppError::InsufficientFunds {
            needed: -delta,
            available: balance.total,
        });
    }

    rows.iter()
        .try_fold(balance, |running, row| running.with(row.kind, row.value))
        .ok_or_else(|| {
            tracing::warn!(total = %balance.total, "import rejected: totals out of range");
            AppError::Overflow("balance after import".into())
        })?;
    Ok(())
}

/// Resolve each row's category and insert the batch. Rows whose category is
/// not in `categories` are skipped.
fn materialize<S: Store>(
    store: &mut S,
    rows: &[CsvTransaction],
    categories: &[Category],
) -> Result<Vec<Transaction>> {
    let mut by_title: HashMap<&str, i64> = HashMap::new();
    for cat in categories {
        if let Some(id) = cat.id {
            by_title.entry(cat.title.as_str()).or_insert(id);
        }
    }

    let txns: Vec<Transaction> = rows
        .iter()
        .filter_map(|row| match by_title.get(row.category.as_str()) {
            Some(&category_id) => Some(Transaction::new(
                row.title.clone(),
                row.value,
                row.kind,
                category_id,
            )),
            None => {
                tracing::warn!(
                    title = %row.title,
                    category = %row.category,
                    "row skipped: category unresolved"
                );
                None
            }
        })
        .collect();

    store.insert_transactions(&txns)
}

#[cfg(test)]
#[path = "reconcile_tests.rs"]
mod tests;
