use rust_decimal::Decimal;

use crate::error::{AppError, Result};
use crate::models::{Balance, Category, Transaction, TransactionType};
use crate::store::Store;

use super::{find_or_create_category, get_balance};

/// Record a single transaction.
///
/// An outcome larger than the current total is rejected with
/// [`AppError::InsufficientFunds`] and nothing is written. A value that would
/// push a running total out of the decimal range is [`AppError::Overflow`].
/// Title and value are otherwise stored as given.
pub(crate) fn create_transaction<S: Store>(
    store: &mut S,
    title: &str,
    value: Decimal,
    kind: TransactionType,
    category_id: i64,
) -> Result<Transaction> {
    check_room(store, title, value, kind)?;

    let txn = Transaction::new(title.to_string(), value, kind, category_id);
    let stored = store.insert_transaction(&txn)?;
    tracing::info!(id = ?stored.id, title, %value, %kind, "transaction created");
    Ok(stored)
}

/// Like [`create_transaction`], but resolves the category by title. A new
/// category is only created once the balance checks have passed.
pub(crate) fn create_transaction_in_category<S: Store>(
    store: &mut S,
    title: &str,
    value: Decimal,
    kind: TransactionType,
    category_title: &str,
) -> Result<(Transaction, Category)> {
    let existing = store.categories()?;
    let category = match Category::find_by_title(&existing, category_title) {
        Some(cat) => cat.clone(),
        None => {
            check_room(store, title, value, kind)?;
            find_or_create_category(store, category_title)?
        }
    };
    let category_id = category.id.ok_or_else(|| {
        AppError::Inconsistent(format!("category '{}' has no id", category.title))
    })?;
    let txn = create_transaction(store, title, value, kind, category_id)?;
    Ok((txn, category))
}

fn check_room<S: Store>(store: &S, title: &str, value: Decimal, kind: TransactionType) -> Result<()> {
    let balance = get_balance(store)?;
    if kind == TransactionType::Outcome && !balance.covers(value) {
        tracing::warn!(title, %value, total = %balance.total, "outcome rejected");
        return Err(AppError::InsufficientFunds {
            needed: value,
            available: balance.total,
        });
    }
    if balance.with(kind, value).is_none() {
        tracing::warn!(title, %value, %kind, "amount out of range");
        return Err(AppError::Overflow(format!("{kind} total")));
    }
    Ok(())
}

/// Delete a transaction by id. A missing id is [`AppError::NotFound`].
pub(crate) fn delete_transaction<S: Store>(store: &mut S, id: i64) -> Result<()> {
    if store.transaction_by_id(id)?.is_none() {
        return Err(AppError::transaction_not_found(id));
    }

    store.delete_transaction(id)?;
    tracing::info!(id, "transaction deleted");
    Ok(())
}

/// Every transaction together with the current balance.
pub(crate) fn list_transactions<S: Store>(store: &S) -> Result<(Vec<Transaction>, Balance)> {
    let txns = store.transactions()?;
    let balance = get_balance(store)?;
    Ok((txns, balance))
}
