use rust_decimal::Decimal;

use crate::error::{AppError, Result};
use crate::models::{Balance, Transaction, TransactionType};
use crate::store::Store;

/// Fold every stored transaction into income, outcome and total.
/// Recomputed on each call.
pub(crate) fn get_balance<S: Store>(store: &S) -> Result<Balance> {
    let income = sum_values(&store.transactions_by_type(TransactionType::Income)?)
        .ok_or_else(|| AppError::Overflow("income total".into()))?;
    let outcome = sum_values(&store.transactions_by_type(TransactionType::Outcome)?)
        .ok_or_else(|| AppError::Overflow("outcome total".into()))?;
    let balance = Balance::new(income, outcome)
        .ok_or_else(|| AppError::Overflow("balance total".into()))?;
    tracing::debug!(
        income = %balance.income,
        outcome = %balance.outcome,
        total = %balance.total,
        "balance computed"
    );
    Ok(balance)
}

fn sum_values(txns: &[Transaction]) -> Option<Decimal> {
    txns.iter()
        .try_fold(Decimal::ZERO, |sum, t| sum.checked_add(t.value))
}
