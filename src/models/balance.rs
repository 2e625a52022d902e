use rust_decimal::Decimal;

use super::TransactionType;

/// Derived aggregate over every stored transaction. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Balance {
    pub income: Decimal,
    pub outcome: Decimal,
    pub total: Decimal,
}

impl Balance {
    /// `None` when `income - outcome` leaves the decimal range.
    pub fn new(income: Decimal, outcome: Decimal) -> Option<Self> {
        Some(Self {
            income,
            outcome,
            total: income.checked_sub(outcome)?,
        })
    }

    /// The balance after one more transaction, or `None` if any total overflows.
    pub fn with(&self, kind: TransactionType, value: Decimal) -> Option<Self> {
        match kind {
            TransactionType::Income => Self::new(self.income.checked_add(value)?, self.outcome),
            TransactionType::Outcome => Self::new(self.income, self.outcome.checked_add(value)?),
        }
    }

    /// Whether the total can absorb an outcome of `value`.
    pub fn covers(&self, value: Decimal) -> bool {
        value <= self.total
    }
}
