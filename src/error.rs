//! Error types for cashflow.
//!
//! Business-rule failures carry a status code so a host can surface them to
//! the user; storage and file failures pass through unchanged.

use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    /// An outcome, or a whole import batch, would drive the total balance negative.
    #[error("Insufficient funds: need {needed}, have {available}")]
    InsufficientFunds { needed: Decimal, available: Decimal },

    #[error("{entity} not found: {identifier}")]
    NotFound {
        entity: &'static str,
        identifier: String,
    },

    /// An amount that would push a running total past the decimal range.
    #[error("Amount out of range: {0}")]
    Overflow(String),

    /// The store acknowledged a write but did not hand back what it stored.
    #[error("Store inconsistency: {0}")]
    Inconsistent(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    pub fn transaction_not_found(id: i64) -> Self {
        Self::NotFound {
            entity: "Transaction",
            identifier: id.to_string(),
        }
    }

    /// Status code reported alongside the message.
    pub fn status_code(&self) -> u16 {
        if self.is_user_facing() {
            400
        } else {
            500
        }
    }

    pub fn message(&self) -> String {
        self.to_string()
    }

    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Self::InsufficientFunds { .. } | Self::NotFound { .. } | Self::Overflow(_)
        )
    }

    #[cfg(test)]
    pub fn is_insufficient_funds(&self) -> bool {
        matches!(self, Self::InsufficientFunds { .. })
    }

    #[cfg(test)]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
