//! Business rules on top of a [`Store`](crate::store::Store).
//!
//! Every check reads a fresh snapshot from the store and then writes; nothing
//! wraps the check and the write together, so two concurrent writers could
//! both pass the same balance check. cashflow runs as a single writer.

mod balance;
mod category;
mod transaction;

pub(crate) use balance::get_balance;
pub(crate) use category::find_or_create_category;
pub(crate) use transaction::{
    create_transaction, create_transaction_in_category, delete_transaction, list_transactions,
};
