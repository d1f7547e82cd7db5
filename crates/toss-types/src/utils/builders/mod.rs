//! Builder utilities for creating operator transactions.

pub mod transaction;

pub use transaction::{TransactionBuilder, TransactionBuilderError};
