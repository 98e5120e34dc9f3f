//! Core data models for settleup-summary
//!
//! Raw export rows and the validated transactions parsed from them.

pub mod raw;
pub mod transaction;

pub use raw::{RawRecord, TRANSACTION_COLUMNS};
pub use transaction::{Amounts, Transaction, DATE_TIME_FORMAT};
