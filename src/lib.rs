//! settleup-summary - summaries of SettleUp shared-expense exports
//!
//! This library parses a SettleUp CSV export into validated transactions and
//! aggregates them into chart-ready structures: totals per category, totals
//! per category per participant, and per-participant spent/paid balances.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Raw export records and parsed transactions
//! - `import`: Streaming export reader and the parse/filter pipeline
//! - `reports`: Summary matrix, participant balances, transaction overview
//! - `display`: Terminal table rendering
//!
//! # Example
//!
//! ```rust,ignore
//! use settleup_summary::config::Settings;
//! use settleup_summary::import::summarize_file;
//! use settleup_summary::reports::AmountKind;
//!
//! let mut matrix = summarize_file("transactions.csv", AmountKind::Spent, &Settings::default())?;
//! matrix.sort_categories_by_total();
//! for (category, total) in matrix.totals_by_category().iter() {
//!     println!("{category}: {total:.2}");
//! }
//! ```

pub mod config;
pub mod display;
pub mod error;
pub mod import;
pub mod models;
pub mod reports;

pub use error::{SummaryError, SummaryResult};
pub use models::{RawRecord, Transaction};
pub use reports::{AmountKind, ExpenseSummaryMatrix};
