//! Reports module for settleup-summary
//!
//! Aggregates built from parsed transactions: the category × participant
//! summary matrix, per-participant balances, and the per-transaction overview.

pub mod balance;
pub mod overview;
pub mod summary;

pub use balance::{ParticipantBalance, ParticipantBalances};
pub use overview::{OverviewOptions, OverviewReport, OverviewRow};
pub use summary::{AmountKind, CategoryRow, CategoryTotals, ExpenseSummaryMatrix};
