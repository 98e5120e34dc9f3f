//! Display formatting for terminal output
//!
//! Renders the aggregates as tables for the command line. This is the only
//! place that decides how amounts and categories look on screen.

pub mod report;
pub mod summary;

pub use summary::{format_balances, format_category_totals, format_matrix, format_overview};
