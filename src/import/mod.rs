//! Import of SettleUp exports
//!
//! - `reader`: streams raw records from the CSV export
//! - `pipeline`: filters transfers, parses transactions, and aggregates

pub mod pipeline;
pub mod reader;

pub use pipeline::{load_transactions, summarize_file, transactions, Transactions};
pub use reader::RawRecords;
