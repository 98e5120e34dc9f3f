//! Raw export record
//!
//! One row of a SettleUp export, exactly as it appears in the file. Fields are
//! kept as text; interpretation happens in [`Transaction::from_raw_transaction`].
//!
//! [`Transaction::from_raw_transaction`]: super::Transaction::from_raw_transaction

use csv::StringRecord;

use crate::error::{SummaryError, SummaryResult};

/// Column names of the export, in file order
pub const TRANSACTION_COLUMNS: [&str; 12] = [
    "who_paid",
    "amount",
    "currency",
    "for_whom",
    "split_amounts",
    "purpose",
    "category",
    "date_time",
    "exchange_rate",
    "converted_amount",
    "type",
    "receipt",
];

/// An unprocessed transaction in the export format
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    /// 1-based line of the record in the export
    pub line: u64,
    /// `;`-separated payer names
    pub who_paid: String,
    /// `;`-separated amounts paid, parallel to `who_paid`
    pub amount: String,
    /// Currency code of the amounts
    pub currency: String,
    /// `;`-separated beneficiary names
    pub for_whom: String,
    /// `;`-separated amounts owed, parallel to `for_whom`
    pub split_amounts: String,
    pub purpose: String,
    pub category: String,
    /// `YYYY-MM-DD HH:MM:SS`
    pub date_time: String,
    /// `LABEL:RATE`, or blank when the amounts are already in the base currency
    pub exchange_rate: String,
    pub converted_amount: String,
    /// Record type tag (`transfer` marks a settlement)
    pub transaction_type: String,
    pub receipt: String,
}

impl RawRecord {
    /// Build a record from a CSV row, checking the column count
    ///
    /// `line` is the 1-based line number used in error messages.
    pub fn from_string_record(record: &StringRecord, line: u64) -> SummaryResult<Self> {
        if record.len() != TRANSACTION_COLUMNS.len() {
            return Err(SummaryError::malformed_at(
                line,
                format!(
                    "expected {} fields, found {}",
                    TRANSACTION_COLUMNS.len(),
                    record.len()
                ),
            ));
        }

        let field = |idx: usize| record.get(idx).unwrap_or_default().to_string();

        Ok(Self {
            line,
            who_paid: field(0),
            amount: field(1),
            currency: field(2),
            for_whom: field(3),
            split_amounts: field(4),
            purpose: field(5),
            category: field(6),
            date_time: field(7),
            exchange_rate: field(8),
            converted_amount: field(9),
            transaction_type: field(10),
            receipt: field(11),
        })
    }

    /// Check if this record is a settlement between participants
    pub fn is_transfer(&self, transfer_tag: &str) -> bool {
        self.transaction_type == transfer_tag
    }
}
