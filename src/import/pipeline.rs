//! Export-to-aggregate pipeline
//!
//! Connects the reader, the transfer filter, and transaction parsing, and
//! feeds the result into the aggregates. Everything runs as one forward pass
//! and stops at the first malformed record.

use std::path::Path;

use tracing::{debug, info};

use super::reader::RawRecords;
use crate::config::Settings;
use crate::error::SummaryResult;
use crate::models::{RawRecord, Transaction};
use crate::reports::{AmountKind, ExpenseSummaryMatrix};

/// Parses raw records into transactions, dropping transfers
pub struct Transactions<I> {
    records: I,
    transfer_tag: String,
    skipped_transfers: usize,
}

impl<I> Transactions<I> {
    /// Number of transfer records skipped so far
    pub fn skipped_transfers(&self) -> usize {
        self.skipped_transfers
    }
}

impl<I> Iterator for Transactions<I>
where
    I: Iterator<Item = SummaryResult<RawRecord>>,
{
    type Item = SummaryResult<Transaction>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let raw = match self.records.next()? {
                Ok(raw) => raw,
                Err(e) => return Some(Err(e)),
            };

            if raw.is_transfer(&self.transfer_tag) {
                self.skipped_transfers += 1;
                debug!(line = raw.line, purpose = %raw.purpose, "skipping transfer");
                continue;
            }

            return Some(Transaction::from_raw_transaction(&raw));
        }
    }
}

/// Turn raw records into transactions, excluding those tagged as transfers
pub fn transactions<I>(records: I, transfer_tag: impl Into<String>) -> Transactions<I::IntoIter>
where
    I: IntoIterator<Item = SummaryResult<RawRecord>>,
{
    Transactions {
        records: records.into_iter(),
        transfer_tag: transfer_tag.into(),
        skipped_transfers: 0,
    }
}

/// Read an export and build its summary matrix in one pass
pub fn summarize_file(
    path: impl AsRef<Path>,
    kind: AmountKind,
    settings: &Settings,
) -> SummaryResult<ExpenseSummaryMatrix> {
    let path = path.as_ref();
    let mut parsed = transactions(RawRecords::from_path(path)?, settings.transfer_tag.as_str());

    let matrix = ExpenseSummaryMatrix::try_from_transactions(&mut parsed, kind)?;

    info!(
        path = %path.display(),
        kind = %kind,
        categories = matrix.category_count(),
        participants = matrix.participant_count(),
        skipped_transfers = parsed.skipped_transfers(),
        "summarized export"
    );

    Ok(matrix)
}

/// Read and parse every non-transfer transaction of an export
pub fn load_transactions(path: impl AsRef<Path>, settings: &Settings) -> SummaryResult<Vec<Transaction>> {
    let path = path.as_ref();
    let mut parsed = transactions(RawRecords::from_path(path)?, settings.transfer_tag.as_str());

    let loaded = (&mut parsed).collect::<SummaryResult<Vec<_>>>()?;

    info!(
        path = %path.display(),
        transactions = loaded.len(),
        skipped_transfers = parsed.skipped_transfers(),
        "loaded export"
    );

    Ok(loaded)
}
