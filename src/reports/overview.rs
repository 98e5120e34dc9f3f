//! Transaction overview
//!
//! One row per transaction with the total cost, the timestamp shown in the
//! display timezone, and each participant's spent and paid amounts side by
//! side. Timezones are explicit options rather than process-wide state.

use std::collections::BTreeSet;

use chrono::{NaiveDateTime, TimeZone};
use chrono_tz::Tz;
use serde::Serialize;

use crate::config::Settings;
use crate::error::{SummaryError, SummaryResult};
use crate::models::Transaction;

/// Options for building an overview
#[derive(Debug, Clone)]
pub struct OverviewOptions {
    /// Participant columns, in order; empty means every participant, sorted
    pub participants: Vec<String>,
    /// Timezone the export's timestamps were recorded in
    pub source_tz: Tz,
    /// Timezone used for the report's timestamps
    pub display_tz: Tz,
}

impl Default for OverviewOptions {
    fn default() -> Self {
        Self {
            participants: Vec::new(),
            source_tz: Tz::UTC,
            display_tz: Tz::UTC,
        }
    }
}

impl OverviewOptions {
    /// Build options from user settings
    pub fn from_settings(settings: &Settings) -> SummaryResult<Self> {
        Ok(Self {
            participants: settings.overview_participants.clone(),
            source_tz: settings.source_tz()?,
            display_tz: settings.display_tz()?,
        })
    }
}

/// A single overview line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverviewRow {
    pub purpose: String,
    pub category: String,
    /// Sum of the spent amounts
    pub total: f64,
    /// Timestamp in the display timezone
    pub date_time: NaiveDateTime,
    /// Spent amount per participant column (0 when not involved)
    pub spent: Vec<f64>,
    /// Paid amount per participant column (0 when not involved)
    pub paid: Vec<f64>,
    pub receipt: Option<String>,
}

/// Overview of all transactions, in ledger order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverviewReport {
    pub participants: Vec<String>,
    pub rows: Vec<OverviewRow>,
}

impl OverviewReport {
    /// Generate the overview
    pub fn generate(transactions: &[Transaction], options: &OverviewOptions) -> SummaryResult<Self> {
        let participants = if options.participants.is_empty() {
            all_participants(transactions)
        } else {
            options.participants.clone()
        };

        let mut rows = Vec::with_capacity(transactions.len());
        for txn in transactions {
            let date_time = convert_timezone(txn.date_time, options.source_tz, options.display_tz)?;

            rows.push(OverviewRow {
                purpose: txn.purpose.clone(),
                category: txn.category.clone(),
                total: txn.total_spent(),
                date_time,
                spent: participants
                    .iter()
                    .map(|name| txn.spent_amounts.get(name).copied().unwrap_or(0.0))
                    .collect(),
                paid: participants
                    .iter()
                    .map(|name| txn.paid_amounts.get(name).copied().unwrap_or(0.0))
                    .collect(),
                receipt: txn.receipt.clone(),
            });
        }

        Ok(Self { participants, rows })
    }
}

fn all_participants(transactions: &[Transaction]) -> Vec<String> {
    transactions
        .iter()
        .flat_map(|txn| txn.spent_amounts.keys().chain(txn.paid_amounts.keys()))
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Reinterpret a wall-clock time from one timezone in another
///
/// Ambiguous times (DST fall-back) resolve to the earlier instant; times that
/// do not exist in the source timezone are rejected.
pub fn convert_timezone(local: NaiveDateTime, from: Tz, to: Tz) -> SummaryResult<NaiveDateTime> {
    from.from_local_datetime(&local)
        .earliest()
        .map(|dt| dt.with_timezone(&to).naive_local())
        .ok_or_else(|| {
            SummaryError::malformed(format!("{} does not exist in timezone {}", local, from))
        })
}
