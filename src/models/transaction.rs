//! Transaction model
//!
//! A validated expense event: who benefited, who paid, and how much, with all
//! amounts converted into the ledger's base currency.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::Serialize;

use super::raw::RawRecord;
use crate::error::{SummaryError, SummaryResult};

/// Timestamp format used by the export
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Delimiter between entries of a multi-party field
pub const LIST_DELIMITER: char = ';';

/// Amounts keyed by participant name
pub type Amounts = BTreeMap<String, f64>;

/// A shared-expense transaction
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    pub purpose: String,

    /// Category label, empty when the transaction is uncategorized
    pub category: String,

    pub date_time: NaiveDateTime,

    /// Portion of the cost attributed to each beneficiary
    pub spent_amounts: Amounts,

    /// Portion of the cost actually paid by each payer
    pub paid_amounts: Amounts,

    /// Receipt reference, if the export had one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receipt: Option<String>,
}

impl Transaction {
    /// Parse a raw export record into a transaction
    ///
    /// Transfers are not expenses; callers filter them out before calling this.
    /// Errors carry the record's line number.
    pub fn from_raw_transaction(raw: &RawRecord) -> SummaryResult<Self> {
        Self::parse_fields(raw).map_err(|e| e.at_line(raw.line))
    }

    fn parse_fields(raw: &RawRecord) -> SummaryResult<Self> {
        let mut spent_amounts = zip_amounts(&raw.for_whom, &raw.split_amounts, "for_whom")?;
        let mut paid_amounts = zip_amounts(&raw.who_paid, &raw.amount, "who_paid")?;

        if let Some((name, amount)) = spent_amounts.iter().find(|(_, amount)| **amount < 0.0) {
            return Err(SummaryError::malformed(format!(
                "negative split amount {} for '{}'",
                amount, name
            )));
        }

        if let Some(rate) = parse_exchange_rate(&raw.exchange_rate)? {
            for amount in spent_amounts.values_mut().chain(paid_amounts.values_mut()) {
                *amount /= rate;
            }
        }

        let date_time = NaiveDateTime::parse_from_str(&raw.date_time, DATE_TIME_FORMAT)
            .map_err(|e| {
                SummaryError::malformed(format!("invalid date/time '{}': {}", raw.date_time, e))
            })?;

        let receipt = Some(raw.receipt.trim())
            .filter(|r| !r.is_empty())
            .map(str::to_string);

        Ok(Self {
            purpose: raw.purpose.clone(),
            category: raw.category.clone(),
            date_time,
            spent_amounts,
            paid_amounts,
            receipt,
        })
    }

    /// Check if the transaction has no category
    pub fn is_uncategorized(&self) -> bool {
        self.category.is_empty()
    }

    /// Total cost of the transaction (sum of the spent amounts)
    pub fn total_spent(&self) -> f64 {
        self.spent_amounts.values().sum()
    }

    /// Total paid for the transaction
    pub fn total_paid(&self) -> f64 {
        self.paid_amounts.values().sum()
    }
}

/// Pair a `;`-separated name list with its parallel amount list
fn zip_amounts(names: &str, amounts: &str, field: &str) -> SummaryResult<Amounts> {
    let names: Vec<&str> = names.split(LIST_DELIMITER).collect();
    let amounts: Vec<&str> = amounts.split(LIST_DELIMITER).collect();

    if names.len() != amounts.len() {
        return Err(SummaryError::malformed(format!(
            "{} lists {} names but {} amounts",
            field,
            names.len(),
            amounts.len()
        )));
    }

    let mut result = Amounts::new();
    for (name, amount) in names.into_iter().zip(amounts) {
        let amount = parse_amount(amount)?;
        if result.insert(name.to_string(), amount).is_some() {
            return Err(SummaryError::malformed(format!(
                "{} lists '{}' more than once",
                field, name
            )));
        }
    }

    Ok(result)
}

fn parse_amount(s: &str) -> SummaryResult<f64> {
    let trimmed = s.trim();
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(SummaryError::malformed(format!("invalid amount '{}'", s))),
    }
}

/// Extract the rate from a `LABEL:RATE` annotation; blank means no conversion
fn parse_exchange_rate(annotation: &str) -> SummaryResult<Option<f64>> {
    if annotation.trim().is_empty() {
        return Ok(None);
    }

    let rate = annotation
        .split(':')
        .nth(1)
        .and_then(|r| r.trim().parse::<f64>().ok())
        .filter(|r| r.is_finite() && *r > 0.0)
        .ok_or_else(|| {
            SummaryError::malformed(format!("invalid exchange rate '{}'", annotation))
        })?;

    Ok(Some(rate))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    fn raw() -> RawRecord {
        RawRecord {
            line: 2,
            who_paid: "Alice".into(),
            amount: "50".into(),
            currency: "EUR".into(),
            for_whom: "Alice;Bob".into(),
            split_amounts: "25;25".into(),
            purpose: "Dinner".into(),
            category: "Food".into(),
            date_time: "2024-01-01 19:00:00".into(),
            exchange_rate: String::new(),
            converted_amount: String::new(),
            transaction_type: "expense".into(),
            receipt: String::new(),
        }
    }

    #[test]
    fn test_from_raw_transaction() {
        let txn = Transaction::from_raw_transaction(&raw()).unwrap();

        assert_eq!(txn.purpose, "Dinner");
        assert_eq!(txn.category, "Food");
        assert_eq!(
            txn.date_time,
            NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_time(NaiveTime::from_hms_opt(19, 0, 0).unwrap())
        );
        assert_eq!(txn.spent_amounts.len(), 2);
        assert_eq!(txn.spent_amounts["Alice"], 25.0);
        assert_eq!(txn.spent_amounts["Bob"], 25.0);
        assert_eq!(txn.paid_amounts.len(), 1);
        assert_eq!(txn.paid_amounts["Alice"], 50.0);
        assert_eq!(txn.receipt, None);
    }

    #[test]
    fn test_exchange_rate_conversion() {
        let mut record = raw();
        record.amount = "100".into();
        record.split_amounts = "60;40".into();
        record.exchange_rate = "USD:2.0".into();

        let txn = Transaction::from_raw_transaction(&record).unwrap();
        assert!((txn.paid_amounts["Alice"] - 50.0).abs() < 1e-9);
        assert!((txn.spent_amounts["Alice"] - 30.0).abs() < 1e-9);
        assert!((txn.spent_amounts["Bob"] - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_exchange_rates() {
        for annotation in ["USD:0", "USD:0.0", "USD", "USD:abc", "USD:-2", "USD:inf"] {
            let mut record = raw();
            record.exchange_rate = annotation.into();
            let err = Transaction::from_raw_transaction(&record).unwrap_err();
            assert!(err.is_malformed_input(), "{} should be rejected", annotation);
        }
    }

    #[test]
    fn test_blank_exchange_rate_is_ignored() {
        let mut record = raw();
        record.exchange_rate = "   ".into();
        let txn = Transaction::from_raw_transaction(&record).unwrap();
        assert_eq!(txn.paid_amounts["Alice"], 50.0);
    }

    #[test]
    fn test_split_parity_enforced() {
        let mut record = raw();
        record.split_amounts = "10;20;20".into();
        let err = Transaction::from_raw_transaction(&record).unwrap_err();
        assert!(matches!(
            err,
            SummaryError::MalformedInput { line: Some(2), .. }
        ));

        let mut record = raw();
        record.who_paid = "Alice;Bob".into();
        assert!(Transaction::from_raw_transaction(&record).is_err());
    }

    #[test]
    fn test_multiple_payers() {
        let mut record = raw();
        record.who_paid = "Alice;Carol".into();
        record.amount = "30;20".into();

        let txn = Transaction::from_raw_transaction(&record).unwrap();
        assert_eq!(txn.paid_amounts["Alice"], 30.0);
        assert_eq!(txn.paid_amounts["Carol"], 20.0);
        // Carol paid without being a beneficiary
        assert!(!txn.spent_amounts.contains_key("Carol"));
        assert_eq!(txn.total_paid(), txn.total_spent());
    }

    #[test]
    fn test_invalid_amounts_rejected() {
        for amounts in ["25;abc", "25;", "25;NaN", "25;-5"] {
            let mut record = raw();
            record.split_amounts = amounts.into();
            assert!(
                Transaction::from_raw_transaction(&record).is_err(),
                "{} should be rejected",
                amounts
            );
        }
    }

    #[test]
    fn test_amounts_allow_whitespace() {
        let mut record = raw();
        record.split_amounts = " 25 ; 25.5".into();
        let txn = Transaction::from_raw_transaction(&record).unwrap();
        assert_eq!(txn.spent_amounts["Bob"], 25.5);
    }

    #[test]
    fn test_duplicate_participant_rejected() {
        let mut record = raw();
        record.for_whom = "Alice;Alice".into();
        assert!(Transaction::from_raw_transaction(&record).is_err());
    }

    #[test]
    fn test_invalid_date_time() {
        for value in ["2024-01-01", "01/01/2024 19:00:00", "2024-01-01T19:00:00", ""] {
            let mut record = raw();
            record.date_time = value.into();
            let err = Transaction::from_raw_transaction(&record).unwrap_err();
            assert!(err.is_malformed_input(), "{} should be rejected", value);
        }
    }

    #[test]
    fn test_empty_category_and_receipt() {
        let mut record = raw();
        record.category = String::new();
        record.receipt = "https://example.com/r/1".into();

        let txn = Transaction::from_raw_transaction(&record).unwrap();
        assert!(txn.is_uncategorized());
        assert_eq!(txn.receipt.as_deref(), Some("https://example.com/r/1"));
    }
}
