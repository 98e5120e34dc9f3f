//! Participant balances
//!
//! Per-participant totals across the whole ledger: how much each person's
//! share of the expenses came to, how much they actually paid, and the
//! difference between the two.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::Transaction;

/// Spent/paid breakdown for one participant
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParticipantBalance {
    pub name: String,
    /// Sum of the participant's shares
    pub spent: f64,
    /// Sum of what the participant paid
    pub paid: f64,
    /// `paid - spent`; positive means the others owe this participant
    pub balance: f64,
}

/// Balances of every participant, sorted by name
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParticipantBalances {
    pub participants: Vec<ParticipantBalance>,
}

impl ParticipantBalances {
    /// Compute balances in a single pass over the transactions
    pub fn from_transactions<'a, I>(transactions: I) -> Self
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let mut totals: BTreeMap<&'a str, (f64, f64)> = BTreeMap::new();

        for txn in transactions {
            for (name, amount) in &txn.spent_amounts {
                totals.entry(name.as_str()).or_insert((0.0, 0.0)).0 += amount;
            }
            for (name, amount) in &txn.paid_amounts {
                totals.entry(name.as_str()).or_insert((0.0, 0.0)).1 += amount;
            }
        }

        let participants = totals
            .into_iter()
            .map(|(name, (spent, paid))| ParticipantBalance {
                name: name.to_string(),
                spent,
                paid,
                balance: paid - spent,
            })
            .collect();

        Self { participants }
    }

    /// Balance of a participant, if they appear in the ledger
    pub fn get(&self, name: &str) -> Option<&ParticipantBalance> {
        self.participants.iter().find(|p| p.name == name)
    }

    pub fn total_spent(&self) -> f64 {
        self.participants.iter().map(|p| p.spent).sum()
    }

    pub fn total_paid(&self) -> f64 {
        self.participants.iter().map(|p| p.paid).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn txn(spent: &[(&str, f64)], paid: &[(&str, f64)]) -> Transaction {
        Transaction {
            purpose: "Test".into(),
            category: "Food".into(),
            date_time: NaiveDate::from_ymd_opt(2024, 2, 1)
                .unwrap()
                .and_hms_opt(8, 30, 0)
                .unwrap(),
            spent_amounts: spent.iter().map(|(n, a)| (n.to_string(), *a)).collect(),
            paid_amounts: paid.iter().map(|(n, a)| (n.to_string(), *a)).collect(),
            receipt: None,
        }
    }

    #[test]
    fn test_balances() {
        let transactions = vec![
            txn(&[("Alice", 25.0), ("Bob", 25.0)], &[("Alice", 50.0)]),
            txn(&[("Bob", 30.0)], &[("Carol", 30.0)]),
        ];

        let balances = ParticipantBalances::from_transactions(&transactions);
        let names: Vec<_> = balances.participants.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Alice", "Bob", "Carol"]);

        let alice = balances.get("Alice").unwrap();
        assert_eq!(alice.spent, 25.0);
        assert_eq!(alice.paid, 50.0);
        assert_eq!(alice.balance, 25.0);

        let bob = balances.get("Bob").unwrap();
        assert_eq!(bob.paid, 0.0);
        assert_eq!(bob.balance, -55.0);

        let carol = balances.get("Carol").unwrap();
        assert_eq!(carol.spent, 0.0);
        assert_eq!(carol.balance, 30.0);
    }

    #[test]
    fn test_balanced_ledger_sums_to_zero() {
        let transactions = vec![
            txn(&[("Alice", 10.1), ("Bob", 20.2)], &[("Bob", 30.3)]),
            txn(&[("Alice", 3.3)], &[("Alice", 1.1), ("Bob", 2.2)]),
        ];

        let balances = ParticipantBalances::from_transactions(&transactions);
        let sum: f64 = balances.participants.iter().map(|p| p.balance).sum();
        assert!(sum.abs() < 1e-9);
        assert!((balances.total_spent() - balances.total_paid()).abs() < 1e-9);
    }

    #[test]
    fn test_empty_ledger() {
        let balances = ParticipantBalances::from_transactions(&[]);
        assert!(balances.participants.is_empty());
        assert!(balances.get("Alice").is_none());
    }
}
