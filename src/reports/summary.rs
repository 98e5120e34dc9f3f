//! Expense summary matrix
//!
//! Folds transactions into a category × participant table of cumulative
//! amounts. The matrix is built once, from either the spent or the paid side
//! of every transaction, and is read-only afterwards apart from explicit
//! category reordering and relabeling.

use std::collections::{BTreeSet, HashMap};
use std::fmt;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::error::{SummaryError, SummaryResult};
use crate::models::{Amounts, Transaction};

/// Which side of each transaction the matrix accumulates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AmountKind {
    /// Amounts owed by each beneficiary
    #[default]
    Spent,
    /// Amounts actually paid by each payer
    Paid,
}

impl AmountKind {
    /// Select the matching amounts of a transaction
    pub fn amounts<'a>(&self, transaction: &'a Transaction) -> &'a Amounts {
        match self {
            Self::Spent => &transaction.spent_amounts,
            Self::Paid => &transaction.paid_amounts,
        }
    }
}

impl fmt::Display for AmountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Spent => write!(f, "Spent"),
            Self::Paid => write!(f, "Paid"),
        }
    }
}

/// One category of the matrix with its per-participant amounts
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryRow {
    /// Category label (empty for uncategorized)
    pub category: String,
    /// Cumulative amount per participant
    pub amounts: Amounts,
}

impl CategoryRow {
    fn new(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            amounts: Amounts::new(),
        }
    }

    /// Sum over all participants in this category
    pub fn total(&self) -> f64 {
        self.amounts.values().sum()
    }
}

/// Per-category totals, in the matrix's category order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryTotals(Vec<(String, f64)>);

impl CategoryTotals {
    /// Total of a category, if present
    pub fn get(&self, category: &str) -> Option<f64> {
        self.0
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, total)| *total)
    }

    /// Iterate over (category, total) pairs in order
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(name, total)| (name.as_str(), *total))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sum of all category totals
    pub fn grand_total(&self) -> f64 {
        self.0.iter().map(|(_, total)| total).sum()
    }
}

impl Serialize for CategoryTotals {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (category, total) in &self.0 {
            map.serialize_entry(category, total)?;
        }
        map.end()
    }
}

/// Matrix of the sum of expenses by category and participant
///
/// `matrix[category][name]` is the sum, over every aggregated transaction in
/// `category`, of that participant's amount on the chosen [`AmountKind`].
#[derive(Debug, Clone, Default)]
pub struct ExpenseSummaryMatrix {
    kind: AmountKind,
    rows: Vec<CategoryRow>,
    /// Category label -> position in `rows`
    index: HashMap<String, usize>,
}

impl ExpenseSummaryMatrix {
    /// Create an empty matrix
    pub fn new(kind: AmountKind) -> Self {
        Self {
            kind,
            rows: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Aggregate a sequence of transactions in a single pass
    pub fn from_transactions<I>(transactions: I, kind: AmountKind) -> Self
    where
        I: IntoIterator<Item = Transaction>,
    {
        let mut matrix = Self::new(kind);
        for transaction in transactions {
            matrix.add_transaction(&transaction);
        }
        matrix
    }

    /// Aggregate fallible transactions, stopping at the first error
    ///
    /// No partial matrix is returned when any item is an error.
    pub fn try_from_transactions<I>(transactions: I, kind: AmountKind) -> SummaryResult<Self>
    where
        I: IntoIterator<Item = SummaryResult<Transaction>>,
    {
        let mut matrix = Self::new(kind);
        for transaction in transactions {
            matrix.add_transaction(&transaction?);
        }
        Ok(matrix)
    }

    /// Accumulate one transaction into the matrix
    pub fn add_transaction(&mut self, transaction: &Transaction) {
        for (name, amount) in self.kind.amounts(transaction) {
            *self.cell_mut(&transaction.category, name) += *amount;
        }
    }

    /// Get a cell for accumulation, inserting it at zero when absent
    fn cell_mut(&mut self, category: &str, name: &str) -> &mut f64 {
        let idx = match self.index.get(category) {
            Some(&idx) => idx,
            None => {
                self.rows.push(CategoryRow::new(category));
                let idx = self.rows.len() - 1;
                self.index.insert(category.to_string(), idx);
                idx
            }
        };

        self.rows[idx]
            .amounts
            .entry(name.to_string())
            .or_insert(0.0)
    }

    /// The side of each transaction this matrix accumulates
    pub fn amount_kind(&self) -> AmountKind {
        self.kind
    }

    /// Category rows in their current order
    pub fn rows(&self) -> &[CategoryRow] {
        &self.rows
    }

    /// Category labels in their current order
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|row| row.category.as_str())
    }

    /// Per-participant amounts of a category
    pub fn category(&self, category: &str) -> Option<&Amounts> {
        self.index.get(category).map(|&idx| &self.rows[idx].amounts)
    }

    /// A single cell
    pub fn get(&self, category: &str, name: &str) -> Option<f64> {
        self.category(category)
            .and_then(|amounts| amounts.get(name))
            .copied()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of distinct categories
    pub fn category_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of distinct participants across all categories
    pub fn participant_count(&self) -> usize {
        self.names().len()
    }

    /// All participant names appearing in any category
    pub fn names(&self) -> BTreeSet<String> {
        self.rows
            .iter()
            .flat_map(|row| row.amounts.keys().cloned())
            .collect()
    }

    /// Sum over all participants, per category
    pub fn totals_by_category(&self) -> CategoryTotals {
        CategoryTotals(
            self.rows
                .iter()
                .map(|row| (row.category.clone(), row.total()))
                .collect(),
        )
    }

    /// Reorder categories from highest to lowest total
    ///
    /// Categories with equal totals keep their relative order. Cell values are
    /// not touched.
    pub fn sort_categories_by_total(&mut self) {
        let mut keyed: Vec<(f64, CategoryRow)> = self
            .rows
            .drain(..)
            .map(|row| (row.total(), row))
            .collect();
        keyed.sort_by(|a, b| b.0.total_cmp(&a.0));

        self.rows = keyed.into_iter().map(|(_, row)| row).collect();
        self.rebuild_index();
    }

    /// Rename a category key in place
    pub fn relabel_category(&mut self, from: &str, to: &str) -> SummaryResult<()> {
        if from == to {
            return Ok(());
        }
        if self.index.contains_key(to) {
            return Err(SummaryError::Validation(format!(
                "category '{}' already exists",
                to
            )));
        }
        let idx = self.index.remove(from).ok_or_else(|| {
            SummaryError::Validation(format!("category '{}' not found", from))
        })?;

        self.rows[idx].category = to.to_string();
        self.index.insert(to.to_string(), idx);
        Ok(())
    }

    /// Fail when there are more categories than a consumer can present
    pub fn ensure_category_limit(&self, limit: usize) -> SummaryResult<()> {
        if self.category_count() > limit {
            return Err(SummaryError::UnsupportedScale {
                what: "categories",
                count: self.category_count(),
                limit,
            });
        }
        Ok(())
    }

    fn rebuild_index(&mut self) {
        self.index = self
            .rows
            .iter()
            .enumerate()
            .map(|(idx, row)| (row.category.clone(), idx))
            .collect();
    }
}

impl Serialize for ExpenseSummaryMatrix {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.rows.len()))?;
        for row in &self.rows {
            map.serialize_entry(&row.category, &row.amounts)?;
        }
        map.end()
    }
}
