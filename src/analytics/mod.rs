//! Aggregation of a transaction collection into totals, a per-category
//! breakdown and a bounded monthly trend.
//!
//! Everything here is a pure function of its input: callers recompute the
//! full [`Analytics`] value whenever the collection changes.

pub mod report;

use std::collections::{BTreeMap, HashMap};

use serde::{ser::SerializeMap, Serialize, Serializer};

use crate::domain::{Amount, Balance, MonthKey, Transaction, TransactionKind};

pub use report::{CategoryReport, CategoryShare};

/// Maximum number of month buckets kept in [`Analytics::monthly_trend`].
pub const TREND_WINDOW: usize = 6;

/// Derived summary of a transaction collection. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Analytics {
    pub total_income: Amount,
    pub total_expenses: Amount,
    pub balance: Balance,
    pub category_breakdown: CategoryBreakdown,
    pub monthly_trend: Vec<MonthlyTotals>,
}

impl Analytics {
    /// The most recent month with at least one transaction.
    pub fn latest_month(&self) -> Option<&MonthlyTotals> {
        self.monthly_trend.last()
    }
}

/// Income and expense sums for one month bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthlyTotals {
    pub month: MonthKey,
    pub income: Amount,
    pub expenses: Amount,
}

impl MonthlyTotals {
    pub fn empty(month: MonthKey) -> Self {
        Self {
            month,
            income: Amount::ZERO,
            expenses: Amount::ZERO,
        }
    }

    fn record(&mut self, transaction: &Transaction) {
        match transaction.kind {
            TransactionKind::Income => self.income += transaction.amount,
            TransactionKind::Expense => self.expenses += transaction.amount,
        }
    }

    pub fn net(&self) -> Balance {
        Balance::between(self.income, self.expenses)
    }
}

/// Category name to summed amount, enumerated in first-seen order.
///
/// Income and expense amounts sharing a category name are summed together.
/// Equality ignores enumeration order.
#[derive(Debug, Clone, Default)]
pub struct CategoryBreakdown {
    entries: Vec<(String, Amount)>,
    index: HashMap<String, usize>,
}

impl CategoryBreakdown {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, category: &str, amount: Amount) {
        match self.index.get(category) {
            Some(&position) => self.entries[position].1 += amount,
            None => {
                self.index.insert(category.to_string(), self.entries.len());
                self.entries.push((category.to_string(), amount));
            }
        }
    }

    pub fn get(&self, category: &str) -> Option<Amount> {
        self.index
            .get(category)
            .map(|&position| self.entries[position].1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Amount)> + '_ {
        self.entries
            .iter()
            .map(|(name, amount)| (name.as_str(), *amount))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total(&self) -> Amount {
        self.entries.iter().map(|(_, amount)| *amount).sum()
    }
}

impl PartialEq for CategoryBreakdown {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(name, amount)| other.get(name) == Some(amount))
    }
}

impl Eq for CategoryBreakdown {}

impl<K: AsRef<str>> FromIterator<(K, Amount)> for CategoryBreakdown {
    fn from_iter<I: IntoIterator<Item = (K, Amount)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(CategoryBreakdown::new(), |mut breakdown, (name, amount)| {
                breakdown.add(name.as_ref(), amount);
                breakdown
            })
    }
}

impl Serialize for CategoryBreakdown {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (name, amount) in self.iter() {
            map.serialize_entry(name, &amount)?;
        }
        map.end()
    }
}

/// Reduces a transaction collection into its [`Analytics`] summary.
///
/// Total over any input, including the empty slice. The result does not
/// depend on input order apart from the enumeration order of the breakdown.
///
/// Each amount is capped at [`MAX_MINOR`](crate::domain::amount::MAX_MINOR)
/// minor units. Sums saturate at `i64::MAX` rather than wrap, which takes
/// roughly 92,000 maximal records.
pub fn compute_analytics(transactions: &[Transaction]) -> Analytics {
    let total_income = total_for(transactions, TransactionKind::Income);
    let total_expenses = total_for(transactions, TransactionKind::Expense);

    Analytics {
        total_income,
        total_expenses,
        balance: Balance::between(total_income, total_expenses),
        category_breakdown: category_breakdown(transactions),
        monthly_trend: monthly_trend(transactions),
    }
}

fn total_for(transactions: &[Transaction], kind: TransactionKind) -> Amount {
    transactions
        .iter()
        .filter(|transaction| transaction.kind == kind)
        .map(|transaction| transaction.amount)
        .sum()
}

/// Sums amounts per category name across both kinds.
pub fn category_breakdown(transactions: &[Transaction]) -> CategoryBreakdown {
    transactions
        .iter()
        .map(|transaction| (transaction.category.as_str(), transaction.amount))
        .collect()
}

/// Per-month totals for the [`TREND_WINDOW`] most recent months that have
/// data, ascending. Empty months are not synthesized.
pub fn monthly_trend(transactions: &[Transaction]) -> Vec<MonthlyTotals> {
    let buckets = transactions.iter().fold(
        BTreeMap::<MonthKey, MonthlyTotals>::new(),
        |mut buckets, transaction| {
            let month = transaction.month();
            buckets
                .entry(month)
                .or_insert_with(|| MonthlyTotals::empty(month))
                .record(transaction);
            buckets
        },
    );
    let skip = buckets.len().saturating_sub(TREND_WINDOW);
    buckets.into_values().skip(skip).collect()
}
