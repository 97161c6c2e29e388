//! Search and filter rules for the transaction list.

use std::str::FromStr;

use crate::{
    domain::{Transaction, TransactionKind},
    errors::TrackerError,
};

/// Restricts the list to one kind, or shows both.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum KindFilter {
    #[default]
    All,
    Only(TransactionKind),
}

impl KindFilter {
    pub fn matches(&self, kind: TransactionKind) -> bool {
        match self {
            KindFilter::All => true,
            KindFilter::Only(wanted) => *wanted == kind,
        }
    }
}

impl FromStr for KindFilter {
    type Err = TrackerError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        if input.trim().eq_ignore_ascii_case("all") {
            return Ok(KindFilter::All);
        }
        input.parse().map(KindFilter::Only)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionFilter {
    pub search: String,
    pub category: Option<String>,
    pub kind: KindFilter,
}

impl TransactionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_kind(mut self, kind: KindFilter) -> Self {
        self.kind = kind;
        self
    }

    /// Case-insensitive search over description and category, exact category
    /// match, then kind.
    pub fn matches(&self, transaction: &Transaction) -> bool {
        let needle = self.search.to_lowercase();
        let matches_search = transaction.description.to_lowercase().contains(&needle)
            || transaction.category.to_lowercase().contains(&needle);
        let matches_category = self
            .category
            .as_deref()
            .map_or(true, |category| transaction.category == category);
        matches_search && matches_category && self.kind.matches(transaction.kind)
    }

    /// Matching transactions, newest date first. Equal dates keep input order.
    pub fn apply<'a>(&self, transactions: &'a [Transaction]) -> Vec<&'a Transaction> {
        let mut matching: Vec<&Transaction> = transactions
            .iter()
            .filter(|transaction| self.matches(transaction))
            .collect();
        matching.sort_by(|a, b| b.date.cmp(&a.date));
        matching
    }
}
