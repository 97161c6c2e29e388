use std::{fmt, str::FromStr};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::amount::Amount;
use crate::domain::common::{Displayable, MonthKey};
use crate::errors::{Result, TrackerError};

/// Direction of a money flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }

    /// Sign prefix used when rendering a flow of this kind.
    pub fn sign(&self) -> char {
        match self {
            TransactionKind::Income => '+',
            TransactionKind::Expense => '-',
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = TrackerError;

    fn from_str(input: &str) -> Result<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(TransactionKind::Income),
            "expense" => Ok(TransactionKind::Expense),
            other => Err(TrackerError::Validation(format!(
                "unknown transaction type `{other}` (use income or expense)"
            ))),
        }
    }
}

/// A recorded income or expense event. Edits replace the record wholesale
/// while keeping `id` and `created_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub amount: Amount,
    pub category: String,
    #[serde(default)]
    pub description: String,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    pub fn new(
        kind: TransactionKind,
        amount: Amount,
        category: impl Into<String>,
        date: NaiveDate,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            amount,
            category: category.into(),
            description: String::new(),
            date,
            created_at,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn from_draft(draft: TransactionDraft, created_at: DateTime<Utc>) -> Self {
        Self::new(draft.kind, draft.amount, draft.category, draft.date, created_at)
            .with_description(draft.description)
    }

    /// Builds the replacement record for an edit.
    pub fn replaced_by(&self, draft: TransactionDraft) -> Self {
        Self {
            id: self.id,
            kind: draft.kind,
            amount: draft.amount,
            category: draft.category,
            description: draft.description,
            date: draft.date,
            created_at: self.created_at,
        }
    }

    pub fn month(&self) -> MonthKey {
        MonthKey::from_date(self.date)
    }
}

impl Displayable for Transaction {
    fn display_label(&self) -> String {
        format!(
            "{} {}{} {} on {}",
            self.category,
            self.kind.sign(),
            self.amount,
            self.kind,
            self.date
        )
    }
}

/// User-editable fields of a transaction, as captured by a form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionDraft {
    pub kind: TransactionKind,
    pub amount: Amount,
    pub category: String,
    pub description: String,
    pub date: NaiveDate,
}

impl TransactionDraft {
    pub fn new(
        kind: TransactionKind,
        amount: Amount,
        category: impl Into<String>,
        description: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            kind,
            amount,
            category: category.into(),
            description: description.into(),
            date,
        }
    }

    /// Rejects drafts missing a category or description.
    pub fn validate(&self) -> Result<()> {
        if self.category.trim().is_empty() {
            return Err(TrackerError::Validation("category is required".into()));
        }
        if self.description.trim().is_empty() {
            return Err(TrackerError::Validation("description is required".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn draft() -> TransactionDraft {
        TransactionDraft::new(
            TransactionKind::Expense,
            Amount::whole(42),
            "Shopping",
            "Shoes",
            date(2024, 5, 3),
        )
    }

    #[test]
    fn kind_parses_case_insensitively() {
        assert_eq!(
            "Income".parse::<TransactionKind>().unwrap(),
            TransactionKind::Income
        );
        assert_eq!(
            " expense ".parse::<TransactionKind>().unwrap(),
            TransactionKind::Expense
        );
        assert!("transfer".parse::<TransactionKind>().is_err());
    }

    #[test]
    fn draft_validation_requires_category_and_description() {
        assert!(draft().validate().is_ok());

        let mut missing_category = draft();
        missing_category.category = "   ".into();
        assert!(missing_category.validate().is_err());

        let mut missing_description = draft();
        missing_description.description.clear();
        assert!(missing_description.validate().is_err());
    }

    #[test]
    fn replacement_keeps_identity_and_creation_time() {
        let created = Utc.with_ymd_and_hms(2024, 5, 3, 9, 30, 0).unwrap();
        let original = Transaction::from_draft(draft(), created);

        let mut edit = draft();
        edit.kind = TransactionKind::Income;
        edit.amount = Amount::whole(7);
        edit.date = date(2024, 6, 1);
        let replaced = original.replaced_by(edit);

        assert_eq!(replaced.id, original.id);
        assert_eq!(replaced.created_at, created);
        assert_eq!(replaced.kind, TransactionKind::Income);
        assert_eq!(replaced.amount, Amount::whole(7));
        assert_eq!(replaced.month().to_string(), "2024-06");
    }

    #[test]
    fn serializes_with_type_and_camel_case_keys() {
        let created = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();
        let txn = Transaction::new(
            TransactionKind::Income,
            Amount::whole(1000),
            "Salary",
            date(2024, 1, 15),
            created,
        );
        let json = serde_json::to_value(&txn).unwrap();
        assert_eq!(json["type"], "income");
        assert_eq!(json["amount"], 1000);
        assert_eq!(json["date"], "2024-01-15");
        assert!(json.get("createdAt").is_some());
    }
}
