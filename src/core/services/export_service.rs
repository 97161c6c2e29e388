use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    core::{registry::CategoryRegistry, utils::write_atomic},
    domain::{Category, Transaction},
    errors::Result,
    storage::TransactionStore,
};

/// Downloadable copy of everything the user has recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportSnapshot {
    pub transactions: Vec<Transaction>,
    pub categories: Vec<Category>,
}

pub struct ExportService;

impl ExportService {
    pub fn snapshot<S>(store: &S, registry: &CategoryRegistry) -> ExportSnapshot
    where
        S: TransactionStore + ?Sized,
    {
        ExportSnapshot {
            transactions: store.list().to_vec(),
            categories: registry.all().to_vec(),
        }
    }

    /// `expense-tracker-data-YYYY-MM-DD.json` for the export date.
    pub fn file_name(date: NaiveDate) -> String {
        format!("expense-tracker-data-{}.json", date.format("%Y-%m-%d"))
    }

    pub fn to_json(snapshot: &ExportSnapshot) -> Result<String> {
        Ok(serde_json::to_string_pretty(snapshot)?)
    }

    pub fn write_to(snapshot: &ExportSnapshot, path: &Path) -> Result<()> {
        write_atomic(path, &Self::to_json(snapshot)?)?;
        info!(
            path = %path.display(),
            transactions = snapshot.transactions.len(),
            "exported snapshot"
        );
        Ok(())
    }
}
