#![allow(dead_code)]

use chrono::{NaiveDate, TimeZone, Utc};
use expense_tracker::{
    core::clock::FixedClock,
    domain::{Amount, Transaction, TransactionKind},
    storage::{JsonFileStore, LocalTransactionStore},
};
use tempfile::TempDir;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub fn clock() -> FixedClock {
    FixedClock(Utc.with_ymd_and_hms(2024, 6, 30, 12, 0, 0).unwrap())
}

pub fn txn(kind: TransactionKind, amount: &str, category: &str, on: NaiveDate) -> Transaction {
    Transaction::new(
        kind,
        amount.parse::<Amount>().expect("valid amount"),
        category,
        on,
        clock().0,
    )
    .with_description(format!("{category} on {on}"))
}

pub fn income(amount: &str, category: &str, on: NaiveDate) -> Transaction {
    txn(TransactionKind::Income, amount, category, on)
}

pub fn expense(amount: &str, category: &str, on: NaiveDate) -> Transaction {
    txn(TransactionKind::Expense, amount, category, on)
}

/// Store backed by JSON files in a fresh temporary directory.
pub fn file_store() -> (TempDir, LocalTransactionStore<JsonFileStore>) {
    let dir = TempDir::new().expect("create temp dir");
    let backend = JsonFileStore::new(dir.path().join("store")).expect("create backend");
    let store = LocalTransactionStore::open(backend).expect("open store");
    (dir, store)
}

pub fn reopen(dir: &TempDir) -> LocalTransactionStore<JsonFileStore> {
    let backend = JsonFileStore::new(dir.path().join("store")).expect("create backend");
    LocalTransactionStore::open(backend).expect("reopen store")
}
