mod common;

use std::fs;

use common::{date, expense, file_store, income, reopen};
use expense_tracker::{
    core::registry::CategoryRegistry,
    domain::{Amount, Category, TransactionKind},
    storage::{
        JsonFileStore, KeyValueStore, LocalTransactionStore, TransactionStore, CATEGORIES_KEY,
        TRANSACTIONS_KEY,
    },
    compute_analytics, TrackerError,
};

#[test]
fn mutations_survive_reopening() {
    let (dir, mut store) = file_store();
    let salary = income("1000", "Salary", date(2024, 1, 15));
    let lunch = expense("12.40", "Food & Dining", date(2024, 1, 16));
    store.add(salary.clone()).unwrap();
    store.add(lunch.clone()).unwrap();
    store.remove(salary.id).unwrap();

    let reopened = reopen(&dir);
    assert_eq!(reopened.list(), &[lunch]);
}

#[test]
fn records_are_written_as_camel_case_json() {
    let (dir, mut store) = file_store();
    store.add(expense("5", "Other", date(2024, 2, 2))).unwrap();

    let backend = JsonFileStore::new(dir.path().join("store")).unwrap();
    let raw = fs::read_to_string(backend.path_for(TRANSACTIONS_KEY)).unwrap();
    assert!(raw.contains("\"type\":\"expense\""));
    assert!(raw.contains("\"createdAt\""));
    assert!(raw.contains("\"date\":\"2024-02-02\""));
    assert!(raw.contains("\"amount\":5,"));
}

#[test]
fn decimal_amount_records_load_and_report_in_major_units() {
    let dir = tempfile::tempdir().unwrap();
    let mut backend = JsonFileStore::new(dir.path().to_path_buf()).unwrap();
    let records = r#"[
        {"id":"3f6c2a9e-8b1d-4c57-9e0a-2d4f6b8c1e7a","type":"income","amount":50,
         "category":"Other","description":"refund","date":"2024-03-01",
         "createdAt":"2024-03-01T10:00:00.000Z"},
        {"id":"9a1b7c3d-5e2f-4a6b-8c9d-0e1f2a3b4c5d","type":"expense","amount":12.5,
         "category":"Other","description":"snacks","date":"2024-03-02",
         "createdAt":"2024-03-02T18:30:00.000Z"},
        {"id":"0c4e8a2b-6d1f-4b3a-9e7c-5a2d8f1b3c6e","type":"expense","amount":17.5,
         "category":"Other","description":"","date":"2024-03-03",
         "createdAt":"2024-03-03T08:15:00.000Z"}
    ]"#;
    backend.set(TRANSACTIONS_KEY, records).unwrap();

    let store = LocalTransactionStore::open(backend).unwrap();
    assert_eq!(store.list()[1].amount, "12.50".parse::<Amount>().unwrap());

    let value = serde_json::to_value(compute_analytics(store.list())).unwrap();
    assert_eq!(value["categoryBreakdown"]["Other"], 80);
    assert_eq!(value["totalExpenses"], 30);
    assert_eq!(value["balance"], 20);
    assert_eq!(value["monthlyTrend"][0]["expenses"], 30);
}

#[test]
fn over_precise_or_negative_amounts_fail_to_load() {
    for amount in ["12.345", "-4"] {
        let dir = tempfile::tempdir().unwrap();
        let mut backend = JsonFileStore::new(dir.path().to_path_buf()).unwrap();
        let record = format!(
            r#"[{{"id":"3f6c2a9e-8b1d-4c57-9e0a-2d4f6b8c1e7a","type":"expense","amount":{amount},
                "category":"Other","description":"","date":"2024-03-01",
                "createdAt":"2024-03-01T10:00:00Z"}}]"#
        );
        backend.set(TRANSACTIONS_KEY, &record).unwrap();
        assert!(matches!(
            LocalTransactionStore::open(backend),
            Err(TrackerError::Storage(_))
        ));
    }
}

#[test]
fn update_keeps_position_and_creation_time() {
    let (dir, mut store) = file_store();
    let first = income("10", "Salary", date(2024, 3, 1));
    let second = income("20", "Freelance", date(2024, 3, 2));
    store.add(first.clone()).unwrap();
    store.add(second.clone()).unwrap();

    let mut changed = first.clone();
    changed.amount = "99.99".parse().unwrap();
    changed.created_at = second.created_at + chrono::Duration::days(3);
    let stored = store.update(changed).unwrap();
    assert_eq!(stored.created_at, first.created_at);

    let reopened = reopen(&dir);
    assert_eq!(reopened.list()[0].id, first.id);
    assert_eq!(reopened.list()[0].amount, "99.99".parse::<Amount>().unwrap());
    assert_eq!(reopened.list()[1], second);
}

#[test]
fn duplicate_ids_are_rejected() {
    let (_dir, mut store) = file_store();
    let record = income("10", "Salary", date(2024, 3, 1));
    store.add(record.clone()).unwrap();
    assert!(matches!(
        store.add(record),
        Err(TrackerError::DuplicateTransaction(_))
    ));
    assert_eq!(store.list().len(), 1);
}

#[test]
fn corrupted_file_is_a_storage_error() {
    let (dir, store) = file_store();
    let path = store.backend().path_for(TRANSACTIONS_KEY);
    drop(store);
    fs::write(&path, "{not json").unwrap();

    let backend = JsonFileStore::new(dir.path().join("store")).unwrap();
    assert!(matches!(
        LocalTransactionStore::open(backend),
        Err(TrackerError::Storage(_))
    ));
}

#[test]
fn categories_round_trip_through_files() {
    let dir = tempfile::tempdir().unwrap();
    let mut backend = JsonFileStore::new(dir.path().to_path_buf()).unwrap();
    assert!(backend.get(CATEGORIES_KEY).unwrap().is_none());

    let registry = CategoryRegistry::new(vec![Category::new(
        "pets",
        "Pets",
        "🐾",
        "#A3E4D7",
        TransactionKind::Expense,
    )]);
    registry.save(&mut backend).unwrap();

    let reloaded = CategoryRegistry::load(&backend).unwrap();
    assert_eq!(reloaded, registry);

    backend.remove(CATEGORIES_KEY).unwrap();
    assert_eq!(CategoryRegistry::load(&backend).unwrap(), CategoryRegistry::default());
}
