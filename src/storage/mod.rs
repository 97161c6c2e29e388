//! Persistence behind an injected key-value abstraction.

pub mod json_backend;
pub mod memory;
pub mod transactions;

use serde::{de::DeserializeOwned, Serialize};

use crate::errors::Result;

/// Key under which the transaction list is stored.
pub const TRANSACTIONS_KEY: &str = "expense-tracker-transactions";
/// Key under which the category registry is stored.
pub const CATEGORIES_KEY: &str = "expense-tracker-categories";

/// String-keyed store of serialized values, in the manner of browser local storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// Reads and decodes the JSON value stored under `key`, if any.
pub fn load_json<T, S>(store: &S, key: &str) -> Result<Option<T>>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    match store.get(key)? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

/// Encodes `value` as JSON and stores it under `key`.
pub fn save_json<T, S>(store: &mut S, key: &str, value: &T) -> Result<()>
where
    T: Serialize + ?Sized,
    S: KeyValueStore + ?Sized,
{
    let raw = serde_json::to_string(value)?;
    store.set(key, &raw)
}

pub use json_backend::JsonFileStore;
pub use memory::MemoryStore;
pub use transactions::{LocalTransactionStore, TransactionStore};
