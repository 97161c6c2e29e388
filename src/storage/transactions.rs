use tracing::debug;
use uuid::Uuid;

use crate::{
    domain::Transaction,
    errors::{Result, TrackerError},
};

use super::{load_json, save_json, KeyValueStore, TRANSACTIONS_KEY};

/// Owns the canonical transaction list.
pub trait TransactionStore {
    fn list(&self) -> &[Transaction];
    fn add(&mut self, transaction: Transaction) -> Result<()>;
    /// Replaces the stored record with the same id, keeping its `created_at`.
    fn update(&mut self, transaction: Transaction) -> Result<Transaction>;
    fn remove(&mut self, id: Uuid) -> Result<Transaction>;

    fn get(&self, id: Uuid) -> Option<&Transaction> {
        self.list().iter().find(|transaction| transaction.id == id)
    }
}

/// Transaction list mirrored into a [`KeyValueStore`] after every mutation.
#[derive(Debug)]
pub struct LocalTransactionStore<S> {
    backend: S,
    transactions: Vec<Transaction>,
}

impl<S: KeyValueStore> LocalTransactionStore<S> {
    /// Loads the stored list; a missing key yields an empty store.
    pub fn open(backend: S) -> Result<Self> {
        let transactions: Vec<Transaction> =
            load_json(&backend, TRANSACTIONS_KEY)?.unwrap_or_default();
        debug!(count = transactions.len(), "loaded transactions");
        Ok(Self {
            backend,
            transactions,
        })
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    pub fn into_backend(self) -> S {
        self.backend
    }

    fn persist(&mut self) -> Result<()> {
        save_json(&mut self.backend, TRANSACTIONS_KEY, &self.transactions)
    }

    fn position(&self, id: Uuid) -> Result<usize> {
        self.transactions
            .iter()
            .position(|transaction| transaction.id == id)
            .ok_or_else(|| TrackerError::TransactionNotFound(id.to_string()))
    }
}

impl<S: KeyValueStore> TransactionStore for LocalTransactionStore<S> {
    fn list(&self) -> &[Transaction] {
        &self.transactions
    }

    fn add(&mut self, transaction: Transaction) -> Result<()> {
        if self.get(transaction.id).is_some() {
            return Err(TrackerError::DuplicateTransaction(transaction.id));
        }
        let id = transaction.id;
        self.transactions.push(transaction);
        if let Err(err) = self.persist() {
            self.transactions.pop();
            return Err(err);
        }
        debug!(%id, "transaction added");
        Ok(())
    }

    fn update(&mut self, mut transaction: Transaction) -> Result<Transaction> {
        let position = self.position(transaction.id)?;
        transaction.created_at = self.transactions[position].created_at;
        let previous = std::mem::replace(&mut self.transactions[position], transaction);
        if let Err(err) = self.persist() {
            self.transactions[position] = previous;
            return Err(err);
        }
        debug!(id = %previous.id, "transaction updated");
        Ok(self.transactions[position].clone())
    }

    fn remove(&mut self, id: Uuid) -> Result<Transaction> {
        let position = self.position(id)?;
        let removed = self.transactions.remove(position);
        if let Err(err) = self.persist() {
            self.transactions.insert(position, removed);
            return Err(err);
        }
        debug!(%id, "transaction removed");
        Ok(removed)
    }
}
