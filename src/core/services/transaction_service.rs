use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    core::clock::Clock,
    domain::{Displayable, Transaction, TransactionDraft},
    errors::{Result, TrackerError},
    storage::TransactionStore,
};

/// Create, edit and delete commands issued against a [`TransactionStore`].
pub struct TransactionService;

impl TransactionService {
    /// Validates the draft, stamps a new id and creation time, and stores it.
    pub fn record<S>(
        store: &mut S,
        draft: TransactionDraft,
        clock: &dyn Clock,
    ) -> Result<Transaction>
    where
        S: TransactionStore + ?Sized,
    {
        draft.validate()?;
        let transaction = Transaction::from_draft(draft, clock.now());
        store.add(transaction.clone())?;
        info!(
            id = %transaction.id,
            kind = %transaction.kind,
            amount = %transaction.amount,
            "transaction recorded"
        );
        Ok(transaction)
    }

    /// Replaces the transaction wholesale, keeping its id and creation time.
    pub fn edit<S>(store: &mut S, id: Uuid, draft: TransactionDraft) -> Result<Transaction>
    where
        S: TransactionStore + ?Sized,
    {
        draft.validate()?;
        let replacement = store
            .get(id)
            .ok_or_else(|| TrackerError::TransactionNotFound(id.to_string()))?
            .replaced_by(draft);
        let stored = store.update(replacement)?;
        info!(%id, "transaction edited");
        Ok(stored)
    }

    pub fn delete<S>(store: &mut S, id: Uuid) -> Result<Transaction>
    where
        S: TransactionStore + ?Sized,
    {
        let removed = store.remove(id)?;
        info!(%id, label = %removed.display_label(), "transaction deleted");
        Ok(removed)
    }

    /// Finds a transaction by full id or by a unique prefix of its simple form.
    pub fn resolve<'a, S>(store: &'a S, reference: &str) -> Result<&'a Transaction>
    where
        S: TransactionStore + ?Sized,
    {
        let reference = reference.trim();
        if let Ok(id) = Uuid::parse_str(reference) {
            return store
                .get(id)
                .ok_or_else(|| TrackerError::TransactionNotFound(reference.to_string()));
        }

        let needle = reference.to_ascii_lowercase().replace('-', "");
        if needle.is_empty() {
            return Err(TrackerError::Validation("transaction id is required".into()));
        }
        let mut matches = store
            .list()
            .iter()
            .filter(|transaction| transaction.id.simple().to_string().starts_with(&needle));
        match (matches.next(), matches.next()) {
            (Some(found), None) => {
                debug!(reference, id = %found.id, "resolved transaction prefix");
                Ok(found)
            }
            (Some(_), Some(_)) => Err(TrackerError::AmbiguousTransaction(reference.to_string())),
            (None, _) => Err(TrackerError::TransactionNotFound(reference.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::FixedClock;
    use crate::domain::{Amount, TransactionKind};
    use crate::storage::{LocalTransactionStore, MemoryStore};
    use chrono::{NaiveDate, TimeZone, Utc};

    fn clock() -> FixedClock {
        FixedClock(Utc.with_ymd_and_hms(2024, 2, 10, 18, 45, 0).unwrap())
    }

    fn draft(description: &str) -> TransactionDraft {
        TransactionDraft::new(
            TransactionKind::Expense,
            Amount::whole(20),
            "Entertainment",
            description,
            NaiveDate::from_ymd_opt(2024, 2, 9).unwrap(),
        )
    }

    fn store() -> LocalTransactionStore<MemoryStore> {
        LocalTransactionStore::open(MemoryStore::new()).unwrap()
    }

    #[test]
    fn record_stamps_creation_time_from_clock() {
        let mut store = store();
        let txn = TransactionService::record(&mut store, draft("Cinema"), &clock()).unwrap();
        assert_eq!(txn.created_at, clock().now());
        assert_eq!(store.list(), &[txn]);
    }

    #[test]
    fn record_rejects_invalid_drafts() {
        let mut store = store();
        let err = TransactionService::record(&mut store, draft(""), &clock()).unwrap_err();
        assert!(matches!(err, TrackerError::Validation(_)));
        assert!(store.list().is_empty());
    }

    #[test]
    fn edit_replaces_fields_but_not_identity() {
        let mut store = store();
        let txn = TransactionService::record(&mut store, draft("Cinema"), &clock()).unwrap();

        let mut change = draft("Concert");
        change.amount = Amount::whole(75);
        let edited = TransactionService::edit(&mut store, txn.id, change).unwrap();

        assert_eq!(edited.id, txn.id);
        assert_eq!(edited.created_at, txn.created_at);
        assert_eq!(edited.description, "Concert");
        assert_eq!(store.list().len(), 1);
        assert_eq!(store.list()[0].amount, Amount::whole(75));
    }

    #[test]
    fn delete_unknown_id_fails() {
        let mut store = store();
        assert!(matches!(
            TransactionService::delete(&mut store, Uuid::new_v4()),
            Err(TrackerError::TransactionNotFound(_))
        ));
    }

    #[test]
    fn resolve_accepts_full_ids_and_unique_prefixes() {
        let mut store = store();
        let txn = TransactionService::record(&mut store, draft("Cinema"), &clock()).unwrap();

        let full = txn.id.to_string();
        assert_eq!(TransactionService::resolve(&store, &full).unwrap().id, txn.id);

        let prefix: String = txn.id.simple().to_string().chars().take(6).collect();
        assert_eq!(TransactionService::resolve(&store, &prefix).unwrap().id, txn.id);

        assert!(TransactionService::resolve(&store, "").is_err());
    }

    #[test]
    fn resolve_reports_ambiguous_prefixes() {
        let mut store = store();
        for name in [
            "A", "B", "C", "D", "E", "F", "G", "H", "I", "J", "K", "L", "M", "N", "O", "P", "Q",
        ] {
            TransactionService::record(&mut store, draft(name), &clock()).unwrap();
        }
        // 17 ids over 16 hex digits: at least two share a first character.
        let ambiguous = (0..16)
            .map(|digit| format!("{digit:x}"))
            .find(|prefix| {
                store
                    .list()
                    .iter()
                    .filter(|txn| txn.id.simple().to_string().starts_with(prefix.as_str()))
                    .count()
                    > 1
            })
            .expect("pigeonhole guarantees a shared prefix");
        assert!(matches!(
            TransactionService::resolve(&store, &ambiguous),
            Err(TrackerError::AmbiguousTransaction(_))
        ));
    }
}
