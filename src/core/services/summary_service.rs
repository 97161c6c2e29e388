use serde::Serialize;

use crate::{
    analytics::{compute_analytics, Analytics, CategoryReport},
    core::registry::CategoryRegistry,
    domain::{Amount, Balance, MonthKey},
    storage::TransactionStore,
};

/// Quick figures shown above the transaction list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    /// Most recent month with data; the "this month" figures refer to it.
    pub latest_month: Option<MonthKey>,
    pub latest_income: Amount,
    pub latest_expenses: Amount,
    pub balance: Balance,
    pub transaction_count: usize,
}

/// Read-side views recomputed from the store on every call.
pub struct SummaryService;

impl SummaryService {
    pub fn analytics<S: TransactionStore + ?Sized>(store: &S) -> Analytics {
        compute_analytics(store.list())
    }

    pub fn dashboard<S: TransactionStore + ?Sized>(store: &S) -> DashboardStats {
        Self::dashboard_from(&Self::analytics(store), store.list().len())
    }

    pub fn dashboard_from(analytics: &Analytics, transaction_count: usize) -> DashboardStats {
        let latest = analytics.latest_month();
        DashboardStats {
            latest_month: latest.map(|totals| totals.month),
            latest_income: latest.map_or(Amount::ZERO, |totals| totals.income),
            latest_expenses: latest.map_or(Amount::ZERO, |totals| totals.expenses),
            balance: analytics.balance,
            transaction_count,
        }
    }

    pub fn category_report<S: TransactionStore + ?Sized>(
        store: &S,
        registry: &CategoryRegistry,
    ) -> CategoryReport {
        CategoryReport::build(&Self::analytics(store), registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Transaction, TransactionKind};
    use crate::storage::{LocalTransactionStore, MemoryStore};
    use chrono::{NaiveDate, TimeZone, Utc};

    fn add(
        store: &mut LocalTransactionStore<MemoryStore>,
        kind: TransactionKind,
        amount: u32,
        ymd: (i32, u32, u32),
    ) {
        let (y, m, d) = ymd;
        store
            .add(Transaction::new(
                kind,
                Amount::whole(amount),
                "Other",
                NaiveDate::from_ymd_opt(y, m, d).unwrap(),
                Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            ))
            .unwrap();
    }

    #[test]
    fn dashboard_on_empty_store_is_zeroed() {
        let store = LocalTransactionStore::open(MemoryStore::new()).unwrap();
        let stats = SummaryService::dashboard(&store);
        assert_eq!(stats.latest_month, None);
        assert_eq!(stats.latest_income, Amount::ZERO);
        assert_eq!(stats.transaction_count, 0);
    }

    #[test]
    fn dashboard_reports_latest_month_with_data() {
        let mut store = LocalTransactionStore::open(MemoryStore::new()).unwrap();
        add(&mut store, TransactionKind::Income, 900, (2024, 3, 1));
        add(&mut store, TransactionKind::Expense, 30, (2024, 5, 20));
        add(&mut store, TransactionKind::Income, 100, (2024, 5, 2));

        let stats = SummaryService::dashboard(&store);
        assert_eq!(stats.latest_month, MonthKey::new(2024, 5));
        assert_eq!(stats.latest_income, Amount::whole(100));
        assert_eq!(stats.latest_expenses, Amount::whole(30));
        assert_eq!(stats.balance, Balance::between(Amount::whole(1000), Amount::whole(30)));
        assert_eq!(stats.transaction_count, 3);
    }

    #[test]
    fn category_report_reads_from_store() {
        let mut store = LocalTransactionStore::open(MemoryStore::new()).unwrap();
        add(&mut store, TransactionKind::Income, 50, (2024, 1, 1));
        add(&mut store, TransactionKind::Expense, 30, (2024, 1, 2));
        let report = SummaryService::category_report(&store, &CategoryRegistry::default());
        assert_eq!(report.rows.len(), 1);
        assert_eq!(report.rows[0].amount, Amount::whole(80));
    }
}
