//! Expense Tracker records income and expense transactions and derives
//! totals, a per-category breakdown and a recent monthly trend from them.

pub mod analytics;
pub mod cli;
pub mod config;
pub mod core;
pub mod currency;
pub mod domain;
pub mod errors;
pub mod storage;
pub mod utils;

pub use analytics::{compute_analytics, Analytics, CategoryBreakdown, MonthlyTotals, TREND_WINDOW};
pub use domain::{Amount, Balance, MonthKey, Transaction, TransactionKind};
pub use errors::{Result, TrackerError};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Expense Tracker tracing initialized.");
    });
}
