pub mod export_service;
pub mod summary_service;
pub mod transaction_service;

pub use export_service::{ExportService, ExportSnapshot};
pub use summary_service::{DashboardStats, SummaryService};
pub use transaction_service::TransactionService;
