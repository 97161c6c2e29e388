pub mod amount;
pub mod category;
pub mod common;
pub mod transaction;

pub use amount::{Amount, Balance};
pub use category::{default_categories, Category, FALLBACK_COLOR, FALLBACK_ICON};
pub use common::{Displayable, MonthKey};
pub use transaction::{Transaction, TransactionDraft, TransactionKind};
