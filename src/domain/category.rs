//! Domain types representing transaction categories.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::domain::common::Displayable;
use crate::domain::transaction::TransactionKind;

/// Color used when a category name has no registry entry.
pub const FALLBACK_COLOR: &str = "#6B7280";
/// Icon used when a category name has no registry entry.
pub const FALLBACK_ICON: &str = "💰";

/// Display metadata for a category name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub color: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
}

impl Category {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        icon: impl Into<String>,
        color: impl Into<String>,
        kind: TransactionKind,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            icon: icon.into(),
            color: color.into(),
            kind,
        }
    }
}

impl Displayable for Category {
    fn display_label(&self) -> String {
        format!("{} {} ({})", self.icon, self.name, self.kind)
    }
}

static DEFAULT_CATEGORIES: Lazy<Vec<Category>> = Lazy::new(|| {
    use TransactionKind::{Expense, Income};
    vec![
        Category::new("1", "Food & Dining", "🍽️", "#FF6B6B", Expense),
        Category::new("2", "Transportation", "🚗", "#4ECDC4", Expense),
        Category::new("3", "Shopping", "🛍️", "#45B7D1", Expense),
        Category::new("4", "Entertainment", "🎬", "#96CEB4", Expense),
        Category::new("5", "Bills & Utilities", "⚡", "#FFEAA7", Expense),
        Category::new("6", "Healthcare", "🏥", "#DDA0DD", Expense),
        Category::new("7", "Education", "📚", "#98D8C8", Expense),
        Category::new("8", "Travel", "✈️", "#F7DC6F", Expense),
        Category::new("9", "Salary", "💰", "#58D68D", Income),
        Category::new("10", "Freelance", "💻", "#85C1E9", Income),
        Category::new("11", "Investment", "📈", "#F8C471", Income),
        Category::new("12", "Other Income", "💵", "#BB8FCE", Income),
    ]
});

/// The built-in category set used when none has been stored.
pub fn default_categories() -> Vec<Category> {
    DEFAULT_CATEGORIES.clone()
}
