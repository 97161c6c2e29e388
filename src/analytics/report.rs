//! Ranked category rows for display, joined with registry metadata.

use serde::Serialize;

use crate::{analytics::Analytics, core::registry::CategoryRegistry, domain::Amount};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub name: String,
    pub amount: Amount,
    /// Percentage of the largest category amount, `0.0..=100.0`.
    pub share: f64,
    pub icon: String,
    pub color: String,
    pub registered: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CategoryReport {
    pub rows: Vec<CategoryShare>,
}

impl CategoryReport {
    /// Sorts the breakdown by amount, largest first, ties by name.
    pub fn build(analytics: &Analytics, registry: &CategoryRegistry) -> Self {
        let mut entries: Vec<(&str, Amount)> = analytics.category_breakdown.iter().collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        let largest = entries.first().map_or(0, |(_, amount)| amount.minor());

        let rows = entries
            .into_iter()
            .map(|(name, amount)| CategoryShare {
                name: name.to_string(),
                amount,
                share: if largest == 0 {
                    0.0
                } else {
                    amount.minor() as f64 / largest as f64 * 100.0
                },
                icon: registry.icon_for(name).to_string(),
                color: registry.color_for(name).to_string(),
                registered: registry.find(name).is_some(),
            })
            .collect();
        Self { rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
