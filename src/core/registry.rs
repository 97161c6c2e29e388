//! Lookup from category name to display metadata.

use tracing::{debug, info};

use crate::{
    domain::{default_categories, Category, TransactionKind, FALLBACK_COLOR, FALLBACK_ICON},
    errors::Result,
    storage::{load_json, save_json, KeyValueStore, CATEGORIES_KEY},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRegistry {
    categories: Vec<Category>,
}

impl Default for CategoryRegistry {
    fn default() -> Self {
        Self::new(default_categories())
    }
}

impl CategoryRegistry {
    pub fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    /// Loads the stored registry, falling back to the built-in categories.
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Result<Self> {
        match load_json::<Vec<Category>, _>(store, CATEGORIES_KEY)? {
            Some(categories) => {
                debug!(count = categories.len(), "loaded stored categories");
                Ok(Self::new(categories))
            }
            None => {
                debug!("no stored categories; using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Like [`load`](Self::load), but writes the defaults back when nothing was stored.
    pub fn load_or_seed<S: KeyValueStore + ?Sized>(store: &mut S) -> Result<Self> {
        if store.get(CATEGORIES_KEY)?.is_some() {
            return Self::load(store);
        }
        let registry = Self::default();
        registry.save(store)?;
        info!(count = registry.categories.len(), "seeded default categories");
        Ok(registry)
    }

    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &mut S) -> Result<()> {
        save_json(store, CATEGORIES_KEY, &self.categories)
    }

    pub fn all(&self) -> &[Category] {
        &self.categories
    }

    pub fn find(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|category| category.name == name)
    }

    /// Categories offered for a transaction of `kind`.
    pub fn for_kind(&self, kind: TransactionKind) -> impl Iterator<Item = &Category> + '_ {
        self.categories
            .iter()
            .filter(move |category| category.kind == kind)
    }

    /// Whether `name` is a registered category of the given kind.
    pub fn accepts(&self, kind: TransactionKind, name: &str) -> bool {
        self.find(name)
            .is_some_and(|category| category.kind == kind)
    }

    pub fn color_for(&self, name: &str) -> &str {
        self.find(name)
            .map(|category| category.color.as_str())
            .unwrap_or(FALLBACK_COLOR)
    }

    pub fn icon_for(&self, name: &str) -> &str {
        self.find(name)
            .map(|category| category.icon.as_str())
            .unwrap_or(FALLBACK_ICON)
    }
}
