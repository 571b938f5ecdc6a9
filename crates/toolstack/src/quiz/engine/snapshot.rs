use std::collections::{BTreeSet, HashSet};

use crate::catalog::{CategorySlug, Tool, ToolSlug};

/// The scoring view of one catalog tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogItem {
    pub slug: ToolSlug,
    pub category: CategorySlug,
    pub traits: BTreeSet<String>,
    pub monthly_cost: u32,
}

impl CatalogItem {
    pub fn new(
        slug: impl Into<String>,
        category: impl Into<String>,
        traits: impl IntoIterator<Item = impl Into<String>>,
        monthly_cost: u32,
    ) -> Self {
        Self {
            slug: ToolSlug(slug.into()),
            category: CategorySlug(category.into()),
            traits: traits.into_iter().map(Into::into).collect(),
            monthly_cost,
        }
    }

    pub fn is_free(&self) -> bool {
        self.monthly_cost == 0
    }
}

impl From<&Tool> for CatalogItem {
    fn from(tool: &Tool) -> Self {
        Self {
            slug: tool.slug.clone(),
            category: tool.category.clone(),
            traits: tool.traits.clone(),
            monthly_cost: tool.monthly_cost,
        }
    }
}

/// Ordered, non-empty set of items the engine ranks.
///
/// Order is significant: equal scores keep snapshot order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogSnapshot {
    items: Vec<CatalogItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SnapshotError {
    #[error("catalog snapshot needs at least one published tool")]
    Empty,
    #[error("catalog snapshot lists '{0}' more than once")]
    DuplicateSlug(ToolSlug),
}

impl CatalogSnapshot {
    pub fn new(items: Vec<CatalogItem>) -> Result<Self, SnapshotError> {
        if items.is_empty() {
            return Err(SnapshotError::Empty);
        }

        let mut seen = HashSet::new();
        for item in &items {
            if !seen.insert(&item.slug) {
                return Err(SnapshotError::DuplicateSlug(item.slug.clone()));
            }
        }

        Ok(Self { items })
    }

    /// Derive the snapshot from live catalog records so scoring never drifts from the store.
    pub fn from_tools(tools: &[Tool]) -> Result<Self, SnapshotError> {
        Self::new(
            tools
                .iter()
                .filter(|tool| tool.published)
                .map(CatalogItem::from)
                .collect(),
        )
    }

    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Distinct categories in first-seen order.
    pub fn categories(&self) -> Vec<&CategorySlug> {
        let mut categories: Vec<&CategorySlug> = Vec::new();
        for item in &self.items {
            if !categories.contains(&&item.category) {
                categories.push(&item.category);
            }
        }
        categories
    }
}
