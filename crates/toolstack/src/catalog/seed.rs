use std::io::Read;

use serde::Deserialize;

use super::domain::{Category, Post, Tool};

const STANDARD_SEED: &str = include_str!("../../data/catalog.json");

/// Snapshot document used to hydrate a catalog store.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogSeed {
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub tools: Vec<Tool>,
    #[serde(default)]
    pub posts: Vec<Post>,
}

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("invalid catalog seed: {0}")]
    Json(#[from] serde_json::Error),
}

impl CatalogSeed {
    /// The reference catalog shipped with the site.
    pub fn standard() -> Result<Self, SeedError> {
        Ok(serde_json::from_str(STANDARD_SEED)?)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, SeedError> {
        Ok(serde_json::from_reader(reader)?)
    }
}
