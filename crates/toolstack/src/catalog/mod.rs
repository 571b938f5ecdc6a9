//! Tool directory and editorial content store boundary.

pub mod domain;
mod import;
mod memory;
pub mod repository;
pub mod router;
mod seed;

pub use domain::{Category, CategorySlug, Post, PostSlug, PostType, Tool, ToolSlug};
pub use import::{CatalogCsvImporter, CatalogImportError};
pub use memory::InMemoryCatalog;
pub use repository::{CatalogRepository, RepositoryError};
pub use router::{catalog_router, PostDetail};
pub use seed::{CatalogSeed, SeedError};
