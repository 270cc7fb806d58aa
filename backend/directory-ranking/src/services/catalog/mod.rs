// ============================================
// Catalog Provider (目錄數據來源)
// ============================================
//
// Upstream contract of the ranking pipeline. A provider returns the
// currently visible, non-deleted businesses matching a search, each with
// approved review ratings attached, plus the admin `top_pinned_count`
// setting. Retry/backoff for remote providers belongs to the provider.

pub mod in_memory;

pub use in_memory::InMemoryCatalog;

use crate::models::{BusinessCandidate, CatalogQuery};
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Catalog unavailable: {0}")]
    Unavailable(String),

    #[error("Failed to load catalog fixture: {0}")]
    Fixture(#[from] std::io::Error),

    #[error("Malformed catalog data: {0}")]
    Malformed(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CatalogError>;

#[async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Visible, non-deleted businesses matching `query`
    async fn find_candidates(&self, query: &CatalogQuery) -> Result<Vec<BusinessCandidate>>;

    /// Admin setting; `None` when unset
    async fn top_pinned_count(&self) -> Result<Option<i64>>;
}
