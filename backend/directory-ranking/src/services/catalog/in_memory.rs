use super::{CatalogProvider, Result};
use crate::models::{BusinessCandidate, BusinessRecord, CatalogQuery};
use async_trait::async_trait;
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

/// JSON fixture layout
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CatalogFixture {
    #[serde(default)]
    top_pinned_count: Option<i64>,
    businesses: Vec<BusinessRecord>,
}

/// Catalog backed by records held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    records: Vec<BusinessRecord>,
    top_pinned_count: Option<i64>,
}

impl InMemoryCatalog {
    pub fn new(records: Vec<BusinessRecord>) -> Self {
        Self {
            records,
            top_pinned_count: None,
        }
    }

    pub fn with_top_pinned_count(mut self, count: i64) -> Self {
        self.top_pinned_count = Some(count);
        self
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let fixture: CatalogFixture = serde_json::from_str(json)?;
        Ok(Self {
            records: fixture.businesses,
            top_pinned_count: fixture.top_pinned_count,
        })
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let catalog = Self::from_json(&json)?;
        info!(
            path = %path.display(),
            businesses = catalog.records.len(),
            "Loaded catalog fixture"
        );
        Ok(catalog)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn matches(record: &BusinessRecord, query: &CatalogQuery) -> bool {
        if !record.is_visible || record.is_deleted {
            return false;
        }
        if record.category_id != query.category_id {
            return false;
        }
        if !record.city.eq_ignore_ascii_case(&query.city) {
            return false;
        }
        if let Some(sub) = &query.subcategory_id {
            if record.subcategory_id.as_ref() != Some(sub) {
                return false;
            }
        }
        if let Some(hood) = query.neighborhood() {
            if record.neighborhood_id.as_deref() != Some(hood) {
                return false;
            }
        }
        true
    }
}

#[async_trait]
impl CatalogProvider for InMemoryCatalog {
    async fn find_candidates(&self, query: &CatalogQuery) -> Result<Vec<BusinessCandidate>> {
        let candidates: Vec<BusinessCandidate> = self
            .records
            .iter()
            .filter(|r| Self::matches(r, query))
            .map(BusinessCandidate::from)
            .collect();

        debug!(
            category = %query.category_id,
            city = %query.city,
            matched = candidates.len(),
            "Catalog lookup"
        );

        Ok(candidates)
    }

    async fn top_pinned_count(&self) -> Result<Option<i64>> {
        Ok(self.top_pinned_count)
    }
}
