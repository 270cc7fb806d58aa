use crate::models::CatalogQuery;
use crate::services::ranking::{RankingError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Neighborhood component used when a search spans the whole city
pub const ALL_NEIGHBORHOODS: &str = "all";

/// Stable seed identifying a search by its filters.
///
/// Built only from filter identity (category + neighborhood or `all`),
/// never from wall-clock time, request ids or entropy.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuerySeed(String);

impl QuerySeed {
    /// Wrap an externally derived seed; empty or blank seeds are rejected.
    pub fn new(seed: impl Into<String>) -> Result<Self> {
        let seed = seed.into();
        if seed.trim().is_empty() {
            return Err(RankingError::EmptyQuerySeed);
        }
        Ok(Self(seed))
    }

    /// A search without a category has no filter identity and gets no seed.
    pub fn from_filters(category_id: &str, neighborhood_id: Option<&str>) -> Result<Self> {
        if category_id.trim().is_empty() {
            return Err(RankingError::EmptyQuerySeed);
        }
        let neighborhood = neighborhood_id
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(ALL_NEIGHBORHOODS);
        Ok(Self(format!("{}:{}", category_id, neighborhood)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl TryFrom<&CatalogQuery> for QuerySeed {
    type Error = RankingError;

    fn try_from(query: &CatalogQuery) -> Result<Self> {
        Self::from_filters(&query.category_id, query.neighborhood())
    }
}

impl fmt::Display for QuerySeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
