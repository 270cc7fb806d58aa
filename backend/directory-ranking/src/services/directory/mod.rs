use crate::models::{BusinessCandidate, CatalogQuery};
use crate::services::catalog::{CatalogError, CatalogProvider};
use crate::services::fairness::QuerySeed;
use crate::services::ranking::{RankingConfig, RankingEngine, RankingError, DEFAULT_TOP_PINNED_COUNT};
use thiserror::Error;
use tracing::{error, info};

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Ranking(#[from] RankingError),
}

pub type Result<T> = std::result::Result<T, DirectoryError>;

/// Directory search: catalog lookup followed by ranking.
///
/// Rank state is never cached or persisted; every search recomputes from
/// the catalog's current data.
pub struct DirectorySearch<P> {
    catalog: P,
    engine: RankingEngine,
    default_top_pinned_count: i64,
}

impl<P: CatalogProvider> DirectorySearch<P> {
    pub fn new(catalog: P) -> Self {
        Self::with_default_top_pinned_count(catalog, DEFAULT_TOP_PINNED_COUNT)
    }

    /// Fallback used when the admin setting is unset
    pub fn with_default_top_pinned_count(catalog: P, default_top_pinned_count: i64) -> Self {
        Self {
            catalog,
            engine: RankingEngine::new(),
            default_top_pinned_count,
        }
    }

    pub async fn search(&self, query: &CatalogQuery) -> Result<Vec<BusinessCandidate>> {
        let seed = QuerySeed::try_from(query).map_err(|e| {
            error!(error = %e, city = %query.city, "Search has no category");
            e
        })?;
        let top_pinned_count = self
            .catalog
            .top_pinned_count()
            .await?
            .unwrap_or(self.default_top_pinned_count);
        let candidates = self.catalog.find_candidates(query).await?;

        let config = RankingConfig::new(top_pinned_count, seed);
        let ranked = self.engine.rank(candidates, &config).map_err(|e| {
            if e.is_configuration_error() {
                error!(error = %e, "Ranking misconfigured");
            }
            e
        })?;

        info!(
            category = %query.category_id,
            neighborhood = query.neighborhood().unwrap_or("all"),
            city = %query.city,
            results = ranked.len(),
            "Directory search ranked"
        );

        Ok(ranked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::catalog;
    use async_trait::async_trait;
    use mockall::mock;

    mock! {
        pub Catalog {}

        #[async_trait]
        impl CatalogProvider for Catalog {
            async fn find_candidates(&self, query: &CatalogQuery) -> catalog::Result<Vec<BusinessCandidate>>;
            async fn top_pinned_count(&self) -> catalog::Result<Option<i64>>;
        }
    }

    fn pinned_candidates(n: i64) -> Vec<BusinessCandidate> {
        (1..=n)
            .map(|r| BusinessCandidate::new(format!("pin{}", r)).pinned(Some(r)))
            .collect()
    }

    #[tokio::test]
    async fn test_unset_setting_defaults_to_four() {
        let mut mock = MockCatalog::new();
        mock.expect_top_pinned_count().returning(|| Ok(None));
        mock.expect_find_candidates()
            .returning(|_| Ok(pinned_candidates(6)));

        let search = DirectorySearch::new(mock);
        let ranked = search.search(&CatalogQuery::new("cafes", "Tbilisi")).await.unwrap();

        let head: Vec<_> = ranked.iter().take(4).map(|c| c.id.as_str()).collect();
        assert_eq!(head, vec!["pin1", "pin2", "pin3", "pin4"]);
        assert_eq!(ranked.len(), 6);
    }

    #[tokio::test]
    async fn test_admin_setting_applied() {
        let mut mock = MockCatalog::new();
        mock.expect_top_pinned_count().returning(|| Ok(Some(1)));
        mock.expect_find_candidates()
            .returning(|_| Ok(pinned_candidates(3)));

        let search = DirectorySearch::new(mock);
        let ranked = search.search(&CatalogQuery::new("cafes", "Tbilisi")).await.unwrap();

        assert_eq!(ranked[0].id, "pin1");
        assert_eq!(ranked.len(), 3);
    }

    #[tokio::test]
    async fn test_negative_setting_is_configuration_error() {
        let mut mock = MockCatalog::new();
        mock.expect_top_pinned_count().returning(|| Ok(Some(-3)));
        mock.expect_find_candidates()
            .returning(|_| Ok(pinned_candidates(2)));

        let search = DirectorySearch::new(mock);
        let err = search
            .search(&CatalogQuery::new("cafes", "Tbilisi"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            DirectoryError::Ranking(RankingError::NegativeTopPinnedCount(-3))
        ));
    }

    #[tokio::test]
    async fn test_missing_category_rejected_before_catalog_lookup() {
        // No expectations: any catalog call would fail the test
        let mock = MockCatalog::new();

        let search = DirectorySearch::new(mock);
        let err = search
            .search(&CatalogQuery::new("", "Tbilisi"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            DirectoryError::Ranking(RankingError::EmptyQuerySeed)
        ));
    }

    #[tokio::test]
    async fn test_catalog_failure_propagates() {
        let mut mock = MockCatalog::new();
        mock.expect_top_pinned_count().returning(|| Ok(None));
        mock.expect_find_candidates()
            .returning(|_| Err(CatalogError::Unavailable("database down".to_string())));

        let search = DirectorySearch::new(mock);
        let err = search
            .search(&CatalogQuery::new("cafes", "Tbilisi"))
            .await
            .unwrap_err();

        assert!(matches!(err, DirectoryError::Catalog(CatalogError::Unavailable(_))));
    }

    #[tokio::test]
    async fn test_repeated_search_is_stable() {
        let mut mock = MockCatalog::new();
        mock.expect_top_pinned_count().returning(|| Ok(None));
        mock.expect_find_candidates().times(2).returning(|_| {
            Ok((0..15)
                .map(|i| BusinessCandidate::new(format!("biz{}", i)).with_ratings(vec![3]))
                .collect())
        });

        let search = DirectorySearch::new(mock);
        let query = CatalogQuery::new("cafes", "Tbilisi").with_neighborhood("vake");

        let first = search.search(&query).await.unwrap();
        let second = search.search(&query).await.unwrap();

        assert_eq!(first, second);
    }
}
