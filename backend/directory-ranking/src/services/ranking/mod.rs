/// Ranking Module
///
/// Orders directory search results for a category/neighborhood query.
///
/// # Pipeline
/// 1. **Partition**: pinned vs. regular candidates
/// 2. **Pinned block**: operator-curated listings by `pinned_rank`, capped at
///    `top_pinned_count`; overflow is demoted into the regular pool
/// 3. **Fairness block**: seeded hash window over the pool (see `fairness`)
/// 4. **Quality block**: average rating desc, then newest first
///
/// The engine is a pure function of (candidates, config). It never reads
/// ambient configuration and keeps no state between calls.
pub mod engine;
pub mod pinned;
pub mod quality;

pub use engine::{PartialDataWarning, RankedListing, RankingEngine};

use crate::services::fairness::{QuerySeed, FAIRNESS_SAMPLE_SIZE};
use thiserror::Error;

/// Admin default for the pinned block size when the setting is unset
pub const DEFAULT_TOP_PINNED_COUNT: i64 = 4;

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RankingError {
    #[error("Invalid configuration: top_pinned_count must be non-negative (got {0})")]
    NegativeTopPinnedCount(i64),

    #[error("Invalid configuration: query seed is empty")]
    EmptyQuerySeed,

    #[error("Invalid input: candidate {id} has rating {rating} outside 1-5")]
    RatingOutOfRange { id: String, rating: u8 },

    #[error("Invalid input: duplicate candidate id {0}")]
    DuplicateCandidate(String),
}

impl RankingError {
    /// Configuration problems the caller must surface to the operator
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            RankingError::NegativeTopPinnedCount(_) | RankingError::EmptyQuerySeed
        )
    }
}

pub type Result<T> = std::result::Result<T, RankingError>;

/// Per-call ranking parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankingConfig {
    /// Admin-controlled cap on the guaranteed-first pinned block
    pub top_pinned_count: i64,
    /// Size of the fairness window; fixed at `FAIRNESS_SAMPLE_SIZE`
    pub fairness_sample_size: usize,
    pub query_seed: QuerySeed,
}

impl RankingConfig {
    pub fn new(top_pinned_count: i64, query_seed: QuerySeed) -> Self {
        Self {
            top_pinned_count,
            fairness_sample_size: FAIRNESS_SAMPLE_SIZE,
            query_seed,
        }
    }

    /// Override the fairness window size
    pub fn with_fairness_sample_size(mut self, size: usize) -> Self {
        self.fairness_sample_size = size;
        self
    }

    /// Reject misconfiguration instead of clamping it.
    pub fn validate(&self) -> Result<()> {
        if self.top_pinned_count < 0 {
            return Err(RankingError::NegativeTopPinnedCount(self.top_pinned_count));
        }
        if self.query_seed.is_empty() {
            return Err(RankingError::EmptyQuerySeed);
        }
        Ok(())
    }

    /// Pinned block cap as a length. Call after `validate`.
    ///
    /// Counts beyond `usize` cannot be reached by any candidate set, so
    /// they saturate instead of shrinking the block.
    pub(crate) fn pinned_cap(&self) -> usize {
        usize::try_from(self.top_pinned_count).unwrap_or(usize::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed() -> QuerySeed {
        QuerySeed::from_filters("cafes", None).unwrap()
    }

    #[test]
    fn test_new_uses_fixed_sample_size() {
        let config = RankingConfig::new(DEFAULT_TOP_PINNED_COUNT, seed());
        assert_eq!(config.fairness_sample_size, 5);
        assert_eq!(config.top_pinned_count, 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_top_pinned_count_is_valid() {
        let config = RankingConfig::new(0, seed());
        assert!(config.validate().is_ok());
        assert_eq!(config.pinned_cap(), 0);
    }

    #[test]
    fn test_huge_top_pinned_count_never_shrinks_block() {
        let config = RankingConfig::new(i64::MAX, seed());
        assert!(config.validate().is_ok());
        assert!(config.pinned_cap() >= usize::try_from(u32::MAX).unwrap());
    }

    #[test]
    fn test_negative_top_pinned_count_rejected() {
        let err = RankingConfig::new(-1, seed()).validate().unwrap_err();
        assert_eq!(err, RankingError::NegativeTopPinnedCount(-1));
        assert!(err.is_configuration_error());
    }

    #[test]
    fn test_empty_seed_rejected() {
        // Deserialized seeds bypass QuerySeed::new, validate catches them
        let seed: QuerySeed = serde_json::from_str("\"\"").unwrap();
        let err = RankingConfig::new(4, seed).validate().unwrap_err();
        assert_eq!(err, RankingError::EmptyQuerySeed);
        assert!(err.is_configuration_error());
    }

    #[test]
    fn test_input_errors_are_not_configuration_errors() {
        assert!(!RankingError::DuplicateCandidate("biz1".into()).is_configuration_error());
    }
}
