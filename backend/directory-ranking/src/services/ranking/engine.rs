use super::pinned::{partition, split_pinned_block};
use super::quality::sort_by_quality;
use super::{RankingConfig, RankingError, Result, MAX_RATING, MIN_RATING};
use crate::models::BusinessCandidate;
use crate::services::fairness::select_fairness_window;
use std::collections::HashSet;
use tracing::{debug, warn};

/// Non-fatal data gaps; the candidate is still ranked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartialDataWarning {
    MissingCreatedAt { id: String },
    NoApprovedRatings { id: String },
}

/// Ranking output with block boundaries.
#[derive(Debug, Clone, Default)]
pub struct RankedListing {
    pub items: Vec<BusinessCandidate>,
    pub pinned_len: usize,
    pub fairness_len: usize,
    pub warnings: Vec<PartialDataWarning>,
}

impl RankedListing {
    pub fn pinned_block(&self) -> &[BusinessCandidate] {
        &self.items[..self.pinned_len]
    }

    pub fn fairness_block(&self) -> &[BusinessCandidate] {
        &self.items[self.pinned_len..self.pinned_len + self.fairness_len]
    }

    pub fn quality_block(&self) -> &[BusinessCandidate] {
        &self.items[self.pinned_len + self.fairness_len..]
    }

    pub fn ids(&self) -> Vec<&str> {
        self.items.iter().map(|c| c.id.as_str()).collect()
    }
}

/// Ranking Engine - pinned → fairness → quality
///
/// Stateless; safe to share across threads and call concurrently.
#[derive(Debug, Clone, Copy, Default)]
pub struct RankingEngine;

impl RankingEngine {
    pub fn new() -> Self {
        Self
    }

    /// Order `candidates` for display.
    ///
    /// The result is a permutation of the input and is identical for
    /// identical (candidate set, query seed) regardless of input order.
    pub fn rank(
        &self,
        candidates: Vec<BusinessCandidate>,
        config: &RankingConfig,
    ) -> Result<Vec<BusinessCandidate>> {
        self.rank_detailed(candidates, config).map(|listing| listing.items)
    }

    pub fn rank_detailed(
        &self,
        candidates: Vec<BusinessCandidate>,
        config: &RankingConfig,
    ) -> Result<RankedListing> {
        config.validate()?;
        validate_candidates(&candidates)?;

        let total = candidates.len();

        // 1. Partition
        let (pinned_all, mut pool) = partition(candidates);

        // 2. Pinned block, overflow rejoins the pool
        let (pinned_block, overflow) = split_pinned_block(pinned_all, config.pinned_cap());
        let demoted = overflow.len();
        pool.extend(overflow);

        // 3. Fairness block
        let (fairness_block, mut rest) =
            select_fairness_window(pool, &config.query_seed, config.fairness_sample_size);

        // 4. Quality block
        sort_by_quality(&mut rest);

        debug!(
            query_seed = config.query_seed.as_str(),
            total,
            pinned = pinned_block.len(),
            demoted_pinned = demoted,
            fairness = fairness_block.len(),
            quality = rest.len(),
            "Ranked directory candidates"
        );

        let pinned_len = pinned_block.len();
        let fairness_len = fairness_block.len();

        let mut items = pinned_block;
        items.reserve(total - pinned_len);
        items.extend(fairness_block);
        items.extend(rest);

        // Reported in output order so they are as stable as the ranking
        let warnings = collect_warnings(&items);

        Ok(RankedListing {
            items,
            pinned_len,
            fairness_len,
            warnings,
        })
    }
}

fn validate_candidates(candidates: &[BusinessCandidate]) -> Result<()> {
    let mut seen = HashSet::with_capacity(candidates.len());
    for candidate in candidates {
        if !seen.insert(candidate.id.as_str()) {
            return Err(RankingError::DuplicateCandidate(candidate.id.clone()));
        }
        if let Some(&rating) = candidate
            .approved_ratings
            .iter()
            .find(|&&r| !(MIN_RATING..=MAX_RATING).contains(&r))
        {
            return Err(RankingError::RatingOutOfRange {
                id: candidate.id.clone(),
                rating,
            });
        }
    }
    Ok(())
}

fn collect_warnings(candidates: &[BusinessCandidate]) -> Vec<PartialDataWarning> {
    let mut warnings = Vec::new();
    for candidate in candidates {
        if candidate.created_at.is_none() {
            warnings.push(PartialDataWarning::MissingCreatedAt {
                id: candidate.id.clone(),
            });
        }
        if candidate.approved_ratings.is_empty() {
            warnings.push(PartialDataWarning::NoApprovedRatings {
                id: candidate.id.clone(),
            });
        }
    }
    if !warnings.is_empty() {
        warn!(
            count = warnings.len(),
            "Ranking candidates with partial data; treated as least favored"
        );
    }
    warnings
}
