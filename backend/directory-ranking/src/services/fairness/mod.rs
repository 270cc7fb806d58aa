// ============================================
// Fairness Window (公平曝光窗口)
// ============================================
//
// Gives non-pinned listings comparable visibility instead of letting the
// same few high-rated entries win every search.
//
// Selection is a seeded hash order, not a PRNG:
//   score(candidate) = be_u64(SHA-256(query_seed || 0x1F || candidate_id)[..8])
//
// The seed comes from the search filters only, so a server render and the
// hydration of the same page pick the same window.

pub mod seed;

pub use seed::QuerySeed;

use crate::models::BusinessCandidate;
use crate::utils::digest_prefix_u64;
use sha2::{Digest, Sha256};
use std::cmp::Ordering;
use tracing::debug;

/// Number of non-pinned candidates promoted right after the pinned block
pub const FAIRNESS_SAMPLE_SIZE: usize = 5;

const SEED_SEPARATOR: u8 = 0x1F;

/// Deterministic per-candidate score for a given search
pub fn fairness_score(seed: &QuerySeed, candidate_id: &str) -> u64 {
    let mut hasher = Sha256::new();
    hasher.update(seed.as_str().as_bytes());
    hasher.update([SEED_SEPARATOR]);
    hasher.update(candidate_id.as_bytes());
    digest_prefix_u64(&hasher.finalize())
}

/// Split `pool` into the fairness window and the remainder.
///
/// The window holds the `min(size, pool.len())` candidates with the lowest
/// fairness score, in ascending score order (id breaks exact collisions).
/// The remainder comes back in unspecified order; callers re-sort it.
pub fn select_fairness_window(
    pool: Vec<BusinessCandidate>,
    seed: &QuerySeed,
    size: usize,
) -> (Vec<BusinessCandidate>, Vec<BusinessCandidate>) {
    let mut scored: Vec<(u64, BusinessCandidate)> = pool
        .into_iter()
        .map(|candidate| (fairness_score(seed, &candidate.id), candidate))
        .collect();

    scored.sort_by(|(score_a, a), (score_b, b)| compare_scored(*score_a, a, *score_b, b));

    let take = size.min(scored.len());
    let rest = scored.split_off(take);

    debug!(
        seed = seed.as_str(),
        window = take,
        remaining = rest.len(),
        "Fairness window selected"
    );

    (
        scored.into_iter().map(|(_, c)| c).collect(),
        rest.into_iter().map(|(_, c)| c).collect(),
    )
}

fn compare_scored(
    score_a: u64,
    a: &BusinessCandidate,
    score_b: u64,
    b: &BusinessCandidate,
) -> Ordering {
    score_a.cmp(&score_b).then_with(|| a.id.cmp(&b.id))
}
