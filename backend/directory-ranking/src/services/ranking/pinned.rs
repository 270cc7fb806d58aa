use crate::models::BusinessCandidate;
use std::cmp::Ordering;

/// Pinned ordering: `pinned_rank` ascending, unranked after ranked, then id.
pub fn compare_pinned(a: &BusinessCandidate, b: &BusinessCandidate) -> Ordering {
    let rank_order = match (a.pinned_rank, b.pinned_rank) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    rank_order.then_with(|| a.id.cmp(&b.id))
}

/// Partition candidates into pinned and regular pools.
pub fn partition(
    candidates: Vec<BusinessCandidate>,
) -> (Vec<BusinessCandidate>, Vec<BusinessCandidate>) {
    candidates.into_iter().partition(|c| c.is_pinned)
}

/// Order pinned candidates and cut the guaranteed block at `cap`.
///
/// Returns `(block, overflow)`. Overflow keeps its `is_pinned` flag but is
/// ranked from here on exactly like a regular candidate.
pub fn split_pinned_block(
    mut pinned: Vec<BusinessCandidate>,
    cap: usize,
) -> (Vec<BusinessCandidate>, Vec<BusinessCandidate>) {
    pinned.sort_by(compare_pinned);
    let overflow = pinned.split_off(cap.min(pinned.len()));
    (pinned, overflow)
}
