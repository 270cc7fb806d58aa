use crate::models::BusinessCandidate;
use std::cmp::Ordering;

/// Quality ordering: average rating desc, `created_at` desc (missing last), id asc.
pub fn compare_quality(a: &BusinessCandidate, b: &BusinessCandidate) -> Ordering {
    b.average_rating()
        .total_cmp(&a.average_rating())
        .then_with(|| match (a.created_at, b.created_at) {
            (Some(x), Some(y)) => y.cmp(&x),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        })
        .then_with(|| a.id.cmp(&b.id))
}

pub fn sort_by_quality(candidates: &mut [BusinessCandidate]) {
    candidates.sort_by(compare_quality);
}

/// True when every adjacent pair respects rating desc then recency desc.
pub fn is_quality_ordered(candidates: &[BusinessCandidate]) -> bool {
    candidates.windows(2).all(|pair| {
        let (a, b) = (&pair[0], &pair[1]);
        let (ra, rb) = (a.average_rating(), b.average_rating());
        if ra != rb {
            return ra > rb;
        }
        match (a.created_at, b.created_at) {
            (Some(x), Some(y)) => x >= y,
            (_, None) => true,
            (None, Some(_)) => false,
        }
    })
}
