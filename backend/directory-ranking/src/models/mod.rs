use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::average_rating;

/// A business as seen by the ranking engine.
///
/// Assembled fresh per search from current directory state and treated as
/// read-only for the duration of one ranking call. Localized listing and
/// review text never appears here; only numeric ratings cross into ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessCandidate {
    pub id: String,
    #[serde(default)]
    pub is_pinned: bool,
    /// Only meaningful when `is_pinned` is set; lower ranks come first.
    #[serde(default)]
    pub pinned_rank: Option<i64>,
    /// Scores (1-5) of approved reviews.
    #[serde(default)]
    pub approved_ratings: Vec<u8>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl BusinessCandidate {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            is_pinned: false,
            pinned_rank: None,
            approved_ratings: Vec::new(),
            created_at: None,
        }
    }

    pub fn pinned(mut self, rank: Option<i64>) -> Self {
        self.is_pinned = true;
        self.pinned_rank = rank;
        self
    }

    pub fn with_ratings(mut self, ratings: impl IntoIterator<Item = u8>) -> Self {
        self.approved_ratings = ratings.into_iter().collect();
        self
    }

    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Mean of approved ratings, 0.0 when there are none.
    pub fn average_rating(&self) -> f64 {
        average_rating(&self.approved_ratings)
    }

    pub fn review_count(&self) -> usize {
        self.approved_ratings.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewStatus {
    Pending,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub rating: u8,
    pub status: ReviewStatus,
}

/// Directory listing as stored by the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessRecord {
    pub id: String,
    pub category_id: String,
    #[serde(default)]
    pub subcategory_id: Option<String>,
    #[serde(default)]
    pub neighborhood_id: Option<String>,
    pub city: String,
    #[serde(default = "default_visible")]
    pub is_visible: bool,
    #[serde(default)]
    pub is_deleted: bool,
    #[serde(default)]
    pub is_pinned: bool,
    #[serde(default)]
    pub pinned_rank: Option<i64>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub reviews: Vec<Review>,
}

fn default_visible() -> bool {
    true
}

impl From<&BusinessRecord> for BusinessCandidate {
    fn from(record: &BusinessRecord) -> Self {
        Self {
            id: record.id.clone(),
            is_pinned: record.is_pinned,
            pinned_rank: record.pinned_rank,
            approved_ratings: record
                .reviews
                .iter()
                .filter(|r| r.status == ReviewStatus::Approved)
                .map(|r| r.rating)
                .collect(),
            created_at: record.created_at,
        }
    }
}

/// Filters of a directory search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogQuery {
    pub category_id: String,
    #[serde(default)]
    pub subcategory_id: Option<String>,
    #[serde(default)]
    pub neighborhood_id: Option<String>,
    pub city: String,
}

impl CatalogQuery {
    pub fn new(category_id: impl Into<String>, city: impl Into<String>) -> Self {
        Self {
            category_id: category_id.into(),
            subcategory_id: None,
            neighborhood_id: None,
            city: city.into(),
        }
    }

    pub fn with_subcategory(mut self, subcategory_id: impl Into<String>) -> Self {
        self.subcategory_id = Some(subcategory_id.into());
        self
    }

    /// A blank neighborhood means the whole city.
    pub fn with_neighborhood(mut self, neighborhood_id: impl Into<String>) -> Self {
        let neighborhood_id = neighborhood_id.into();
        self.neighborhood_id = if neighborhood_id.trim().is_empty() {
            None
        } else {
            Some(neighborhood_id)
        };
        self
    }

    /// Neighborhood filter, ignoring blank values
    pub fn neighborhood(&self) -> Option<&str> {
        self.neighborhood_id
            .as_deref()
            .filter(|n| !n.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_average_rating_empty_is_zero() {
        let candidate = BusinessCandidate::new("biz1");
        assert_eq!(candidate.average_rating(), 0.0);
        assert_eq!(candidate.review_count(), 0);
    }

    #[test]
    fn test_record_keeps_only_approved_ratings() {
        let record = BusinessRecord {
            id: "biz1".to_string(),
            category_id: "cafes".to_string(),
            subcategory_id: None,
            neighborhood_id: Some("old-town".to_string()),
            city: "Tbilisi".to_string(),
            is_visible: true,
            is_deleted: false,
            is_pinned: true,
            pinned_rank: Some(2),
            created_at: None,
            reviews: vec![
                Review { rating: 5, status: ReviewStatus::Approved },
                Review { rating: 1, status: ReviewStatus::Pending },
                Review { rating: 1, status: ReviewStatus::Rejected },
                Review { rating: 3, status: ReviewStatus::Approved },
            ],
        };

        let candidate = BusinessCandidate::from(&record);

        assert_eq!(candidate.approved_ratings, vec![5, 3]);
        assert_eq!(candidate.review_count(), 2);
        assert!((candidate.average_rating() - 4.0).abs() < f64::EPSILON);
        assert_eq!(candidate.pinned_rank, Some(2));
        assert!(candidate.is_pinned);
    }

    #[test]
    fn test_blank_neighborhood_means_whole_city() {
        let query = CatalogQuery::new("cafes", "Tbilisi").with_neighborhood("");
        assert_eq!(query.neighborhood_id, None);

        let query: CatalogQuery =
            serde_json::from_str(r#"{"categoryId":"cafes","neighborhoodId":" ","city":"Tbilisi"}"#)
                .unwrap();
        assert_eq!(query.neighborhood(), None);

        let query = CatalogQuery::new("cafes", "Tbilisi").with_neighborhood("vake");
        assert_eq!(query.neighborhood(), Some("vake"));
    }

    #[test]
    fn test_candidate_json_uses_camel_case() {
        let json = r#"{"id":"biz9","isPinned":true,"pinnedRank":1,"approvedRatings":[4,5]}"#;
        let candidate: BusinessCandidate = serde_json::from_str(json).unwrap();

        assert_eq!(candidate.id, "biz9");
        assert!(candidate.is_pinned);
        assert_eq!(candidate.pinned_rank, Some(1));
        assert_eq!(candidate.created_at, None);
    }
}
