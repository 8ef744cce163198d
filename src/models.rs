//! Data models for the review client.
//!
//! This module contains the wire-level and domain structures shared across
//! the application: per-file reviews as reported by the analysis service
//! and the response envelope of its two endpoints.

use serde::{Deserialize, Serialize};

/// Lowest score the analysis service can assign.
pub const SCORE_MIN: f64 = 0.0;
/// Highest score the analysis service can assign.
pub const SCORE_MAX: f64 = 10.0;

/// A structured per-file analysis result.
///
/// This mirrors the record shape of the review service: scores are numeric
/// in `[0, 10]`, issue and suggestion lists may be absent on the wire and
/// deserialize to empty vectors. `created_at` is only present on history
/// entries and its exact format is up to the persistence layer, so it is
/// carried as an opaque string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    /// Opaque identifier assigned by the service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Name of the reviewed file.
    pub filename: String,
    /// How easy the code is to read, 0-10.
    pub readability_score: f64,
    /// How well the code is organized, 0-10.
    pub modularity_score: f64,
    /// Problems the reviewer found. Absence means none.
    #[serde(default)]
    pub potential_issues: Vec<String>,
    /// Improvement recommendations. Absence means none.
    #[serde(default)]
    pub suggestions: Vec<String>,
    /// Creation timestamp, present on history entries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Review {
    /// Clamp both scores into the valid `[0, 10]` range.
    ///
    /// Provider output is model-generated and not guaranteed to stay in
    /// range. Applied to every record on ingest so the rest of the client
    /// can rely on the invariant.
    pub fn clamp_scores(&mut self) {
        self.readability_score = self.readability_score.clamp(SCORE_MIN, SCORE_MAX);
        self.modularity_score = self.modularity_score.clamp(SCORE_MIN, SCORE_MAX);
    }

    /// True when both scores are already within `[0, 10]`.
    pub fn scores_in_range(&self) -> bool {
        (SCORE_MIN..=SCORE_MAX).contains(&self.readability_score)
            && (SCORE_MIN..=SCORE_MAX).contains(&self.modularity_score)
    }
}

/// Response body of both `POST /review` and `GET /reviews`.
///
/// A body without the `reviews` key is a malformed response, not an empty
/// result; serde enforces that by the field being non-optional.
#[derive(Debug, Clone, Deserialize)]
pub struct ReviewsEnvelope {
    /// Reviews in the order the service reported them.
    pub reviews: Vec<Review>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_record() {
        let json = r#"{
            "id": "5f0c",
            "filename": "app.js",
            "readability_score": 7.0,
            "modularity_score": 5.0,
            "potential_issues": ["mixes sync and async patterns"],
            "suggestions": ["use async/await consistently"],
            "created_at": "2026-08-01 10:22:41"
        }"#;

        let review: Review = serde_json::from_str(json).unwrap();
        assert_eq!(review.id.as_deref(), Some("5f0c"));
        assert_eq!(review.filename, "app.js");
        assert_eq!(review.readability_score, 7.0);
        assert_eq!(review.modularity_score, 5.0);
        assert_eq!(review.potential_issues.len(), 1);
        assert_eq!(review.suggestions.len(), 1);
        assert_eq!(review.created_at.as_deref(), Some("2026-08-01 10:22:41"));
    }

    #[test]
    fn test_missing_lists_default_to_empty() {
        let json = r#"{
            "filename": "lib.rs",
            "readability_score": 9.1,
            "modularity_score": 8.4
        }"#;

        let review: Review = serde_json::from_str(json).unwrap();
        assert!(review.id.is_none());
        assert!(review.created_at.is_none());
        assert!(review.potential_issues.is_empty());
        assert!(review.suggestions.is_empty());
    }

    #[test]
    fn test_clamp_scores() {
        let mut review = Review {
            id: None,
            filename: "wild.py".to_string(),
            readability_score: 12.5,
            modularity_score: -1.0,
            potential_issues: vec![],
            suggestions: vec![],
            created_at: None,
        };

        assert!(!review.scores_in_range());
        review.clamp_scores();
        assert_eq!(review.readability_score, 10.0);
        assert_eq!(review.modularity_score, 0.0);
        assert!(review.scores_in_range());
    }

    #[test]
    fn test_envelope_requires_reviews_key() {
        let ok: Result<ReviewsEnvelope, _> = serde_json::from_str(r#"{"reviews": []}"#);
        assert!(ok.unwrap().reviews.is_empty());

        let missing: Result<ReviewsEnvelope, _> = serde_json::from_str(r#"{"results": []}"#);
        assert!(missing.is_err());
    }
}
