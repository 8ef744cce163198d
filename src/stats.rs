//! Aggregate statistics over a review list.

use crate::models::Review;
use serde::Serialize;

/// Summary metrics for whichever review list is on display.
///
/// Never stored: recomputed from the backing list on every render so it can
/// never go stale, whatever path changed the list.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Stats {
    /// Number of reviews in the list.
    pub count: usize,
    /// Mean readability score, rounded to one decimal.
    pub avg_readability: f64,
    /// Mean modularity score, rounded to one decimal.
    pub avg_modularity: f64,
}

/// Derive summary statistics from a review list.
///
/// An empty list yields the zero sentinel; no division happens.
pub fn summarize(reviews: &[Review]) -> Stats {
    if reviews.is_empty() {
        return Stats::default();
    }

    let count = reviews.len();
    let readability: f64 = reviews.iter().map(|r| r.readability_score).sum();
    let modularity: f64 = reviews.iter().map(|r| r.modularity_score).sum();

    Stats {
        count,
        avg_readability: round_one(readability / count as f64),
        avg_modularity: round_one(modularity / count as f64),
    }
}

fn round_one(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
