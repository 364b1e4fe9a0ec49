//! Filter to ensure minimum quality threshold.

use crate::candidate::Candidate;
use crate::context::RecommendationContext;
use crate::traits::Filter;

/// Removes candidates rated below a threshold.
pub struct MinimumRatingFilter {
    min_rating: f32,
}

impl MinimumRatingFilter {
    /// Create a new MinimumRatingFilter; `min_rating` is on the 0-5 scale.
    pub fn new(min_rating: f32) -> Self {
        Self { min_rating }
    }
}

impl Filter for MinimumRatingFilter {
    fn name(&self) -> &str {
        "MinimumRatingFilter"
    }

    fn apply<'a>(
        &self,
        candidates: Vec<Candidate<'a>>,
        _context: &RecommendationContext,
    ) -> Vec<Candidate<'a>> {
        candidates
            .into_iter()
            .filter(|candidate| candidate.restaurant.rating >= self.min_rating)
            .collect()
    }
}
