//! Filter by distance from the user.

use crate::candidate::Candidate;
use crate::context::RecommendationContext;
use crate::traits::Filter;

/// Drops candidates known to be farther than a bound.
///
/// A candidate with unknown distance passes. Without an explicit bound the
/// context's `max_distance_km` applies.
pub struct DistanceFilter {
    max_km: Option<f64>,
}

impl DistanceFilter {
    pub fn new(max_km: f64) -> Self {
        Self {
            max_km: Some(max_km),
        }
    }

    /// Use the request's own distance bound.
    pub fn from_context() -> Self {
        Self { max_km: None }
    }
}

impl Filter for DistanceFilter {
    fn name(&self) -> &str {
        "DistanceFilter"
    }

    fn apply<'a>(
        &self,
        candidates: Vec<Candidate<'a>>,
        context: &RecommendationContext,
    ) -> Vec<Candidate<'a>> {
        let max_km = self.max_km.unwrap_or(context.max_distance_km);
        candidates.into_iter().filter(|c| c.within(max_km)).collect()
    }
}
