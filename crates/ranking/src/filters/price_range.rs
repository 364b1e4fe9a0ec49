//! Filter by price range.

use crate::candidate::Candidate;
use crate::context::RecommendationContext;
use crate::traits::Filter;
use catalog::PriceRange;
use std::collections::HashSet;

/// Keeps restaurants in one of the given price ranges.
pub struct PriceRangeFilter {
    ranges: HashSet<PriceRange>,
}

impl PriceRangeFilter {
    pub fn new(ranges: impl IntoIterator<Item = PriceRange>) -> Self {
        Self {
            ranges: ranges.into_iter().collect(),
        }
    }

    /// Every range up to and including `ceiling`.
    pub fn at_most(ceiling: PriceRange) -> Self {
        Self::new(PriceRange::ALL.into_iter().filter(|r| *r <= ceiling))
    }
}

impl Filter for PriceRangeFilter {
    fn name(&self) -> &str {
        "PriceRangeFilter"
    }

    fn apply<'a>(
        &self,
        candidates: Vec<Candidate<'a>>,
        _context: &RecommendationContext,
    ) -> Vec<Candidate<'a>> {
        candidates
            .into_iter()
            .filter(|c| self.ranges.contains(&c.restaurant.price_range))
            .collect()
    }
}
