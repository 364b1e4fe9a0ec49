//! Filter on a single amenity flag.

use crate::candidate::Candidate;
use crate::context::RecommendationContext;
use crate::traits::Filter;
use catalog::Amenity;

/// Keeps restaurants whose `amenity` flag equals `value`.
pub struct AmenityFilter {
    amenity: Amenity,
    value: bool,
}

impl AmenityFilter {
    pub fn new(amenity: Amenity, value: bool) -> Self {
        Self { amenity, value }
    }

    /// Keeps restaurants that have the amenity.
    pub fn requiring(amenity: Amenity) -> Self {
        Self::new(amenity, true)
    }
}

impl Filter for AmenityFilter {
    fn name(&self) -> &str {
        "AmenityFilter"
    }

    fn apply<'a>(
        &self,
        candidates: Vec<Candidate<'a>>,
        _context: &RecommendationContext,
    ) -> Vec<Candidate<'a>> {
        candidates
            .into_iter()
            .filter(|c| c.restaurant.amenities.has(self.amenity) == self.value)
            .collect()
    }
}
