//! The FilterPipeline chains filters in order.

use crate::candidate::Candidate;
use crate::context::RecommendationContext;
use crate::traits::Filter;
use tracing;

/// Chains multiple filters together into a processing pipeline.
///
/// ## Usage
/// ```ignore
/// let pipeline = FilterPipeline::new()
///     .add_filter(CuisineFilter::new([Cuisine::Thai]))
///     .add_filter(MinimumRatingFilter::new(4.0))
///     .add_filter(DistanceFilter::new(2.0));
///
/// let filtered = pipeline.apply(candidates, &context);
/// ```
pub struct FilterPipeline {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterPipeline {
    /// Create a new empty FilterPipeline.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// Add a filter to the pipeline (builder pattern).
    pub fn add_filter(mut self, filter: impl Filter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Apply all filters in sequence, logging counts around each one.
    pub fn apply<'a>(
        &self,
        candidates: Vec<Candidate<'a>>,
        context: &RecommendationContext,
    ) -> Vec<Candidate<'a>> {
        let mut current = candidates;
        for filter in &self.filters {
            tracing::debug!(
                "Applying filter: {} (input count: {})",
                filter.name(),
                current.len()
            );
            current = filter.apply(current, context);
            tracing::debug!(
                "Filter applied: {} (output count: {})",
                filter.name(),
                current.len()
            );
        }
        current
    }
}

impl Default for FilterPipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::{CuisineFilter, MinimumRatingFilter};
    use catalog::{Cuisine, PriceRange, Restaurant};

    fn restaurants() -> Vec<Restaurant> {
        vec![
            Restaurant::new(1, "Pho", Cuisine::Vietnamese, PriceRange::Cheap, 4.4),
            Restaurant::new(2, "Banh Mi", Cuisine::Vietnamese, PriceRange::Cheap, 3.2),
            Restaurant::new(3, "Trattoria", Cuisine::Italian, PriceRange::Moderate, 4.6),
        ]
    }

    fn candidates(restaurants: &[Restaurant]) -> Vec<Candidate<'_>> {
        restaurants.iter().map(|r| Candidate::new(r, None, false)).collect()
    }

    #[test]
    fn test_empty_pipeline() {
        let rs = restaurants();
        let pipeline = FilterPipeline::new();
        assert!(pipeline.is_empty());
        let filtered = pipeline.apply(candidates(&rs), &RecommendationContext::new());
        assert_eq!(filtered.len(), 3);
    }

    #[test]
    fn test_filters_compose() {
        let rs = restaurants();
        let pipeline = FilterPipeline::new()
            .add_filter(CuisineFilter::new([Cuisine::Vietnamese]))
            .add_filter(MinimumRatingFilter::new(4.0));
        assert_eq!(pipeline.len(), 2);

        let filtered = pipeline.apply(candidates(&rs), &RecommendationContext::new());
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].restaurant.id, 1);
    }
}
