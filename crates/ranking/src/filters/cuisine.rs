//! Filter by cuisine.

use crate::candidate::Candidate;
use crate::context::RecommendationContext;
use crate::traits::Filter;
use catalog::Cuisine;
use std::collections::HashSet;

/// Keeps restaurants serving one of the given cuisines.
pub struct CuisineFilter {
    cuisines: HashSet<Cuisine>,
}

impl CuisineFilter {
    pub fn new(cuisines: impl IntoIterator<Item = Cuisine>) -> Self {
        Self {
            cuisines: cuisines.into_iter().collect(),
        }
    }
}

impl Filter for CuisineFilter {
    fn name(&self) -> &str {
        "CuisineFilter"
    }

    fn apply<'a>(
        &self,
        candidates: Vec<Candidate<'a>>,
        _context: &RecommendationContext,
    ) -> Vec<Candidate<'a>> {
        candidates
            .into_iter()
            .filter(|c| self.cuisines.contains(&c.restaurant.cuisine_type))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::test_support::{candidates, ids, restaurants};

    #[test]
    fn test_cuisine_filter() {
        let rs = restaurants();
        let ctx = RecommendationContext::new();
        let chinese = CuisineFilter::new([Cuisine::Chinese]).apply(candidates(&rs, &[None; 4]), &ctx);
        assert_eq!(ids(&chinese), vec![1, 3]);

        let none = CuisineFilter::new(Vec::<Cuisine>::new()).apply(candidates(&rs, &[None; 4]), &ctx);
        assert!(none.is_empty());
    }
}
