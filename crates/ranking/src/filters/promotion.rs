//! Filter to restaurants running a deal.

use crate::candidate::Candidate;
use crate::context::RecommendationContext;
use crate::traits::Filter;

/// Keeps restaurants with at least one active promotion.
pub struct PromotionFilter;

impl Filter for PromotionFilter {
    fn name(&self) -> &str {
        "PromotionFilter"
    }

    fn apply<'a>(
        &self,
        candidates: Vec<Candidate<'a>>,
        _context: &RecommendationContext,
    ) -> Vec<Candidate<'a>> {
        candidates
            .into_iter()
            .filter(|c| c.has_active_promotion)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::test_support::{candidates, ids, restaurants};

    #[test]
    fn test_promotion_filter() {
        let rs = restaurants();
        let filtered = PromotionFilter.apply(candidates(&rs, &[None; 4]), &RecommendationContext::new());
        assert_eq!(ids(&filtered), vec![2]);
    }
}
