//! Filter to places suited to a quick lunch nearby.

use crate::candidate::Candidate;
use crate::context::RecommendationContext;
use crate::scorer::is_quick_lunch;
use crate::traits::Filter;

/// Keeps lunch-friendly restaurants (takeaway, lunch specials, or `$`/`$$`)
/// that are not known to be beyond the context's distance bound.
pub struct QuickLunchFilter;

impl Filter for QuickLunchFilter {
    fn name(&self) -> &str {
        "QuickLunchFilter"
    }

    fn apply<'a>(
        &self,
        candidates: Vec<Candidate<'a>>,
        context: &RecommendationContext,
    ) -> Vec<Candidate<'a>> {
        candidates
            .into_iter()
            .filter(|c| is_quick_lunch(c, context.max_distance_km))
            .collect()
    }
}
