//! Core trait for the candidate filters.
//!
//! Filters narrow a candidate list before scoring. They never fail: a
//! filter that cannot decide keeps the candidate.

use crate::candidate::Candidate;
use crate::context::RecommendationContext;

/// A composable candidate filter.
///
/// `Send + Sync` lets a pipeline be shared across threads. Filters take
/// the candidate list by value and return the survivors in input order.
pub trait Filter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Keep the candidates that pass this filter.
    fn apply<'a>(
        &self,
        candidates: Vec<Candidate<'a>>,
        context: &RecommendationContext,
    ) -> Vec<Candidate<'a>>;
}
