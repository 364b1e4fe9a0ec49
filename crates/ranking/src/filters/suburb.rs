//! Filter by suburb.

use crate::candidate::Candidate;
use crate::context::RecommendationContext;
use crate::traits::Filter;
use std::collections::HashSet;

/// Keeps restaurants in one of the given suburbs, ignoring case.
pub struct SuburbFilter {
    suburbs: HashSet<String>,
}

impl SuburbFilter {
    pub fn new<S: AsRef<str>>(suburbs: impl IntoIterator<Item = S>) -> Self {
        Self {
            suburbs: suburbs
                .into_iter()
                .map(|s| s.as_ref().trim().to_lowercase())
                .collect(),
        }
    }
}

impl Filter for SuburbFilter {
    fn name(&self) -> &str {
        "SuburbFilter"
    }

    fn apply<'a>(
        &self,
        candidates: Vec<Candidate<'a>>,
        _context: &RecommendationContext,
    ) -> Vec<Candidate<'a>> {
        candidates
            .into_iter()
            .filter(|c| self.suburbs.contains(&c.restaurant.suburb.to_lowercase()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::test_support::{candidates, ids, restaurants};

    #[test]
    fn test_suburb_filter() {
        let rs = restaurants();
        let ctx = RecommendationContext::new();

        let city = SuburbFilter::new(["melbourne"]).apply(candidates(&rs, &[None; 4]), &ctx);
        assert_eq!(ids(&city), vec![1, 4]);

        let inner = SuburbFilter::new(["Carlton", " RICHMOND "]).apply(candidates(&rs, &[None; 4]), &ctx);
        assert_eq!(ids(&inner), vec![2, 3]);

        let none = SuburbFilter::new(["Fitzroy"]).apply(candidates(&rs, &[None; 4]), &ctx);
        assert!(none.is_empty());
    }
}
