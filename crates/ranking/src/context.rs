//! Per-request preferences that drive scoring and filtering.

use catalog::{Coordinates, Cuisine, PriceRange};
use std::collections::HashSet;

/// Default distance bound for personalized, budget and cuisine lists (km)
pub const DEFAULT_MAX_DISTANCE_KM: f64 = 10.0;

/// Default list length for personalized recommendations
pub const DEFAULT_LIMIT: usize = 10;

/// What the user asked for in one request.
///
/// Built fresh per request and never shared between requests.
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationContext {
    pub preferred_cuisines: HashSet<Cuisine>,
    pub preferred_price_ranges: HashSet<PriceRange>,
    pub user_location: Option<Coordinates>,
    pub max_distance_km: f64,
    pub limit: usize,
}

impl RecommendationContext {
    /// Context with no preferences, no location and the default bounds.
    pub fn new() -> Self {
        Self {
            preferred_cuisines: HashSet::new(),
            preferred_price_ranges: HashSet::new(),
            user_location: None,
            max_distance_km: DEFAULT_MAX_DISTANCE_KM,
            limit: DEFAULT_LIMIT,
        }
    }

    pub fn with_cuisines(mut self, cuisines: impl IntoIterator<Item = Cuisine>) -> Self {
        self.preferred_cuisines.extend(cuisines);
        self
    }

    pub fn with_price_ranges(mut self, ranges: impl IntoIterator<Item = PriceRange>) -> Self {
        self.preferred_price_ranges.extend(ranges);
        self
    }

    pub fn with_location(mut self, location: Option<Coordinates>) -> Self {
        self.user_location = location;
        self
    }

    pub fn with_max_distance(mut self, max_distance_km: f64) -> Self {
        self.max_distance_km = max_distance_km;
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Every cuisine preferred; price limited to `$`, plus `$$` when the
    /// ceiling allows it.
    pub fn budget(ceiling: PriceRange, location: Option<Coordinates>, limit: usize) -> Self {
        Self::new()
            .with_cuisines(Cuisine::ALL)
            .with_price_ranges(budget_price_ranges(ceiling))
            .with_location(location)
            .with_limit(limit)
    }

    /// One cuisine preferred; every price preferred.
    pub fn cuisine(cuisine: Cuisine, location: Option<Coordinates>, limit: usize) -> Self {
        Self::new()
            .with_cuisines([cuisine])
            .with_price_ranges(PriceRange::ALL)
            .with_location(location)
            .with_limit(limit)
    }
}

impl Default for RecommendationContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Price ranges counted as budget under a ceiling.
///
/// Never more than `$` and `$$`, however high the ceiling.
pub fn budget_price_ranges(ceiling: PriceRange) -> Vec<PriceRange> {
    let mut ranges = vec![PriceRange::Cheap];
    if ceiling >= PriceRange::Moderate {
        ranges.push(PriceRange::Moderate);
    }
    ranges
}
