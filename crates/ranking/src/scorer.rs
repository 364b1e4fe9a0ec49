//! Per-objective scoring of candidates.
//!
//! ## Personalized
//! | Signal | Contribution |
//! |---|---|
//! | cuisine preferred | 0.4 |
//! | price preferred | 0.2 |
//! | rating | 0.2 × rating / 5 |
//! | distance | 0.1 × credit, see [`distance_credit`] |
//! | active promotion | 0.1 |
//!
//! ## Trending
//! Raw rating plus fixed bonuses for an active promotion (0.5), a student
//! discount (0.3) and lunch specials (0.2).
//!
//! Budget and cuisine lists reuse the personalized score with a derived
//! context. Quick lunch ranks eligible restaurants by raw rating.

use crate::candidate::Candidate;
use crate::context::RecommendationContext;
use catalog::{PriceRange, Restaurant};
use serde::Serialize;
use std::fmt;

pub const CUISINE_WEIGHT: f64 = 0.4;
pub const PRICE_WEIGHT: f64 = 0.2;
pub const RATING_WEIGHT: f64 = 0.2;
pub const DISTANCE_WEIGHT: f64 = 0.1;
pub const PROMOTION_WEIGHT: f64 = 0.1;

/// Ratings are on a 0-5 scale
pub const MAX_RATING: f64 = 5.0;

/// Distance credit given when the distance is unknown
pub const UNKNOWN_DISTANCE_CREDIT: f64 = 0.5;

pub const TRENDING_PROMOTION_BONUS: f64 = 0.5;
pub const TRENDING_STUDENT_BONUS: f64 = 0.3;
pub const TRENDING_LUNCH_BONUS: f64 = 0.2;

/// The ranking goal a recommendation was produced for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Objective {
    Similar,
    Personalized,
    Trending,
    BudgetFriendly,
    Cuisine,
    QuickLunch,
    StudentFriendly,
    Browse,
}

impl Objective {
    pub fn label(&self) -> &'static str {
        match self {
            Objective::Similar => "similar",
            Objective::Personalized => "personalized",
            Objective::Trending => "trending",
            Objective::BudgetFriendly => "budget_friendly",
            Objective::Cuisine => "cuisine",
            Objective::QuickLunch => "quick_lunch",
            Objective::StudentFriendly => "student_friendly",
            Objective::Browse => "browse",
        }
    }
}

impl fmt::Display for Objective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Fraction of the distance weight earned, in [0, 1].
///
/// Known and within `max_km`: linear falloff `1 - d / max_km`. Unknown:
/// [`UNKNOWN_DISTANCE_CREDIT`]. Beyond `max_km`, or any known distance
/// when `max_km` is not positive: 0.
pub fn distance_credit(distance_km: Option<f64>, max_km: f64) -> f64 {
    match distance_km {
        None => UNKNOWN_DISTANCE_CREDIT,
        Some(d) if max_km > 0.0 && d <= max_km => (1.0 - d / max_km).max(0.0),
        Some(_) => 0.0,
    }
}

/// Weighted preference match for one candidate.
pub fn personalized_score(candidate: &Candidate<'_>, context: &RecommendationContext) -> f64 {
    let restaurant = candidate.restaurant;
    let mut score = 0.0;

    if context.preferred_cuisines.contains(&restaurant.cuisine_type) {
        score += CUISINE_WEIGHT;
    }
    if context.preferred_price_ranges.contains(&restaurant.price_range) {
        score += PRICE_WEIGHT;
    }
    score += f64::from(restaurant.rating) / MAX_RATING * RATING_WEIGHT;
    score += distance_credit(candidate.distance_km, context.max_distance_km) * DISTANCE_WEIGHT;
    if candidate.has_active_promotion {
        score += PROMOTION_WEIGHT;
    }

    score
}

/// Popularity score: rating plus deal bonuses.
pub fn trending_score(candidate: &Candidate<'_>) -> f64 {
    let restaurant = candidate.restaurant;
    let mut score = f64::from(restaurant.rating);

    if candidate.has_active_promotion {
        score += TRENDING_PROMOTION_BONUS;
    }
    if restaurant.amenities.student_discount {
        score += TRENDING_STUDENT_BONUS;
    }
    if restaurant.amenities.has_lunch_specials {
        score += TRENDING_LUNCH_BONUS;
    }

    score
}

/// Quick-lunch ordering key
pub fn rating_score(candidate: &Candidate<'_>) -> f64 {
    f64::from(candidate.restaurant.rating)
}

/// Takeaway, lunch specials, or priced `$`/`$$`.
pub fn is_lunch_friendly(restaurant: &Restaurant) -> bool {
    restaurant.amenities.has_takeaway
        || restaurant.amenities.has_lunch_specials
        || restaurant.price_range <= PriceRange::Moderate
}

/// Quick-lunch eligibility: lunch friendly and not known to be too far.
pub fn is_quick_lunch(candidate: &Candidate<'_>, max_distance_km: f64) -> bool {
    is_lunch_friendly(candidate.restaurant) && candidate.within(max_distance_km)
}

/// Student discount, `$` pricing, or lunch specials.
pub fn is_student_friendly(restaurant: &Restaurant) -> bool {
    restaurant.amenities.student_discount
        || restaurant.price_range == PriceRange::Cheap
        || restaurant.amenities.has_lunch_specials
}
