//! Feature extraction for content-based similarity.
//!
//! Each restaurant becomes a free-text document plus a fixed-order numeric
//! vector. Coordinates are not part of either; they only matter for
//! distance scoring.

use catalog::{Amenities, Restaurant, RestaurantId};
use rayon::prelude::*;

/// Number of numeric features: price tier, rating, then the amenity flags.
pub const NUMERIC_FEATURE_COUNT: usize = 2 + Amenities::COUNT;

/// Column names of the numeric feature vector, in order.
pub const NUMERIC_FEATURE_NAMES: [&str; NUMERIC_FEATURE_COUNT] = [
    "price_tier",
    "rating",
    "has_delivery",
    "has_takeaway",
    "has_outdoor_seating",
    "is_wheelchair_accessible",
    "accepts_reservations",
    "has_lunch_specials",
    "has_happy_hour",
    "student_discount",
];

/// Features derived from one restaurant.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    pub restaurant_id: RestaurantId,
    /// Cuisine label, description and suburb joined by spaces
    pub text: String,
    pub numeric: [f64; NUMERIC_FEATURE_COUNT],
}

/// Turns restaurants into [`FeatureVector`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeatureExtractor;

impl FeatureExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Extract features for every restaurant in parallel.
    ///
    /// # Returns
    /// One FeatureVector per restaurant, in the same order
    pub fn extract_all(&self, restaurants: &[&Restaurant]) -> Vec<FeatureVector> {
        restaurants
            .par_iter()
            .map(|restaurant| self.extract(restaurant))
            .collect()
    }

    /// Extract features for a single restaurant.
    pub fn extract(&self, restaurant: &Restaurant) -> FeatureVector {
        let text = format!(
            "{} {} {}",
            restaurant.cuisine_type.label(),
            restaurant.description,
            restaurant.suburb
        );

        let mut numeric = [0.0; NUMERIC_FEATURE_COUNT];
        numeric[0] = f64::from(restaurant.price_range.tier());
        numeric[1] = f64::from(restaurant.rating);
        for (slot, flag) in numeric[2..].iter_mut().zip(restaurant.amenities.as_array()) {
            *slot = if flag { 1.0 } else { 0.0 };
        }

        FeatureVector {
            restaurant_id: restaurant.id,
            text,
            numeric,
        }
    }
}
