//! Restaurants paired with per-request facts: distance and promotion status.

use crate::context::RecommendationContext;
use catalog::{distance_to, Catalog, Coordinates, DistanceCalculator, Restaurant};
use tracing::debug;

/// An active restaurant under consideration for one request.
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    pub restaurant: &'a Restaurant,
    /// Kilometres from the user; `None` when either location is unknown
    pub distance_km: Option<f64>,
    pub has_active_promotion: bool,
}

impl<'a> Candidate<'a> {
    pub fn new(restaurant: &'a Restaurant, distance_km: Option<f64>, has_active_promotion: bool) -> Self {
        Self {
            restaurant,
            distance_km,
            has_active_promotion,
        }
    }

    /// True when the distance is unknown or within `max_km`.
    pub fn within(&self, max_km: f64) -> bool {
        self.distance_km.is_none_or(|d| d <= max_km)
    }
}

/// Every active restaurant as a candidate, in catalog order.
pub fn build_candidates<'a>(
    catalog: &'a Catalog,
    calculator: &dyn DistanceCalculator,
    user_location: Option<Coordinates>,
) -> Vec<Candidate<'a>> {
    let candidates: Vec<Candidate<'a>> = catalog
        .active_restaurants()
        .map(|restaurant| {
            Candidate::new(
                restaurant,
                distance_to(calculator, user_location, restaurant),
                catalog.has_active_promotion(restaurant.id),
            )
        })
        .collect();
    debug!("Built {} candidates", candidates.len());
    candidates
}

/// Candidates for a context, using its location.
pub fn candidates_for<'a>(
    catalog: &'a Catalog,
    calculator: &dyn DistanceCalculator,
    context: &RecommendationContext,
) -> Vec<Candidate<'a>> {
    build_candidates(catalog, calculator, context.user_location)
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::{Cuisine, Haversine, PriceRange, Promotion, CITY_CENTRE};

    fn promotion(id: u32, restaurant_id: u32, is_active: bool) -> Promotion {
        Promotion {
            id,
            restaurant_id,
            title: "Lunch deal".to_string(),
            description: String::new(),
            discount_percentage: Some(10),
            fixed_discount: None,
            minimum_spend: None,
            valid_from: "2024-01-01".to_string(),
            valid_until: "2030-12-31".to_string(),
            is_active,
            terms_conditions: String::new(),
            promo_code: None,
        }
    }

    #[test]
    fn test_build_candidates() {
        let catalog = Catalog::from_parts(
            vec![
                Restaurant::new(1, "A", Cuisine::Thai, PriceRange::Cheap, 4.0)
                    .with_coordinates(CITY_CENTRE),
                Restaurant::new(2, "B", Cuisine::Cafe, PriceRange::Cheap, 4.0),
                Restaurant::new(3, "C", Cuisine::Cafe, PriceRange::Cheap, 4.0).with_active(false),
            ],
            vec![promotion(1, 1, true), promotion(2, 2, false)],
        )
        .unwrap();

        let candidates = build_candidates(&catalog, &Haversine, Some(CITY_CENTRE));
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].distance_km, Some(0.0));
        assert!(candidates[0].has_active_promotion);
        assert_eq!(candidates[1].distance_km, None);
        assert!(!candidates[1].has_active_promotion);
    }

    #[test]
    fn test_no_location_means_unknown_distance() {
        let catalog = Catalog::from_parts(
            vec![Restaurant::new(1, "A", Cuisine::Thai, PriceRange::Cheap, 4.0)
                .with_coordinates(CITY_CENTRE)],
            vec![],
        )
        .unwrap();
        let candidates = build_candidates(&catalog, &Haversine, None);
        assert_eq!(candidates[0].distance_km, None);
        assert!(candidates[0].within(0.5));
    }
}
