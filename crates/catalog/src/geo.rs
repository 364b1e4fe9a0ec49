//! Geographic distance between a user and a restaurant.
//!
//! The recommendation core treats distance as a black box: it only ever
//! sees kilometres, or `None` when either side has no coordinates.

use crate::types::{Coordinates, Restaurant};

/// Mean earth radius in kilometres (IUGG)
pub const EARTH_RADIUS_KM: f64 = 6371.0088;

/// Computes the distance in kilometres between two points.
///
/// `Send + Sync` so a calculator can sit inside a shared recommender.
pub trait DistanceCalculator: Send + Sync {
    fn distance_km(&self, from: Coordinates, to: Coordinates) -> f64;
}

/// Great-circle distance on a spherical earth.
#[derive(Debug, Clone, Copy, Default)]
pub struct Haversine;

impl DistanceCalculator for Haversine {
    fn distance_km(&self, from: Coordinates, to: Coordinates) -> f64 {
        let lat1 = from.latitude.to_radians();
        let lat2 = to.latitude.to_radians();
        let d_lat = lat2 - lat1;
        let d_lng = (to.longitude - from.longitude).to_radians();

        let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);
        2.0 * EARTH_RADIUS_KM * a.sqrt().min(1.0).asin()
    }
}

/// Distance from the user to a restaurant, if both locations are known.
///
/// The city-centre fallback is not applied here: a restaurant without
/// coordinates has an unknown distance.
pub fn distance_to(
    calculator: &dyn DistanceCalculator,
    user: Option<Coordinates>,
    restaurant: &Restaurant,
) -> Option<f64> {
    Some(calculator.distance_km(user?, restaurant.coordinates()?))
}
