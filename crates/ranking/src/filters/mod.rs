//! Filter implementations for the candidate pipeline.
//!
//! Every filter keeps the survivors in input order.

pub mod amenity;
pub mod cuisine;
pub mod distance;
pub mod minimum_rating;
pub mod price_range;
pub mod promotion;
pub mod quick_lunch;
pub mod suburb;

// Re-export for convenience
pub use amenity::AmenityFilter;
pub use cuisine::CuisineFilter;
pub use distance::DistanceFilter;
pub use minimum_rating::MinimumRatingFilter;
pub use price_range::PriceRangeFilter;
pub use promotion::PromotionFilter;
pub use quick_lunch::QuickLunchFilter;
pub use suburb::SuburbFilter;
