//! # Catalog Crate
//!
//! This crate loads and indexes the restaurant catalog that every
//! recommendation is drawn from.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (Restaurant, Cuisine, PriceRange, Amenities, Promotion, Catalog)
//! - **parser**: Parse the JSON data files into Rust structs
//! - **index**: Assemble, index and validate a Catalog
//! - **geo**: Distance between the user and a restaurant
//! - **error**: Error types for catalog loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::Catalog;
//! use std::path::Path;
//!
//! let catalog = Catalog::load_from_files(
//!     Path::new("data/melbourne_restaurants.json"),
//!     Some(Path::new("data/promotions.json")),
//! )?;
//!
//! for restaurant in catalog.active_restaurants() {
//!     println!("{} ({})", restaurant.name, restaurant.cuisine_type);
//! }
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod index;
pub mod geo;

// Re-export commonly used types for convenience
pub use error::{CatalogError, Result};
pub use geo::{distance_to, DistanceCalculator, Haversine};
pub use types::{
    // Type aliases
    RestaurantId,
    PromotionId,
    // Core types
    Restaurant,
    Amenities,
    Amenity,
    Promotion,
    Coordinates,
    Catalog,
    // Enums
    Cuisine,
    PriceRange,
    // Constants
    CITY_CENTRE,
};
