//! Core domain types for the restaurant catalog.
//!
//! Cuisine and price range are closed enums so an unknown label is
//! rejected when the catalog is deserialized, and the eight amenity flags
//! live in a fixed record rather than a string-keyed map.

use crate::error::CatalogError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Type Aliases
// =============================================================================

/// Unique identifier for a restaurant
pub type RestaurantId = u32;

/// Unique identifier for a promotional offer
pub type PromotionId = u32;

// =============================================================================
// Enumerations
// =============================================================================

/// Cuisine served by a restaurant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Cuisine {
    Italian,
    Chinese,
    Japanese,
    Thai,
    Vietnamese,
    Indian,
    Greek,
    Mexican,
    Australian,
    French,
    #[serde(rename = "Middle Eastern")]
    MiddleEastern,
    Korean,
    Pizza,
    Burgers,
    Cafe,
    Bakery,
    Seafood,
    Vegetarian,
    Vegan,
}

impl Cuisine {
    /// Every cuisine, in declaration order.
    pub const ALL: [Cuisine; 19] = [
        Cuisine::Italian,
        Cuisine::Chinese,
        Cuisine::Japanese,
        Cuisine::Thai,
        Cuisine::Vietnamese,
        Cuisine::Indian,
        Cuisine::Greek,
        Cuisine::Mexican,
        Cuisine::Australian,
        Cuisine::French,
        Cuisine::MiddleEastern,
        Cuisine::Korean,
        Cuisine::Pizza,
        Cuisine::Burgers,
        Cuisine::Cafe,
        Cuisine::Bakery,
        Cuisine::Seafood,
        Cuisine::Vegetarian,
        Cuisine::Vegan,
    ];

    /// Human-readable label, identical to the serialized form.
    pub fn label(&self) -> &'static str {
        match self {
            Cuisine::Italian => "Italian",
            Cuisine::Chinese => "Chinese",
            Cuisine::Japanese => "Japanese",
            Cuisine::Thai => "Thai",
            Cuisine::Vietnamese => "Vietnamese",
            Cuisine::Indian => "Indian",
            Cuisine::Greek => "Greek",
            Cuisine::Mexican => "Mexican",
            Cuisine::Australian => "Australian",
            Cuisine::French => "French",
            Cuisine::MiddleEastern => "Middle Eastern",
            Cuisine::Korean => "Korean",
            Cuisine::Pizza => "Pizza",
            Cuisine::Burgers => "Burgers",
            Cuisine::Cafe => "Cafe",
            Cuisine::Bakery => "Bakery",
            Cuisine::Seafood => "Seafood",
            Cuisine::Vegetarian => "Vegetarian",
            Cuisine::Vegan => "Vegan",
        }
    }
}

impl fmt::Display for Cuisine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Parses a cuisine label case-insensitively; `middle-eastern` and
/// `middle_eastern` are accepted for command-line convenience.
impl FromStr for Cuisine {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace(['-', '_'], " ");
        Cuisine::ALL
            .into_iter()
            .find(|cuisine| cuisine.label().eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| CatalogError::InvalidValue {
                field: "cuisine".to_string(),
                value: s.to_string(),
            })
    }
}

/// Price range, ordered from cheapest to most expensive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PriceRange {
    /// Under $15
    #[serde(rename = "$")]
    Cheap,
    /// $15-30
    #[serde(rename = "$$")]
    Moderate,
    /// $30-50
    #[serde(rename = "$$$")]
    Expensive,
    /// $50+
    #[serde(rename = "$$$$")]
    VeryExpensive,
}

impl PriceRange {
    /// Every price range, cheapest first.
    pub const ALL: [PriceRange; 4] = [
        PriceRange::Cheap,
        PriceRange::Moderate,
        PriceRange::Expensive,
        PriceRange::VeryExpensive,
    ];

    /// Integer tier on a 1-4 scale.
    pub fn tier(&self) -> u8 {
        match self {
            PriceRange::Cheap => 1,
            PriceRange::Moderate => 2,
            PriceRange::Expensive => 3,
            PriceRange::VeryExpensive => 4,
        }
    }

    /// Dollar-sign symbol, identical to the serialized form.
    pub fn symbol(&self) -> &'static str {
        match self {
            PriceRange::Cheap => "$",
            PriceRange::Moderate => "$$",
            PriceRange::Expensive => "$$$",
            PriceRange::VeryExpensive => "$$$$",
        }
    }
}

impl fmt::Display for PriceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Accepts either the symbol (`$$`) or a tier number (`2`).
impl FromStr for PriceRange {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        PriceRange::ALL
            .into_iter()
            .find(|price| price.symbol() == s || price.tier().to_string() == s)
            .ok_or_else(|| CatalogError::InvalidValue {
                field: "price_range".to_string(),
                value: s.to_string(),
            })
    }
}

// =============================================================================
// Location
// =============================================================================

/// A latitude/longitude pair in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

/// Melbourne CBD, used when a restaurant has no coordinates of its own.
pub const CITY_CENTRE: Coordinates = Coordinates {
    latitude: -37.8136,
    longitude: 144.9631,
};

// =============================================================================
// Restaurant
// =============================================================================

/// The fixed set of boolean amenity flags carried by every restaurant.
///
/// Field order here is the order used in numeric feature vectors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amenities {
    #[serde(default)]
    pub has_delivery: bool,
    #[serde(default)]
    pub has_takeaway: bool,
    #[serde(default)]
    pub has_outdoor_seating: bool,
    #[serde(default)]
    pub is_wheelchair_accessible: bool,
    #[serde(default)]
    pub accepts_reservations: bool,
    #[serde(default)]
    pub has_lunch_specials: bool,
    #[serde(default)]
    pub has_happy_hour: bool,
    #[serde(default)]
    pub student_discount: bool,
}

/// Names one amenity flag, for filters that test a single flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Amenity {
    Delivery,
    Takeaway,
    OutdoorSeating,
    WheelchairAccessible,
    Reservations,
    LunchSpecials,
    HappyHour,
    StudentDiscount,
}

impl Amenities {
    /// Number of amenity flags.
    pub const COUNT: usize = 8;

    /// Flags in feature-vector order.
    pub fn as_array(&self) -> [bool; Self::COUNT] {
        [
            self.has_delivery,
            self.has_takeaway,
            self.has_outdoor_seating,
            self.is_wheelchair_accessible,
            self.accepts_reservations,
            self.has_lunch_specials,
            self.has_happy_hour,
            self.student_discount,
        ]
    }

    pub fn has(&self, amenity: Amenity) -> bool {
        match amenity {
            Amenity::Delivery => self.has_delivery,
            Amenity::Takeaway => self.has_takeaway,
            Amenity::OutdoorSeating => self.has_outdoor_seating,
            Amenity::WheelchairAccessible => self.is_wheelchair_accessible,
            Amenity::Reservations => self.accepts_reservations,
            Amenity::LunchSpecials => self.has_lunch_specials,
            Amenity::HappyHour => self.has_happy_hour,
            Amenity::StudentDiscount => self.student_discount,
        }
    }
}

fn default_active() -> bool {
    true
}

/// A restaurant in the catalog.
///
/// Immutable once the catalog is built; a reload replaces the whole catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    pub id: RestaurantId,
    pub name: String,
    pub cuisine_type: Cuisine,
    pub price_range: PriceRange,
    /// Rating from 0.0 to 5.0
    pub rating: f32,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub suburb: String,
    #[serde(default)]
    pub postcode: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub description: String,
    /// Day name (lowercase) to an hours string such as "11:00 - 22:00" or "Closed"
    #[serde(default)]
    pub opening_hours: BTreeMap<String, String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(flatten)]
    pub amenities: Amenities,
}

impl Restaurant {
    /// Create an active restaurant with empty descriptive fields and no amenities.
    pub fn new(
        id: RestaurantId,
        name: impl Into<String>,
        cuisine_type: Cuisine,
        price_range: PriceRange,
        rating: f32,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            cuisine_type,
            price_range,
            rating,
            address: String::new(),
            suburb: String::new(),
            postcode: String::new(),
            phone: None,
            website: None,
            description: String::new(),
            opening_hours: BTreeMap::new(),
            is_active: true,
            latitude: None,
            longitude: None,
            image_url: None,
            amenities: Amenities::default(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_suburb(mut self, suburb: impl Into<String>) -> Self {
        self.suburb = suburb.into();
        self
    }

    pub fn with_coordinates(mut self, coordinates: Coordinates) -> Self {
        self.latitude = Some(coordinates.latitude);
        self.longitude = Some(coordinates.longitude);
        self
    }

    pub fn with_amenities(mut self, amenities: Amenities) -> Self {
        self.amenities = amenities;
        self
    }

    pub fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    /// Coordinates, only if both latitude and longitude are present
    pub fn coordinates(&self) -> Option<Coordinates> {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Some(Coordinates { latitude, longitude }),
            _ => None,
        }
    }

    /// Coordinates, falling back to [`CITY_CENTRE`] when missing
    pub fn coordinates_or_centre(&self) -> Coordinates {
        self.coordinates().unwrap_or(CITY_CENTRE)
    }
}

// =============================================================================
// Promotions
// =============================================================================

/// A promotional offer attached to a restaurant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Promotion {
    pub id: PromotionId,
    pub restaurant_id: RestaurantId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub discount_percentage: Option<u32>,
    #[serde(default)]
    pub fixed_discount: Option<f64>,
    #[serde(default)]
    pub minimum_spend: Option<f64>,
    /// ISO date
    pub valid_from: String,
    /// ISO date
    pub valid_until: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub terms_conditions: String,
    #[serde(default)]
    pub promo_code: Option<String>,
}

// =============================================================================
// Catalog - The In-Memory Store
// =============================================================================

/// All restaurants and promotions, plus lookup indices.
///
/// Restaurants keep their insertion order: that order is the "catalog
/// order" used to break ties everywhere downstream.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub(crate) restaurants: Vec<Restaurant>,
    /// Restaurant id to its position in `restaurants`
    pub(crate) positions: HashMap<RestaurantId, usize>,
    /// Promotions grouped by restaurant, in insertion order
    pub(crate) promotions: HashMap<RestaurantId, Vec<Promotion>>,
    /// Active restaurants grouped by cuisine
    pub(crate) cuisine_index: HashMap<Cuisine, Vec<RestaurantId>>,
}

impl Catalog {
    /// Creates a new, empty Catalog
    pub fn new() -> Self {
        Self {
            restaurants: Vec::new(),
            positions: HashMap::new(),
            promotions: HashMap::new(),
            cuisine_index: HashMap::new(),
        }
    }

    /// Get a restaurant by ID, active or not
    pub fn get_restaurant(&self, id: RestaurantId) -> Option<&Restaurant> {
        self.positions.get(&id).map(|&pos| &self.restaurants[pos])
    }

    /// Get a restaurant by ID only if it is active
    pub fn get_active_restaurant(&self, id: RestaurantId) -> Option<&Restaurant> {
        self.get_restaurant(id).filter(|r| r.is_active)
    }

    /// All restaurants, including inactive ones, in catalog order
    pub fn restaurants(&self) -> &[Restaurant] {
        &self.restaurants
    }

    /// Active restaurants in catalog order
    pub fn active_restaurants(&self) -> impl Iterator<Item = &Restaurant> {
        self.restaurants.iter().filter(|r| r.is_active)
    }

    /// Active promotions for a restaurant; empty when it has none
    pub fn active_promotions(&self, id: RestaurantId) -> Vec<&Promotion> {
        self.promotions
            .get(&id)
            .map(|promos| promos.iter().filter(|p| p.is_active).collect())
            .unwrap_or_default()
    }

    /// True if the restaurant has at least one active promotion
    pub fn has_active_promotion(&self, id: RestaurantId) -> bool {
        self.promotions
            .get(&id)
            .is_some_and(|promos| promos.iter().any(|p| p.is_active))
    }

    /// Active restaurants serving a cuisine, in catalog order
    pub fn restaurants_by_cuisine(&self, cuisine: Cuisine) -> &[RestaurantId] {
        self.cuisine_index
            .get(&cuisine)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Insert a restaurant; an existing restaurant with the same id is
    /// replaced in place and keeps its catalog position.
    ///
    /// The cuisine index is kept in step with the restaurant list.
    pub fn insert_restaurant(&mut self, restaurant: Restaurant) {
        let id = restaurant.id;
        let cuisine = restaurant.cuisine_type;
        let active = restaurant.is_active;

        let pos = match self.positions.get(&id) {
            Some(&pos) => {
                self.restaurants[pos] = restaurant;
                pos
            }
            None => {
                let pos = self.restaurants.len();
                self.positions.insert(id, pos);
                self.restaurants.push(restaurant);
                pos
            }
        };

        for ids in self.cuisine_index.values_mut() {
            ids.retain(|&other| other != id);
        }
        self.cuisine_index.retain(|_, ids| !ids.is_empty());
        if active {
            let positions = &self.positions;
            let ids = self.cuisine_index.entry(cuisine).or_default();
            let at = ids.partition_point(|other| positions.get(other).is_some_and(|&p| p < pos));
            ids.insert(at, id);
        }
    }

    /// Insert a promotion
    pub fn insert_promotion(&mut self, promotion: Promotion) {
        self.promotions
            .entry(promotion.restaurant_id)
            .or_default()
            .push(promotion);
    }

    /// Counts of (restaurants, active restaurants, promotions)
    pub fn counts(&self) -> (usize, usize, usize) {
        let active = self.active_restaurants().count();
        let promotions = self.promotions.values().map(|v| v.len()).sum();
        (self.restaurants.len(), active, promotions)
    }

    pub fn is_empty(&self) -> bool {
        self.restaurants.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}
