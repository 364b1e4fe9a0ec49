//! Catalog building and indexing logic.
//!
//! Builds a [`Catalog`] from parsed data:
//! - primary store (restaurants in file order, promotions by restaurant)
//! - secondary indices (cuisine_index, maintained on insert)
//! - integrity checks (unique ids, rating range, promotion references)

use crate::error::{CatalogError, Result};
use crate::parser;
use crate::types::*;
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info};

impl Catalog {
    /// Load a catalog from a restaurants file and an optional promotions file.
    ///
    /// Both files are parsed in parallel, then the catalog is assembled
    /// and validated with [`Catalog::from_parts`].
    pub fn load_from_files(restaurants_path: &Path, promotions_path: Option<&Path>) -> Result<Self> {
        info!("Loading restaurant catalog from {:?}", restaurants_path);

        let (restaurants, promotions) = rayon::join(
            || parser::parse_restaurants(restaurants_path),
            || match promotions_path {
                Some(path) => parser::parse_promotions(path),
                None => Ok(Vec::new()),
            },
        );

        let catalog = Self::from_parts(restaurants?, promotions?)?;

        let (total, active, promos) = catalog.counts();
        info!(
            "Loaded {} restaurants ({} active) and {} promotions",
            total, active, promos
        );
        Ok(catalog)
    }

    /// Build and validate a catalog from already-parsed records.
    ///
    /// Unlike [`Catalog::insert_restaurant`], duplicate ids are an error here.
    pub fn from_parts(restaurants: Vec<Restaurant>, promotions: Vec<Promotion>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(restaurants.len());
        for restaurant in &restaurants {
            if !seen.insert(restaurant.id) {
                return Err(CatalogError::DuplicateId(restaurant.id));
            }
        }

        let mut catalog = Catalog::new();
        for restaurant in restaurants {
            catalog.insert_restaurant(restaurant);
        }
        for promotion in promotions {
            catalog.insert_promotion(promotion);
        }

        debug!("Indexed {} cuisines", catalog.cuisine_index.len());
        catalog.validate()?;
        Ok(catalog)
    }

    /// Validate data integrity
    ///
    /// Check that:
    /// - All ratings are in [0, 5]
    /// - Every promotion refers to a known restaurant
    pub fn validate(&self) -> Result<()> {
        for restaurant in &self.restaurants {
            parser::check_rating(restaurant)?;
        }
        for (&restaurant_id, promos) in &self.promotions {
            if !promos.is_empty() && !self.positions.contains_key(&restaurant_id) {
                return Err(CatalogError::MissingReference {
                    entity: "Restaurant".to_string(),
                    id: restaurant_id,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn promotion(id: PromotionId, restaurant_id: RestaurantId, is_active: bool) -> Promotion {
        Promotion {
            id,
            restaurant_id,
            title: "Lunch Special".to_string(),
            description: String::new(),
            discount_percentage: None,
            fixed_discount: Some(10.0),
            minimum_spend: Some(25.0),
            valid_from: "2024-01-01".to_string(),
            valid_until: "2024-12-31".to_string(),
            is_active,
            terms_conditions: String::new(),
            promo_code: None,
        }
    }

    #[test]
    fn test_from_parts_builds_indices() {
        let catalog = Catalog::from_parts(
            vec![
                Restaurant::new(1, "Chin Chin", Cuisine::Thai, PriceRange::Expensive, 4.5),
                Restaurant::new(2, "Dumplings Plus", Cuisine::Chinese, PriceRange::Cheap, 4.1),
                Restaurant::new(3, "Soi 38", Cuisine::Thai, PriceRange::Cheap, 4.4),
                Restaurant::new(4, "Closed Thai", Cuisine::Thai, PriceRange::Cheap, 3.0)
                    .with_active(false),
            ],
            vec![promotion(1, 2, true), promotion(2, 1, false)],
        )
        .unwrap();

        assert_eq!(catalog.restaurants_by_cuisine(Cuisine::Thai), &[1, 3]);
        assert_eq!(catalog.restaurants_by_cuisine(Cuisine::Chinese), &[2]);
        assert!(catalog.restaurants_by_cuisine(Cuisine::Greek).is_empty());

        assert!(catalog.has_active_promotion(2));
        assert!(!catalog.has_active_promotion(1));
        assert_eq!(catalog.active_promotions(2).len(), 1);
        assert!(catalog.active_promotions(1).is_empty());

        assert_eq!(catalog.counts(), (4, 3, 2));
    }

    #[test]
    fn test_cuisine_index_follows_inserts() {
        let mut catalog = Catalog::from_parts(
            vec![
                Restaurant::new(1, "Chin Chin", Cuisine::Thai, PriceRange::Expensive, 4.5),
                Restaurant::new(2, "Soi 38", Cuisine::Thai, PriceRange::Cheap, 4.4),
            ],
            vec![],
        )
        .unwrap();

        catalog.insert_restaurant(Restaurant::new(9, "Stalactites", Cuisine::Greek, PriceRange::Cheap, 4.0));
        assert_eq!(catalog.restaurants_by_cuisine(Cuisine::Greek), &[9]);

        // Replacing keeps the catalog position but moves cuisine
        catalog.insert_restaurant(Restaurant::new(1, "Chin Chin", Cuisine::Greek, PriceRange::Expensive, 4.5));
        assert_eq!(catalog.restaurants_by_cuisine(Cuisine::Thai), &[2]);
        assert_eq!(catalog.restaurants_by_cuisine(Cuisine::Greek), &[1, 9]);

        // Deactivation drops it from the index
        catalog.insert_restaurant(
            Restaurant::new(9, "Stalactites", Cuisine::Greek, PriceRange::Cheap, 4.0).with_active(false),
        );
        assert_eq!(catalog.restaurants_by_cuisine(Cuisine::Greek), &[1]);

        catalog.insert_restaurant(
            Restaurant::new(10, "Closed", Cuisine::Korean, PriceRange::Cheap, 3.0).with_active(false),
        );
        assert!(catalog.restaurants_by_cuisine(Cuisine::Korean).is_empty());
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let result = Catalog::from_parts(
            vec![
                Restaurant::new(1, "A", Cuisine::Cafe, PriceRange::Cheap, 4.0),
                Restaurant::new(1, "B", Cuisine::Cafe, PriceRange::Cheap, 4.0),
            ],
            vec![],
        );
        assert!(matches!(result, Err(CatalogError::DuplicateId(1))));
    }

    #[test]
    fn test_dangling_promotion_rejected() {
        let result = Catalog::from_parts(
            vec![Restaurant::new(1, "A", Cuisine::Cafe, PriceRange::Cheap, 4.0)],
            vec![promotion(1, 99, true)],
        );
        assert!(matches!(
            result,
            Err(CatalogError::MissingReference { id: 99, .. })
        ));
    }

    #[test]
    fn test_load_bundled_catalog() {
        // Bundled sample data lives at the workspace root
        let data_dir = Path::new("../../data");
        let restaurants = data_dir.join("melbourne_restaurants.json");
        let promotions = data_dir.join("promotions.json");

        if restaurants.exists() && promotions.exists() {
            let catalog = Catalog::load_from_files(&restaurants, Some(&promotions)).unwrap();
            let (total, active, promos) = catalog.counts();
            assert!(total > 0);
            assert!(active <= total);
            assert!(promos > 0);
        }
    }
}
