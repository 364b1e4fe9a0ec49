//! End-to-end tests for the Recommender over hand-built catalogs.

use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

use catalog::{Amenities, Amenity, Catalog, Coordinates, Cuisine, DistanceCalculator, PriceRange, Promotion, Restaurant};
use ranking::filters::{AmenityFilter, DistanceFilter, MinimumRatingFilter, SuburbFilter};
use ranking::{FilterPipeline, Objective, RecommendationContext};
use server::{Recommendation, Recommender};

// ============================================================================
// Test Fixtures
// ============================================================================

/// Distance is the absolute latitude difference, in km.
struct LatitudeDistance;

impl DistanceCalculator for LatitudeDistance {
    fn distance_km(&self, from: Coordinates, to: Coordinates) -> f64 {
        (from.latitude - to.latitude).abs()
    }
}

fn at(km: f64) -> Coordinates {
    Coordinates::new(km, 0.0)
}

fn promotion(id: u32, restaurant_id: u32, is_active: bool) -> Promotion {
    Promotion {
        id,
        restaurant_id,
        title: "Happy hour".to_string(),
        description: String::new(),
        discount_percentage: Some(20),
        fixed_discount: None,
        minimum_spend: None,
        valid_from: "2024-01-01".to_string(),
        valid_until: "2030-12-31".to_string(),
        is_active,
        terms_conditions: String::new(),
        promo_code: Some("HAPPY20".to_string()),
    }
}

/// A(4.0), B(4.5, active promo), C(3.0, student discount)
fn trio() -> Catalog {
    Catalog::from_parts(
        vec![
            Restaurant::new(1, "A", Cuisine::Thai, PriceRange::Moderate, 4.0).with_coordinates(at(2.0)),
            Restaurant::new(2, "B", Cuisine::Italian, PriceRange::Moderate, 4.5).with_coordinates(at(10.0)),
            Restaurant::new(3, "C", Cuisine::Cafe, PriceRange::Cheap, 3.0).with_amenities(Amenities {
                student_discount: true,
                ..Default::default()
            }),
        ],
        vec![promotion(1, 2, true), promotion(2, 1, false)],
    )
    .unwrap()
}

fn varied_catalog() -> Catalog {
    let cuisines = [Cuisine::Thai, Cuisine::Italian, Cuisine::Cafe, Cuisine::Vietnamese, Cuisine::Japanese];
    let restaurants = (1..=15)
        .map(|id| {
            let cuisine = cuisines[id as usize % cuisines.len()];
            let price = PriceRange::ALL[id as usize % 4];
            Restaurant::new(id, format!("Place {id}"), cuisine, price, 3.0 + (id % 5) as f32 * 0.4)
                .with_description(format!("{} food in the city, dish number {}", cuisine, id % 3))
                .with_suburb(if id % 2 == 0 { "Carlton" } else { "Fitzroy" })
                .with_coordinates(at(id as f64 * 0.3))
                .with_amenities(Amenities {
                    has_takeaway: id % 3 == 0,
                    has_lunch_specials: id % 4 == 0,
                    student_discount: id % 5 == 0,
                    ..Default::default()
                })
        })
        .collect();
    Catalog::from_parts(restaurants, vec![promotion(1, 4, true), promotion(2, 9, true)]).unwrap()
}

fn recommender(catalog: Catalog) -> Recommender {
    Recommender::with_distance_calculator(catalog, Arc::new(LatitudeDistance))
}

fn ids(recs: &[Recommendation]) -> Vec<u32> {
    recs.iter().map(|r| r.restaurant.id).collect()
}

// ============================================================================
// Objectives
// ============================================================================

#[test]
fn test_trending_example() {
    let rec = recommender(trio());
    let trending = rec.trending(3);
    assert_eq!(ids(&trending), vec![2, 1, 3]);
    assert!((trending[0].score - 5.0).abs() < 1e-9);
    assert!((trending[2].score - 3.3).abs() < 1e-6);
    assert!(trending.iter().all(|r| r.objective == Objective::Trending));
}

#[test]
fn test_trending_non_increasing() {
    let trending = recommender(varied_catalog()).trending(10);
    assert_eq!(trending.len(), 10);
    assert!(trending.windows(2).all(|w| w[0].score >= w[1].score));
}

#[test]
fn test_personalized_example() {
    let rec = recommender(trio());
    let context = RecommendationContext::new()
        .with_cuisines([Cuisine::Thai])
        .with_location(Some(at(0.0)))
        .with_max_distance(5.0);

    let recs = rec.personalized(&context);
    assert_eq!(recs[0].restaurant.id, 1);
    assert_eq!(recs[0].distance_km, Some(2.0));
    let b = recs.iter().find(|r| r.restaurant.id == 2).unwrap();
    assert!(recs[0].score > b.score);
}

#[test]
fn test_promotions_attached() {
    let rec = recommender(trio());
    let recs = rec.trending(3);
    assert_eq!(recs[0].promotions.len(), 1);
    // restaurant 1 only has an inactive promotion
    assert!(recs[1].promotions.is_empty());
    assert_eq!(ids(&rec.with_promotions()), vec![2]);
}

#[test]
fn test_budget_friendly_prefers_budget_prices() {
    let rec = recommender(varied_catalog());
    let recs = rec.budget_friendly(PriceRange::Moderate, None, 8);
    assert_eq!(recs.len(), 8);
    // the seven budget-priced restaurants outscore every pricier one
    let is_budget = |r: &Recommendation| r.restaurant.price_range <= PriceRange::Moderate;
    assert!(recs[..7].iter().all(is_budget));
    assert!(!is_budget(&recs[7]));
}

#[test]
fn test_by_cuisine_ranks_cuisine_first() {
    let rec = recommender(varied_catalog());
    let recs = rec.by_cuisine(Cuisine::Vietnamese, None, 5);
    assert_eq!(recs.len(), 5);
    // ids 3, 8, 13 are Vietnamese
    let top: HashSet<u32> = ids(&recs[..3]).into_iter().collect();
    assert_eq!(top, HashSet::from([3, 8, 13]));
}

#[test]
fn test_quick_lunch() {
    let rec = recommender(varied_catalog());
    let recs = rec.quick_lunch(Some(at(0.0)), 2.0);
    assert!(recs.len() <= 8);
    for r in &recs {
        assert!(r.distance_km.is_some_and(|d| d <= 2.0));
        let a = r.restaurant.amenities;
        assert!(a.has_takeaway || a.has_lunch_specials || r.restaurant.price_range <= PriceRange::Moderate);
    }
    assert!(recs.windows(2).all(|w| w[0].restaurant.rating >= w[1].restaurant.rating));

    // without a location every distance is unknown and passes
    assert_eq!(rec.quick_lunch(None, 0.1).len(), 8);
}

#[test]
fn test_student_friendly() {
    let rec = recommender(varied_catalog());
    let recs = rec.student_friendly(None);
    assert!(recs.len() <= 8);
    let unique: HashSet<u32> = ids(&recs).into_iter().collect();
    assert_eq!(unique.len(), recs.len());

    // qualifying restaurants come before any backfill
    let qualifies = |r: &Recommendation| {
        let a = r.restaurant.amenities;
        a.student_discount || a.has_lunch_specials || r.restaurant.price_range == PriceRange::Cheap
    };
    let first_backfill = recs.iter().position(|r| !qualifies(r)).unwrap_or(recs.len());
    assert!(recs[first_backfill..].iter().all(|r| !qualifies(r)));
}

// ============================================================================
// Similarity
// ============================================================================

#[test]
fn test_similar_never_includes_self() {
    let rec = recommender(varied_catalog());
    for id in 1..=15 {
        let similar = rec.similar_items(id, 20);
        assert!(!similar.contains(&id));
        assert_eq!(similar.len(), 14);
        assert!(rec.similar_items(id, 3).len() <= 3);
    }
}

#[test]
fn test_similarity_matrix_symmetric() {
    let rec = recommender(varied_catalog());
    let snapshot = rec.snapshot();
    let matrix = &snapshot.similarity;
    for i in 0..matrix.len() {
        assert_eq!(matrix.get(i, i), 1.0);
        for j in 0..matrix.len() {
            assert!((matrix.get(i, j) - matrix.get(j, i)).abs() < 1e-9);
        }
    }
}

#[test]
fn test_similar_restaurants_scored() {
    let rec = recommender(varied_catalog());
    let recs = rec.similar_restaurants(1, 4);
    assert_eq!(ids(&recs), rec.similar_items(1, 4));
    assert!(recs.windows(2).all(|w| w[0].score >= w[1].score));
    assert!(recs.iter().all(|r| r.objective == Objective::Similar));
}

// ============================================================================
// Browsing and search
// ============================================================================

#[test]
fn test_browse_with_pipeline() {
    let rec = recommender(varied_catalog());
    let pipeline = FilterPipeline::new()
        .add_filter(SuburbFilter::new(["carlton"]))
        .add_filter(MinimumRatingFilter::new(4.0))
        .add_filter(AmenityFilter::requiring(Amenity::LunchSpecials));

    let context = RecommendationContext::new();
    let listed = rec.browse(&pipeline, &context);
    assert_eq!(ids(&listed), vec![4, 8]);
    assert!(listed.iter().all(|r| r.objective == Objective::Browse));

    let nearby = pipeline.add_filter(DistanceFilter::new(2.0));
    let context = context.with_location(Some(at(0.0)));
    assert_eq!(ids(&rec.browse(&nearby, &context)), vec![4]);
}

#[test]
fn test_search_distance_bound() {
    let rec = recommender(trio());
    // A is 2 km away, B 10 km, C has no coordinates
    assert_eq!(ids(&rec.search("", None, Some(5.0), Some(at(0.0)))), vec![1, 3]);
    assert_eq!(ids(&rec.search("", None, None, Some(at(0.0)))), vec![1, 2, 3]);
    assert_eq!(ids(&rec.search("", Some(Cuisine::Thai), Some(5.0), Some(at(0.0)))), vec![1]);
}

// ============================================================================
// Degenerate inputs and reload
// ============================================================================

#[test]
fn test_empty_catalog() {
    let rec = recommender(Catalog::new());
    let context = RecommendationContext::new().with_cuisines([Cuisine::Thai]);

    assert!(rec.similar_items(1, 5).is_empty());
    assert!(rec.personalized(&context).is_empty());
    assert!(rec.trending(5).is_empty());
    assert!(rec.budget_friendly(PriceRange::Moderate, None, 5).is_empty());
    assert!(rec.by_cuisine(Cuisine::Thai, None, 5).is_empty());
    assert!(rec.quick_lunch(None, 2.0).is_empty());
    assert!(rec.student_friendly(None).is_empty());
}

#[test]
fn test_reload_swaps_snapshot() {
    let rec = recommender(trio());
    let before = rec.snapshot();
    assert_eq!(before.similarity.len(), 3);

    rec.reload(varied_catalog());
    assert_eq!(rec.snapshot().similarity.len(), 15);
    assert_eq!(rec.trending(20).len(), 15);

    // the old snapshot is untouched
    assert_eq!(before.similarity.len(), 3);
    assert_eq!(before.catalog.counts().0, 3);
}

#[test]
fn test_concurrent_queries_during_reload() {
    let rec = Arc::new(recommender(trio()));
    let readers: Vec<_> = (0..4)
        .map(|_| {
            let rec = Arc::clone(&rec);
            thread::spawn(move || {
                for _ in 0..50 {
                    let n = rec.trending(20).len();
                    assert!(n == 3 || n == 15);
                }
            })
        })
        .collect();

    rec.reload(varied_catalog());
    for reader in readers {
        reader.join().unwrap();
    }
    assert_eq!(rec.trending(20).len(), 15);
}

#[test]
fn test_recommendation_serializes() {
    let rec = recommender(trio());
    let json = serde_json::to_value(&rec.trending(1)).unwrap();
    assert_eq!(json[0]["restaurant"]["name"], "B");
    assert_eq!(json[0]["objective"], "trending");
    assert_eq!(json[0]["promotions"][0]["promo_code"], "HAPPY20");
}
