//! # Recommender
//!
//! Answers every recommendation query against the published snapshot:
//! 1. Grab the current snapshot (a cheap `Arc` clone under a read lock)
//! 2. Build candidates from the active restaurants
//! 3. Filter and score them for the requested objective
//! 4. Rank and select the top K
//! 5. Attach restaurant details and active promotions
//!
//! Queries never block each other. `reload` builds the next snapshot
//! without holding the lock and then swaps it in, so a query sees either
//! the old catalog or the new one, never a mix.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use parking_lot::RwLock;
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use catalog::{
    distance_to, Catalog, Coordinates, Cuisine, DistanceCalculator, Haversine, PriceRange, Promotion, Restaurant,
    RestaurantId,
};
use ranking::filters::{CuisineFilter, DistanceFilter, PriceRangeFilter, PromotionFilter, QuickLunchFilter};
use ranking::{
    build_candidates, budget_price_ranges, candidates_for, personalized_score, rating_score, score_and_rank, student_friendly,
    trending_score, Candidate, FilterPipeline, Objective, RecommendationContext, ScoredCandidate,
    QUICK_LUNCH_LIST_SIZE, STUDENT_SOURCE_SIZE,
};
use similarity::SimilarityEngine;

use crate::snapshot::CatalogSnapshot;

/// Final recommendation returned to the caller
#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub restaurant: Restaurant,
    pub score: f64,
    pub distance_km: Option<f64>,
    /// Active promotions only
    pub promotions: Vec<Promotion>,
    pub objective: Objective,
}

/// Owns the current catalog snapshot and the distance collaborator.
pub struct Recommender {
    snapshot: RwLock<Arc<CatalogSnapshot>>,
    engine: SimilarityEngine,
    distance: Arc<dyn DistanceCalculator>,
}

impl Recommender {
    /// Build a recommender over `catalog` using great-circle distances.
    pub fn new(catalog: Catalog) -> Self {
        Self::with_distance_calculator(catalog, Arc::new(Haversine))
    }

    /// Build a recommender with a custom distance collaborator.
    pub fn with_distance_calculator(catalog: Catalog, distance: Arc<dyn DistanceCalculator>) -> Self {
        let engine = SimilarityEngine::new();
        let snapshot = CatalogSnapshot::build(catalog, &engine);
        Self {
            snapshot: RwLock::new(Arc::new(snapshot)),
            engine,
            distance,
        }
    }

    /// Load the catalog from JSON files and build a recommender over it.
    pub fn load_from_files(restaurants: &Path, promotions: Option<&Path>) -> Result<Self> {
        let catalog = Catalog::load_from_files(restaurants, promotions)
            .with_context(|| format!("Failed to load catalog from {}", restaurants.display()))?;
        Ok(Self::new(catalog))
    }

    /// The snapshot queries currently read from.
    pub fn snapshot(&self) -> Arc<CatalogSnapshot> {
        self.snapshot.read().clone()
    }

    /// Replace the catalog, rebuilding the similarity matrix.
    ///
    /// Queries already running keep the snapshot they started with.
    pub fn reload(&self, catalog: Catalog) {
        let start = Instant::now();
        let next = Arc::new(CatalogSnapshot::build(catalog, &self.engine));
        *self.snapshot.write() = next;
        info!("Published new snapshot in {:.2?}", start.elapsed());
    }

    /// Reload from JSON files; on error the current snapshot stays published.
    pub fn reload_from_files(&self, restaurants: &Path, promotions: Option<&Path>) -> Result<()> {
        let catalog = Catalog::load_from_files(restaurants, promotions)
            .with_context(|| format!("Failed to reload catalog from {}", restaurants.display()))?;
        self.reload(catalog);
        Ok(())
    }

    // ========================================================================
    // Recommendation objectives
    // ========================================================================

    /// Ids of the `k` restaurants most similar to `id`, never `id` itself.
    #[instrument(skip(self))]
    pub fn similar_items(&self, id: RestaurantId, k: usize) -> Vec<RestaurantId> {
        let snapshot = self.snapshot();
        if snapshot.similarity.position(id).is_none() {
            warn!("Restaurant {} is not in the similarity matrix", id);
            return Vec::new();
        }
        snapshot.similarity.similar(id, k)
    }

    /// Like [`similar_items`](Self::similar_items), scored by similarity.
    #[instrument(skip(self))]
    pub fn similar_restaurants(&self, id: RestaurantId, k: usize) -> Vec<Recommendation> {
        let snapshot = self.snapshot();
        if snapshot.similarity.position(id).is_none() {
            warn!("Restaurant {} is not in the similarity matrix", id);
            return Vec::new();
        }

        let catalog = &snapshot.catalog;
        snapshot
            .similarity
            .most_similar(id, k)
            .into_iter()
            .filter_map(|(other, score)| {
                let restaurant = catalog.get_active_restaurant(other)?;
                let candidate = Candidate::new(restaurant, None, catalog.has_active_promotion(other));
                Some(to_recommendation(catalog, ScoredCandidate::new(candidate, score), Objective::Similar))
            })
            .collect()
    }

    /// Top `context.limit` restaurants by preference match.
    #[instrument(skip(self, context), fields(limit = context.limit))]
    pub fn personalized(&self, context: &RecommendationContext) -> Vec<Recommendation> {
        let snapshot = self.snapshot();
        let catalog = &snapshot.catalog;
        let candidates = build_candidates(catalog, self.distance.as_ref(), context.user_location);
        let ranked = score_and_rank(candidates, context.limit, |c| personalized_score(c, context));
        recommendations(catalog, ranked, Objective::Personalized)
    }

    /// Top `k` restaurants by rating plus deal bonuses.
    #[instrument(skip(self))]
    pub fn trending(&self, k: usize) -> Vec<Recommendation> {
        let snapshot = self.snapshot();
        let catalog = &snapshot.catalog;
        let candidates = build_candidates(catalog, self.distance.as_ref(), None);
        let ranked = score_and_rank(candidates, k, trending_score);
        recommendations(catalog, ranked, Objective::Trending)
    }

    /// Top `k` restaurants for a budget up to `ceiling`.
    #[instrument(skip(self))]
    pub fn budget_friendly(
        &self,
        ceiling: PriceRange,
        location: Option<Coordinates>,
        k: usize,
    ) -> Vec<Recommendation> {
        let snapshot = self.snapshot();
        let catalog = &snapshot.catalog;
        let ranked = self.rank_budget(catalog, ceiling, location, k);
        recommendations(catalog, ranked, Objective::BudgetFriendly)
    }

    /// Top `k` restaurants serving `cuisine`, any price.
    #[instrument(skip(self))]
    pub fn by_cuisine(&self, cuisine: Cuisine, location: Option<Coordinates>, k: usize) -> Vec<Recommendation> {
        let snapshot = self.snapshot();
        let catalog = &snapshot.catalog;
        let context = RecommendationContext::cuisine(cuisine, location, k);
        let candidates = build_candidates(catalog, self.distance.as_ref(), location);
        let ranked = score_and_rank(candidates, k, |c| personalized_score(c, &context));
        recommendations(catalog, ranked, Objective::Cuisine)
    }

    /// Best-rated lunch-friendly places not known to be beyond `max_distance_km`.
    #[instrument(skip(self))]
    pub fn quick_lunch(&self, location: Option<Coordinates>, max_distance_km: f64) -> Vec<Recommendation> {
        let snapshot = self.snapshot();
        let catalog = &snapshot.catalog;
        let context = RecommendationContext::new()
            .with_location(location)
            .with_max_distance(max_distance_km);

        let pipeline = FilterPipeline::new().add_filter(QuickLunchFilter);
        let candidates = pipeline.apply(build_candidates(catalog, self.distance.as_ref(), location), &context);
        let ranked = score_and_rank(candidates, QUICK_LUNCH_LIST_SIZE, rating_score);
        recommendations(catalog, ranked, Objective::QuickLunch)
    }

    /// Up to eight budget picks, student-friendly places first.
    #[instrument(skip(self))]
    pub fn student_friendly(&self, location: Option<Coordinates>) -> Vec<Recommendation> {
        let snapshot = self.snapshot();
        let catalog = &snapshot.catalog;
        let source = self.rank_budget(catalog, PriceRange::Moderate, location, STUDENT_SOURCE_SIZE);
        recommendations(catalog, student_friendly(source), Objective::StudentFriendly)
    }

    fn rank_budget<'a>(
        &self,
        catalog: &'a Catalog,
        ceiling: PriceRange,
        location: Option<Coordinates>,
        k: usize,
    ) -> Vec<ScoredCandidate<'a>> {
        let context = RecommendationContext::budget(ceiling, location, k);
        let candidates = build_candidates(catalog, self.distance.as_ref(), location);
        score_and_rank(candidates, k, |c| personalized_score(c, &context))
    }

    // ========================================================================
    // Catalog browsing
    // ========================================================================

    /// Active restaurants passing `pipeline`, in catalog order, scored by rating.
    #[instrument(skip(self, pipeline, context), fields(filters = pipeline.len()))]
    pub fn browse(&self, pipeline: &FilterPipeline, context: &RecommendationContext) -> Vec<Recommendation> {
        let snapshot = self.snapshot();
        let catalog = &snapshot.catalog;
        let candidates = pipeline.apply(candidates_for(catalog, self.distance.as_ref(), context), context);
        in_catalog_order(catalog, candidates)
    }

    /// Case-insensitive match on name, description, cuisine or suburb,
    /// optionally narrowed to one cuisine and a distance bound.
    ///
    /// Restaurants with unknown distance pass the distance bound.
    #[instrument(skip(self))]
    pub fn search(
        &self,
        query: &str,
        cuisine: Option<Cuisine>,
        max_distance_km: Option<f64>,
        location: Option<Coordinates>,
    ) -> Vec<Recommendation> {
        let needle = query.trim().to_lowercase();
        let snapshot = self.snapshot();
        let catalog = &snapshot.catalog;

        let mut pipeline = FilterPipeline::new();
        if let Some(cuisine) = cuisine {
            pipeline = pipeline.add_filter(CuisineFilter::new([cuisine]));
        }
        if let Some(max_km) = max_distance_km {
            pipeline = pipeline.add_filter(DistanceFilter::new(max_km));
        }

        let matches: Vec<Candidate<'_>> = build_candidates(catalog, self.distance.as_ref(), location)
            .into_iter()
            .filter(|c| matches_query(c.restaurant, &needle))
            .collect();
        let matches = pipeline.apply(matches, &RecommendationContext::new().with_location(location));
        debug!("Search '{}' matched {} restaurants", query, matches.len());
        in_catalog_order(catalog, matches)
    }

    /// Best-rated active restaurants of one cuisine, read from the cuisine index.
    #[instrument(skip(self))]
    pub fn top_rated_by_cuisine(
        &self,
        cuisine: Cuisine,
        limit: usize,
        location: Option<Coordinates>,
    ) -> Vec<Recommendation> {
        let snapshot = self.snapshot();
        let catalog = &snapshot.catalog;
        let candidates: Vec<Candidate<'_>> = catalog
            .restaurants_by_cuisine(cuisine)
            .iter()
            .filter_map(|&id| catalog.get_active_restaurant(id))
            .map(|restaurant| {
                Candidate::new(
                    restaurant,
                    distance_to(self.distance.as_ref(), location, restaurant),
                    catalog.has_active_promotion(restaurant.id),
                )
            })
            .collect();
        let ranked = score_and_rank(candidates, limit, rating_score);
        recommendations(catalog, ranked, Objective::Cuisine)
    }

    /// Active restaurants priced `$`, plus `$$` when the ceiling allows it.
    #[instrument(skip(self))]
    pub fn cheap_eats(&self, ceiling: PriceRange) -> Vec<Recommendation> {
        let pipeline = FilterPipeline::new().add_filter(PriceRangeFilter::new(budget_price_ranges(ceiling)));
        self.browse(&pipeline, &RecommendationContext::new())
    }

    /// Active restaurants running at least one active promotion.
    #[instrument(skip(self))]
    pub fn with_promotions(&self) -> Vec<Recommendation> {
        let pipeline = FilterPipeline::new().add_filter(PromotionFilter);
        self.browse(&pipeline, &RecommendationContext::new())
    }

    /// One active restaurant with its promotions.
    #[instrument(skip(self))]
    pub fn restaurant(&self, id: RestaurantId, location: Option<Coordinates>) -> Option<Recommendation> {
        let snapshot = self.snapshot();
        let catalog = &snapshot.catalog;
        let restaurant = catalog.get_active_restaurant(id)?;
        let candidate = Candidate::new(
            restaurant,
            distance_to(self.distance.as_ref(), location, restaurant),
            catalog.has_active_promotion(id),
        );
        let score = rating_score(&candidate);
        Some(to_recommendation(catalog, ScoredCandidate::new(candidate, score), Objective::Browse))
    }
}

fn matches_query(restaurant: &Restaurant, needle: &str) -> bool {
    [
        restaurant.name.as_str(),
        restaurant.description.as_str(),
        restaurant.cuisine_type.label(),
        restaurant.suburb.as_str(),
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(needle))
}

fn in_catalog_order(catalog: &Catalog, candidates: Vec<Candidate<'_>>) -> Vec<Recommendation> {
    candidates
        .into_iter()
        .map(|c| {
            let score = rating_score(&c);
            to_recommendation(catalog, ScoredCandidate::new(c, score), Objective::Browse)
        })
        .collect()
}

fn recommendations(catalog: &Catalog, ranked: Vec<ScoredCandidate<'_>>, objective: Objective) -> Vec<Recommendation> {
    debug!("{}: {} recommendations", objective, ranked.len());
    ranked
        .into_iter()
        .map(|scored| to_recommendation(catalog, scored, objective))
        .collect()
}

fn to_recommendation(catalog: &Catalog, scored: ScoredCandidate<'_>, objective: Objective) -> Recommendation {
    let restaurant = scored.candidate.restaurant;
    Recommendation {
        restaurant: restaurant.clone(),
        score: scored.score,
        distance_km: scored.candidate.distance_km,
        promotions: catalog.active_promotions(restaurant.id).into_iter().cloned().collect(),
        objective,
    }
}
