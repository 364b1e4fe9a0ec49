//! Scoring, filtering and ranking of restaurant candidates.
//!
//! This crate provides:
//! - RecommendationContext: the per-request preferences
//! - Candidate: an active restaurant with its distance and promotion status
//! - scorer: the per-objective scores (personalized, trending, quick lunch)
//! - ranker: stable top-K and the student-friendly composite list
//! - Filter trait, concrete filters and the FilterPipeline that chains them
//!
//! ## Architecture
//! A request flows through these stages:
//! 1. Candidates are built from the catalog's active restaurants
//! 2. Filters remove candidates that do not fit the request
//! 3. An objective scores the survivors
//! 4. The ranker keeps the top K
//!
//! ## Example Usage
//! ```ignore
//! use ranking::{build_candidates, personalized_score, score_and_rank, RecommendationContext};
//!
//! let context = RecommendationContext::new()
//!     .with_cuisines([Cuisine::Thai])
//!     .with_location(Some(CITY_CENTRE));
//! let candidates = build_candidates(&catalog, &Haversine, context.user_location);
//! let top = score_and_rank(candidates, context.limit, |c| personalized_score(c, &context));
//! ```

pub mod candidate;
pub mod context;
pub mod filter_pipeline;
pub mod filters;
pub mod ranker;
pub mod scorer;
pub mod traits;

// Re-export main types
pub use candidate::{build_candidates, candidates_for, Candidate};
pub use context::{budget_price_ranges, RecommendationContext, DEFAULT_LIMIT, DEFAULT_MAX_DISTANCE_KM};
pub use filter_pipeline::FilterPipeline;
pub use ranker::{
    rank, score_and_rank, student_friendly, ScoredCandidate, QUICK_LUNCH_LIST_SIZE, STUDENT_LIST_SIZE,
    STUDENT_SOURCE_SIZE,
};
pub use scorer::{
    distance_credit, is_lunch_friendly, is_quick_lunch, is_student_friendly, personalized_score, rating_score,
    trending_score, Objective,
};
pub use traits::Filter;
