//! Content-based similarity between restaurants.
//!
//! This crate provides:
//! - FeatureExtractor: text + numeric features per restaurant
//! - TfidfVectorizer and StandardScaler for the two feature kinds
//! - SimilarityEngine: blends text and numeric cosine similarity
//! - SimilarityMatrix: cached matrix answering "most similar to X"
//!
//! ## Example Usage
//! ```ignore
//! use similarity::SimilarityEngine;
//!
//! let matrix = SimilarityEngine::new().build(&catalog);
//! let neighbours = matrix.similar(restaurant_id, 5);
//! ```

pub mod engine;
pub mod features;
pub mod matrix;
pub mod scaler;
pub mod stopwords;
pub mod tfidf;

// Re-export main types
pub use engine::{SimilarityEngine, NUMERIC_WEIGHT, TEXT_WEIGHT};
pub use features::{FeatureExtractor, FeatureVector, NUMERIC_FEATURE_COUNT, NUMERIC_FEATURE_NAMES};
pub use matrix::SimilarityMatrix;
pub use scaler::StandardScaler;
pub use tfidf::TfidfVectorizer;
