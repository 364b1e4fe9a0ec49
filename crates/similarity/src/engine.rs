//! Builds the blended similarity matrix for a catalog.
//!
//! ## Algorithm
//! 1. Extract a text document and a numeric vector per active restaurant
//! 2. Text matrix T: TF-IDF (English stop words) + pairwise cosine
//! 3. Numeric matrix N: standardized columns + pairwise cosine
//! 4. S = 0.6 T + 0.4 N, with the diagonal pinned to 1.0
//!
//! The whole matrix is recomputed on every build. Rows are computed in
//! parallel; every entry is evaluated in the same operand order for (i, j)
//! and (j, i), so the result is exactly symmetric.

use crate::features::{FeatureExtractor, FeatureVector};
use crate::matrix::SimilarityMatrix;
use crate::scaler::StandardScaler;
use crate::tfidf::{sparse_dot, TfidfVectorizer};
use catalog::{Catalog, Restaurant};
use rayon::prelude::*;
use std::time::Instant;
use tracing::{debug, info};

/// Weight of description/cuisine/suburb similarity in the blend.
pub const TEXT_WEIGHT: f64 = 0.6;

/// Weight of price/rating/amenity similarity in the blend.
pub const NUMERIC_WEIGHT: f64 = 0.4;

/// Builds [`SimilarityMatrix`] values from catalog snapshots.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimilarityEngine {
    extractor: FeatureExtractor,
}

impl SimilarityEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the matrix over the catalog's active restaurants, in catalog order.
    pub fn build(&self, catalog: &Catalog) -> SimilarityMatrix {
        let restaurants: Vec<&Restaurant> = catalog.active_restaurants().collect();
        self.build_for(&restaurants)
    }

    /// Build the matrix over an explicit list of restaurants.
    pub fn build_for(&self, restaurants: &[&Restaurant]) -> SimilarityMatrix {
        if restaurants.is_empty() {
            debug!("No restaurants; similarity matrix is empty");
            return SimilarityMatrix::empty();
        }

        let start = Instant::now();
        let features = self.extractor.extract_all(restaurants);

        let text = text_similarity(&features);
        let numeric = numeric_similarity(&features);

        let n = features.len();
        let values: Vec<f64> = (0..n * n)
            .into_par_iter()
            .map(|idx| {
                if idx / n == idx % n {
                    1.0
                } else {
                    TEXT_WEIGHT * text[idx] + NUMERIC_WEIGHT * numeric[idx]
                }
            })
            .collect();

        let ids = features.iter().map(|f| f.restaurant_id).collect();
        info!(
            "Built {}x{} similarity matrix in {:.2?}",
            n,
            n,
            start.elapsed()
        );
        SimilarityMatrix::from_rows(ids, values)
    }
}

/// Pairwise cosine similarity of TF-IDF vectors, row-major n × n.
///
/// Rows are unit length (or empty), so cosine is a dot product. The
/// diagonal is 1.0 even for a document with no surviving terms.
pub fn text_similarity(features: &[FeatureVector]) -> Vec<f64> {
    let documents: Vec<&str> = features.iter().map(|f| f.text.as_str()).collect();
    let mut vectorizer = TfidfVectorizer::english();
    let rows = vectorizer.fit_transform(&documents);
    debug!("TF-IDF vocabulary size: {}", vectorizer.vocabulary_size());

    pairwise(rows.len(), |i, j| sparse_dot(&rows[i], &rows[j]))
}

/// Pairwise cosine similarity of standardized numeric vectors, row-major n × n.
///
/// A zero vector (every column at its mean) has similarity 0 to the others.
pub fn numeric_similarity(features: &[FeatureVector]) -> Vec<f64> {
    let raw: Vec<_> = features.iter().map(|f| f.numeric).collect();
    let scaled = StandardScaler::new().fit_transform(&raw);
    let norms: Vec<f64> = scaled
        .iter()
        .map(|row| row.iter().map(|x| x * x).sum::<f64>().sqrt())
        .collect();

    pairwise(scaled.len(), |i, j| {
        let denom = norms[i] * norms[j];
        if denom > 0.0 {
            let dot: f64 = scaled[i].iter().zip(&scaled[j]).map(|(a, b)| a * b).sum();
            dot / denom
        } else {
            0.0
        }
    })
}

/// Evaluate `f` for every off-diagonal pair; the diagonal is 1.0.
fn pairwise<F>(n: usize, f: F) -> Vec<f64>
where
    F: Fn(usize, usize) -> f64 + Sync,
{
    (0..n)
        .into_par_iter()
        .flat_map_iter(|i| {
            let f = &f;
            (0..n).map(move |j| if i == j { 1.0 } else { f(i, j) })
        })
        .collect()
}
