//! An immutable catalog together with its similarity matrix.

use std::time::Instant;

use catalog::Catalog;
use similarity::{SimilarityEngine, SimilarityMatrix};
use tracing::info;

/// What every query reads: a catalog and the matrix built from it.
///
/// Never mutated after construction. A reload builds a new snapshot and
/// swaps it in whole.
#[derive(Debug)]
pub struct CatalogSnapshot {
    pub catalog: Catalog,
    pub similarity: SimilarityMatrix,
}

impl CatalogSnapshot {
    /// Build the similarity matrix for `catalog`.
    pub fn build(catalog: Catalog, engine: &SimilarityEngine) -> Self {
        let start = Instant::now();
        let similarity = engine.build(&catalog);
        let (total, active, promotions) = catalog.counts();
        info!(
            "Snapshot built: {} restaurants ({} active), {} promotions in {:.2?}",
            total,
            active,
            promotions,
            start.elapsed()
        );
        Self { catalog, similarity }
    }

    pub fn empty() -> Self {
        Self {
            catalog: Catalog::new(),
            similarity: SimilarityMatrix::empty(),
        }
    }
}
