//! The item-by-item similarity matrix and nearest-neighbour queries.

use catalog::RestaurantId;
use std::collections::HashMap;

/// Square, symmetric similarity matrix indexed by catalog position.
///
/// Row `i` belongs to `ids()[i]`. The diagonal is always 1.0.
#[derive(Debug, Clone, Default)]
pub struct SimilarityMatrix {
    ids: Vec<RestaurantId>,
    positions: HashMap<RestaurantId, usize>,
    /// Row-major n × n values
    values: Vec<f64>,
}

impl SimilarityMatrix {
    /// Matrix over no restaurants.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Wrap row-major values computed for `ids`, in that order.
    pub(crate) fn from_rows(ids: Vec<RestaurantId>, values: Vec<f64>) -> Self {
        debug_assert_eq!(values.len(), ids.len() * ids.len());
        let positions = ids.iter().enumerate().map(|(pos, &id)| (id, pos)).collect();
        Self {
            ids,
            positions,
            values,
        }
    }

    /// Number of restaurants covered
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Restaurant ids in row order
    pub fn ids(&self) -> &[RestaurantId] {
        &self.ids
    }

    /// Row index of a restaurant
    pub fn position(&self, id: RestaurantId) -> Option<usize> {
        self.positions.get(&id).copied()
    }

    /// Similarity by row/column index.
    ///
    /// # Panics
    /// Panics if either index is out of bounds.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i * self.len() + j]
    }

    /// Similarity between two restaurants, if both are covered
    pub fn score(&self, a: RestaurantId, b: RestaurantId) -> Option<f64> {
        Some(self.get(self.position(a)?, self.position(b)?))
    }

    /// Full similarity row of a restaurant
    pub fn row(&self, id: RestaurantId) -> Option<&[f64]> {
        let i = self.position(id)?;
        let n = self.len();
        Some(&self.values[i * n..(i + 1) * n])
    }

    /// The `k` restaurants most similar to `id`, with their scores.
    ///
    /// Never includes `id` itself. Ties keep catalog order. An unknown id
    /// yields an empty list.
    pub fn most_similar(&self, id: RestaurantId, k: usize) -> Vec<(RestaurantId, f64)> {
        let Some(row) = self.row(id) else {
            return Vec::new();
        };

        let mut neighbours: Vec<(RestaurantId, f64)> = self
            .ids
            .iter()
            .zip(row)
            .filter(|&(&other, _)| other != id)
            .map(|(&other, &score)| (other, score))
            .collect();

        // stable: equal scores stay in catalog order
        neighbours.sort_by(|a, b| b.1.total_cmp(&a.1));
        neighbours.truncate(k);
        neighbours
    }

    /// Ids of the `k` restaurants most similar to `id`.
    pub fn similar(&self, id: RestaurantId, k: usize) -> Vec<RestaurantId> {
        self.most_similar(id, k)
            .into_iter()
            .map(|(other, _)| other)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SimilarityMatrix {
        #[rustfmt::skip]
        let values = vec![
            1.0, 0.2, 0.8, 0.2,
            0.2, 1.0, 0.1, 0.5,
            0.8, 0.1, 1.0, 0.3,
            0.2, 0.5, 0.3, 1.0,
        ];
        SimilarityMatrix::from_rows(vec![10, 20, 30, 40], values)
    }

    #[test]
    fn test_similar_excludes_self() {
        let matrix = sample();
        assert_eq!(matrix.similar(10, 3), vec![30, 20, 40]);
        assert!(!matrix.similar(20, 10).contains(&20));
    }

    #[test]
    fn test_ties_keep_catalog_order() {
        let matrix = sample();
        // 20 and 40 both score 0.2 against 10
        assert_eq!(matrix.similar(10, 3)[1..], [20, 40]);
    }

    #[test]
    fn test_truncation_and_unknown_id() {
        let matrix = sample();
        assert_eq!(matrix.similar(30, 1), vec![10]);
        assert_eq!(matrix.similar(30, 0), Vec::<RestaurantId>::new());
        assert!(matrix.similar(99, 5).is_empty());
        assert_eq!(matrix.similar(40, 100).len(), 3);
    }

    #[test]
    fn test_lookup() {
        let matrix = sample();
        assert_eq!(matrix.score(20, 40), Some(0.5));
        assert_eq!(matrix.score(20, 99), None);
        assert_eq!(matrix.row(30).unwrap().len(), 4);
    }

    #[test]
    fn test_empty_matrix() {
        let matrix = SimilarityMatrix::empty();
        assert!(matrix.is_empty());
        assert!(matrix.similar(1, 5).is_empty());
    }
}
