//! Column standardization for numeric features.
//!
//! Each column is centred on its mean and divided by its population
//! standard deviation, so price tier, rating and the 0/1 amenity flags
//! contribute on a comparable scale. A column with no variance carries
//! no information and is mapped to exactly zero.

/// Columns whose standard deviation is below this are treated as constant.
const MIN_STD: f64 = 1e-12;

/// Standardizes fixed-width rows column by column.
#[derive(Debug, Clone, Default)]
pub struct StandardScaler {
    mean: Vec<f64>,
    std: Vec<f64>,
}

impl StandardScaler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mean of each column (empty before fitting)
    pub fn mean(&self) -> &[f64] {
        &self.mean
    }

    /// Population standard deviation of each column (empty before fitting)
    pub fn std(&self) -> &[f64] {
        &self.std
    }

    /// Learn column statistics and return the standardized rows.
    pub fn fit_transform<const N: usize>(&mut self, rows: &[[f64; N]]) -> Vec<[f64; N]> {
        self.fit(rows);
        rows.iter().map(|row| self.transform(row)).collect()
    }

    /// Learn column means and standard deviations.
    pub fn fit<const N: usize>(&mut self, rows: &[[f64; N]]) {
        if rows.is_empty() {
            self.mean = vec![0.0; N];
            self.std = vec![0.0; N];
            return;
        }

        let n = rows.len() as f64;
        let mut mean = vec![0.0; N];
        for row in rows {
            for (m, x) in mean.iter_mut().zip(row) {
                *m += x;
            }
        }
        for m in &mut mean {
            *m /= n;
        }

        let mut var = vec![0.0; N];
        for row in rows {
            for ((v, x), m) in var.iter_mut().zip(row).zip(&mean) {
                *v += (x - m).powi(2);
            }
        }

        self.std = var.into_iter().map(|v| (v / n).sqrt()).collect();
        self.mean = mean;
    }

    /// Standardize one row with the fitted statistics.
    pub fn transform<const N: usize>(&self, row: &[f64; N]) -> [f64; N] {
        let mut out = [0.0; N];
        for (j, slot) in out.iter_mut().enumerate() {
            let std = self.std.get(j).copied().unwrap_or(0.0);
            if std >= MIN_STD {
                *slot = (row[j] - self.mean[j]) / std;
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_mean_unit_variance() {
        let rows = [[1.0, 10.0], [2.0, 20.0], [3.0, 30.0], [4.0, 40.0]];
        let mut scaler = StandardScaler::new();
        let scaled = scaler.fit_transform(&rows);

        for j in 0..2 {
            let mean: f64 = scaled.iter().map(|r| r[j]).sum::<f64>() / 4.0;
            let var: f64 = scaled.iter().map(|r| (r[j] - mean).powi(2)).sum::<f64>() / 4.0;
            assert!(mean.abs() < 1e-12);
            assert!((var - 1.0).abs() < 1e-12);
        }
        assert_eq!(scaler.mean(), &[2.5, 25.0]);
    }

    #[test]
    fn test_constant_column_is_zero() {
        let rows = [[0.1, 1.0], [0.1, 0.0], [0.1, 1.0]];
        let scaled = StandardScaler::new().fit_transform(&rows);
        assert!(scaled.iter().all(|r| r[0] == 0.0));
        assert!(scaled[0][1] > 0.0 && scaled[1][1] < 0.0);
    }

    #[test]
    fn test_empty_input() {
        let rows: [[f64; 3]; 0] = [];
        let scaled = StandardScaler::new().fit_transform(&rows);
        assert!(scaled.is_empty());
    }
}
