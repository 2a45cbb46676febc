use std::ops::Index;

use crate::error::{PricingError, Result};
use crate::models::bs::{OptionParameters, OptionType, PricingResult};

/// Number of points per axis when nothing else is configured.
pub const DEFAULT_GRID_COUNT: usize = 10;

/// Evenly spaced values from `min` to `max`, both ends included.
///
/// A single-point range holds just `min`. The last value is exactly `max`.
#[derive(Debug, Clone, PartialEq)]
pub struct Range {
    min: f64,
    max: f64,
    values: Vec<f64>,
}

impl Range {
    pub fn linspace(min: f64, max: f64, count: usize) -> Result<Self> {
        let width = max - min;
        if count == 0
            || !min.is_finite()
            || !max.is_finite()
            || min > max
            || !width.is_finite()
        {
            return Err(PricingError::InvalidRange { min, max, count });
        }

        let values = if count == 1 {
            vec![min]
        } else {
            let step = width / (count - 1) as f64;
            let mut values: Vec<f64> = (0..count).map(|i| min + step * i as f64).collect();
            values[count - 1] = max;
            values
        };

        Ok(Self { min, max, values })
    }

    /// Range with [`DEFAULT_GRID_COUNT`] points.
    pub fn with_default_count(min: f64, max: f64) -> Result<Self> {
        Self::linspace(min, max, DEFAULT_GRID_COUNT)
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false: a valid range holds at least one point.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().copied()
    }
}

impl Index<usize> for Range {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.values[index]
    }
}

/// What a matrix cell holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MatrixKind {
    /// Model price of the option
    Price,
    /// Model price minus the row's reference (purchase) price
    Difference,
}

/// Row-major grid of sweep results indexed `[volatility][spot]`.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceMatrix {
    option_type: OptionType,
    kind: MatrixKind,
    volatilities: Vec<f64>,
    spots: Vec<f64>,
    values: Vec<f64>,
}

impl PriceMatrix {
    /// Assemble a matrix from row-major `values`.
    ///
    /// Panics if `values.len()` is not `volatilities.len() * spots.len()`;
    /// the evaluator always builds it with matching shapes.
    pub(crate) fn from_row_major(
        option_type: OptionType,
        kind: MatrixKind,
        volatilities: Vec<f64>,
        spots: Vec<f64>,
        values: Vec<f64>,
    ) -> Self {
        assert_eq!(values.len(), volatilities.len() * spots.len());
        Self {
            option_type,
            kind,
            volatilities,
            spots,
            values,
        }
    }

    pub fn option_type(&self) -> OptionType {
        self.option_type
    }

    pub fn kind(&self) -> MatrixKind {
        self.kind
    }

    /// `(rows, cols)` = `(volatility count, spot count)`
    pub fn shape(&self) -> (usize, usize) {
        (self.volatilities.len(), self.spots.len())
    }

    /// Row axis values
    pub fn volatilities(&self) -> &[f64] {
        &self.volatilities
    }

    /// Column axis values
    pub fn spots(&self) -> &[f64] {
        &self.spots
    }

    pub fn get(&self, vol_index: usize, spot_index: usize) -> Option<f64> {
        if vol_index < self.volatilities.len() && spot_index < self.spots.len() {
            Some(self.values[vol_index * self.spots.len() + spot_index])
        } else {
            None
        }
    }

    pub fn row(&self, vol_index: usize) -> &[f64] {
        let cols = self.spots.len();
        &self.values[vol_index * cols..(vol_index + 1) * cols]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> + '_ {
        self.values.chunks(self.spots.len())
    }

    /// Flat row-major view
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn to_nested(&self) -> Vec<Vec<f64>> {
        self.rows().map(|row| row.to_vec()).collect()
    }

    pub fn min(&self) -> f64 {
        self.values.iter().copied().fold(f64::INFINITY, f64::min)
    }

    pub fn max(&self) -> f64 {
        self.values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }
}

impl Index<(usize, usize)> for PriceMatrix {
    type Output = f64;

    fn index(&self, (vol_index, spot_index): (usize, usize)) -> &f64 {
        let cols = self.spots.len();
        assert!(spot_index < cols, "spot index {spot_index} out of bounds");
        &self.values[vol_index * cols + spot_index]
    }
}

/// Everything needed to build the full set of heatmaps for one option.
#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapRequest {
    /// Base parameters; also priced on their own for the summary values
    pub base: OptionParameters,
    pub spot_range: Range,
    pub vol_range: Range,
    /// Strike held fixed across the price heatmaps
    pub strike: f64,
    /// Per-volatility purchase prices for the call difference map
    pub call_reference: Option<Range>,
    /// Per-volatility purchase prices for the put difference map
    pub put_reference: Option<Range>,
}

/// Base pricing plus every matrix a [`HeatmapRequest`] asked for.
#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapSet {
    pub pricing: PricingResult,
    pub call_prices: PriceMatrix,
    pub put_prices: PriceMatrix,
    pub call_differences: Option<PriceMatrix>,
    pub put_differences: Option<PriceMatrix>,
}

impl HeatmapSet {
    /// All present matrices in display order.
    pub fn matrices(&self) -> Vec<&PriceMatrix> {
        let mut out = vec![&self.call_prices, &self.put_prices];
        out.extend(self.call_differences.as_ref());
        out.extend(self.put_differences.as_ref());
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linspace_endpoints_and_spacing() {
        let range = Range::linspace(80.0, 120.0, 5).unwrap();
        assert_eq!(range.values(), &[80.0, 90.0, 100.0, 110.0, 120.0]);
        assert_eq!(range.len(), 5);
        assert_eq!(range[4], 120.0);
    }

    #[test]
    fn test_linspace_last_value_is_exact_max() {
        let range = Range::linspace(0.1, 0.3, 10).unwrap();
        assert_eq!(range[0], 0.1);
        assert_eq!(range[9], 0.3);
        for pair in range.values().windows(2) {
            assert!(pair[1] > pair[0]);
        }
    }

    #[test]
    fn test_linspace_single_point_and_degenerate() {
        assert_eq!(Range::linspace(7.0, 9.0, 1).unwrap().values(), &[7.0]);
        assert_eq!(Range::linspace(5.0, 5.0, 3).unwrap().values(), &[5.0, 5.0, 5.0]);
    }

    #[test]
    fn test_linspace_rejects_bad_bounds() {
        assert!(Range::linspace(2.0, 1.0, 10).is_err());
        assert!(Range::linspace(1.0, 2.0, 0).is_err());
        assert!(Range::linspace(f64::NAN, 2.0, 3).is_err());
        assert!(Range::linspace(1.0, f64::INFINITY, 3).is_err());
    }

    #[test]
    fn test_linspace_rejects_overflowing_width() {
        match Range::linspace(-1e308, 1e308, 3) {
            Err(PricingError::InvalidRange { count, .. }) => assert_eq!(count, 3),
            other => panic!("expected InvalidRange, got {:?}", other),
        }
        let wide = Range::linspace(-8e307, 8e307, 5).unwrap();
        assert!(wide.iter().all(f64::is_finite));
    }

    #[test]
    fn test_matrix_indexing() {
        let matrix = PriceMatrix::from_row_major(
            OptionType::Call,
            MatrixKind::Price,
            vec![0.1, 0.2],
            vec![90.0, 100.0, 110.0],
            vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
        );
        assert_eq!(matrix.shape(), (2, 3));
        assert_eq!(matrix[(1, 0)], 4.0);
        assert_eq!(matrix.get(0, 2), Some(3.0));
        assert_eq!(matrix.get(2, 0), None);
        assert_eq!(matrix.get(0, 3), None);
        assert_eq!(matrix.row(1), &[4.0, 5.0, 6.0]);
        assert_eq!(matrix.to_nested(), vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]);
        assert_eq!(matrix.min(), 1.0);
        assert_eq!(matrix.max(), 6.0);
    }
}
