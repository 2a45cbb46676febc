//! Spot × volatility sweeps over a pricing model.
//!
//! Each cell is priced independently from a copy of the base parameters moved
//! to `(spot, vol)`, so the sweep has no shared state between cells. Any
//! failing cell aborts the whole sweep and no partial matrix is returned.

use tracing::{debug, warn};

use super::config::GridConfig;
use super::types::{HeatmapRequest, HeatmapSet, MatrixKind, PriceMatrix, Range};
use crate::error::{PricingError, Result};
use crate::models::bs::{BlackScholes, OptionParameters, OptionType};
use crate::models::traits::PricingModel;

/// Evaluates a [`PricingModel`] over the Cartesian product of two ranges.
#[derive(Debug, Clone)]
pub struct GridEvaluator<M: PricingModel = BlackScholes> {
    model: M,
    parallel: bool,
}

impl GridEvaluator<BlackScholes> {
    /// Sequential evaluator over the textbook Black-Scholes engine.
    pub fn black_scholes() -> Self {
        Self::new(BlackScholes::new())
    }

    /// Black-Scholes evaluator wired from a [`GridConfig`].
    pub fn from_config(config: &GridConfig) -> Self {
        if config.parallel && cfg!(not(feature = "parallel")) {
            warn!("`parallel` feature disabled; evaluating the grid sequentially");
        }
        Self {
            model: BlackScholes::with_put_delta(config.put_delta),
            parallel: config.parallel,
        }
    }
}

impl Default for GridEvaluator<BlackScholes> {
    fn default() -> Self {
        Self::black_scholes()
    }
}

impl<M: PricingModel> GridEvaluator<M> {
    pub fn new(model: M) -> Self {
        Self {
            model,
            parallel: false,
        }
    }

    /// Evaluate cells on the rayon pool when the `parallel` feature is built.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn is_parallel(&self) -> bool {
        self.parallel
    }

    /// Price every `(vol, spot)` pair at a fixed `strike`.
    ///
    /// Cell `[i][j]` holds the `option_type` price for `vol_range[i]` and
    /// `spot_range[j]`, all other inputs taken from `base`.
    pub fn sweep(
        &self,
        base: &OptionParameters,
        spot_range: &Range,
        vol_range: &Range,
        strike: f64,
        option_type: OptionType,
    ) -> Result<PriceMatrix> {
        debug!(
            model = self.model.model_name(),
            rows = vol_range.len(),
            cols = spot_range.len(),
            %option_type,
            strike,
            "price sweep"
        );
        let values = self.evaluate_cells(spot_range, vol_range, |spot, vol, _| {
            let result = self.model.evaluate(&base.at_point(spot, vol, strike))?;
            Ok(result.price_of(option_type))
        })?;

        Ok(PriceMatrix::from_row_major(
            option_type,
            MatrixKind::Price,
            vol_range.values().to_vec(),
            spot_range.values().to_vec(),
            values,
        ))
    }

    /// Price every `(vol, spot)` pair at `base.strike` and subtract the row's
    /// reference price.
    ///
    /// The reference varies only along the volatility axis: row `i` uses
    /// `reference_range[i]` for every spot.
    pub fn sweep_difference(
        &self,
        base: &OptionParameters,
        spot_range: &Range,
        vol_range: &Range,
        reference_range: &Range,
        option_type: OptionType,
    ) -> Result<PriceMatrix> {
        if reference_range.len() != vol_range.len() {
            return Err(PricingError::RangeLengthMismatch {
                expected: vol_range.len(),
                actual: reference_range.len(),
            });
        }

        debug!(
            model = self.model.model_name(),
            rows = vol_range.len(),
            cols = spot_range.len(),
            %option_type,
            "difference sweep"
        );
        let values = self.evaluate_cells(spot_range, vol_range, |spot, vol, row| {
            let result = self
                .model
                .evaluate(&base.at_point(spot, vol, base.strike))?;
            let difference = result.price_of(option_type) - reference_range[row];
            if difference.is_finite() {
                Ok(difference)
            } else {
                Err(PricingError::NumericDomainError {
                    quantity: "difference",
                    value: difference,
                })
            }
        })?;

        Ok(PriceMatrix::from_row_major(
            option_type,
            MatrixKind::Difference,
            vol_range.values().to_vec(),
            spot_range.values().to_vec(),
            values,
        ))
    }

    /// Base pricing plus the call/put price maps and any requested
    /// difference maps.
    pub fn heatmaps(&self, request: &HeatmapRequest) -> Result<HeatmapSet> {
        let pricing = self.model.evaluate(&request.base)?;

        let call_prices = self.sweep(
            &request.base,
            &request.spot_range,
            &request.vol_range,
            request.strike,
            OptionType::Call,
        )?;
        let put_prices = self.sweep(
            &request.base,
            &request.spot_range,
            &request.vol_range,
            request.strike,
            OptionType::Put,
        )?;

        let call_differences = request
            .call_reference
            .as_ref()
            .map(|reference| {
                self.sweep_difference(
                    &request.base,
                    &request.spot_range,
                    &request.vol_range,
                    reference,
                    OptionType::Call,
                )
            })
            .transpose()?;
        let put_differences = request
            .put_reference
            .as_ref()
            .map(|reference| {
                self.sweep_difference(
                    &request.base,
                    &request.spot_range,
                    &request.vol_range,
                    reference,
                    OptionType::Put,
                )
            })
            .transpose()?;

        Ok(HeatmapSet {
            pricing,
            call_prices,
            put_prices,
            call_differences,
            put_differences,
        })
    }

    /// Row-major cell values; `cell(spot, vol, row)` prices one cell.
    fn evaluate_cells<F>(&self, spot_range: &Range, vol_range: &Range, cell: F) -> Result<Vec<f64>>
    where
        F: Fn(f64, f64, usize) -> Result<f64> + Send + Sync,
    {
        let cols = spot_range.len();
        let total = vol_range.len() * cols;
        let at = |idx: usize| {
            let (row, col) = (idx / cols, idx % cols);
            cell(spot_range[col], vol_range[row], row)
        };

        collect_cells(self.parallel, total, at)
    }
}

#[cfg(feature = "parallel")]
fn collect_cells<F>(parallel: bool, total: usize, at: F) -> Result<Vec<f64>>
where
    F: Fn(usize) -> Result<f64> + Send + Sync,
{
    use rayon::prelude::*;

    if parallel {
        (0..total).into_par_iter().map(at).collect()
    } else {
        (0..total).map(at).collect()
    }
}

#[cfg(not(feature = "parallel"))]
fn collect_cells<F>(_parallel: bool, total: usize, at: F) -> Result<Vec<f64>>
where
    F: Fn(usize) -> Result<f64>,
{
    (0..total).map(at).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::bs::PricingResult;

    fn base() -> OptionParameters {
        OptionParameters::new(1.0, 100.0, 100.0, 0.2, 0.05).unwrap()
    }

    /// Prices every option at `f64::MAX` without any checks.
    struct SaturatedModel;

    impl PricingModel for SaturatedModel {
        fn model_name(&self) -> &str {
            "saturated"
        }

        fn evaluate(&self, _params: &OptionParameters) -> Result<PricingResult> {
            Ok(PricingResult {
                call_price: f64::MAX,
                put_price: f64::MAX,
                call_delta: 1.0,
                put_delta: 0.0,
                call_gamma: 0.0,
                put_gamma: 0.0,
            })
        }
    }

    #[test]
    fn test_sweep_row_major_layout() {
        let evaluator = GridEvaluator::black_scholes();
        let spots = Range::linspace(90.0, 110.0, 3).unwrap();
        let vols = Range::linspace(0.1, 0.3, 2).unwrap();
        let matrix = evaluator
            .sweep(&base(), &spots, &vols, 100.0, OptionType::Call)
            .unwrap();

        assert_eq!(matrix.shape(), (2, 3));
        assert_eq!(matrix.volatilities(), vols.values());
        assert_eq!(matrix.spots(), spots.values());
        // Call prices rise with spot along a row and with vol down a column.
        assert!(matrix[(0, 0)] < matrix[(0, 2)]);
        assert!(matrix[(0, 1)] < matrix[(1, 1)]);
    }

    #[test]
    fn test_sweep_difference_checks_length_first() {
        let evaluator = GridEvaluator::black_scholes();
        let spots = Range::linspace(90.0, 110.0, 3).unwrap();
        let vols = Range::linspace(0.1, 0.3, 4).unwrap();
        let reference = Range::linspace(8.0, 12.0, 3).unwrap();
        let err = evaluator
            .sweep_difference(&base(), &spots, &vols, &reference, OptionType::Put)
            .unwrap_err();
        assert_eq!(
            err,
            PricingError::RangeLengthMismatch {
                expected: 4,
                actual: 3
            }
        );
    }

    #[test]
    fn test_invalid_cell_aborts_sweep() {
        let evaluator = GridEvaluator::black_scholes();
        let spots = Range::linspace(0.0, 100.0, 3).unwrap();
        let vols = Range::linspace(0.1, 0.3, 3).unwrap();
        let err = evaluator
            .sweep(&base(), &spots, &vols, 100.0, OptionType::Call)
            .unwrap_err();
        assert!(matches!(
            err,
            PricingError::InvalidParameter {
                name: "current_price",
                ..
            }
        ));
    }

    #[test]
    fn test_non_finite_difference_aborts_sweep() {
        let evaluator = GridEvaluator::new(SaturatedModel);
        let spots = Range::linspace(90.0, 110.0, 2).unwrap();
        let vols = Range::linspace(0.1, 0.3, 2).unwrap();
        let reference = Range::linspace(-f64::MAX, -f64::MAX, 2).unwrap();
        let err = evaluator
            .sweep_difference(&base(), &spots, &vols, &reference, OptionType::Call)
            .unwrap_err();
        assert!(matches!(
            err,
            PricingError::NumericDomainError {
                quantity: "difference",
                ..
            }
        ));
    }
}
