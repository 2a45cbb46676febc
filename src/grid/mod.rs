//! Spot × volatility grid evaluation
//!
//! Sweeps a pricing model across two ranges and assembles the resulting
//! [`PriceMatrix`] values used for heatmaps, plus the configuration layer that
//! turns user-facing bounds into explicit ranges.

pub mod config;
pub mod evaluator;
pub mod types;

pub use config::*;
pub use evaluator::*;
pub use types::*;

use crate::error::Result;
use crate::models::bs::{OptionParameters, OptionType};

/// Sequential Black-Scholes [`GridEvaluator::sweep`].
pub fn sweep(
    base: &OptionParameters,
    spot_range: &Range,
    vol_range: &Range,
    strike: f64,
    option_type: OptionType,
) -> Result<PriceMatrix> {
    GridEvaluator::black_scholes().sweep(base, spot_range, vol_range, strike, option_type)
}

/// Sequential Black-Scholes [`GridEvaluator::sweep_difference`].
pub fn sweep_difference(
    base: &OptionParameters,
    spot_range: &Range,
    vol_range: &Range,
    reference_range: &Range,
    option_type: OptionType,
) -> Result<PriceMatrix> {
    GridEvaluator::black_scholes().sweep_difference(
        base,
        spot_range,
        vol_range,
        reference_range,
        option_type,
    )
}
