//! # BS-Heatmap-Lib: Black-Scholes Pricing and Sensitivity Heatmaps
//!
//! `bs-heatmap-lib` prices European options in closed form under the Black-Scholes
//! model and sweeps the pricing formula across a spot × volatility grid, producing
//! matrices ready to be drawn as heatmaps.
//!
//! ## Core Features
//!
//! - **Closed-form pricing**: call and put prices with delta and gamma
//! - **Grid sweeps**: price matrices over spot × volatility, and gain/loss
//!   matrices relative to a per-volatility purchase price
//! - **Typed errors**: invalid inputs, mismatched ranges and degenerate numerics
//!   are reported as distinct [`PricingError`] variants
//! - **Rendering adapters**: SVG heatmaps, CSV export and text summaries
//!
//! ## Quick Start
//!
//! ```rust
//! use bs_heatmap_lib::{price, sweep, OptionParameters, OptionType, Range};
//!
//! let params = OptionParameters::new(1.0, 100.0, 100.0, 0.2, 0.05)?;
//! let result = price(&params);
//! assert!((result.call_price - 10.4506).abs() < 1e-3);
//!
//! let spots = Range::linspace(80.0, 120.0, 10)?;
//! let vols = Range::linspace(0.1, 0.3, 10)?;
//! let calls = sweep(&params, &spots, &vols, params.strike, OptionType::Call)?;
//! assert_eq!(calls.shape(), (10, 10));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Cargo Features
//!
//! - `serde` (default): serde derives and TOML loading for [`HeatmapConfig`]
//! - `parallel`: evaluate grid cells on the rayon thread pool

// ================================================================================================
// MODULES
// ================================================================================================

pub mod error;
pub mod grid;
pub mod models;
pub mod report;

// ================================================================================================
// PUBLIC RE-EXPORTS
// ================================================================================================

pub use error::{PricingError, Result};

// Pricing engine
pub use models::bs::{
    price, price_with_convention, BlackScholes, OptionParameters, OptionType, PricingResult,
    PutDeltaConvention,
};
pub use models::traits::PricingModel;
pub use models::utils::{norm_cdf, norm_pdf};

// Grid evaluation
pub use grid::{
    sweep, sweep_difference, Bounds, GridConfig, GridEvaluator, HeatmapConfig, HeatmapRequest,
    HeatmapSet, MatrixKind, PriceMatrix, Range, DEFAULT_GRID_COUNT,
};

// ================================================================================================
// DEFAULT CONFIGURATIONS
// ================================================================================================

/// Pre-configured grid settings for common use cases.
///
/// - [`standard()`]: 10 × 10, sequential
/// - [`coarse()`]: 5 × 5, sequential
/// - [`fine()`]: 25 × 25, parallel when the `parallel` feature is enabled
pub mod default_configs {
    use crate::grid::GridConfig;

    /// The grid used by the interactive heatmaps: 10 points per axis.
    ///
    /// # Example
    ///
    /// ```rust
    /// use bs_heatmap_lib::default_configs;
    ///
    /// let config = default_configs::standard();
    /// assert_eq!(config.count, 10);
    /// ```
    pub fn standard() -> GridConfig {
        GridConfig::standard()
    }

    /// Small grid for quick checks and unit tests.
    pub fn coarse() -> GridConfig {
        GridConfig::coarse()
    }

    /// Dense grid for smoother maps.
    ///
    /// Requests parallel evaluation; without the `parallel` feature the
    /// evaluator logs a warning and runs sequentially.
    pub fn fine() -> GridConfig {
        GridConfig::fine()
    }
}

/// Build the base pricing and all four heatmap matrices from a config.
///
/// Resolves the config's bounds into explicit ranges, then sweeps call and put
/// prices at the heatmap strike and call and put differences against the
/// configured purchase prices.
///
/// # Errors
///
/// * [`PricingError::InvalidParameter`] if the option or any grid point is out of domain
/// * [`PricingError::InvalidRange`] if a configured range is reversed or empty
/// * [`PricingError::NumericDomainError`] if a valid grid point prices to NaN/Inf
///
/// # Example
///
/// ```rust
/// use bs_heatmap_lib::{build_heatmaps, HeatmapConfig, OptionParameters};
///
/// let option = OptionParameters::new(1.0, 100.0, 100.0, 0.2, 0.05)?;
/// let set = build_heatmaps(&HeatmapConfig::for_option(option))?;
/// assert_eq!(set.matrices().len(), 4);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn build_heatmaps(config: &HeatmapConfig) -> Result<HeatmapSet> {
    let request = config.resolve()?;
    GridEvaluator::from_config(&config.grid).heatmaps(&request)
}
