use tracing::warn;

use super::types::{HeatmapRequest, Range, DEFAULT_GRID_COUNT};
use crate::error::Result;
use crate::models::bs::{OptionParameters, PutDeltaConvention};

/// Lowest volatility bound the derived heatmap defaults will produce
const MIN_DERIVED_VOL: f64 = 0.01;
/// Highest volatility bound the derived heatmap defaults will produce
const MAX_DERIVED_VOL: f64 = 1.0;
/// Centre of the derived purchase-price ranges
const DEFAULT_PURCHASE_PRICE: f64 = 10.0;

/// Grid evaluation settings
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GridConfig {
    /// Points per axis (spot, volatility and purchase ranges)
    pub count: usize,
    /// Evaluate cells on the rayon pool (needs the `parallel` feature)
    pub parallel: bool,
    /// Sign convention for the reported put delta
    pub put_delta: PutDeltaConvention,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            count: DEFAULT_GRID_COUNT,
            parallel: false,
            put_delta: PutDeltaConvention::Textbook,
        }
    }
}

impl GridConfig {
    /// 10 × 10 sequential grid
    pub fn standard() -> Self {
        Self::default()
    }

    /// 5 × 5 grid for quick looks
    pub fn coarse() -> Self {
        Self {
            count: 5,
            ..Self::default()
        }
    }

    /// 25 × 25 grid evaluated in parallel
    pub fn fine() -> Self {
        Self {
            count: 25,
            parallel: true,
            ..Self::default()
        }
    }
}

/// Inclusive `[min, max]` bounds of a range
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn to_range(self, count: usize) -> Result<Range> {
        Range::linspace(self.min, self.max, count)
    }
}

/// Heatmap settings for one option, as loaded from a TOML file.
///
/// Bounds left unset are derived from the option parameters when the config
/// is resolved: spot 0.8×..1.2× the current price, volatility 0.5×..1.5× the
/// base volatility clamped to `[0.01, 1.0]`, purchase prices 8.0..12.0.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeatmapConfig {
    pub option: OptionParameters,

    #[cfg_attr(feature = "serde", serde(default))]
    pub grid: GridConfig,

    /// Strike for the price heatmaps; defaults to the option's strike
    #[cfg_attr(feature = "serde", serde(default))]
    pub heatmap_strike: Option<f64>,

    #[cfg_attr(feature = "serde", serde(default))]
    pub spot_range: Option<Bounds>,

    #[cfg_attr(feature = "serde", serde(default))]
    pub vol_range: Option<Bounds>,

    #[cfg_attr(feature = "serde", serde(default))]
    pub call_purchase: Option<Bounds>,

    #[cfg_attr(feature = "serde", serde(default))]
    pub put_purchase: Option<Bounds>,
}

impl HeatmapConfig {
    /// Config with every bound derived from `option`.
    pub fn for_option(option: OptionParameters) -> Self {
        Self {
            option,
            grid: GridConfig::default(),
            heatmap_strike: None,
            spot_range: None,
            vol_range: None,
            call_purchase: None,
            put_purchase: None,
        }
    }

    /// Parse a TOML document.
    #[cfg(feature = "serde")]
    pub fn from_toml_str(s: &str) -> anyhow::Result<Self> {
        toml::from_str(s).map_err(|e| anyhow::anyhow!("Failed to parse heatmap config: {}", e))
    }

    /// Read and parse a TOML file.
    #[cfg(feature = "serde")]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;
        Self::from_toml_str(&contents)
    }

    pub fn effective_spot_bounds(&self) -> Bounds {
        self.spot_range.unwrap_or_else(|| {
            let spot = self.option.current_price;
            Bounds::new(spot * 0.8, spot * 1.2)
        })
    }

    pub fn effective_vol_bounds(&self) -> Bounds {
        self.vol_range.unwrap_or_else(|| {
            let vol = self.option.volatility;
            let (raw_min, raw_max) = (vol * 0.5, vol * 1.5);
            let min = raw_min.clamp(MIN_DERIVED_VOL, MAX_DERIVED_VOL);
            let max = raw_max.clamp(MIN_DERIVED_VOL, MAX_DERIVED_VOL);
            if min != raw_min || max != raw_max {
                warn!(
                    raw_min,
                    raw_max, min, max, "derived volatility bounds clamped to [0.01, 1.0]"
                );
            }
            Bounds::new(min, max)
        })
    }

    pub fn effective_call_purchase(&self) -> Bounds {
        self.call_purchase.unwrap_or_else(default_purchase_bounds)
    }

    pub fn effective_put_purchase(&self) -> Bounds {
        self.put_purchase.unwrap_or_else(default_purchase_bounds)
    }

    /// Validate the option and build the explicit ranges for a sweep.
    pub fn resolve(&self) -> Result<HeatmapRequest> {
        self.option.validate()?;
        let count = self.grid.count;

        Ok(HeatmapRequest {
            base: self.option,
            spot_range: self.effective_spot_bounds().to_range(count)?,
            vol_range: self.effective_vol_bounds().to_range(count)?,
            strike: self.heatmap_strike.unwrap_or(self.option.strike),
            call_reference: Some(self.effective_call_purchase().to_range(count)?),
            put_reference: Some(self.effective_put_purchase().to_range(count)?),
        })
    }
}

fn default_purchase_bounds() -> Bounds {
    Bounds::new(DEFAULT_PURCHASE_PRICE * 0.8, DEFAULT_PURCHASE_PRICE * 1.2)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn option() -> OptionParameters {
        OptionParameters::new(1.0, 100.0, 100.0, 0.2, 0.05).unwrap()
    }

    #[test]
    fn test_derived_bounds() {
        let config = HeatmapConfig::for_option(option());
        let spot = config.effective_spot_bounds();
        assert!((spot.min - 80.0).abs() < 1e-12);
        assert!((spot.max - 120.0).abs() < 1e-12);

        let vol = config.effective_vol_bounds();
        assert!((vol.min - 0.1).abs() < 1e-12);
        assert!((vol.max - 0.3).abs() < 1e-12);

        let purchase = config.effective_call_purchase();
        assert!((purchase.min - 8.0).abs() < 1e-12);
        assert!((purchase.max - 12.0).abs() < 1e-12);
    }

    #[test]
    fn test_derived_vol_bounds_are_clamped() {
        let high_vol = OptionParameters {
            volatility: 0.9,
            ..option()
        };
        let vol = HeatmapConfig::for_option(high_vol).effective_vol_bounds();
        assert!((vol.min - 0.45).abs() < 1e-12);
        assert_eq!(vol.max, 1.0);

        let tiny_vol = OptionParameters {
            volatility: 0.01,
            ..option()
        };
        let vol = HeatmapConfig::for_option(tiny_vol).effective_vol_bounds();
        assert_eq!(vol.min, 0.01);
    }

    #[test]
    fn test_explicit_bounds_win() {
        let mut config = HeatmapConfig::for_option(option());
        config.spot_range = Some(Bounds::new(50.0, 150.0));
        config.grid = GridConfig::coarse();
        let request = config.resolve().unwrap();
        assert_eq!(request.spot_range.values(), &[50.0, 75.0, 100.0, 125.0, 150.0]);
        assert_eq!(request.vol_range.len(), 5);
        assert_eq!(request.strike, 100.0);
    }

    #[test]
    fn test_resolve_rejects_invalid_option() {
        let config = HeatmapConfig::for_option(OptionParameters {
            time_to_maturity: 0.0,
            ..option()
        });
        assert!(config.resolve().is_err());
    }
}
