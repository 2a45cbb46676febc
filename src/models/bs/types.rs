use std::fmt;
use std::str::FromStr;

use crate::error::{PricingError, Result};

/// Option side priced by the model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OptionType {
    Call,
    Put,
}

impl OptionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OptionType::Call => "call",
            OptionType::Put => "put",
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OptionType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_lowercase().as_str() {
            "call" | "c" => Ok(OptionType::Call),
            "put" | "p" => Ok(OptionType::Put),
            other => Err(anyhow::anyhow!("Invalid option type: {}", other)),
        }
    }
}

/// Sign convention used for the put delta.
///
/// `Textbook` is the closed-form derivative `Φ(d1) − 1`, always in `[-1, 0]`.
/// `Complement` is `1 − Φ(d1)`, the magnitude of that delta, kept for
/// reproducing tools that report put delta as a positive number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PutDeltaConvention {
    #[default]
    Textbook,
    Complement,
}

/// Market and contract inputs for a single European option.
///
/// A plain value: no identity beyond its fields. Use [`OptionParameters::new`]
/// to build a validated instance; the struct literal form is unchecked.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptionParameters {
    /// Time to maturity in years (> 0)
    pub time_to_maturity: f64,
    /// Strike price (> 0)
    pub strike: f64,
    /// Current price of the underlying (> 0)
    pub current_price: f64,
    /// Annualized volatility as a decimal, e.g. 0.2 for 20% (> 0)
    pub volatility: f64,
    /// Continuously-compounded risk-free rate (any finite value)
    pub risk_free_rate: f64,
}

fn require_positive(name: &'static str, value: f64) -> Result<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(PricingError::InvalidParameter {
            name,
            value,
            requirement: "> 0 and finite",
        })
    }
}

impl OptionParameters {
    /// Build a validated parameter set.
    pub fn new(
        time_to_maturity: f64,
        strike: f64,
        current_price: f64,
        volatility: f64,
        risk_free_rate: f64,
    ) -> Result<Self> {
        let params = Self {
            time_to_maturity,
            strike,
            current_price,
            volatility,
            risk_free_rate,
        };
        params.validate()?;
        Ok(params)
    }

    /// Check every field against the model's domain.
    pub fn validate(&self) -> Result<()> {
        require_positive("time_to_maturity", self.time_to_maturity)?;
        require_positive("strike", self.strike)?;
        require_positive("current_price", self.current_price)?;
        require_positive("volatility", self.volatility)?;
        if !self.risk_free_rate.is_finite() {
            return Err(PricingError::InvalidParameter {
                name: "risk_free_rate",
                value: self.risk_free_rate,
                requirement: "finite",
            });
        }
        Ok(())
    }

    /// Copy of `self` moved to a single grid point.
    pub fn at_point(&self, current_price: f64, volatility: f64, strike: f64) -> Self {
        Self {
            current_price,
            volatility,
            strike,
            ..*self
        }
    }

    /// Discount factor `e^(−rT)`
    pub fn discount_factor(&self) -> f64 {
        (-self.risk_free_rate * self.time_to_maturity).exp()
    }
}

/// Prices and Greeks derived from one [`OptionParameters`] value.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PricingResult {
    pub call_price: f64,
    pub put_price: f64,
    pub call_delta: f64,
    pub put_delta: f64,
    pub call_gamma: f64,
    pub put_gamma: f64,
}

impl PricingResult {
    /// Price of the requested side
    pub fn price_of(&self, option_type: OptionType) -> f64 {
        match option_type {
            OptionType::Call => self.call_price,
            OptionType::Put => self.put_price,
        }
    }

    /// Delta of the requested side
    pub fn delta_of(&self, option_type: OptionType) -> f64 {
        match option_type {
            OptionType::Call => self.call_delta,
            OptionType::Put => self.put_delta,
        }
    }

    /// First non-finite field, if any, as `(name, value)`.
    pub fn first_non_finite(&self) -> Option<(&'static str, f64)> {
        [
            ("call_price", self.call_price),
            ("put_price", self.put_price),
            ("call_delta", self.call_delta),
            ("put_delta", self.put_delta),
            ("call_gamma", self.call_gamma),
            ("put_gamma", self.put_gamma),
        ]
        .into_iter()
        .find(|(_, v)| !v.is_finite())
    }

    pub fn is_finite(&self) -> bool {
        self.first_non_finite().is_none()
    }
}
