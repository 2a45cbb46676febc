// Closed-form Black-Scholes pricing for European calls and puts, with first
// order delta and gamma. `price` is the raw formula; `BlackScholes` wraps it
// with domain validation and non-finite output checks for use in sweeps.

mod types;

pub use types::{OptionParameters, OptionType, PricingResult, PutDeltaConvention};

use crate::error::{PricingError, Result};
use crate::models::traits::PricingModel;
use crate::models::utils::{norm_cdf, norm_pdf};

/// Price a European call and put and their Greeks under Black-Scholes.
///
/// No validation is performed: out-of-domain inputs (non-positive strike,
/// volatility or maturity) yield NaN or infinite fields rather than an error.
/// Put delta uses the textbook convention `Φ(d1) − 1`.
pub fn price(params: &OptionParameters) -> PricingResult {
    price_with_convention(params, PutDeltaConvention::Textbook)
}

/// Same as [`price`], with an explicit put-delta sign convention.
#[allow(non_snake_case)]
pub fn price_with_convention(
    params: &OptionParameters,
    put_delta: PutDeltaConvention,
) -> PricingResult {
    let S = params.current_price;
    let K = params.strike;
    let T = params.time_to_maturity;
    let r = params.risk_free_rate;
    let sigma = params.volatility;

    let sigma_sqrt_t = sigma * T.sqrt();
    let d1 = ((S / K).ln() + (r + 0.5 * sigma.powi(2)) * T) / sigma_sqrt_t;
    let d2 = d1 - sigma_sqrt_t;
    let discounted_strike = K * params.discount_factor();

    let nd1 = norm_cdf(d1);
    let call_price = S * nd1 - discounted_strike * norm_cdf(d2);
    let put_price = discounted_strike * norm_cdf(-d2) - S * norm_cdf(-d1);

    let gamma = norm_pdf(d1) / (S * sigma_sqrt_t);

    PricingResult {
        call_price,
        put_price,
        call_delta: nd1,
        put_delta: match put_delta {
            PutDeltaConvention::Textbook => nd1 - 1.0,
            PutDeltaConvention::Complement => 1.0 - nd1,
        },
        call_gamma: gamma,
        put_gamma: gamma,
    }
}

/// Checked Black-Scholes engine.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BlackScholes {
    put_delta: PutDeltaConvention,
}

impl BlackScholes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_put_delta(put_delta: PutDeltaConvention) -> Self {
        Self { put_delta }
    }

    pub fn put_delta_convention(&self) -> PutDeltaConvention {
        self.put_delta
    }
}

impl PricingModel for BlackScholes {
    fn model_name(&self) -> &str {
        "black_scholes"
    }

    fn evaluate(&self, params: &OptionParameters) -> Result<PricingResult> {
        params.validate()?;
        let result = price_with_convention(params, self.put_delta);
        match result.first_non_finite() {
            Some((quantity, value)) => Err(PricingError::NumericDomainError { quantity, value }),
            None => Ok(result),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn atm_params(r: f64) -> OptionParameters {
        OptionParameters::new(1.0, 100.0, 100.0, 0.2, r).unwrap()
    }

    #[test]
    fn test_reference_prices() {
        let result = price(&atm_params(0.05));
        assert!((result.call_price - 10.4506).abs() < 1e-3);
        assert!((result.put_price - 5.5735).abs() < 1e-3);
    }

    #[test]
    fn test_zero_rate_atm_symmetry() {
        let result = price(&atm_params(0.0));
        assert!((result.call_price - result.put_price).abs() < 1e-12);
        assert!((result.call_price - 7.9656).abs() < 1e-3);
    }

    #[test]
    fn test_put_call_parity_atm() {
        let params = atm_params(0.05);
        let result = price(&params);
        let forward_gap = params.current_price - params.strike * params.discount_factor();
        assert!((result.call_price - result.put_price - forward_gap).abs() < 1e-10);
    }

    #[test]
    fn test_put_delta_conventions() {
        let params = atm_params(0.05);
        let textbook = price_with_convention(&params, PutDeltaConvention::Textbook);
        let complement = price_with_convention(&params, PutDeltaConvention::Complement);

        assert!(textbook.put_delta < 0.0 && textbook.put_delta > -1.0);
        assert!((textbook.call_delta - textbook.put_delta - 1.0).abs() < 1e-15);
        assert!((complement.put_delta + textbook.put_delta).abs() < 1e-15);
        assert_eq!(textbook.call_price, complement.call_price);
    }

    #[test]
    fn test_gamma_matches_finite_difference_of_delta() {
        let params = OptionParameters::new(0.75, 95.0, 102.0, 0.3, 0.02).unwrap();
        let h = 1e-3;
        let bump = |spot: f64| price(&params.at_point(spot, params.volatility, params.strike));
        let up = bump(params.current_price + h);
        let down = bump(params.current_price - h);
        let fd_gamma = (up.call_delta - down.call_delta) / (2.0 * h);

        let result = price(&params);
        assert!(
            (result.call_gamma - fd_gamma).abs() < 1e-6,
            "gamma {} vs finite difference {}",
            result.call_gamma,
            fd_gamma
        );
        assert_eq!(result.call_gamma, result.put_gamma);
    }

    #[test]
    fn test_unchecked_price_propagates_nan() {
        let params = OptionParameters {
            time_to_maturity: 1.0,
            strike: -100.0,
            current_price: 100.0,
            volatility: 0.2,
            risk_free_rate: 0.05,
        };
        assert!(!price(&params).is_finite());
    }

    #[test]
    fn test_checked_engine_rejects_invalid_inputs() {
        let engine = BlackScholes::new();
        let params = OptionParameters {
            volatility: 0.0,
            ..atm_params(0.05)
        };
        match engine.evaluate(&params) {
            Err(PricingError::InvalidParameter { name, .. }) => assert_eq!(name, "volatility"),
            other => panic!("expected InvalidParameter, got {:?}", other),
        }
    }

    #[test]
    fn test_checked_engine_flags_degenerate_result() {
        // Valid inputs whose σ·√T underflows to zero at the money.
        let params = OptionParameters::new(1e-300, 100.0, 100.0, 1e-300, 0.0).unwrap();
        match BlackScholes::new().evaluate(&params) {
            Err(PricingError::NumericDomainError { .. }) => {}
            other => panic!("expected NumericDomainError, got {:?}", other),
        }
    }
}
