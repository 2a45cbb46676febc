pub mod bs;

/// Common traits used by all pricing models
pub mod traits {
    use crate::error::Result;
    use crate::models::bs::{OptionParameters, PricingResult};

    /// Pricing model trait for closed-form option valuation.
    ///
    /// Implementations must be pure: the same parameters always produce the
    /// same result, so grid cells can be evaluated in any order or in parallel.
    pub trait PricingModel: Send + Sync {
        /// Returns the name of the model (e.g., "black_scholes")
        fn model_name(&self) -> &str;

        /// Validate `params`, price them and reject non-finite outputs.
        fn evaluate(&self, params: &OptionParameters) -> Result<PricingResult>;
    }
}

/// Standard normal helpers shared by the closed-form models
pub mod utils {
    /// 1 / sqrt(2π)
    const INV_SQRT_2PI: f64 = 0.398_942_280_401_432_7;

    /// Standard normal cumulative distribution function.
    ///
    /// Uses the complementary error function so that the lower tail keeps full
    /// relative precision instead of cancelling against 1.
    pub fn norm_cdf(x: f64) -> f64 {
        0.5 * libm::erfc(-x / std::f64::consts::SQRT_2)
    }

    /// Standard normal probability density function.
    pub fn norm_pdf(x: f64) -> f64 {
        INV_SQRT_2PI * (-0.5 * x * x).exp()
    }

}
