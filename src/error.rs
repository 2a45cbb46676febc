//! Error taxonomy shared by the pricing engine and the grid evaluator.

use thiserror::Error;

/// Errors raised by pricing and grid evaluation.
///
/// Every variant names the precondition that failed so callers can tell an
/// invalid input apart from a valid input that produced a degenerate result.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PricingError {
    /// A market or contract parameter is outside the model's domain.
    #[error("invalid parameter: {name} must be {requirement}, got {value}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        requirement: &'static str,
    },

    /// A per-row reference sequence does not line up with the volatility axis.
    #[error("reference range has {actual} values but the volatility range has {expected}")]
    RangeLengthMismatch { expected: usize, actual: usize },

    /// Valid inputs produced a NaN or infinite intermediate/output value.
    #[error("numeric domain error: {quantity} evaluated to {value}")]
    NumericDomainError { quantity: &'static str, value: f64 },

    /// Range bounds are not finite, reversed, or the count is zero.
    #[error("invalid range [{min}, {max}] with {count} points: need finite min <= max and count >= 1")]
    InvalidRange { min: f64, max: f64, count: usize },
}

/// Crate-wide result alias for the typed core errors.
pub type Result<T, E = PricingError> = std::result::Result<T, E>;
