//! Error taxonomy for the odds math core
//!
//! Every core function fails fast with one of these variants. A non-positive
//! Kelly fraction is not an error; it is a zero-stake recommendation.

use thiserror::Error;

/// Typed failure of an odds, probability or staking calculation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OddsError {
    /// Odds outside their domain (decimal <= 1, American in (-100, 100), ...)
    #[error("invalid odds: {0}")]
    InvalidOdds(String),

    /// Probability outside its accepted range
    #[error("invalid probability: {0}")]
    InvalidProbability(String),

    /// Closed-form solution has no real or defined result for this input
    #[error("numeric domain error: {0}")]
    NumericDomain(String),

    /// Caller-supplied parameter outside its documented range
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

pub type Result<T> = std::result::Result<T, OddsError>;

impl OddsError {
    /// True for the "method cannot be applied to this market" case
    pub fn is_inapplicable(&self) -> bool {
        matches!(self, OddsError::NumericDomain(_))
    }
}

/// Reject NaN and infinities before any arithmetic touches them.
pub(crate) fn ensure_finite(value: f64, what: &str) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(OddsError::InvalidParameter(format!(
            "{} must be finite, got {}",
            what, value
        )))
    }
}

/// Probability strictly inside (0, 1).
pub(crate) fn ensure_probability(value: f64, what: &str) -> Result<f64> {
    if value.is_finite() && value > 0.0 && value < 1.0 {
        Ok(value)
    } else {
        Err(OddsError::InvalidProbability(format!(
            "{} must lie in (0, 1), got {}",
            what, value
        )))
    }
}
