//! Odds conversion
//!
//! American <-> decimal odds and implied probability. Decimal odds are the
//! working representation everywhere else in the crate.

mod market;

pub use market::TwoSidedMarket;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{OddsError, Result};

/// Convert American odds to decimal odds.
///
/// `+150` -> 2.50, `-110` -> 1.9091. Values strictly inside (-100, 100),
/// zero included, are not American prices.
pub fn american_to_decimal(american: i32) -> Result<f64> {
    if american == 0 {
        return Err(OddsError::InvalidOdds(
            "american odds cannot be 0".to_string(),
        ));
    }
    if american.abs() < 100 {
        return Err(OddsError::InvalidOdds(format!(
            "american odds {} fall inside (-100, 100)",
            american
        )));
    }

    let decimal = if american > 0 {
        american as f64 / 100.0 + 1.0
    } else {
        100.0 / (american as f64).abs() + 1.0
    };
    Ok(decimal)
}

/// Convert decimal odds to American odds.
///
/// Decimal >= 2.0 gives a positive price, below 2.0 a negative one; exactly
/// 2.0 maps to +100. Rounds half away from zero.
pub fn decimal_to_american(decimal: f64) -> Result<i32> {
    if !decimal.is_finite() || decimal <= 1.0 {
        return Err(OddsError::InvalidOdds(format!(
            "decimal odds {} must exceed 1.0",
            decimal
        )));
    }

    let american = if decimal >= 2.0 {
        ((decimal - 1.0) * 100.0).round()
    } else {
        -(100.0 / (decimal - 1.0)).round()
    };

    if american.abs() > i32::MAX as f64 {
        return Err(OddsError::InvalidOdds(format!(
            "decimal odds {} have no representable american price",
            decimal
        )));
    }
    Ok(american as i32)
}

/// Implied probability of decimal odds, margin included.
pub fn implied_probability(decimal: f64) -> Result<f64> {
    if !decimal.is_finite() || decimal <= 0.0 {
        return Err(OddsError::InvalidOdds(format!(
            "decimal odds {} must be positive",
            decimal
        )));
    }
    Ok(1.0 / decimal)
}

/// Decimal odds with the domain invariant (> 1.0) enforced.
pub(crate) fn validate_decimal(decimal: f64) -> Result<f64> {
    if decimal.is_finite() && decimal > 1.0 {
        Ok(decimal)
    } else {
        Err(OddsError::InvalidOdds(format!(
            "decimal odds {} must exceed 1.0",
            decimal
        )))
    }
}

/// A single betting price in either quoting convention
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "format", content = "value", rename_all = "snake_case")]
pub enum Odds {
    American(i32),
    Decimal(f64),
}

impl Odds {
    /// Decimal representation, validated
    pub fn to_decimal(&self) -> Result<f64> {
        match *self {
            Odds::American(american) => american_to_decimal(american),
            Odds::Decimal(decimal) => validate_decimal(decimal),
        }
    }

    /// American representation, validated
    pub fn to_american(&self) -> Result<i32> {
        match *self {
            Odds::American(american) => {
                american_to_decimal(american)?;
                Ok(american)
            }
            Odds::Decimal(decimal) => decimal_to_american(decimal),
        }
    }

    /// Implied probability, margin included
    pub fn implied_probability(&self) -> Result<f64> {
        implied_probability(self.to_decimal()?)
    }
}

impl fmt::Display for Odds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Odds::American(american) if *american > 0 => write!(f, "+{}", american),
            Odds::American(american) => write!(f, "{}", american),
            Odds::Decimal(decimal) => write!(f, "{:.2}", decimal),
        }
    }
}

impl FromStr for Odds {
    type Err = OddsError;

    /// A leading sign, or a whole number of magnitude >= 100, reads as
    /// American; anything else reads as decimal.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let signed = s.starts_with('+') || s.starts_with('-');

        if let Ok(whole) = s.parse::<i32>() {
            if signed || whole.abs() >= 100 {
                american_to_decimal(whole)?;
                return Ok(Odds::American(whole));
            }
        } else if signed {
            return Err(OddsError::InvalidOdds(format!(
                "'{}' is not a whole american price",
                s
            )));
        }

        let decimal: f64 = s
            .parse()
            .map_err(|_| OddsError::InvalidOdds(format!("'{}' is not a price", s)))?;
        validate_decimal(decimal)?;
        Ok(Odds::Decimal(decimal))
    }
}
