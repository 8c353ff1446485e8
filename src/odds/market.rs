use serde::{Deserialize, Serialize};

use super::{american_to_decimal, validate_decimal};
use crate::error::{OddsError, Result};
use crate::types::Side;

/// Binary market quoted by one book, both sides in decimal odds
///
/// Deserialization goes through [`TwoSidedMarket::new`], so a stored or
/// received market carries the same guarantees as a constructed one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawMarket")]
pub struct TwoSidedMarket {
    a: f64,
    b: f64,
}

/// Unchecked wire form of a market
#[derive(Deserialize)]
struct RawMarket {
    a: f64,
    b: f64,
}

impl TryFrom<RawMarket> for TwoSidedMarket {
    type Error = OddsError;

    fn try_from(raw: RawMarket) -> Result<Self> {
        Self::new(raw.a, raw.b)
    }
}

impl TwoSidedMarket {
    /// Both sides must be finite decimal odds above 1.0
    pub fn new(a: f64, b: f64) -> Result<Self> {
        Ok(Self {
            a: validate_decimal(a)?,
            b: validate_decimal(b)?,
        })
    }

    pub fn from_american(a: i32, b: i32) -> Result<Self> {
        Self::new(american_to_decimal(a)?, american_to_decimal(b)?)
    }

    pub fn a(&self) -> f64 {
        self.a
    }

    pub fn b(&self) -> f64 {
        self.b
    }

    /// Decimal odds quoted for `side`
    pub fn odds(&self, side: Side) -> f64 {
        match side {
            Side::A => self.a,
            Side::B => self.b,
        }
    }

    /// Implied probability of `side`, margin included
    pub fn implied(&self, side: Side) -> f64 {
        1.0 / self.odds(side)
    }

    /// Sum of implied probabilities (booksum)
    pub fn overround(&self) -> f64 {
        1.0 / self.a + 1.0 / self.b
    }

    /// Bookmaker margin; negative for an arbitrage quote
    pub fn margin(&self) -> f64 {
        self.overround() - 1.0
    }
}
