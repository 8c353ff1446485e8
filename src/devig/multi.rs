//! N-outcome true odds (equal margin)

use serde::{Deserialize, Serialize};

use crate::error::{OddsError, Result};
use crate::odds::validate_decimal;
use crate::value::round2;

/// One outcome of an N-way market after margin removal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrueOutcome {
    /// Decimal odds as quoted
    pub odds: f64,
    /// True probability (0..1)
    pub probability: f64,
    /// 1 / probability, two decimals
    pub fair_odds: f64,
}

/// Result of the true-odds calculator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrueOddsSheet {
    /// Sum of implied probabilities minus one
    pub margin: f64,
    pub outcomes: Vec<TrueOutcome>,
}

impl TrueOddsSheet {
    /// Margin as a percentage, two decimals
    pub fn margin_percent(&self) -> f64 {
        round2(self.margin * 100.0)
    }
}

/// Remove the margin proportionally from every outcome of an N-way market.
pub fn equal_margin_n(odds: &[f64]) -> Result<TrueOddsSheet> {
    if odds.len() < 2 {
        return Err(OddsError::InvalidParameter(format!(
            "need at least 2 outcomes, got {}",
            odds.len()
        )));
    }
    for &o in odds {
        validate_decimal(o)?;
    }

    let total_implied: f64 = odds.iter().map(|o| 1.0 / o).sum();
    let outcomes = odds
        .iter()
        .map(|&o| {
            let probability = (1.0 / o) / total_implied;
            TrueOutcome {
                odds: o,
                probability,
                fair_odds: round2(1.0 / probability),
            }
        })
        .collect();

    Ok(TrueOddsSheet {
        margin: total_implied - 1.0,
        outcomes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_way_market() {
        let sheet = equal_margin_n(&[2.5, 3.2, 3.0]).unwrap();
        let total: f64 = sheet.outcomes.iter().map(|o| o.probability).sum();
        assert!((total - 1.0).abs() < 1e-12);
        // 0.4 + 0.3125 + 0.3333 = 1.0458
        assert!((sheet.margin - 0.045833).abs() < 1e-6);
        assert_eq!(sheet.margin_percent(), 4.58);
        assert_eq!(sheet.outcomes[0].fair_odds, 2.61);
    }

    #[test]
    fn default_even_market_has_no_margin() {
        let sheet = equal_margin_n(&[2.0, 2.0]).unwrap();
        assert_eq!(sheet.margin, 0.0);
        assert_eq!(sheet.outcomes[1].probability, 0.5);
        assert_eq!(sheet.outcomes[1].fair_odds, 2.0);
    }

    #[test]
    fn rejects_short_or_invalid_input() {
        assert!(matches!(
            equal_margin_n(&[1.9]),
            Err(OddsError::InvalidParameter(_))
        ));
        assert!(matches!(
            equal_margin_n(&[1.9, 1.0]),
            Err(OddsError::InvalidOdds(_))
        ));
    }
}
