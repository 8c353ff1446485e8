//! Value metrics: fair odds, edge and bet classification

mod comparison;

pub use comparison::{
    evaluate, evaluate_all, price_edge, ComparisonRequest, PriceEdge, ValueQuote,
};

use crate::error::{ensure_probability, OddsError, Result};
use crate::types::BetTag;

/// Edge (pp) at or above which a likely winner is a Nuke
pub const NUKE_MIN_EDGE: f64 = 5.0;
/// True probability (%) a Nuke needs
pub const NUKE_MIN_PROB: f64 = 60.0;
pub const SPRINKLE_MIN_EDGE: f64 = 2.0;
pub const SPRINKLE_MIN_PROB: f64 = 50.0;

/// Round half away from zero to two decimals.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Margin-free decimal odds for a probability, two decimals.
pub fn fair_odds(prob: f64) -> Result<f64> {
    if !prob.is_finite() || prob <= 0.0 || prob > 1.0 {
        return Err(OddsError::InvalidProbability(format!(
            "fair odds need a probability in (0, 1], got {}",
            prob
        )));
    }
    Ok(round2(1.0 / prob))
}

/// Edge in percentage points: positive means positive expected value.
pub fn edge_percent(true_prob: f64, your_prob: f64) -> Result<f64> {
    let true_prob = ensure_probability(true_prob, "true probability")?;
    let your_prob = ensure_probability(your_prob, "your implied probability")?;
    Ok(round2((true_prob - your_prob) * 100.0))
}

/// Tag a bet from its true probability (%) and edge (pp).
///
/// Checked in order: Nuke, Sprinkle, Trash, then Worth a Look.
pub fn classify(true_prob_percent: f64, edge_percent: f64) -> BetTag {
    if edge_percent >= NUKE_MIN_EDGE && true_prob_percent >= NUKE_MIN_PROB {
        BetTag::Nuke
    } else if edge_percent >= SPRINKLE_MIN_EDGE && true_prob_percent >= SPRINKLE_MIN_PROB {
        BetTag::Sprinkle
    } else if edge_percent <= 0.0 {
        BetTag::Trash
    } else {
        BetTag::WorthALook
    }
}
