//! Kelly criterion stake sizing
//!
//! `f* = (b p - q) / b` with `b` the net decimal payout, `p` the win
//! probability and `q = 1 - p`. A fraction of full Kelly (the multiplier) is
//! applied to reduce variance. `f* <= 0` means "do not bet" and yields a
//! zero stake, never an error.

use serde::{Deserialize, Serialize};

use crate::devig::devig;
use crate::error::{ensure_finite, ensure_probability, OddsError, Result};
use crate::odds::{validate_decimal, TwoSidedMarket};
use crate::types::{DevigMethod, Side};
use crate::value::round2;

/// Kelly fractions at or below this are break-even after float rounding
const BREAKEVEN_EPS: f64 = 1e-12;

/// Full Kelly fraction for decimal odds and a win probability.
pub fn kelly_fraction(decimal_odds: f64, win_prob: f64) -> Result<f64> {
    let b = ensure_finite(decimal_odds, "decimal odds")? - 1.0;
    if b <= 0.0 {
        return Err(OddsError::InvalidOdds(format!(
            "decimal odds {} leave no payout for kelly",
            decimal_odds
        )));
    }
    let p = ensure_probability(win_prob, "win probability")?;
    let q = 1.0 - p;
    Ok((b * p - q) / b)
}

/// Stake sizing inputs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KellyInputs {
    pub bankroll: f64,
    pub decimal_odds: f64,
    pub win_prob: f64,
    /// Fraction of full Kelly to apply, (0, 1]
    pub kelly_multiplier: f64,
}

impl KellyInputs {
    pub fn recommend(&self) -> Result<StakeRecommendation> {
        recommended_stake(
            self.bankroll,
            self.decimal_odds,
            self.win_prob,
            self.kelly_multiplier,
        )
    }
}

/// Recommended stake, full precision
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StakeRecommendation {
    /// Unscaled Kelly fraction, may be negative
    pub kelly_fraction: f64,
    /// Share of bankroll to stake after the multiplier (0 when no bet)
    pub bet_fraction: f64,
    /// Amount to stake (0 when no bet)
    pub stake: f64,
}

impl StakeRecommendation {
    pub fn no_bet(kelly_fraction: f64) -> Self {
        Self {
            kelly_fraction,
            bet_fraction: 0.0,
            stake: 0.0,
        }
    }

    pub fn is_bet(&self) -> bool {
        self.stake > 0.0
    }

    /// Stake rounded to cents
    pub fn stake_rounded(&self) -> f64 {
        round2(self.stake)
    }

    /// Bet fraction as a percentage of bankroll, two decimals
    pub fn bet_percent(&self) -> f64 {
        round2(self.bet_fraction * 100.0)
    }
}

/// Fractional Kelly stake for a single outcome.
pub fn recommended_stake(
    bankroll: f64,
    decimal_odds: f64,
    win_prob: f64,
    kelly_multiplier: f64,
) -> Result<StakeRecommendation> {
    if !kelly_multiplier.is_finite() || kelly_multiplier <= 0.0 || kelly_multiplier > 1.0 {
        return Err(OddsError::InvalidParameter(format!(
            "kelly multiplier {} must lie in (0, 1]",
            kelly_multiplier
        )));
    }
    if !bankroll.is_finite() || bankroll <= 0.0 {
        return Err(OddsError::InvalidParameter(format!(
            "bankroll {} must be positive",
            bankroll
        )));
    }

    let f = kelly_fraction(decimal_odds, win_prob)?;
    if f <= BREAKEVEN_EPS {
        return Ok(StakeRecommendation::no_bet(f));
    }

    let bet_fraction = f * kelly_multiplier;
    Ok(StakeRecommendation {
        kelly_fraction: f,
        bet_fraction,
        stake: bankroll * bet_fraction,
    })
}

/// Kelly stake on `your_odds` using the de-vigged sharp probability of `side`
/// as the win probability.
pub fn two_sided_stake(
    sharp: &TwoSidedMarket,
    method: DevigMethod,
    side: Side,
    your_odds: f64,
    bankroll: f64,
    kelly_multiplier: f64,
) -> Result<StakeRecommendation> {
    let your_odds = validate_decimal(your_odds)?;
    let fair = devig(sharp, method)?;
    recommended_stake(bankroll, your_odds, fair.prob(side), kelly_multiplier)
}
