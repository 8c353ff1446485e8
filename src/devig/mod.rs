//! Margin removal ("de-vigging")
//!
//! Turns the margin-inclusive implied probabilities of a two-way market into
//! true probabilities that sum to one. Four strategies, picked by the caller:
//! - Equal margin: scale both sides by the overround
//! - Logarithmic: each side weighted by the log of the *other* side's odds
//! - MPTO: margin distributed in proportion to each side's odds
//! - Shin: closed-form solution of Shin's insider-trading model
//!
//! The N-outcome true-odds sheet (equal margin only) lives in [`multi`].

mod multi;

pub use multi::{equal_margin_n, TrueOddsSheet, TrueOutcome};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{OddsError, Result};
use crate::odds::TwoSidedMarket;
use crate::types::{DevigMethod, Side};

/// Booksum distance from 1.0 below which a market counts as margin-free
const ZERO_OVERROUND_EPS: f64 = 1e-12;

/// True (margin-free) probabilities of both sides
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DevigResult {
    pub method: DevigMethod,
    pub prob_a: f64,
    pub prob_b: f64,
}

impl DevigResult {
    pub fn prob(&self, side: Side) -> f64 {
        match side {
            Side::A => self.prob_a,
            Side::B => self.prob_b,
        }
    }
}

/// Remove the margin from `market` with the selected method
pub fn devig(market: &TwoSidedMarket, method: DevigMethod) -> Result<DevigResult> {
    match method {
        DevigMethod::EqualMargin => Ok(equal_margin(market)),
        DevigMethod::Logarithmic => Ok(logarithmic(market)),
        DevigMethod::Mpto => Ok(mpto(market)),
        DevigMethod::Shin => shin(market),
    }
}

pub fn equal_margin(market: &TwoSidedMarket) -> DevigResult {
    let implied_a = market.implied(Side::A);
    let prob_a = implied_a / market.overround();
    DevigResult {
        method: DevigMethod::EqualMargin,
        prob_a,
        prob_b: 1.0 - prob_a,
    }
}

/// A's probability derives from ln(b), B's from ln(a).
///
/// Both odds exceed 1.0 on a `TwoSidedMarket`, so both logs are positive.
pub fn logarithmic(market: &TwoSidedMarket) -> DevigResult {
    let (ln_a, ln_b) = (market.a().ln(), market.b().ln());
    let prob_a = ln_b / (ln_a + ln_b);
    DevigResult {
        method: DevigMethod::Logarithmic,
        prob_a,
        prob_b: 1.0 - prob_a,
    }
}

pub fn mpto(market: &TwoSidedMarket) -> DevigResult {
    let (a, b) = (market.a(), market.b());
    let margin = market.margin();
    let weight_a = a / (a + b);

    // stays inside (0, 1) for any pair of odds above 1.0
    let prob_a = market.implied(Side::A) - margin * weight_a;
    DevigResult {
        method: DevigMethod::Mpto,
        prob_a,
        prob_b: 1.0 - prob_a,
    }
}

/// Two-outcome Shin model.
///
/// A margin-free market has nothing to remove and falls back to equal margin.
pub fn shin(market: &TwoSidedMarket) -> Result<DevigResult> {
    let beta = market.overround();
    if (beta - 1.0).abs() < ZERO_OVERROUND_EPS {
        debug!(beta, "zero overround, shin falls back to equal margin");
        return Ok(DevigResult {
            method: DevigMethod::Shin,
            ..equal_margin(market)
        });
    }

    let (prob_a, prob_b) = shin_closed_form(market.implied(Side::A), market.implied(Side::B))?;
    Ok(DevigResult {
        method: DevigMethod::Shin,
        prob_a,
        prob_b,
    })
}

/// Shin probabilities from the implied probabilities of both sides.
///
/// With booksum `beta` and `d = pi_a - pi_b`, the insider share is
/// `z = (beta - 1)(d^2 - beta) / (beta (d^2 - 1))` and
/// `p_a = (sqrt(z^2 + 4 (1 - z) pi_a^2 / beta) - z) / (2 (1 - z))`.
/// A negative discriminant yields NaN, which the unit-interval check rejects.
fn shin_closed_form(pi_a: f64, pi_b: f64) -> Result<(f64, f64)> {
    let beta = pi_a + pi_b;
    let d_sq = (pi_a - pi_b).powi(2);

    let denom = beta * (d_sq - 1.0);
    if denom == 0.0 {
        return Err(OddsError::NumericDomain(
            "shin insider share undefined for this market".to_string(),
        ));
    }
    let z = (beta - 1.0) * (d_sq - beta) / denom;
    if !z.is_finite() || z >= 1.0 {
        return Err(OddsError::NumericDomain(format!(
            "shin insider share {} outside the model",
            z
        )));
    }

    let radicand = z * z + 4.0 * (1.0 - z) * pi_a * pi_a / beta;
    let prob_a = (radicand.sqrt() - z) / (2.0 * (1.0 - z));
    let prob_b = 1.0 - prob_a;
    check_unit_interval(prob_a, prob_b)?;
    Ok((prob_a, prob_b))
}

fn check_unit_interval(prob_a: f64, prob_b: f64) -> Result<()> {
    let inside = |p: f64| p.is_finite() && p > 0.0 && p < 1.0;
    if inside(prob_a) && inside(prob_b) {
        Ok(())
    } else {
        Err(OddsError::NumericDomain(format!(
            "shin produced probabilities {} / {} outside (0, 1)",
            prob_a, prob_b
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SUM_TOL: f64 = 1e-9;

    fn market(a: f64, b: f64) -> TwoSidedMarket {
        TwoSidedMarket::new(a, b).unwrap()
    }

    fn sample_markets() -> Vec<TwoSidedMarket> {
        let pairs = [
            (1.91, 1.91),
            (1.5, 2.6),
            (1.2, 4.5),
            (1.05, 10.0),
            (2.1, 1.8),
            (3.0, 1.4),
            (2.05, 2.05),
            (1.01, 25.0),
        ];
        pairs.iter().map(|&(a, b)| market(a, b)).collect()
    }

    #[test]
    fn every_method_sums_to_one() {
        for m in sample_markets() {
            for method in DevigMethod::ALL {
                let r = devig(&m, method).unwrap();
                assert!(
                    (r.prob_a + r.prob_b - 1.0).abs() < SUM_TOL,
                    "{} on {:?} sums to {}",
                    method,
                    m,
                    r.prob_a + r.prob_b
                );
                assert_eq!(r.method, method);
            }
        }
    }

    #[test]
    fn equal_margin_scenario_from_american_quotes() {
        let m = TwoSidedMarket::from_american(-104, -110).unwrap();
        let r = equal_margin(&m);
        assert!((r.prob_a - 0.4932).abs() < 1e-4);
        assert!((r.prob_b - 0.5068).abs() < 1e-4);
    }

    #[test]
    fn equal_margin_leaves_fair_market_alone() {
        let m = market(2.0, 2.0);
        let r = equal_margin(&m);
        assert_eq!(r.prob_a, 0.5);

        let m = market(4.0, 4.0 / 3.0);
        let r = equal_margin(&m);
        assert!((r.prob_a - 0.25).abs() < 1e-15);
    }

    #[test]
    fn log_uses_the_opposite_side() {
        let r = logarithmic(&market(1.5, 2.6));
        let expected = 2.6f64.ln() / (1.5f64.ln() + 2.6f64.ln());
        assert!((r.prob_a - expected).abs() < 1e-12);
        // differs materially from equal margin on a lopsided market
        let em = equal_margin(&market(1.5, 2.6));
        assert!((r.prob_a - em.prob_a).abs() > 0.05);
    }

    #[test]
    fn mpto_shifts_margin_to_the_longshot() {
        let m = market(1.5, 2.6);
        let r = mpto(&m);
        let em = equal_margin(&m);
        assert!((r.prob_a - 0.647905).abs() < 1e-6);
        // longshot loses more probability than under equal margin
        assert!(r.prob_b < em.prob_b);
    }

    #[test]
    fn mpto_stays_inside_unit_interval_on_heavy_margins() {
        for (a, b) in [(1.01, 1.02), (1.01, 50.0), (1.1, 1.1), (1.05, 10.0)] {
            let r = mpto(&market(a, b));
            assert!(r.prob_a > 0.0 && r.prob_a < 1.0);
            assert!(r.prob_b > 0.0 && r.prob_b < 1.0);
        }
    }

    #[test]
    fn shin_symmetric_market_is_even() {
        let r = shin(&market(1.91, 1.91)).unwrap();
        assert!((r.prob_a - 0.5).abs() < 1e-12);
    }

    #[test]
    fn shin_favours_favourite_over_equal_margin() {
        let m = market(1.2, 4.5);
        let s = shin(&m).unwrap();
        let em = equal_margin(&m);
        assert!((s.prob_a - 0.805556).abs() < 1e-6);
        assert!(s.prob_a > em.prob_a);
    }

    #[test]
    fn shin_zero_overround_falls_back_to_equal_margin() {
        let m = market(2.0, 2.0);
        let r = shin(&m).unwrap();
        assert_eq!(r.method, DevigMethod::Shin);
        assert_eq!(r.prob_a, 0.5);

        let m = market(1.25, 5.0);
        let r = shin(&m).unwrap();
        assert!((r.prob_a - 0.8).abs() < 1e-12);
    }

    #[test]
    fn shin_handles_arbitrage_quote() {
        let r = shin(&market(2.1, 2.1)).unwrap();
        assert!((r.prob_a - 0.5).abs() < 1e-12);
    }

    #[test]
    fn shin_undefined_insider_share() {
        // |pi_a - pi_b| == 1 zeroes the denominator
        assert!(matches!(
            shin_closed_form(1.5, 0.5),
            Err(OddsError::NumericDomain(_))
        ));
    }

    #[test]
    fn shin_insider_share_at_one_rejected() {
        // equal sides with booksum 2 put z exactly at 1
        let err = shin_closed_form(1.0, 1.0).unwrap_err();
        assert!(err.is_inapplicable());
        assert!(err.to_string().contains("insider share"));
    }

    #[test]
    fn shin_result_outside_unit_interval_rejected() {
        // z is below 1 here but p_a comes out near 1.05
        let err = shin_closed_form(1.2, 0.1).unwrap_err();
        assert!(matches!(err, OddsError::NumericDomain(_)));
        assert!(err.to_string().contains("outside (0, 1)"));
    }

    #[test]
    fn shin_nan_discriminant_rejected() {
        assert!(check_unit_interval(f64::NAN, f64::NAN).is_err());
        assert!(check_unit_interval(0.0, 1.0).is_err());
        assert!(check_unit_interval(0.3, 0.7).is_ok());
    }

    #[test]
    fn shin_closed_form_matches_market_path() {
        let m = market(1.2, 4.5);
        let (prob_a, prob_b) = shin_closed_form(1.0 / 1.2, 1.0 / 4.5).unwrap();
        let r = shin(&m).unwrap();
        assert_eq!(r.prob_a, prob_a);
        assert_eq!(r.prob_b, prob_b);
    }

    #[test]
    fn methods_are_deterministic() {
        let m = market(1.83, 2.02);
        for method in DevigMethod::ALL {
            let first = devig(&m, method).unwrap();
            let second = devig(&m, method).unwrap();
            assert_eq!(first.prob_a.to_bits(), second.prob_a.to_bits());
        }
    }
}
