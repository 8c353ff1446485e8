//! Sharp-vs-soft comparison
//!
//! De-vig the sharp book's two-way market, then price the soft book's odds
//! for the chosen side against it: true probability, fair odds, edge, tag
//! and a Kelly stake.

use serde::{Deserialize, Serialize};

use super::{classify, edge_percent, fair_odds, round2};
use crate::devig::devig;
use crate::error::Result;
use crate::kelly::{recommended_stake, StakeRecommendation};
use crate::odds::{validate_decimal, TwoSidedMarket};
use crate::types::{BetTag, DevigMethod, Side};

/// One comparison submitted by the user
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRequest {
    /// Reference (low-margin) book
    pub sharp: TwoSidedMarket,
    /// Side being bet
    pub side: Side,
    /// Decimal odds available at the soft book for `side`
    pub your_odds: f64,
    pub bankroll: f64,
    pub kelly_multiplier: f64,
}

/// Comparison result for one de-vig method
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueQuote {
    pub method: DevigMethod,
    pub side: Side,
    /// Sharp implied probability of `side`, margin included
    pub sharp_implied: f64,
    /// De-vigged probability of `side`
    pub true_prob: f64,
    pub fair_odds: f64,
    /// Implied probability of the soft odds
    pub your_implied: f64,
    /// Percentage points, two decimals
    pub edge_percent: f64,
    pub tag: BetTag,
    pub stake: StakeRecommendation,
}

impl ValueQuote {
    /// True probability as a percentage, two decimals
    pub fn true_prob_percent(&self) -> f64 {
        round2(self.true_prob * 100.0)
    }
}

/// Price `request` with a single de-vig method.
pub fn evaluate(request: &ComparisonRequest, method: DevigMethod) -> Result<ValueQuote> {
    let your_odds = validate_decimal(request.your_odds)?;
    let fair = devig(&request.sharp, method)?;

    let true_prob = fair.prob(request.side);
    let your_implied = 1.0 / your_odds;
    let edge = edge_percent(true_prob, your_implied)?;
    let tag = classify(true_prob * 100.0, edge);
    let stake = recommended_stake(
        request.bankroll,
        your_odds,
        true_prob,
        request.kelly_multiplier,
    )?;

    Ok(ValueQuote {
        method,
        side: request.side,
        sharp_implied: request.sharp.implied(request.side),
        true_prob,
        fair_odds: fair_odds(true_prob)?,
        your_implied,
        edge_percent: edge,
        tag,
        stake,
    })
}

/// Sharp price against soft price for one side, without de-vigging
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceEdge {
    /// Sharp implied probability, percent, two decimals
    pub sharp_prob_percent: f64,
    /// Soft implied probability, percent, two decimals
    pub your_prob_percent: f64,
    pub edge_percent: f64,
    pub tag: BetTag,
}

/// Compare a single sharp price with the soft price on the same side, taking
/// the sharp implied probability at face value.
pub fn price_edge(sharp_odds: f64, your_odds: f64) -> Result<PriceEdge> {
    let sharp_prob = 1.0 / validate_decimal(sharp_odds)?;
    let your_prob = 1.0 / validate_decimal(your_odds)?;
    let edge = edge_percent(sharp_prob, your_prob)?;

    Ok(PriceEdge {
        sharp_prob_percent: round2(sharp_prob * 100.0),
        your_prob_percent: round2(your_prob * 100.0),
        edge_percent: edge,
        tag: classify(sharp_prob * 100.0, edge),
    })
}

/// Price `request` with several methods; one result per method, in order.
pub fn evaluate_all(
    request: &ComparisonRequest,
    methods: &[DevigMethod],
) -> Vec<(DevigMethod, Result<ValueQuote>)> {
    evaluate_each(request, methods, evaluate)
}

fn evaluate_each<F>(
    request: &ComparisonRequest,
    methods: &[DevigMethod],
    price: F,
) -> Vec<(DevigMethod, Result<ValueQuote>)>
where
    F: Fn(&ComparisonRequest, DevigMethod) -> Result<ValueQuote>,
{
    methods
        .iter()
        .map(|&method| (method, price(request, method)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OddsError;

    fn request(a: f64, b: f64, side: Side, yours: f64) -> ComparisonRequest {
        ComparisonRequest {
            sharp: TwoSidedMarket::new(a, b).unwrap(),
            side,
            your_odds: yours,
            bankroll: 1000.0,
            kelly_multiplier: 0.5,
        }
    }

    #[test]
    fn soft_price_beats_sharp_fair_line() {
        let req = request(1.87, 1.95, Side::A, 2.10);
        let quote = evaluate(&req, DevigMethod::EqualMargin).unwrap();

        assert!((quote.sharp_implied - 1.0 / 1.87).abs() < 1e-12);
        assert!((quote.your_implied - 1.0 / 2.10).abs() < 1e-12);
        assert!(quote.edge_percent > 0.0);
        assert!(quote.stake.is_bet());
        assert_eq!(quote.side, Side::A);
        assert_eq!(quote.fair_odds, fair_odds(quote.true_prob).unwrap());
    }

    #[test]
    fn worse_price_is_trash_with_no_stake() {
        let req = request(1.87, 1.95, Side::B, 1.80);
        let quote = evaluate(&req, DevigMethod::Mpto).unwrap();
        assert!(quote.edge_percent < 0.0);
        assert_eq!(quote.tag, BetTag::Trash);
        assert_eq!(quote.stake.stake, 0.0);
    }

    #[test]
    fn all_methods_in_request_order() {
        let req = request(1.87, 1.95, Side::A, 2.10);
        let results = evaluate_all(&req, &DevigMethod::ALL);
        assert_eq!(results.len(), 4);
        for ((method, result), expected) in results.iter().zip(DevigMethod::ALL) {
            assert_eq!(*method, expected);
            assert_eq!(result.as_ref().unwrap().method, expected);
        }
    }

    #[test]
    fn failing_method_does_not_hide_the_rest() {
        let req = request(1.87, 1.95, Side::A, 2.10);
        let results = evaluate_each(&req, &DevigMethod::ALL, |r, method| match method {
            DevigMethod::Shin => Err(OddsError::NumericDomain("no insider share".to_string())),
            _ => evaluate(r, method),
        });

        assert_eq!(results.len(), 4);
        let failed: Vec<_> = results.iter().filter(|(_, r)| r.is_err()).collect();
        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0].0, DevigMethod::Shin);
        assert!(failed[0].1.as_ref().unwrap_err().is_inapplicable());
        for (method, result) in results.iter().filter(|(m, _)| *m != DevigMethod::Shin) {
            assert_eq!(result.as_ref().unwrap().method, *method);
        }
    }

    #[test]
    fn request_with_invalid_sharp_market_does_not_deserialize() {
        let body = r#"{"sharp":{"a":1.0,"b":1.0},"side":"a","your_odds":2.1,"bankroll":1000.0,"kelly_multiplier":0.5}"#;
        assert!(serde_json::from_str::<ComparisonRequest>(body).is_err());

        let body = r#"{"sharp":{"a":1.87,"b":1.95},"side":"a","your_odds":2.1,"bankroll":1000.0,"kelly_multiplier":0.5}"#;
        let req: ComparisonRequest = serde_json::from_str(body).unwrap();
        assert!(evaluate(&req, DevigMethod::Logarithmic).is_ok());
    }

    #[test]
    fn single_price_edge() {
        let edge = price_edge(1.91, 2.10).unwrap();
        assert_eq!(edge.sharp_prob_percent, 52.36);
        assert_eq!(edge.your_prob_percent, 47.62);
        assert_eq!(edge.edge_percent, 4.74);
        assert_eq!(edge.tag, BetTag::Sprinkle);

        let edge = price_edge(2.30, 2.45).unwrap();
        assert_eq!(edge.tag, BetTag::WorthALook);
    }

    #[test]
    fn invalid_soft_odds_rejected() {
        let req = request(1.87, 1.95, Side::A, 1.0);
        assert!(matches!(
            evaluate(&req, DevigMethod::EqualMargin),
            Err(OddsError::InvalidOdds(_))
        ));
    }

    #[test]
    fn invalid_multiplier_surfaces() {
        let mut req = request(1.87, 1.95, Side::A, 2.10);
        req.kelly_multiplier = 2.0;
        assert!(matches!(
            evaluate(&req, DevigMethod::Shin),
            Err(OddsError::InvalidParameter(_))
        ));
    }
}
