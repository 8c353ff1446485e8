//! Subcommand handlers
//!
//! Each handler turns parsed arguments into core calls and renders the
//! result; none of them does math of its own.

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, info, warn};

use trueline::betlog::{BetLog, BetLogEntry};
use trueline::config::AppConfig;
use trueline::devig::{devig, equal_margin_n};
use trueline::kelly::recommended_stake;
use trueline::value::{evaluate_all, price_edge, ComparisonRequest, ValueQuote};
use trueline::{fair_odds, DevigMethod, Odds, TwoSidedMarket};

use super::output;
use super::{CompareArgs, ConvertArgs, DevigArgs, EdgeArgs, KellyArgs, TrueOddsArgs};

/// Settings shared by every handler
pub struct Session {
    pub config: AppConfig,
    pub json: bool,
    /// Bets submitted during this run
    pub log: BetLog,
}

impl Session {
    pub fn new(config: AppConfig, json: bool) -> Self {
        Self {
            config,
            json,
            log: BetLog::new(),
        }
    }

    fn methods_or_default(&self, explicit: &[DevigMethod]) -> Result<Vec<DevigMethod>> {
        if explicit.is_empty() {
            self.config.methods()
        } else {
            Ok(explicit.to_vec())
        }
    }
}

#[derive(Serialize)]
struct ConvertView {
    decimal: f64,
    american: i32,
    implied_probability: f64,
}

pub fn convert(session: &Session, args: &ConvertArgs) -> Result<()> {
    let view = ConvertView {
        decimal: args.odds.to_decimal()?,
        american: args.odds.to_american()?,
        implied_probability: args.odds.implied_probability()?,
    };

    if session.json {
        return output::json(&view);
    }
    output::section(&format!("Odds {}", args.odds));
    output::key_value("Decimal", format!("{:.4}", view.decimal));
    output::key_value("American", Odds::American(view.american));
    output::key_value("Implied", output::percent(view.implied_probability));
    Ok(())
}

pub fn true_odds(session: &Session, args: &TrueOddsArgs) -> Result<()> {
    let decimals = args
        .odds
        .iter()
        .map(|o| o.to_decimal())
        .collect::<trueline::Result<Vec<f64>>>()?;
    let sheet = equal_margin_n(&decimals)?;

    if session.json {
        return output::json(&sheet);
    }
    output::section("True odds (equal margin)");
    for (i, outcome) in sheet.outcomes.iter().enumerate() {
        output::note(&format!(
            "Outcome {} -> True Probability: {} | Fair Odds: {:.2}",
            i + 1,
            output::percent(outcome.probability),
            outcome.fair_odds
        ));
    }
    output::note(&format!(
        "Bookmaker margin: {:.2}% included in original odds",
        sheet.margin_percent()
    ));
    Ok(())
}

#[derive(Serialize)]
struct DevigLine {
    method: DevigMethod,
    prob_a: Option<f64>,
    prob_b: Option<f64>,
    fair_a: Option<f64>,
    fair_b: Option<f64>,
    error: Option<String>,
}

pub fn devig_market(session: &Session, args: &DevigArgs) -> Result<()> {
    let market = TwoSidedMarket::new(args.a.to_decimal()?, args.b.to_decimal()?)?;
    let methods = session.methods_or_default(&args.methods)?;
    debug!(margin = market.margin(), ?methods, "de-vigging market");

    let mut lines = Vec::with_capacity(methods.len());
    for method in methods {
        let line = match devig(&market, method) {
            Ok(r) => DevigLine {
                method,
                prob_a: Some(r.prob_a),
                prob_b: Some(r.prob_b),
                fair_a: Some(fair_odds(r.prob_a)?),
                fair_b: Some(fair_odds(r.prob_b)?),
                error: None,
            },
            Err(e) if e.is_inapplicable() => {
                warn!(%method, error = %e, "method inapplicable for this market");
                DevigLine {
                    method,
                    prob_a: None,
                    prob_b: None,
                    fair_a: None,
                    fair_b: None,
                    error: Some(e.to_string()),
                }
            }
            Err(e) => return Err(e.into()),
        };
        lines.push(line);
    }

    if session.json {
        return output::json(&lines);
    }
    output::section(&format!(
        "{} / {}  (margin {:.2}%)",
        args.a,
        args.b,
        market.margin() * 100.0
    ));
    for line in &lines {
        match (line.prob_a, line.prob_b, line.fair_a, line.fair_b) {
            (Some(pa), Some(pb), Some(fa), Some(fb)) => output::key_value(
                &line.method.to_string(),
                format!(
                    "A {} ({:.2})  B {} ({:.2})",
                    output::percent(pa),
                    fa,
                    output::percent(pb),
                    fb
                ),
            ),
            _ => output::key_value(&line.method.to_string(), "not applicable"),
        }
    }
    Ok(())
}

#[derive(Serialize)]
struct CompareView {
    quotes: Vec<ValueQuote>,
    inapplicable: Vec<(DevigMethod, String)>,
}

pub fn compare(session: &mut Session, args: &CompareArgs) -> Result<()> {
    let request = ComparisonRequest {
        sharp: TwoSidedMarket::new(args.sharp_a.to_decimal()?, args.sharp_b.to_decimal()?)?,
        side: args.side,
        your_odds: args.yours.to_decimal()?,
        bankroll: args.bankroll.unwrap_or(session.config.staking.bankroll),
        kelly_multiplier: args.kelly.unwrap_or(session.config.staking.kelly_multiplier),
    };
    let methods = session.methods_or_default(&args.methods)?;

    let mut view = CompareView {
        quotes: Vec::new(),
        inapplicable: Vec::new(),
    };
    for (method, result) in evaluate_all(&request, &methods) {
        match result {
            Ok(quote) => view.quotes.push(quote),
            Err(e) if e.is_inapplicable() => {
                warn!(%method, error = %e, "method inapplicable for this market");
                view.inapplicable.push((method, e.to_string()));
            }
            Err(e) => return Err(e.into()),
        }
    }

    // the first applicable method is the one that gets logged
    if let Some(quote) = view.quotes.first() {
        let index = session.log.push(BetLogEntry::from_quote(&request, quote));
        info!(
            index,
            method = %quote.method,
            edge = quote.edge_percent,
            stake = quote.stake.stake_rounded(),
            "bet logged"
        );
    }

    if let Some(path) = export_path(session, args) {
        session
            .log
            .export_to_path(&path)
            .with_context(|| format!("Failed to export bet log to {}", path.display()))?;
    }

    if session.json {
        return output::json(&view);
    }
    output::section(&format!(
        "{} @ {} vs sharp {} / {}",
        request.side, args.yours, args.sharp_a, args.sharp_b
    ));
    for quote in &view.quotes {
        output::note(&format!("[{}]", quote.method));
        output::key_value("Sharp implied", output::percent(quote.sharp_implied));
        output::key_value("True probability", output::percent(quote.true_prob));
        output::key_value("Fair odds", format!("{:.2}", quote.fair_odds));
        output::key_value("Your implied", output::percent(quote.your_implied));
        output::key_value("Edge", format!("{:+.2}%", quote.edge_percent));
        output::key_value("Tag", quote.tag);
        if quote.stake.is_bet() {
            output::key_value(
                "Stake",
                format!(
                    "{} ({:.2}% of bankroll)",
                    output::money(quote.stake.stake_rounded()),
                    quote.stake.bet_percent()
                ),
            );
        } else {
            output::key_value("Stake", "no bet (negative or zero EV)");
        }
    }
    for (method, reason) in &view.inapplicable {
        output::warn(&format!("{} not applicable: {}", method, reason));
    }
    Ok(())
}

fn export_path(session: &Session, args: &CompareArgs) -> Option<PathBuf> {
    if let Some(path) = &args.export {
        return Some(path.clone());
    }
    if session.config.export.csv_enabled {
        let today = Utc::now().format("%Y-%m-%d");
        return Some(
            PathBuf::from(&session.config.export.data_dir).join(format!("bets_{}.csv", today)),
        );
    }
    None
}

pub fn edge(session: &Session, args: &EdgeArgs) -> Result<()> {
    let result = price_edge(args.sharp.to_decimal()?, args.yours.to_decimal()?)?;

    if session.json {
        return output::json(&result);
    }
    output::section(&format!("Sharp {} vs yours {}", args.sharp, args.yours));
    output::key_value("Sharp implied", format!("{:.2}%", result.sharp_prob_percent));
    output::key_value("Your implied", format!("{:.2}%", result.your_prob_percent));
    output::key_value("Edge", format!("{:+.2}%", result.edge_percent));
    output::key_value("Tag", result.tag);
    Ok(())
}

pub fn kelly(session: &Session, args: &KellyArgs) -> Result<()> {
    let bankroll = args.bankroll.unwrap_or(session.config.staking.bankroll);
    let fraction = args
        .fraction
        .unwrap_or(session.config.staking.kelly_multiplier);
    let rec = recommended_stake(bankroll, args.odds.to_decimal()?, args.prob, fraction)?;

    if session.json {
        return output::json(&rec);
    }
    if rec.is_bet() {
        output::note(&format!(
            "Bet {} ({:.2}% of your bankroll)",
            output::money(rec.stake_rounded()),
            rec.bet_percent()
        ));
    } else {
        output::warn("No bet recommended (negative or zero EV)");
    }
    Ok(())
}
