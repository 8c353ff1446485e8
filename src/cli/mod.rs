//! Command-line interface definitions.

pub mod commands;
pub mod output;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use trueline::{DevigMethod, Odds, Side};

/// Trueline - true odds, edge and Kelly stakes for two-way markets.
#[derive(Parser, Debug)]
#[command(name = "trueline")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file (defaults to config/default + config/local)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert a price between American and decimal odds
    Convert(ConvertArgs),

    /// Remove the margin from an N-way market (equal margin)
    TrueOdds(TrueOddsArgs),

    /// De-vig a two-way market with one or more methods
    Devig(DevigArgs),

    /// Compare a sharp two-way market against your soft price
    Compare(CompareArgs),

    /// Compare one sharp price with your price on the same side
    Edge(EdgeArgs),

    /// Kelly criterion stake calculator
    Kelly(KellyArgs),
}

/// Arguments for the `convert` subcommand.
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Price as American (+150, -110) or decimal (2.50)
    #[arg(allow_negative_numbers = true)]
    pub odds: Odds,
}

/// Arguments for the `true-odds` subcommand.
#[derive(Args, Debug)]
pub struct TrueOddsArgs {
    /// Odds for every outcome (at least two)
    #[arg(required = true, num_args = 2.., allow_negative_numbers = true)]
    pub odds: Vec<Odds>,
}

/// Arguments for the `devig` subcommand.
#[derive(Args, Debug)]
pub struct DevigArgs {
    /// Side A price
    #[arg(allow_negative_numbers = true)]
    pub a: Odds,

    /// Side B price
    #[arg(allow_negative_numbers = true)]
    pub b: Odds,

    /// De-vig method (repeatable); defaults to the configured list
    #[arg(short, long = "method", value_parser = parse_method)]
    pub methods: Vec<DevigMethod>,
}

/// Arguments for the `compare` subcommand.
#[derive(Args, Debug)]
pub struct CompareArgs {
    /// Sharp book price for side A
    #[arg(long, allow_negative_numbers = true)]
    pub sharp_a: Odds,

    /// Sharp book price for side B
    #[arg(long, allow_negative_numbers = true)]
    pub sharp_b: Odds,

    /// Your (soft book) price for the chosen side
    #[arg(long, allow_negative_numbers = true)]
    pub yours: Odds,

    /// Side you are betting (a or b)
    #[arg(long, value_parser = parse_side, default_value = "a")]
    pub side: Side,

    /// De-vig method (repeatable); defaults to the configured list
    #[arg(short, long = "method", value_parser = parse_method)]
    pub methods: Vec<DevigMethod>,

    /// Override configured bankroll
    #[arg(long)]
    pub bankroll: Option<f64>,

    /// Override configured Kelly multiplier, (0, 1]
    #[arg(long)]
    pub kelly: Option<f64>,

    /// Write the session bet log to this CSV file
    #[arg(long)]
    pub export: Option<PathBuf>,
}

/// Arguments for the `edge` subcommand.
#[derive(Args, Debug)]
pub struct EdgeArgs {
    /// Sharp book price
    #[arg(long, allow_negative_numbers = true)]
    pub sharp: Odds,

    /// Your price
    #[arg(long, allow_negative_numbers = true)]
    pub yours: Odds,
}

/// Arguments for the `kelly` subcommand.
#[derive(Args, Debug)]
pub struct KellyArgs {
    /// Price offered
    #[arg(long, allow_negative_numbers = true)]
    pub odds: Odds,

    /// Your win probability, 0..1
    #[arg(long)]
    pub prob: f64,

    /// Fraction of Kelly to use; defaults to configured multiplier
    #[arg(long)]
    pub fraction: Option<f64>,

    /// Current bankroll; defaults to configured bankroll
    #[arg(long)]
    pub bankroll: Option<f64>,
}

fn parse_method(s: &str) -> Result<DevigMethod, String> {
    DevigMethod::from_str(s)
        .ok_or_else(|| format!("unknown method '{}' (equal_margin, log, mpto, shin)", s))
}

fn parse_side(s: &str) -> Result<Side, String> {
    Side::from_str(s).ok_or_else(|| format!("unknown side '{}' (a or b)", s))
}
