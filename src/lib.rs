//! Trueline Library
//!
//! Odds conversion, margin removal, value metrics and Kelly staking for
//! two-way betting markets. The math modules are pure functions over plain
//! values; the bet log and config are the only stateful pieces and belong to
//! the caller.

pub mod betlog;
pub mod config;
pub mod devig;
pub mod error;
pub mod kelly;
pub mod odds;
pub mod types;
pub mod value;

pub use devig::{devig, DevigResult, TrueOddsSheet};
pub use error::{OddsError, Result};
pub use kelly::{kelly_fraction, recommended_stake, two_sided_stake, StakeRecommendation};
pub use odds::{
    american_to_decimal, decimal_to_american, implied_probability, Odds, TwoSidedMarket,
};
pub use types::{BetResult, BetTag, DevigMethod, Side};
pub use value::{classify, edge_percent, fair_odds};
