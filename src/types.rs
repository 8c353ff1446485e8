//! Core enumerations shared across trueline
//!
//! Selectors the caller passes explicitly (side, de-vig method) and the
//! labels the core hands back (bet tag, bet result).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Side of a two-way market
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    A,
    B,
}

impl Default for Side {
    fn default() -> Self {
        Side::A
    }
}

impl Side {
    /// The other side of the market
    pub fn opposite(&self) -> Self {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }

    /// Parse from string ("a", "side_a", "b", ...)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "a" | "side_a" | "1" => Some(Side::A),
            "b" | "side_b" | "2" => Some(Side::B),
            _ => None,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::A => write!(f, "Side A"),
            Side::B => write!(f, "Side B"),
        }
    }
}

/// Margin removal strategy for a two-way market
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DevigMethod {
    /// Scale both implied probabilities by the overround
    EqualMargin,
    /// Each side's probability from the other side's log-odds
    Logarithmic,
    /// Margin proportional to odds
    Mpto,
    /// Shin insider-trading model
    Shin,
}

impl Default for DevigMethod {
    fn default() -> Self {
        DevigMethod::EqualMargin
    }
}

impl DevigMethod {
    pub const ALL: [DevigMethod; 4] = [
        DevigMethod::EqualMargin,
        DevigMethod::Logarithmic,
        DevigMethod::Mpto,
        DevigMethod::Shin,
    ];

    /// Config / CLI key
    pub fn as_str(&self) -> &'static str {
        match self {
            DevigMethod::EqualMargin => "equal_margin",
            DevigMethod::Logarithmic => "log",
            DevigMethod::Mpto => "mpto",
            DevigMethod::Shin => "shin",
        }
    }

    /// Parse from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "equal_margin" | "equal" | "em" => Some(DevigMethod::EqualMargin),
            "log" | "logarithmic" => Some(DevigMethod::Logarithmic),
            "mpto" => Some(DevigMethod::Mpto),
            "shin" => Some(DevigMethod::Shin),
            _ => None,
        }
    }
}

impl fmt::Display for DevigMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DevigMethod::EqualMargin => write!(f, "Equal Margin"),
            DevigMethod::Logarithmic => write!(f, "LOG"),
            DevigMethod::Mpto => write!(f, "MPTO"),
            DevigMethod::Shin => write!(f, "Shin"),
        }
    }
}

/// Value classification of a bet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BetTag {
    Nuke,
    Sprinkle,
    Trash,
    WorthALook,
}

impl fmt::Display for BetTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BetTag::Nuke => write!(f, "Nuke"),
            BetTag::Sprinkle => write!(f, "Sprinkle"),
            BetTag::Trash => write!(f, "Trash"),
            BetTag::WorthALook => write!(f, "Worth a Look"),
        }
    }
}

/// User-set outcome of a logged bet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BetResult {
    Pending,
    Win,
    Loss,
}

impl Default for BetResult {
    fn default() -> Self {
        BetResult::Pending
    }
}

impl BetResult {
    /// Parse from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Some(BetResult::Pending),
            "win" | "won" => Some(BetResult::Win),
            "loss" | "lost" => Some(BetResult::Loss),
            _ => None,
        }
    }
}

impl fmt::Display for BetResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BetResult::Pending => write!(f, "Pending"),
            BetResult::Win => write!(f, "Win"),
            BetResult::Loss => write!(f, "Loss"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_keys_round_trip() {
        for method in DevigMethod::ALL {
            assert_eq!(DevigMethod::from_str(method.as_str()), Some(method));
        }
        assert_eq!(
            DevigMethod::from_str("Equal-Margin"),
            Some(DevigMethod::EqualMargin)
        );
        assert_eq!(DevigMethod::from_str("power"), None);
    }

    #[test]
    fn side_parsing_and_opposite() {
        assert_eq!(Side::from_str("A"), Some(Side::A));
        assert_eq!(Side::from_str(" b "), Some(Side::B));
        assert_eq!(Side::from_str("c"), None);
        assert_eq!(Side::A.opposite(), Side::B);
    }

    #[test]
    fn tag_labels() {
        assert_eq!(BetTag::WorthALook.to_string(), "Worth a Look");
        assert_eq!(BetResult::default(), BetResult::Pending);
        assert_eq!(BetResult::from_str("Win"), Some(BetResult::Win));
    }
}
