//! Session bet log
//!
//! A plain, caller-owned list of submitted bets. Entries are appended on
//! explicit submission, only their result is ever updated, and they are
//! removed by index. The log never outlives the session that owns it; the
//! CSV export in [`export`] is the only way out.

mod export;

pub use export::{export_csv, BetLogRecord, CSV_HEADER};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::path::Path;
use tracing::info;

use crate::error::OddsError;
use crate::odds::TwoSidedMarket;
use crate::types::{BetResult, DevigMethod, Side};
use crate::value::{ComparisonRequest, ValueQuote};

/// One submitted bet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BetLogEntry {
    pub timestamp: DateTime<Utc>,
    pub sharp: TwoSidedMarket,
    pub side: Side,
    /// Soft book decimal odds
    pub your_odds: f64,
    pub method: DevigMethod,
    pub edge_percent: f64,
    pub stake: f64,
    pub result: BetResult,
}

impl BetLogEntry {
    /// Entry for a priced comparison, stamped now
    pub fn from_quote(request: &ComparisonRequest, quote: &ValueQuote) -> Self {
        Self::at(Utc::now(), request, quote)
    }

    pub fn at(timestamp: DateTime<Utc>, request: &ComparisonRequest, quote: &ValueQuote) -> Self {
        Self {
            timestamp,
            sharp: request.sharp,
            side: quote.side,
            your_odds: request.your_odds,
            method: quote.method,
            edge_percent: quote.edge_percent,
            stake: quote.stake.stake_rounded(),
            result: BetResult::Pending,
        }
    }

    /// Profit of a settled bet; None while pending
    pub fn profit(&self) -> Option<f64> {
        match self.result {
            BetResult::Pending => None,
            BetResult::Win => Some(self.stake * (self.your_odds - 1.0)),
            BetResult::Loss => Some(-self.stake),
        }
    }
}

/// Aggregate view of the log
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogSummary {
    pub total: usize,
    pub pending: usize,
    pub wins: usize,
    pub losses: usize,
    pub total_staked: f64,
    /// Profit over settled bets
    pub profit: f64,
    /// Wins / settled, percent (0 when nothing settled)
    pub win_rate: f64,
    pub avg_edge_percent: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BetLog {
    entries: Vec<BetLogEntry>,
}

impl BetLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a bet; returns its index
    pub fn push(&mut self, entry: BetLogEntry) -> usize {
        self.entries.push(entry);
        self.entries.len() - 1
    }

    pub fn entries(&self) -> &[BetLogEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&BetLogEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Update the result of the bet at `index`
    pub fn set_result(&mut self, index: usize, result: BetResult) -> Result<(), OddsError> {
        let len = self.entries.len();
        let entry = self
            .entries
            .get_mut(index)
            .ok_or_else(|| out_of_range(index, len))?;
        entry.result = result;
        Ok(())
    }

    /// Remove and return the bet at `index`
    pub fn remove(&mut self, index: usize) -> Result<BetLogEntry, OddsError> {
        if index >= self.entries.len() {
            return Err(out_of_range(index, self.entries.len()));
        }
        Ok(self.entries.remove(index))
    }

    pub fn summary(&self) -> LogSummary {
        let mut summary = LogSummary {
            total: self.entries.len(),
            ..LogSummary::default()
        };

        for entry in &self.entries {
            summary.total_staked += entry.stake;
            summary.avg_edge_percent += entry.edge_percent;
            match entry.result {
                BetResult::Pending => summary.pending += 1,
                BetResult::Win => summary.wins += 1,
                BetResult::Loss => summary.losses += 1,
            }
            if let Some(profit) = entry.profit() {
                summary.profit += profit;
            }
        }

        if summary.total > 0 {
            summary.avg_edge_percent /= summary.total as f64;
        }
        let settled = summary.wins + summary.losses;
        if settled > 0 {
            summary.win_rate = summary.wins as f64 / settled as f64 * 100.0;
        }
        summary
    }

    /// Write the whole log as CSV to `path`, replacing any previous export
    pub fn export_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).context("Failed to create export directory")?;
            }
        }

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
            .with_context(|| format!("Failed to create export file {}", path.display()))?;

        export_csv(&self.entries, file)?;
        info!("Exported {} bets to {}", self.entries.len(), path.display());
        Ok(())
    }
}

fn out_of_range(index: usize, len: usize) -> OddsError {
    OddsError::InvalidParameter(format!(
        "bet index {} out of range for log of {}",
        index, len
    ))
}
