//! CSV export of the bet log
//!
//! Column order is fixed so successive exports diff cleanly.

use anyhow::{Context, Result};
use csv::WriterBuilder;
use serde::{Deserialize, Serialize};
use std::io::Write;

use super::BetLogEntry;
use crate::odds::Odds;
use crate::value::round2;

pub const CSV_HEADER: &str = "Date,Side,Your Odds,Edge %,Stake,Result";

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One exported row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BetLogRecord {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Side")]
    pub side: String,
    #[serde(rename = "Your Odds")]
    pub your_odds: String,
    #[serde(rename = "Edge %")]
    pub edge_percent: f64,
    #[serde(rename = "Stake")]
    pub stake: f64,
    #[serde(rename = "Result")]
    pub result: String,
}

impl From<&BetLogEntry> for BetLogRecord {
    fn from(entry: &BetLogEntry) -> Self {
        Self {
            date: entry.timestamp.format(DATE_FORMAT).to_string(),
            side: entry.side.to_string(),
            your_odds: Odds::Decimal(entry.your_odds).to_string(),
            edge_percent: entry.edge_percent,
            stake: round2(entry.stake),
            result: entry.result.to_string(),
        }
    }
}

/// Serialize `entries` as CSV (header included) into `writer`
pub fn export_csv<W: Write>(entries: &[BetLogEntry], writer: W) -> Result<()> {
    let mut csv_writer = WriterBuilder::new().has_headers(false).from_writer(writer);

    // header written explicitly so an empty log still exports one
    csv_writer
        .write_record(CSV_HEADER.split(','))
        .context("Failed to write bet log header")?;
    for entry in entries {
        csv_writer
            .serialize(BetLogRecord::from(entry))
            .context("Failed to write bet log record")?;
    }
    csv_writer.flush().context("Failed to flush bet log export")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::betlog::BetLog;
    use crate::odds::TwoSidedMarket;
    use crate::types::{BetResult, DevigMethod, Side};
    use chrono::{TimeZone, Utc};
    use csv::ReaderBuilder;
    use std::fs;
    use std::path::PathBuf;

    fn entry(side: Side, yours: f64, edge: f64, stake: f64) -> BetLogEntry {
        BetLogEntry {
            timestamp: Utc.with_ymd_and_hms(2026, 3, 14, 18, 30, 5).unwrap(),
            sharp: TwoSidedMarket::new(1.91, 1.91).unwrap(),
            side,
            your_odds: yours,
            method: DevigMethod::EqualMargin,
            edge_percent: edge,
            stake,
            result: BetResult::Pending,
        }
    }

    fn temp_data_dir(test_name: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "trueline_betlog_{}_{}",
            test_name,
            uuid::Uuid::new_v4()
        ))
    }

    #[test]
    fn empty_log_exports_header_only() {
        let mut buf = Vec::new();
        export_csv(&[], &mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), format!("{}\n", CSV_HEADER));
    }

    #[test]
    fn rows_follow_header_order() {
        let mut buf = Vec::new();
        let mut won = entry(Side::B, 2.1, 4.74, 59.0);
        won.result = BetResult::Win;
        export_csv(&[entry(Side::A, 2.05, 1.5, 12.346), won], &mut buf).unwrap();

        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some(CSV_HEADER));
        assert_eq!(
            lines.next(),
            Some("2026-03-14 18:30:05,Side A,2.05,1.5,12.35,Pending")
        );
        assert_eq!(
            lines.next(),
            Some("2026-03-14 18:30:05,Side B,2.10,4.74,59.0,Win")
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn export_reads_back() {
        let mut buf = Vec::new();
        export_csv(&[entry(Side::A, 1.95, -2.0, 0.0)], &mut buf).unwrap();

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .from_reader(buf.as_slice());
        let row: BetLogRecord = reader
            .deserialize()
            .next()
            .expect("expected one row")
            .expect("row should deserialize");
        assert_eq!(row.side, "Side A");
        assert_eq!(row.your_odds, "1.95");
        assert_eq!(row.edge_percent, -2.0);
        assert_eq!(row.result, "Pending");
    }

    #[test]
    fn export_to_path_replaces_previous_file() {
        let data_dir = temp_data_dir("export");
        let path = data_dir.join("bets.csv");

        let mut log = BetLog::new();
        log.push(entry(Side::A, 2.05, 1.5, 10.0));
        log.push(entry(Side::B, 2.2, 3.0, 20.0));
        log.export_to_path(&path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap().lines().count(), 3);

        log.remove(0).unwrap();
        log.export_to_path(&path).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 2);
        assert!(content.contains("Side B"));

        let _ = fs::remove_dir_all(&data_dir);
    }
}
