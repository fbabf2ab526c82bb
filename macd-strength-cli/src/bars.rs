//! CSV bar loading.
//!
//! Columns: `timestamp` (epoch milliseconds), `open`, `high`, `low`, `close`, `volume`.
//! Rows must already be in strictly increasing timestamp order.

use anyhow::{Context, Result};
use chrono::DateTime;
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

use macd_strength_core::domain::{Bar, BarSeries};

#[derive(Debug, Deserialize)]
struct CsvBar {
    timestamp: i64,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: f64,
}

pub fn read_bars<R: Read>(reader: R) -> Result<BarSeries> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut bars = Vec::new();

    for (row, record) in rdr.deserialize::<CsvBar>().enumerate() {
        let raw = record.with_context(|| format!("malformed bar at row {}", row + 1))?;
        let timestamp = DateTime::from_timestamp_millis(raw.timestamp)
            .with_context(|| format!("timestamp {} out of range at row {}", raw.timestamp, row + 1))?;
        let bar = Bar::new(timestamp, raw.open, raw.high, raw.low, raw.close, raw.volume);
        if !bar.is_sane() {
            tracing::warn!(row = row + 1, %timestamp, "bar fails OHLC sanity check");
        }
        bars.push(bar);
    }

    Ok(BarSeries::new(bars)?)
}

pub fn load_bars(path: &Path) -> Result<BarSeries> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("failed to open bar file {}", path.display()))?;
    read_bars(file).with_context(|| format!("failed to load bars from {}", path.display()))
}
