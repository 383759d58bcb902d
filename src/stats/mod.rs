//! Completed-game history.
//!
//! Records are stored as one JSON array under [`STATS_KEY`] using the field
//! names of the browser version (`date`, `timeUsed`, `operationsUsed`,
//! `matrixSize`, `seed`), so an exported `localStorage` value loads as is.
//! The whole array is rewritten after every win.

pub mod store;

use std::fmt::Display;

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use log::warn;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use store::{FileStore, KeyValueStore, MemoryStore};

pub const STATS_KEY: &str = "rowOperationPuzzleStats";
pub const CSV_HEADER: [&str; 5] = ["Date", "Time (ms)", "Operations", "Matrix Size", "Seed"];

#[derive(Debug, Error)]
pub enum StatsError {
    #[error("No stats to export yet. Play some games first!")]
    NothingToExport,

    #[error("stats serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV export produced invalid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

/// One solved puzzle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatRecord {
    pub date: DateTime<Utc>,
    #[serde(rename = "timeUsed")]
    pub time_used_ms: i64,
    #[serde(rename = "operationsUsed")]
    pub operations_used: u32,
    #[serde(rename = "matrixSize")]
    pub matrix_size: String,
    pub seed: u64,
}

impl StatRecord {
    pub fn new(
        date: DateTime<Utc>,
        time_used_ms: i64,
        operations_used: u32,
        rows: usize,
        cols: usize,
        seed: u64,
    ) -> Self {
        StatRecord {
            date,
            time_used_ms,
            operations_used,
            matrix_size: format!("{}x{}", rows, cols),
            seed,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatsHistory {
    records: Vec<StatRecord>,
}

impl StatsHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the history from `store`. Missing or unreadable data gives an empty history.
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        let raw = match store.get(STATS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Self::default(),
            Err(e) => {
                warn!("Could not read saved stats: {:#}", e);
                return Self::default();
            }
        };
        match serde_json::from_str::<Vec<StatRecord>>(&raw) {
            Ok(records) => StatsHistory { records },
            Err(e) => {
                warn!("Ignoring corrupt saved stats: {}", e);
                Self::default()
            }
        }
    }

    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &mut S) -> Result<(), StatsError> {
        let json = serde_json::to_string(&self.records)?;
        store.set(STATS_KEY, &json)?;
        Ok(())
    }

    pub fn push(&mut self, record: StatRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[StatRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// CSV with dates in the local time zone.
    pub fn export_csv(&self) -> Result<String, StatsError> {
        self.export_csv_in(&Local)
    }

    pub fn export_csv_in<Tz>(&self, tz: &Tz) -> Result<String, StatsError>
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        if self.records.is_empty() {
            return Err(StatsError::NothingToExport);
        }
        to_csv(&self.records, tz)
    }
}

/// Date as a browser `toLocaleString()` would print it for en-US.
fn locale_date<Tz>(date: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    date.with_timezone(tz)
        .format("%-m/%-d/%Y, %-I:%M:%S %p")
        .to_string()
}

/// Header plus one row per record, `\n` separated with no trailing newline.
/// The date contains a comma, so the writer quotes it.
pub fn to_csv<Tz>(records: &[StatRecord], tz: &Tz) -> Result<String, StatsError>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    writer.write_record(CSV_HEADER)?;
    for record in records {
        writer.write_record([
            locale_date(&record.date, tz),
            record.time_used_ms.to_string(),
            record.operations_used.to_string(),
            record.matrix_size.clone(),
            record.seed.to_string(),
        ])?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))?;
    let mut out = String::from_utf8(bytes)?;
    if out.ends_with('\n') {
        out.pop();
    }
    Ok(out)
}

/// File name offered for an export made on `day`.
pub fn export_file_name(day: NaiveDate) -> String {
    format!("row_operation_puzzle_stats_{}.csv", day.format("%Y-%m-%d"))
}
