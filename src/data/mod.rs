pub mod loader;

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

use crate::analysis::selection::Selection;

/// One cleaned market observation. Required fields are plain values, so a
/// constructed record can never be missing them; the optional price bounds
/// stay `None` when the source value failed numeric coercion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceRecord {
    pub arrival_date: NaiveDate,
    pub market: String,
    pub commodity: String,
    pub min_price: Option<f64>,
    pub modal_price: f64,
    pub max_price: Option<f64>,
}

/// Ordered collection of cleaned records. No uniqueness constraint on any
/// column: several records may share a date, market, or commodity.
#[derive(Debug, Clone, Default)]
pub struct PriceTable {
    records: Vec<PriceRecord>,
}

impl PriceTable {
    pub fn new(records: Vec<PriceRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[PriceRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The table's own reference date: the minimum `arrival_date`.
    /// Recomputed from the current row set, so a selected sub-table gets
    /// its own epoch.
    pub fn epoch(&self) -> Option<NaiveDate> {
        self.records.iter().map(|r| r.arrival_date).min()
    }

    /// Earliest and latest arrival dates in the table.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.epoch()?;
        let last = self.records.iter().map(|r| r.arrival_date).max()?;
        Some((first, last))
    }

    /// Per-row day offset from `epoch()`, in source order. This is the sole
    /// regression feature. Empty when the table is empty.
    pub fn days_since_epoch(&self) -> Vec<i64> {
        match self.epoch() {
            Some(epoch) => self
                .records
                .iter()
                .map(|r| (r.arrival_date - epoch).num_days())
                .collect(),
            None => Vec::new(),
        }
    }

    /// Sub-table of rows matching every specified criterion. An empty
    /// result is valid; it is not an error.
    pub fn select(&self, selection: &Selection) -> PriceTable {
        PriceTable::new(
            self.records
                .iter()
                .filter(|r| selection.matches(r))
                .cloned()
                .collect(),
        )
    }
}

/// Row counts from one cleaning pass: how many rows the source yielded and
/// how many survived. Callers surface this as "N of M rows retained".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CleanReport {
    pub rows_read: usize,
    pub rows_retained: usize,
}

impl CleanReport {
    pub fn rows_dropped(&self) -> usize {
        self.rows_read - self.rows_retained
    }
}

#[derive(Debug, Error)]
pub enum DataError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Missing required column: {0}")]
    MissingColumn(String),
    #[error("No valid rows after cleaning ({rows_read} read)")]
    NoValidRows { rows_read: usize },
}

pub type Result<T> = std::result::Result<T, DataError>;
