use super::{CleanReport, DataError, PriceRecord, PriceTable, Result};
use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord};
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

const REQUIRED_COLUMNS: [&str; 4] = ["arrival_date", "market", "commodity", "modal_price"];

/// Date formats accepted by the cleaner, tried in order. ISO first since it
/// is unambiguous; the remaining formats follow the day-first convention of
/// the mandi reports this data comes from (DD before MM).
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%d-%m-%Y", "%d/%m/%Y"];

pub struct DataLoader;

impl DataLoader {
    /// Load a CSV file and run the cleaning pipeline over it.
    ///
    /// Fails only when the source is unreadable as tabular data, a required
    /// column is absent, or zero valid rows remain. Individual bad rows are
    /// dropped, never fatal; the returned [`CleanReport`] carries the
    /// read/retained counts.
    pub fn load_and_clean<P: AsRef<Path>>(path: P) -> Result<(PriceTable, CleanReport)> {
        let rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_path(&path)?;
        Self::clean_from_reader(rdr)
    }

    /// Same pipeline over any CSV reader, e.g. an in-memory source.
    pub fn clean_from_reader<R: Read>(mut rdr: csv::Reader<R>) -> Result<(PriceTable, CleanReport)> {
        let headers = rdr.headers()?.clone();
        let columns = Self::column_indices(&headers);

        for column in REQUIRED_COLUMNS {
            if !columns.contains_key(column) {
                return Err(DataError::MissingColumn(column.to_string()));
            }
        }

        let arrival_date = columns["arrival_date"];
        let market = columns["market"];
        let commodity = columns["commodity"];
        let modal_price = columns["modal_price"];
        let min_price = columns.get("min_price").copied();
        let max_price = columns.get("max_price").copied();

        let mut rows_read = 0usize;
        let mut records = Vec::new();

        for result in rdr.records() {
            rows_read += 1;
            // Structurally malformed rows are skipped, not fatal.
            let row = match result {
                Ok(row) => row,
                Err(_) => continue,
            };

            // Coerce first, then drop rows missing any required field.
            let date = Self::field(&row, arrival_date).and_then(Self::coerce_date);
            let market = Self::field(&row, market).and_then(Self::coerce_identifier);
            let commodity = Self::field(&row, commodity).and_then(Self::coerce_identifier);
            let modal = Self::field(&row, modal_price).and_then(Self::coerce_price);

            let (Some(date), Some(market), Some(commodity), Some(modal)) =
                (date, market, commodity, modal)
            else {
                continue;
            };

            records.push(PriceRecord {
                arrival_date: date,
                market,
                commodity,
                min_price: min_price
                    .and_then(|i| Self::field(&row, i))
                    .and_then(Self::coerce_price),
                modal_price: modal,
                max_price: max_price
                    .and_then(|i| Self::field(&row, i))
                    .and_then(Self::coerce_price),
            });
        }

        if records.is_empty() {
            return Err(DataError::NoValidRows { rows_read });
        }

        let report = CleanReport {
            rows_read,
            rows_retained: records.len(),
        };
        Ok((PriceTable::new(records), report))
    }

    /// Case-insensitive header name → column index. A UTF-8 BOM on the
    /// first header is stripped. First occurrence wins on duplicates.
    fn column_indices(headers: &StringRecord) -> HashMap<String, usize> {
        let mut columns = HashMap::new();
        for (i, name) in headers.iter().enumerate() {
            let name = name.trim_start_matches('\u{feff}').trim().to_lowercase();
            columns.entry(name).or_insert(i);
        }
        columns
    }

    fn field(row: &StringRecord, index: usize) -> Option<&str> {
        row.get(index).map(str::trim).filter(|s| !s.is_empty())
    }

    /// Unparseable dates become missing, never a guessed date.
    fn coerce_date(value: &str) -> Option<NaiveDate> {
        DATE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
    }

    fn coerce_identifier(value: &str) -> Option<String> {
        Some(value.to_string())
    }

    /// Prices must coerce to a finite, non-negative number; anything else
    /// is missing.
    fn coerce_price(value: &str) -> Option<f64> {
        value
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && *v >= 0.0)
    }
}
