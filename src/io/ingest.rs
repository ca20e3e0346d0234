//! CSV ingest and normalization.
//!
//! This module turns a daily passenger/price table into a sequence of
//! `Record`s with derived `month` and `revenue` fields.
//!
//! Design goals:
//! - **Strict schema** for the required `Date`, `Number` and `Price` columns
//! - **Fail on bad rows**: a skipped row would silently shift the daily series
//! - **No reordering**: rows are kept in file order, sampling checks live in
//!   `io::sampling`

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use csv::StringRecord;
use tracing::{debug, info};

use crate::domain::{DatasetStats, Record};
use crate::error::AnalysisError;

const COL_DATE: &str = "date";
const COL_NUMBER: &str = "number";
const COL_PRICE: &str = "price";

/// Ingest output: records in file order plus summary stats.
#[derive(Debug, Clone)]
pub struct IngestedData {
    pub records: Vec<Record>,
    pub rows_read: usize,
    /// `None` when the table has a header but no rows.
    pub stats: Option<DatasetStats>,
}

/// Load records from a delimited file on disk.
pub fn load_records(path: &Path, delimiter: u8) -> Result<IngestedData, AnalysisError> {
    let file = File::open(path).map_err(|source| AnalysisError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let data = load_records_from_reader(file, delimiter)?;
    info!(
        path = %path.display(),
        rows = data.rows_read,
        "Loaded passenger table"
    );
    Ok(data)
}

/// Load records from any byte stream (file, stdin, in-memory buffer).
pub fn load_records_from_reader<R: Read>(reader: R, delimiter: u8) -> Result<IngestedData, AnalysisError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    let header_map = build_header_map(&headers);
    ensure_required_columns_exist(&header_map)?;

    let mut records = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        // +2: records() starts after the header, and lines are 1-based.
        let line = idx + 2;
        let row = result.map_err(|e| AnalysisError::parse(line, format!("CSV parse error: {e}")))?;
        records.push(parse_row(&row, &header_map, line)?);
    }

    debug!(rows = records.len(), "Parsed records");

    let stats = compute_stats(&records);
    Ok(IngestedData {
        rows_read: records.len(),
        records,
        stats,
    })
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet exports sometimes prefix the first header with a UTF-8 BOM.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn ensure_required_columns_exist(header_map: &HashMap<String, usize>) -> Result<(), AnalysisError> {
    for (col, display) in [(COL_DATE, "Date"), (COL_NUMBER, "Number"), (COL_PRICE, "Price")] {
        if !header_map.contains_key(col) {
            return Err(AnalysisError::Schema(display.to_string()));
        }
    }
    Ok(())
}

fn parse_row(record: &StringRecord, header_map: &HashMap<String, usize>, line: usize) -> Result<Record, AnalysisError> {
    let date_raw = get_required(record, header_map, COL_DATE).map_err(|e| AnalysisError::parse(line, e))?;
    let date = parse_date(date_raw).map_err(|e| AnalysisError::parse(line, e))?;

    let number = get_required(record, header_map, COL_NUMBER)
        .and_then(|s| parse_f64(s, "Number"))
        .map_err(|e| AnalysisError::parse(line, e))?;
    let price = get_required(record, header_map, COL_PRICE)
        .and_then(|s| parse_f64(s, "Price"))
        .map_err(|e| AnalysisError::parse(line, e))?;

    Ok(Record::new(date, number, price))
}

fn get_required<'a>(
    record: &'a StringRecord,
    header_map: &HashMap<String, usize>,
    name: &str,
) -> Result<&'a str, String> {
    let idx = header_map
        .get(name)
        .ok_or_else(|| format!("Missing required column: `{name}`"))?;
    record
        .get(*idx)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| format!("Missing required value: `{name}`"))
}

/// Parse a calendar date, discarding any time-of-day component.
pub fn parse_date(s: &str) -> Result<NaiveDate, String> {
    // Slash dates are month-first; a day-first reading is only tried when
    // the month-first one is impossible (e.g. `31/12/2023`).
    const FMTS: [&str; 6] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d/%m/%Y", "%d-%m-%Y", "%d.%m.%Y"];
    for fmt in FMTS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(d);
        }
    }

    const DATETIME_FMTS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];
    for fmt in DATETIME_FMTS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt.date());
        }
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.date_naive());
    }

    Err(format!(
        "Invalid date '{s}'. Expected one of: YYYY-MM-DD, YYYY/MM/DD, MM/DD/YYYY, DD/MM/YYYY, DD-MM-YYYY, DD.MM.YYYY."
    ))
}

fn parse_f64(s: &str, column: &str) -> Result<f64, String> {
    let v = s
        .parse::<f64>()
        .map_err(|_| format!("Invalid `{column}` value '{s}' (expected a number)."))?;
    if v.is_finite() {
        Ok(v)
    } else {
        Err(format!("Non-finite `{column}` value '{s}'."))
    }
}

fn compute_stats(records: &[Record]) -> Option<DatasetStats> {
    let first = records.first()?;
    let last = records.last()?;

    let mut number_min = f64::INFINITY;
    let mut number_max = f64::NEG_INFINITY;
    let mut price_min = f64::INFINITY;
    let mut price_max = f64::NEG_INFINITY;
    let mut total_revenue = 0.0;

    for r in records {
        number_min = number_min.min(r.number);
        number_max = number_max.max(r.number);
        price_min = price_min.min(r.price);
        price_max = price_max.max(r.price);
        total_revenue += r.revenue;
    }

    Some(DatasetStats {
        n_records: records.len(),
        first_date: first.date,
        last_date: last.date,
        number_min,
        number_max,
        price_min,
        price_max,
        total_revenue,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(csv: &str) -> Result<IngestedData, AnalysisError> {
        load_records_from_reader(csv.as_bytes(), b',')
    }

    #[test]
    fn loads_rows_and_derives_fields() {
        let data = load("Date,Number,Price,Carrier\n2023-01-01,100,2.5,XA\n2023-06-02,80,3\n").unwrap();
        assert_eq!(data.rows_read, 2);
        let r = &data.records[1];
        assert_eq!(r.date, NaiveDate::from_ymd_opt(2023, 6, 2).unwrap());
        assert_eq!(r.month, 6);
        assert_eq!(r.revenue, 80.0 * 3.0);

        let stats = data.stats.unwrap();
        assert_eq!(stats.number_min, 80.0);
        assert_eq!(stats.price_max, 3.0);
        assert_eq!(stats.total_revenue, 250.0 + 240.0);
    }

    #[test]
    fn headers_are_case_insensitive_and_bom_tolerant() {
        let data = load("\u{feff}date , NUMBER,price\n01/02/2023,5,1\n").unwrap();
        assert_eq!(data.records[0].month, 1);
    }

    #[test]
    fn slash_dates_are_month_first() {
        let data = load("Date,Number,Price\n01/02/2023,1,1\n12/31/2023,1,1\n").unwrap();
        assert_eq!(data.records[0].date, NaiveDate::from_ymd_opt(2023, 1, 2).unwrap());
        assert_eq!(data.records[0].month, 1);
        assert_eq!(data.records[1].date, NaiveDate::from_ymd_opt(2023, 12, 31).unwrap());
        assert_eq!(data.records[1].month, 12);
    }

    #[test]
    fn impossible_month_first_slash_date_falls_back_to_day_first() {
        assert_eq!(parse_date("31/12/2023").unwrap(), NaiveDate::from_ymd_opt(2023, 12, 31).unwrap());
    }

    #[test]
    fn missing_column_is_schema_error() {
        let err = load("Date,Number\n2023-01-01,5\n").unwrap_err();
        assert!(matches!(err, AnalysisError::Schema(ref c) if c == "Price"));
    }

    #[test]
    fn bad_date_is_parse_error_with_line() {
        let err = load("Date,Number,Price\n2023-01-01,1,1\nnot-a-date,1,1\n").unwrap_err();
        assert!(matches!(err, AnalysisError::Parse { line: 3, .. }));
    }

    #[test]
    fn empty_date_is_parse_error() {
        let err = load("Date,Number,Price\n,1,1\n").unwrap_err();
        assert!(matches!(err, AnalysisError::Parse { line: 2, .. }));
    }

    #[test]
    fn bad_number_is_parse_error() {
        let err = load("Date,Number,Price\n2023-01-01,many,1\n").unwrap_err();
        assert!(matches!(err, AnalysisError::Parse { line: 2, ref message } if message.contains("Number")));
    }

    #[test]
    fn header_only_yields_no_records() {
        let data = load("Date,Number,Price\n").unwrap();
        assert!(data.records.is_empty());
        assert!(data.stats.is_none());
    }

    #[test]
    fn parse_date_accepts_timestamps() {
        let d = NaiveDate::from_ymd_opt(2023, 3, 9).unwrap();
        assert_eq!(parse_date("2023-03-09 00:00:00").unwrap(), d);
        assert_eq!(parse_date("2023-03-09T12:30:00+02:00").unwrap(), d);
        assert_eq!(parse_date("09.03.2023").unwrap(), d);
        assert!(parse_date("2023-13-01").is_err());
    }

    #[test]
    fn semicolon_delimiter() {
        let data = load_records_from_reader("Date;Number;Price\n2023-01-01;3;4\n".as_bytes(), b';').unwrap();
        assert_eq!(data.records[0].revenue, 12.0);
    }
}
