//! Shared domain types.
//!
//! These types are kept lightweight and serializable so they can be:
//!
//! - passed between pipeline stages in-memory
//! - exported to JSON/CSV
//! - rendered by the terminal and SVG presenters

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use clap::ValueEnum;
use num_complex::Complex;
use serde::{Deserialize, Serialize};

/// One normalized input row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub date: NaiveDate,
    /// Passenger count for the day.
    pub number: f64,
    /// Unit ticket price.
    pub price: f64,
    /// Calendar month of `date` (1..=12).
    pub month: u32,
    /// `number * price`, unrounded.
    pub revenue: f64,
}

impl Record {
    /// Build a record, deriving `month` and `revenue`.
    pub fn new(date: NaiveDate, number: f64, price: f64) -> Self {
        Self {
            date,
            number,
            price,
            month: date.month(),
            revenue: number * price,
        }
    }
}

/// Chronologically ordered passenger counts, one per record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailySeries {
    pub dates: Vec<NaiveDate>,
    pub values: Vec<f64>,
}

impl DailySeries {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Complex DFT coefficients paired positionally with their frequencies
/// (cycles/day).
#[derive(Debug, Clone, PartialEq)]
pub struct Spectrum {
    pub coefficients: Vec<Complex<f64>>,
    pub frequencies: Vec<f64>,
}

impl Spectrum {
    pub fn len(&self) -> usize {
        self.coefficients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coefficients.is_empty()
    }
}

/// Mean passenger count per calendar month. Months absent from the data have
/// no entry.
pub type MonthlyAverage = BTreeMap<u32, f64>;

/// Percentages of total revenue attributed to the two season groupings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RevenueFractions {
    pub summer_pct: f64,
    pub autumn_pct: f64,
}

/// A set of calendar months (1..=12).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<u32>", into = "Vec<u32>")]
pub struct SeasonMonths(Vec<u32>);

impl SeasonMonths {
    /// Validate and deduplicate a month list.
    pub fn new(months: impl IntoIterator<Item = u32>) -> Result<Self, String> {
        let mut out: Vec<u32> = Vec::new();
        for m in months {
            if !(1..=12).contains(&m) {
                return Err(format!("Invalid month {m} (expected 1..=12)."));
            }
            if !out.contains(&m) {
                out.push(m);
            }
        }
        out.sort_unstable();
        Ok(Self(out))
    }

    /// June, July, August.
    pub fn summer() -> Self {
        Self(vec![6, 7, 8])
    }

    /// September, October, November.
    pub fn autumn() -> Self {
        Self(vec![9, 10, 11])
    }

    pub fn contains(&self, month: u32) -> bool {
        self.0.contains(&month)
    }

    pub fn months(&self) -> &[u32] {
        &self.0
    }

    pub fn is_disjoint(&self, other: &SeasonMonths) -> bool {
        !self.0.iter().any(|m| other.contains(*m))
    }
}

impl TryFrom<Vec<u32>> for SeasonMonths {
    type Error = String;

    fn try_from(months: Vec<u32>) -> Result<Self, Self::Error> {
        Self::new(months)
    }
}

impl From<SeasonMonths> for Vec<u32> {
    fn from(months: SeasonMonths) -> Self {
        months.0
    }
}

impl FromStr for SeasonMonths {
    type Err = String;

    /// Parse a comma-separated month list, e.g. `6,7,8`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut months = Vec::new();
        for part in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let m = part
                .parse::<u32>()
                .map_err(|_| format!("Invalid month '{part}' (expected an integer 1..=12)."))?;
            months.push(m);
        }
        if months.is_empty() {
            return Err("Month list must not be empty.".to_string());
        }
        SeasonMonths::new(months)
    }
}

impl fmt::Display for SeasonMonths {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<&str> = self.0.iter().map(|&m| month_abbrev(m)).collect();
        write!(f, "{}", parts.join("/"))
    }
}

/// How missing or out-of-order days are handled before the Fourier stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum GapPolicy {
    /// Log each sampling problem and continue with the series as-is.
    Warn,
    /// Any gap or ordering violation is an error.
    Fail,
    /// Linearly interpolate missing days in the daily series.
    ///
    /// Ordering violations (duplicate or decreasing dates) still fail.
    Fill,
}

/// Where the comparison series drawn over the daily series comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OverlaySource {
    /// Low-order Fourier approximation of the loaded series.
    Fourier,
    /// Seeded synthetic sinusoid (demonstration only, not the loaded data).
    Demo,
}

/// Summary stats about the loaded dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetStats {
    pub n_records: usize,
    pub first_date: NaiveDate,
    pub last_date: NaiveDate,
    pub number_min: f64,
    pub number_max: f64,
    pub price_min: f64,
    pub price_max: f64,
    pub total_revenue: f64,
}

/// A strong periodic component of the daily series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DominantPeriod {
    pub bin: usize,
    /// Cycles per day.
    pub frequency: f64,
    /// Days per cycle.
    pub period_days: f64,
    pub power: f64,
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus environment defaults).
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    pub input_path: PathBuf,
    pub delimiter: u8,
    /// Free-text label stamped on every chart.
    pub label: String,

    pub summer_months: SeasonMonths,
    pub autumn_months: SeasonMonths,

    pub gap_policy: GapPolicy,
    pub overlay: OverlaySource,
    /// Number of harmonics kept by the Fourier approximation overlay.
    pub harmonics: usize,
    /// Seed for the demo overlay noise.
    pub seed: u64,
    /// Number of dominant periods listed in the summary.
    pub top_periods: usize,

    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,
    pub svg_dir: Option<PathBuf>,

    pub export_spectrum: Option<PathBuf>,
    pub export_summary: Option<PathBuf>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from("airline8.csv"),
            delimiter: b',',
            label: String::new(),
            summer_months: SeasonMonths::summer(),
            autumn_months: SeasonMonths::autumn(),
            gap_policy: GapPolicy::Warn,
            overlay: OverlaySource::Fourier,
            harmonics: 6,
            seed: 42,
            top_periods: 5,
            plot: true,
            plot_width: 100,
            plot_height: 20,
            svg_dir: None,
            export_spectrum: None,
            export_summary: None,
        }
    }
}

/// Three-letter English month abbreviation (`"???"` outside 1..=12).
pub fn month_abbrev(month: u32) -> &'static str {
    const NAMES: [&str; 12] = [
        "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
    ];
    month
        .checked_sub(1)
        .and_then(|i| NAMES.get(i as usize))
        .copied()
        .unwrap_or("???")
}
