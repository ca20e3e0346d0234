//! Daily sampling checks.
//!
//! The Fourier stage treats the passenger series as one sample per day with
//! no gaps. The loader keeps rows in file order, so this module inspects the
//! dates and applies the configured `GapPolicy` before the series reaches
//! the spectral analyzer.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::warn;

use crate::domain::{DailySeries, GapPolicy, Record};
use crate::error::AnalysisError;
use crate::spectrum::daily_series;

/// A run of missing days between two consecutive records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateGap {
    pub after: NaiveDate,
    pub before: NaiveDate,
    pub missing_days: i64,
}

/// Two consecutive records whose dates do not increase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OrderViolation {
    pub index: usize,
    pub prev: NaiveDate,
    pub next: NaiveDate,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SamplingReport {
    pub gaps: Vec<DateGap>,
    pub order_violations: Vec<OrderViolation>,
}

impl SamplingReport {
    pub fn is_uniform(&self) -> bool {
        self.gaps.is_empty() && self.order_violations.is_empty()
    }

    pub fn missing_days(&self) -> i64 {
        self.gaps.iter().map(|g| g.missing_days).sum()
    }
}

/// Inspect consecutive record dates for gaps and ordering problems.
pub fn check_daily_sampling(records: &[Record]) -> SamplingReport {
    let mut report = SamplingReport::default();
    for (i, pair) in records.windows(2).enumerate() {
        let (prev, next) = (pair[0].date, pair[1].date);
        let step = (next - prev).num_days();
        if step <= 0 {
            report.order_violations.push(OrderViolation {
                index: i + 1,
                prev,
                next,
            });
        } else if step > 1 {
            report.gaps.push(DateGap {
                after: prev,
                before: next,
                missing_days: step - 1,
            });
        }
    }
    report
}

/// Build the daily passenger series, applying `policy` to sampling problems.
///
/// Returns the series together with the report it was built from.
pub fn prepare_daily_series(
    records: &[Record],
    policy: GapPolicy,
) -> Result<(DailySeries, SamplingReport), AnalysisError> {
    let report = check_daily_sampling(records);
    let raw = daily_series(records);

    if report.is_uniform() {
        return Ok((raw, report));
    }

    match policy {
        GapPolicy::Warn => {
            for v in &report.order_violations {
                warn!(index = v.index, prev = %v.prev, next = %v.next, "Dates are not increasing");
            }
            for g in &report.gaps {
                warn!(after = %g.after, before = %g.before, missing = g.missing_days, "Missing days in daily series");
            }
            Ok((raw, report))
        }
        GapPolicy::Fail => {
            let first = report
                .order_violations
                .first()
                .map(|v| (v.prev, v.next))
                .or_else(|| report.gaps.first().map(|g| (g.after, g.before)));
            match first {
                Some((prev, next)) => Err(AnalysisError::gap_between(prev, next)),
                None => Ok((raw, report)),
            }
        }
        GapPolicy::Fill => {
            if let Some(v) = report.order_violations.first() {
                return Err(AnalysisError::gap_between(v.prev, v.next));
            }
            let filled = fill_gaps(&raw);
            warn!(
                filled = report.missing_days(),
                gaps = report.gaps.len(),
                "Interpolated missing days in daily series"
            );
            Ok((filled, report))
        }
    }
}

/// Linearly interpolate values for missing days. Assumes strictly
/// increasing dates.
fn fill_gaps(series: &DailySeries) -> DailySeries {
    let mut out = DailySeries::default();
    for i in 0..series.len() {
        let (d0, v0) = (series.dates[i], series.values[i]);
        out.dates.push(d0);
        out.values.push(v0);

        let Some((&d1, &v1)) = series.dates.get(i + 1).zip(series.values.get(i + 1)) else {
            break;
        };
        let step = (d1 - d0).num_days();
        for k in 1..step {
            let Some(d) = d0.checked_add_days(chrono::Days::new(k as u64)) else {
                break;
            };
            let u = k as f64 / step as f64;
            out.dates.push(d);
            out.values.push(v0 + u * (v1 - v0));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(y: i32, m: u32, d: u32, n: f64) -> Record {
        Record::new(NaiveDate::from_ymd_opt(y, m, d).unwrap(), n, 1.0)
    }

    #[test]
    fn contiguous_days_are_uniform() {
        let records = vec![rec(2023, 12, 30, 1.0), rec(2023, 12, 31, 2.0), rec(2024, 1, 1, 3.0)];
        let report = check_daily_sampling(&records);
        assert!(report.is_uniform());
    }

    #[test]
    fn detects_gaps_and_duplicates() {
        let records = vec![
            rec(2023, 1, 1, 1.0),
            rec(2023, 1, 4, 2.0),
            rec(2023, 1, 4, 2.0),
            rec(2023, 1, 3, 2.0),
        ];
        let report = check_daily_sampling(&records);
        assert_eq!(report.gaps.len(), 1);
        assert_eq!(report.gaps[0].missing_days, 2);
        assert_eq!(report.missing_days(), 2);
        assert_eq!(report.order_violations.len(), 2);
        assert_eq!(report.order_violations[0].index, 2);
    }

    #[test]
    fn warn_policy_keeps_series_unchanged() {
        let records = vec![rec(2023, 1, 1, 1.0), rec(2023, 1, 3, 3.0)];
        let (series, report) = prepare_daily_series(&records, GapPolicy::Warn).unwrap();
        assert_eq!(series.values, vec![1.0, 3.0]);
        assert!(!report.is_uniform());
    }

    #[test]
    fn fail_policy_rejects_gap() {
        let records = vec![rec(2023, 1, 1, 1.0), rec(2023, 1, 3, 3.0)];
        let err = prepare_daily_series(&records, GapPolicy::Fail).unwrap_err();
        assert!(matches!(err, AnalysisError::Gap(_)));
    }

    #[test]
    fn fill_policy_interpolates_missing_days() {
        let records = vec![rec(2023, 1, 1, 1.0), rec(2023, 1, 4, 4.0), rec(2023, 1, 5, 0.0)];
        let (series, _) = prepare_daily_series(&records, GapPolicy::Fill).unwrap();
        assert_eq!(series.len(), 5);
        assert_eq!(series.dates[1], NaiveDate::from_ymd_opt(2023, 1, 2).unwrap());
        let expected = [1.0, 2.0, 3.0, 4.0, 0.0];
        for (got, want) in series.values.iter().zip(expected) {
            assert!((got - want).abs() < 1e-12);
        }
    }

    #[test]
    fn fill_policy_still_rejects_disorder() {
        let records = vec![rec(2023, 1, 2, 1.0), rec(2023, 1, 1, 1.0)];
        let err = prepare_daily_series(&records, GapPolicy::Fill).unwrap_err();
        assert!(matches!(err, AnalysisError::Gap(_)));
    }

    #[test]
    fn empty_and_single_records_are_uniform() {
        assert!(check_daily_sampling(&[]).is_uniform());
        assert!(check_daily_sampling(&[rec(2023, 1, 1, 1.0)]).is_uniform());
    }
}
