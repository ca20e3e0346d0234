//! Seasonal aggregates over the record set.
//!
//! - monthly mean passenger counts
//! - share of total revenue falling in two month groupings
//! - monthly revenue totals (report table)

use std::collections::BTreeMap;

use crate::domain::{MonthlyAverage, Record, RevenueFractions, SeasonMonths};
use crate::error::AnalysisError;

/// Mean passenger count per calendar month present in the data.
pub fn monthly_average(records: &[Record]) -> Result<MonthlyAverage, AnalysisError> {
    if records.is_empty() {
        return Err(AnalysisError::EmptyInput("monthly average of zero records"));
    }

    let mut sums: BTreeMap<u32, (f64, usize)> = BTreeMap::new();
    for r in records {
        let entry = sums.entry(r.month).or_insert((0.0, 0));
        entry.0 += r.number;
        entry.1 += 1;
    }

    Ok(sums
        .into_iter()
        .map(|(month, (sum, count))| (month, sum / count as f64))
        .collect())
}

/// Percentage of total revenue earned in `summer` and `autumn` months.
///
/// Records in neither grouping only count towards the total. A zero total
/// (including an empty record set) is `DivisionByZero`.
pub fn revenue_fractions(
    records: &[Record],
    summer: &SeasonMonths,
    autumn: &SeasonMonths,
) -> Result<RevenueFractions, AnalysisError> {
    let mut total = 0.0;
    let mut summer_revenue = 0.0;
    let mut autumn_revenue = 0.0;

    for r in records {
        total += r.revenue;
        if summer.contains(r.month) {
            summer_revenue += r.revenue;
        }
        if autumn.contains(r.month) {
            autumn_revenue += r.revenue;
        }
    }

    if total == 0.0 {
        return Err(AnalysisError::DivisionByZero);
    }

    Ok(RevenueFractions {
        summer_pct: summer_revenue / total * 100.0,
        autumn_pct: autumn_revenue / total * 100.0,
    })
}

/// Total revenue per calendar month present in the data.
pub fn monthly_revenue_totals(records: &[Record]) -> BTreeMap<u32, f64> {
    let mut out = BTreeMap::new();
    for r in records {
        *out.entry(r.month).or_insert(0.0) += r.revenue;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn rec(m: u32, d: u32, number: f64, price: f64) -> Record {
        Record::new(NaiveDate::from_ymd_opt(2023, m, d).unwrap(), number, price)
    }

    fn four_records() -> Vec<Record> {
        vec![
            rec(1, 1, 100.0, 2.0),
            rec(6, 1, 100.0, 2.0),
            rec(7, 1, 200.0, 3.0),
            rec(10, 1, 50.0, 4.0),
        ]
    }

    #[test]
    fn revenue_fractions_reference_case() {
        let f = revenue_fractions(&four_records(), &SeasonMonths::summer(), &SeasonMonths::autumn()).unwrap();
        assert!((f.summer_pct - 800.0 / 1200.0 * 100.0).abs() < 1e-9);
        assert!((f.autumn_pct - 200.0 / 1200.0 * 100.0).abs() < 1e-9);
        assert_eq!(format!("{:.2}", f.summer_pct), "66.67");
        assert_eq!(format!("{:.2}", f.autumn_pct), "16.67");
        assert!(f.summer_pct + f.autumn_pct <= 100.0);
    }

    #[test]
    fn fractions_sum_to_hundred_when_groups_cover_everything() {
        let records = vec![rec(6, 3, 10.0, 1.0), rec(9, 3, 30.0, 1.0)];
        let f = revenue_fractions(&records, &SeasonMonths::summer(), &SeasonMonths::autumn()).unwrap();
        assert!((f.summer_pct + f.autumn_pct - 100.0).abs() < 1e-9);
    }

    #[test]
    fn custom_season_boundaries() {
        let winter = SeasonMonths::new([12, 1, 2]).unwrap();
        let spring = SeasonMonths::new([3, 4, 5]).unwrap();
        let f = revenue_fractions(&four_records(), &winter, &spring).unwrap();
        assert!((f.summer_pct - 200.0 / 1200.0 * 100.0).abs() < 1e-9);
        assert_eq!(f.autumn_pct, 0.0);
    }

    #[test]
    fn empty_records() {
        assert!(matches!(monthly_average(&[]), Err(AnalysisError::EmptyInput(_))));
        assert!(matches!(
            revenue_fractions(&[], &SeasonMonths::summer(), &SeasonMonths::autumn()),
            Err(AnalysisError::DivisionByZero)
        ));
    }

    #[test]
    fn zero_revenue_is_division_by_zero() {
        let records = vec![rec(6, 1, 100.0, 0.0)];
        let err = revenue_fractions(&records, &SeasonMonths::summer(), &SeasonMonths::autumn()).unwrap_err();
        assert!(matches!(err, AnalysisError::DivisionByZero));
    }

    #[test]
    fn monthly_average_only_present_months_within_bounds() {
        let records = vec![
            rec(1, 1, 10.0, 1.0),
            rec(1, 2, 20.0, 1.0),
            rec(1, 3, 60.0, 1.0),
            rec(3, 1, 5.0, 1.0),
        ];
        let avg = monthly_average(&records).unwrap();
        assert_eq!(avg.len(), 2);
        assert!(!avg.contains_key(&2));
        assert!((avg[&1] - 30.0).abs() < 1e-12);
        assert_eq!(avg[&3], 5.0);

        for (month, mean) in &avg {
            let vals: Vec<f64> = records.iter().filter(|r| r.month == *month).map(|r| r.number).collect();
            let lo = vals.iter().copied().fold(f64::INFINITY, f64::min);
            let hi = vals.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            assert!(*mean >= lo && *mean <= hi);
        }
    }

    #[test]
    fn monthly_revenue_totals_group_by_month() {
        let totals = monthly_revenue_totals(&four_records());
        assert_eq!(totals[&7], 600.0);
        assert_eq!(totals.values().sum::<f64>(), 1200.0);
    }
}
