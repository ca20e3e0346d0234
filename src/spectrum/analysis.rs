//! High-level spectral analysis of the daily series.
//!
//! Combines the transform with the frequency grid, and derives the views the
//! report needs: power spectrum, low-order Fourier approximation and the
//! strongest periodic components.

use num_complex::Complex;

use super::fft::{fft, fft_frequencies, ifft, power_spectrum};
use crate::domain::{DailySeries, DominantPeriod, Record, Spectrum};
use crate::error::AnalysisError;

/// One sample per day.
pub const SAMPLE_SPACING_DAYS: f64 = 1.0;

/// Daily passenger series in record order.
pub fn daily_series(records: &[Record]) -> DailySeries {
    DailySeries {
        dates: records.iter().map(|r| r.date).collect(),
        values: records.iter().map(|r| r.number).collect(),
    }
}

/// Transform the series and pair every coefficient with its frequency
/// (cycles/day).
pub fn analyze(series: &DailySeries) -> Result<Spectrum, AnalysisError> {
    let coefficients = fft(&series.values)?;
    let frequencies = fft_frequencies(coefficients.len(), SAMPLE_SPACING_DAYS);
    Ok(Spectrum {
        coefficients,
        frequencies,
    })
}

impl Spectrum {
    pub fn power(&self) -> Vec<f64> {
        power_spectrum(&self.coefficients)
    }

    /// `(frequency, power)` pairs for the non-negative half of the grid,
    /// the part that is plotted.
    pub fn positive_half(&self) -> Vec<(f64, f64)> {
        let half = self.len() / 2;
        self.frequencies
            .iter()
            .zip(self.power())
            .take(half.max(1))
            .map(|(&f, p)| (f, p))
            .collect()
    }
}

/// Reconstruct the series from DC plus the lowest `harmonics` frequency
/// pairs. With `harmonics >= N/2` this reproduces the input.
pub fn fourier_approximation(spectrum: &Spectrum, harmonics: usize) -> Result<Vec<f64>, AnalysisError> {
    let n = spectrum.len();
    let filtered: Vec<Complex<f64>> = spectrum
        .coefficients
        .iter()
        .enumerate()
        .map(|(k, &c)| {
            if k.min(n - k) <= harmonics {
                c
            } else {
                Complex::new(0.0, 0.0)
            }
        })
        .collect();

    Ok(ifft(&filtered)?.into_iter().map(|c| c.re).collect())
}

/// Strongest positive-frequency components, ordered by descending power.
pub fn dominant_periods(spectrum: &Spectrum, top: usize) -> Vec<DominantPeriod> {
    let power = spectrum.power();
    let mut out: Vec<DominantPeriod> = spectrum
        .frequencies
        .iter()
        .zip(power)
        .enumerate()
        .filter(|(_, (f, _))| **f > 0.0)
        .map(|(bin, (&frequency, power))| DominantPeriod {
            bin,
            frequency,
            period_days: 1.0 / frequency,
            power,
        })
        .collect();

    out.sort_by(|a, b| b.power.partial_cmp(&a.power).unwrap_or(std::cmp::Ordering::Equal));
    out.truncate(top);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::f64::consts::PI;

    fn series(values: Vec<f64>) -> DailySeries {
        let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        DailySeries {
            dates: start.iter_days().take(values.len()).collect(),
            values,
        }
    }

    #[test]
    fn spectrum_lengths_align() {
        let s = series((0..10).map(f64::from).collect());
        let spectrum = analyze(&s).unwrap();
        assert_eq!(spectrum.coefficients.len(), s.len());
        assert_eq!(spectrum.frequencies.len(), s.len());
        assert_eq!(spectrum.power().len(), s.len());
        assert_eq!(spectrum.positive_half().len(), 5);
    }

    #[test]
    fn empty_series_fails() {
        let err = analyze(&DailySeries::default()).unwrap_err();
        assert!(matches!(err, AnalysisError::EmptyInput(_)));
    }

    #[test]
    fn single_day_series() {
        let spectrum = analyze(&series(vec![7.0])).unwrap();
        assert_eq!(spectrum.frequencies, vec![0.0]);
        assert_eq!(spectrum.positive_half(), vec![(0.0, 49.0)]);
        assert!(dominant_periods(&spectrum, 3).is_empty());
    }

    #[test]
    fn weekly_cycle_is_dominant() {
        let values: Vec<f64> = (0..364)
            .map(|d| 500.0 + 80.0 * (2.0 * PI * d as f64 / 7.0).cos())
            .collect();
        let spectrum = analyze(&series(values)).unwrap();
        let top = dominant_periods(&spectrum, 1);
        assert_eq!(top.len(), 1);
        assert!((top[0].period_days - 7.0).abs() < 1e-9);
        assert_eq!(top[0].bin, 52);
    }

    #[test]
    fn full_harmonics_reproduce_series() {
        let values = vec![4.0, 8.0, 15.0, 16.0, 23.0, 42.0];
        let spectrum = analyze(&series(values.clone())).unwrap();
        let approx = fourier_approximation(&spectrum, 3).unwrap();
        for (a, b) in approx.iter().zip(&values) {
            assert!((a - b).abs() < 1e-9);
        }
    }

    #[test]
    fn zero_harmonics_gives_mean() {
        let values = vec![1.0, 2.0, 3.0, 6.0];
        let spectrum = analyze(&series(values)).unwrap();
        let approx = fourier_approximation(&spectrum, 0).unwrap();
        assert!(approx.iter().all(|v| (v - 3.0).abs() < 1e-12));
    }

    #[test]
    fn daily_series_keeps_record_order() {
        let d = |day| NaiveDate::from_ymd_opt(2023, 5, day).unwrap();
        let records = vec![Record::new(d(2), 5.0, 1.0), Record::new(d(1), 3.0, 1.0)];
        let s = daily_series(&records);
        assert_eq!(s.dates, vec![d(2), d(1)]);
        assert_eq!(s.values, vec![5.0, 3.0]);
    }
}
