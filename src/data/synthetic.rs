//! Seeded synthetic series for demonstrating the overlay chart.
//!
//! The demo is a yearly sinusoid sampled daily with Gaussian noise; the clean
//! sinusoid is returned as the overlay. It has nothing to do with the loaded
//! passenger data, so callers must flag it whenever it is shown.

use chrono::{Datelike, NaiveDate};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Normal};

use crate::domain::DailySeries;
use crate::error::AppError;

pub const DEMO_DAYS: usize = 100;
pub const DEMO_NOISE_STD: f64 = 0.1;
const DAYS_PER_YEAR: f64 = 365.25;

/// Noisy demo series plus its noise-free overlay.
#[derive(Debug, Clone)]
pub struct DemoOverlay {
    pub series: DailySeries,
    pub overlay: Vec<f64>,
}

/// Generate `days` daily samples starting at `start`.
pub fn demo_overlay(start: NaiveDate, days: usize, seed: u64) -> Result<DemoOverlay, AppError> {
    let mut rng = StdRng::seed_from_u64(seed);
    let normal = Normal::new(0.0, DEMO_NOISE_STD)
        .map_err(|e| AppError::new(2, format!("Noise distribution error: {e}")))?;

    let dates: Vec<NaiveDate> = start.iter_days().take(days).collect();
    let overlay: Vec<f64> = dates
        .iter()
        .map(|d| (2.0 * std::f64::consts::PI * f64::from(d.ordinal()) / DAYS_PER_YEAR).sin())
        .collect();
    let values = overlay.iter().map(|&v| v + normal.sample(&mut rng)).collect();

    Ok(DemoOverlay {
        series: DailySeries { dates, values },
        overlay,
    })
}

/// First day of the demo series.
pub fn demo_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 1, 1).unwrap_or(NaiveDate::MIN)
}
