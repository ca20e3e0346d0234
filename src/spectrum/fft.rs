//! Discrete Fourier transform of the daily passenger series.
//!
//! Conventions:
//! - forward transform is unnormalized: `X[k] = Σ x[n]·exp(-2πi·k·n/N)`
//! - inverse transform divides by `N`, so `ifft(fft(x)) == x`
//! - frequencies follow the usual FFT bin order: DC, positive frequencies,
//!   then negative frequencies (units: cycles per sample spacing)
//!
//! `rustfft` plans mixed-radix/Bluestein transforms, so any length works.

use num_complex::Complex;
use rustfft::FftPlanner;

use crate::error::AnalysisError;

/// Forward DFT of a real series.
pub fn fft(values: &[f64]) -> Result<Vec<Complex<f64>>, AnalysisError> {
    if values.is_empty() {
        return Err(AnalysisError::EmptyInput("cannot transform an empty series"));
    }

    let mut buffer: Vec<Complex<f64>> = values.iter().map(|&v| Complex::new(v, 0.0)).collect();
    let mut planner = FftPlanner::<f64>::new();
    planner.plan_fft_forward(buffer.len()).process(&mut buffer);
    Ok(buffer)
}

/// Inverse DFT (normalized by `1/N`).
pub fn ifft(coefficients: &[Complex<f64>]) -> Result<Vec<Complex<f64>>, AnalysisError> {
    if coefficients.is_empty() {
        return Err(AnalysisError::EmptyInput("cannot invert an empty spectrum"));
    }

    let mut buffer = coefficients.to_vec();
    let mut planner = FftPlanner::<f64>::new();
    planner.plan_fft_inverse(buffer.len()).process(&mut buffer);

    let scale = 1.0 / buffer.len() as f64;
    for c in buffer.iter_mut() {
        *c *= scale;
    }
    Ok(buffer)
}

/// Sample frequencies for an `n`-point transform with sample spacing `d`.
///
/// Bin `k` maps to `k/(n·d)` for `k <= (n-1)/2` and `(k-n)/(n·d)` otherwise,
/// e.g. `n = 4, d = 1` gives `[0, 0.25, -0.5, -0.25]`.
pub fn fft_frequencies(n: usize, d: f64) -> Vec<f64> {
    let span = n as f64 * d;
    let last_positive = n.saturating_sub(1) / 2;
    (0..n)
        .map(|k| {
            if k <= last_positive {
                k as f64 / span
            } else {
                (k as f64 - n as f64) / span
            }
        })
        .collect()
}

/// Squared magnitude of each coefficient.
pub fn power_spectrum(coefficients: &[Complex<f64>]) -> Vec<f64> {
    coefficients.iter().map(|c| c.norm_sqr()).collect()
}
