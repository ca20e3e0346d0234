//! Spectral analysis of the daily passenger series.

pub mod analysis;
pub mod fft;

pub use analysis::{SAMPLE_SPACING_DAYS, analyze, daily_series, dominant_periods, fourier_approximation};
pub use fft::{fft, fft_frequencies, ifft, power_spectrum};
