//! SVG report charts rendered with Plotters.
//!
//! One file per chart, mirroring the terminal charts:
//! - `overlay.svg`: daily series + comparison series
//! - `monthly_average.svg`: bars per calendar month
//! - `power_spectrum.svg`: power over the non-negative frequencies
//! - `power_spectrum_revenue.svg`: same, annotated with revenue fractions
//!
//! The same guards as the terminal charts apply: a chart whose inputs are
//! empty or misaligned is skipped with a warning, not an error.

use std::error::Error;
use std::fs::create_dir_all;
use std::path::{Path, PathBuf};

use plotters::coord::Shift;
use plotters::prelude::*;
use tracing::{info, warn};

use crate::app::pipeline::{AnalysisOutput, OverlayPayload};
use crate::domain::{AnalysisConfig, MonthlyAverage, RevenueFractions, month_abbrev};
use crate::error::AppError;

const SIZE: (u32, u32) = (1200, 600);

const SERIES_BLUE: RGBColor = RGBColor(30, 144, 255);
const OVERLAY_ORANGE: RGBColor = RGBColor(255, 165, 0);
const BAR_GREEN: RGBColor = RGBColor(60, 179, 113);
const POWER_RED: RGBColor = RGBColor(220, 20, 60);
const LABEL_GREEN: RGBColor = RGBColor(0, 128, 0);

type DrawResult = Result<(), Box<dyn Error>>;

/// Render every chart into `dir`, returning the files written.
pub fn write_report_charts(dir: &Path, run: &AnalysisOutput, config: &AnalysisConfig) -> Result<Vec<PathBuf>, AppError> {
    create_dir_all(dir)
        .map_err(|e| AppError::new(2, format!("Failed to create chart directory '{}': {e}", dir.display())))?;

    let label = config.label.as_str();
    let half = run.spectrum.positive_half();
    let mut written = Vec::new();

    if overlay_is_drawable(&run.overlay) {
        let path = dir.join("overlay.svg");
        render(&path, |root| draw_overlay(&root, &run.overlay, label))?;
        written.push(path);
    }

    if !run.monthly_average.is_empty() {
        let path = dir.join("monthly_average.svg");
        render(&path, |root| draw_monthly(&root, &run.monthly_average, label))?;
        written.push(path);
    }

    if half.is_empty() {
        warn!("Power spectrum charts skipped: spectrum is empty");
    } else {
        let path = dir.join("power_spectrum.svg");
        render(&path, |root| draw_power(&root, &half, label, None))?;
        written.push(path);

        let path = dir.join("power_spectrum_revenue.svg");
        render(&path, |root| draw_power(&root, &half, label, Some(&run.fractions)))?;
        written.push(path);
    }

    info!(dir = %dir.display(), charts = written.len(), "Wrote SVG charts");
    Ok(written)
}

fn overlay_is_drawable(payload: &OverlayPayload) -> bool {
    if payload.series.is_empty() || payload.overlay.is_empty() {
        warn!("Overlay chart skipped: the input data or comparison series is empty");
        return false;
    }
    if payload.series.len() != payload.overlay.len() {
        warn!(
            series = payload.series.len(),
            overlay = payload.overlay.len(),
            "Overlay chart skipped: series lengths differ"
        );
        return false;
    }
    true
}

fn render<F>(path: &Path, draw: F) -> Result<(), AppError>
where
    F: FnOnce(DrawingArea<SVGBackend<'_>, Shift>) -> DrawResult,
{
    let root = SVGBackend::new(path, SIZE).into_drawing_area();
    draw(root).map_err(|e| AppError::new(2, format!("Failed to render chart '{}': {e}", path.display())))
}

fn draw_label(root: &DrawingArea<SVGBackend<'_>, Shift>, label: &str) -> DrawResult {
    if label.is_empty() {
        return Ok(());
    }
    let style = ("sans-serif", 16).into_font().color(&LABEL_GREEN);
    root.draw_text(&format!("Label: {label}"), &style, (SIZE.0 as i32 / 2 - 80, SIZE.1 as i32 - 24))?;
    Ok(())
}

fn draw_overlay(root: &DrawingArea<SVGBackend<'_>, Shift>, payload: &OverlayPayload, label: &str) -> DrawResult {
    root.fill(&WHITE)?;

    let values = &payload.series.values;
    let (y0, y1) = padded_bounds(values.iter().chain(&payload.overlay).copied());
    let x1 = (values.len().saturating_sub(1)).max(1) as f64;

    let mut caption = "Fourier Series Approximation of Daily Passenger Numbers".to_string();
    if payload.is_demo {
        caption.push_str(" [DEMO DATA]");
    }

    let mut chart = ChartBuilder::on(root)
        .caption(caption, ("sans-serif", 22))
        .margin(16)
        .x_label_area_size(48)
        .y_label_area_size(64)
        .build_cartesian_2d(0.0..x1, y0..y1)?;

    let first = payload.series.dates.first().map(|d| d.to_string()).unwrap_or_default();
    chart
        .configure_mesh()
        .x_desc(format!("Days since {first}"))
        .y_desc("Number of Passengers")
        .draw()?;

    chart
        .draw_series(LineSeries::new(
            values.iter().enumerate().map(|(i, &v)| (i as f64, v)),
            &SERIES_BLUE,
        ))?
        .label("Original Daily Data")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &SERIES_BLUE));

    chart
        .draw_series(LineSeries::new(
            payload.overlay.iter().enumerate().map(|(i, &v)| (i as f64, v)),
            &OVERLAY_ORANGE,
        ))?
        .label(payload.description.as_str())
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &OVERLAY_ORANGE));

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    draw_label(root, label)?;
    root.present()?;
    Ok(())
}

fn draw_monthly(root: &DrawingArea<SVGBackend<'_>, Shift>, avg: &MonthlyAverage, label: &str) -> DrawResult {
    root.fill(&WHITE)?;

    let max = avg.values().copied().fold(0.0_f64, f64::max);
    let y1 = if max > 0.0 { max * 1.1 } else { 1.0 };

    let mut chart = ChartBuilder::on(root)
        .caption("Average Monthly Passengers for the Year", ("sans-serif", 22))
        .margin(16)
        .x_label_area_size(48)
        .y_label_area_size(64)
        .build_cartesian_2d(0.5..12.5, 0.0..y1)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(12)
        .x_label_formatter(&|v: &f64| month_abbrev((*v).round() as u32).to_string())
        .x_desc("Month")
        .y_desc("Average Number of Passengers")
        .draw()?;

    chart.draw_series(avg.iter().map(|(&month, &mean)| {
        let x = f64::from(month);
        Rectangle::new([(x - 0.4, 0.0), (x + 0.4, mean)], BAR_GREEN.filled())
    }))?;

    draw_label(root, label)?;
    root.present()?;
    Ok(())
}

fn draw_power(
    root: &DrawingArea<SVGBackend<'_>, Shift>,
    half: &[(f64, f64)],
    label: &str,
    fractions: Option<&RevenueFractions>,
) -> DrawResult {
    root.fill(&WHITE)?;

    let x1 = half.last().map(|p| p.0).unwrap_or(0.5).max(1e-3);
    let max_power = half.iter().map(|p| p.1).fold(0.0_f64, f64::max);
    let y1 = if max_power > 0.0 { max_power * 1.05 } else { 1.0 };

    let caption = if fractions.is_some() {
        "Power Spectrum with Revenue Fractions"
    } else {
        "Power Spectrum of Passenger Number Variation"
    };

    let mut chart = ChartBuilder::on(root)
        .caption(caption, ("sans-serif", 22))
        .margin(16)
        .x_label_area_size(48)
        .y_label_area_size(90)
        .build_cartesian_2d(0.0..x1, 0.0..y1)?;

    chart
        .configure_mesh()
        .x_desc("Frequency (1/day)")
        .y_desc("Power")
        .y_label_formatter(&|v: &f64| format!("{:.2e}", *v))
        .draw()?;

    chart
        .draw_series(LineSeries::new(half.iter().copied(), POWER_RED.stroke_width(2)))?
        .label("Power Spectrum")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &POWER_RED));

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    if let Some(f) = fractions {
        // Just below the peak, centred horizontally.
        let style = ("sans-serif", 18).into_font().color(&BLUE);
        let x = x1 / 2.0;
        chart.draw_series([
            Text::new(format!("Summer Revenue Fraction (X): {:.2}%", f.summer_pct), (x, max_power * 0.85), style.clone()),
            Text::new(format!("Autumn Revenue Fraction (Y): {:.2}%", f.autumn_pct), (x, max_power * 0.75), style),
        ])?;
    }

    draw_label(root, label)?;
    root.present()?;
    Ok(())
}

fn padded_bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (mut lo, mut hi) = (f64::INFINITY, f64::NEG_INFINITY);
    for v in values.filter(|v| v.is_finite()) {
        lo = lo.min(v);
        hi = hi.max(v);
    }
    if !(lo.is_finite() && hi.is_finite()) {
        return (0.0, 1.0);
    }
    let pad = ((hi - lo) * 0.05).max(1e-6);
    (lo - pad, hi + pad)
}
