//! ASCII charts for terminal output.
//!
//! Fixed-size character grids, optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Chart elements:
//! - overlay chart: `o` daily series, `-` comparison series
//! - power spectrum: `*` line over the non-negative frequencies
//! - monthly averages: horizontal `#` bars

use tracing::warn;

use crate::app::pipeline::OverlayPayload;
use crate::domain::{MonthlyAverage, RevenueFractions, month_abbrev};

/// A series to draw on a line chart.
struct Curve<'a> {
    points: &'a [(f64, f64)],
    ch: char,
    connect: bool,
}

/// Daily series with its comparison series drawn over it.
///
/// Returns `None` (and logs why) when either series is empty or their
/// lengths differ; a missing chart must not abort the report.
pub fn render_overlay_chart(payload: &OverlayPayload, label: &str, width: usize, height: usize) -> Option<String> {
    let values = &payload.series.values;
    if values.is_empty() || payload.overlay.is_empty() {
        warn!("Overlay chart skipped: the input data or comparison series is empty");
        return None;
    }
    if values.len() != payload.overlay.len() {
        warn!(
            series = values.len(),
            overlay = payload.overlay.len(),
            "Overlay chart skipped: series lengths differ"
        );
        return None;
    }

    let observed: Vec<(f64, f64)> = values.iter().enumerate().map(|(i, &v)| (i as f64, v)).collect();
    let overlay: Vec<(f64, f64)> = payload.overlay.iter().enumerate().map(|(i, &v)| (i as f64, v)).collect();

    let x_max = (values.len() - 1).max(1) as f64;
    let curves = [
        Curve { points: &overlay, ch: '-', connect: true },
        Curve { points: &observed, ch: 'o', connect: false },
    ];

    let mut title = String::from("Daily Passengers with Fourier Series Approximation");
    if payload.is_demo {
        title.push_str(" [DEMO DATA]");
    }
    let mut out = chart_header(&title, label);
    if let (Some(first), Some(last)) = (payload.series.dates.first(), payload.series.dates.last()) {
        out.push_str(&format!("Dates: {first} .. {last} | o = daily, - = {}\n", payload.description));
    }
    out.push_str(&render_plot(&curves, 0.0, x_max, width, height));
    Some(out)
}

/// Power spectrum over the non-negative frequencies, optionally annotated
/// with the revenue fractions.
pub fn render_power_chart(
    half: &[(f64, f64)],
    label: &str,
    fractions: Option<&RevenueFractions>,
    width: usize,
    height: usize,
) -> Option<String> {
    if half.is_empty() {
        warn!("Power spectrum chart skipped: spectrum is empty");
        return None;
    }

    let x_min = half.first().map(|p| p.0).unwrap_or(0.0);
    let x_max = half.last().map(|p| p.0).unwrap_or(0.5).max(x_min + 1e-9);
    let curves = [Curve { points: half, ch: '*', connect: true }];

    let title = if fractions.is_some() {
        "Power Spectrum with Revenue Fractions"
    } else {
        "Power Spectrum of Passenger Number Variation"
    };
    let mut out = chart_header(title, label);
    out.push_str(&render_plot(&curves, x_min, x_max, width, height));
    if let Some(f) = fractions {
        out.push_str(&format!("Summer Revenue Fraction (X): {:.2}%\n", f.summer_pct));
        out.push_str(&format!("Autumn Revenue Fraction (Y): {:.2}%\n", f.autumn_pct));
    }
    Some(out)
}

/// One bar per calendar month, Jan..Dec; months without data are marked.
pub fn render_monthly_chart(avg: &MonthlyAverage, label: &str, width: usize) -> Option<String> {
    if avg.is_empty() {
        warn!("Monthly average chart skipped: no months");
        return None;
    }

    let bar_width = width.saturating_sub(20).max(10);
    let max = avg.values().copied().fold(0.0_f64, f64::max);

    let mut out = chart_header("Average Monthly Passengers", label);
    for month in 1..=12u32 {
        let name = month_abbrev(month);
        match avg.get(&month) {
            Some(&v) => {
                let len = if max > 0.0 {
                    ((v / max) * bar_width as f64).round().max(0.0) as usize
                } else {
                    0
                };
                out.push_str(&format!("{name} |{:<bar_width$} {v:.1}\n", "#".repeat(len)));
            }
            None => out.push_str(&format!("{name} |{:<bar_width$} (no data)\n", "")),
        }
    }
    Some(out)
}

fn chart_header(title: &str, label: &str) -> String {
    let mut out = format!("{title}\n");
    if !label.is_empty() {
        out.push_str(&format!("Label: {label}\n"));
    }
    out
}

fn render_plot(curves: &[Curve<'_>], x_min: f64, x_max: f64, width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let (y_min, y_max) = y_range(curves).unwrap_or((0.0, 1.0));
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];

    // Earlier curves are drawn first; later ones overlay them.
    for curve in curves {
        if curve.connect {
            draw_curve(&mut grid, curve.points, curve.ch, x_min, x_max, y_min, y_max);
        } else {
            for &(x, y) in curve.points {
                let col = map_x(x, x_min, x_max, width);
                let row = map_y(y, y_min, y_max, height);
                grid[row][col] = curve.ch;
            }
        }
    }

    let mut out = format!("x=[{x_min:.3}, {x_max:.3}] | y=[{y_min:.2}, {y_max:.2}]\n");
    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }
    out
}

fn y_range(curves: &[Curve<'_>]) -> Option<(f64, f64)> {
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    for curve in curves {
        for &(_, y) in curve.points {
            min_y = min_y.min(y);
            max_y = max_y.max(y);
        }
    }

    if min_y.is_finite() && max_y.is_finite() && max_y > min_y {
        Some((min_y, max_y))
    } else if min_y.is_finite() && max_y.is_finite() {
        // Flat series: centre it.
        Some((min_y - 1.0, max_y + 1.0))
    } else {
        None
    }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(x: f64, x_min: f64, x_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let span = x_max - x_min;
    let u = if span > 0.0 { ((x - x_min) / span).clamp(0.0, 1.0) } else { 0.0 };
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // Row 0 is the top (y_max).
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn draw_curve(
    grid: &mut [Vec<char>],
    curve: &[(f64, f64)],
    ch: char,
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
) {
    let height = grid.len();
    let width = grid[0].len();

    let mut prev = None;
    for &(x, y) in curve {
        let col = map_x(x, x_min, x_max, width);
        let row = map_y(y, y_min, y_max, height);
        if let Some((c0, r0)) = prev {
            draw_line(grid, c0, r0, col, row, ch);
        } else {
            grid[row][col] = ch;
        }
        prev = Some((col, row));
    }
}

/// Integer line drawing (Bresenham).
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0 && (y0 as usize) < grid.len() && x0 >= 0 && (x0 as usize) < grid[0].len() {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}
