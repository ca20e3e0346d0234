//! Chart rendering: terminal (`ascii`) and SVG files (`svg`).

pub mod ascii;
pub mod svg;

pub use ascii::{render_monthly_chart, render_overlay_chart, render_power_chart};
pub use svg::write_report_charts;
