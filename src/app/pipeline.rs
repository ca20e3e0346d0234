//! Shared analysis pipeline used by every CLI subcommand.
//!
//! Load -> sampling check -> {spectrum, aggregates} -> overlay
//!
//! Front-ends then focus on presentation (summary text, charts, exports).

use std::collections::BTreeMap;

use tracing::{debug, info, warn};

use crate::aggregate::{monthly_average, monthly_revenue_totals, revenue_fractions};
use crate::data::{demo_overlay, demo_start};
use crate::data::synthetic::DEMO_DAYS;
use crate::domain::{
    AnalysisConfig, DailySeries, DominantPeriod, MonthlyAverage, OverlaySource, RevenueFractions, Spectrum,
};
use crate::error::AppError;
use crate::io::ingest::{IngestedData, load_records};
use crate::io::sampling::{SamplingReport, prepare_daily_series};
use crate::spectrum::{analyze, dominant_periods, fourier_approximation};

/// Series and comparison series for the overlay chart.
#[derive(Debug, Clone)]
pub struct OverlayPayload {
    pub series: DailySeries,
    pub overlay: Vec<f64>,
    /// `true` when the series is generated demo data, not the loaded table.
    pub is_demo: bool,
    pub description: String,
}

/// All computed outputs of a single run.
#[derive(Debug, Clone)]
pub struct AnalysisOutput {
    pub ingest: IngestedData,
    pub sampling: SamplingReport,
    pub series: DailySeries,
    pub spectrum: Spectrum,
    pub power: Vec<f64>,
    pub dominant: Vec<DominantPeriod>,
    pub monthly_average: MonthlyAverage,
    pub monthly_revenue: BTreeMap<u32, f64>,
    pub fractions: RevenueFractions,
    pub overlay: OverlayPayload,
}

/// Load the configured input file and run the full analysis.
pub fn run_analysis(config: &AnalysisConfig) -> Result<AnalysisOutput, AppError> {
    let ingest = load_records(&config.input_path, config.delimiter)?;
    run_analysis_on(ingest, config)
}

/// Run the analysis on already-loaded records.
pub fn run_analysis_on(ingest: IngestedData, config: &AnalysisConfig) -> Result<AnalysisOutput, AppError> {
    if !config.summer_months.is_disjoint(&config.autumn_months) {
        return Err(AppError::new(
            2,
            format!(
                "Season month groups overlap: summer={} autumn={}",
                config.summer_months, config.autumn_months
            ),
        ));
    }

    let records = &ingest.records;

    // 1) Uniform daily sampling for the Fourier stage.
    let (series, sampling) = prepare_daily_series(records, config.gap_policy)?;

    // 2) Spectrum.
    let spectrum = analyze(&series)?;
    let power = spectrum.power();
    let dominant = dominant_periods(&spectrum, config.top_periods);
    debug!(bins = spectrum.len(), "Computed spectrum");

    // 3) Aggregates.
    let monthly_average = monthly_average(records)?;
    let monthly_revenue = monthly_revenue_totals(records);
    let fractions = revenue_fractions(records, &config.summer_months, &config.autumn_months)?;
    info!(
        summer_pct = fractions.summer_pct,
        autumn_pct = fractions.autumn_pct,
        "Computed revenue fractions"
    );

    // 4) Overlay series.
    let overlay = build_overlay(&series, &spectrum, config)?;

    Ok(AnalysisOutput {
        ingest,
        sampling,
        series,
        spectrum,
        power,
        dominant,
        monthly_average,
        monthly_revenue,
        fractions,
        overlay,
    })
}

fn build_overlay(series: &DailySeries, spectrum: &Spectrum, config: &AnalysisConfig) -> Result<OverlayPayload, AppError> {
    match config.overlay {
        OverlaySource::Fourier => {
            let overlay = fourier_approximation(spectrum, config.harmonics)?;
            Ok(OverlayPayload {
                series: series.clone(),
                overlay,
                is_demo: false,
                description: format!("Fourier approximation ({} harmonics)", config.harmonics),
            })
        }
        OverlaySource::Demo => {
            warn!(
                days = DEMO_DAYS,
                seed = config.seed,
                "Overlay chart uses synthetic demo data, not the loaded table"
            );
            let demo = demo_overlay(demo_start(), DEMO_DAYS, config.seed)?;
            Ok(OverlayPayload {
                series: demo.series,
                overlay: demo.overlay,
                is_demo: true,
                description: "Synthetic sinusoid (DEMO DATA)".to_string(),
            })
        }
    }
}
