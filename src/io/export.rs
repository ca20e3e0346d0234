//! Exports: spectrum table (CSV) and run summary (JSON).
//!
//! Both are meant to be easy to consume in spreadsheets or downstream scripts.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::app::pipeline::AnalysisOutput;
use crate::domain::{AnalysisConfig, DatasetStats, DominantPeriod, RevenueFractions};
use crate::error::AppError;
use crate::io::sampling::SamplingReport;

/// Portable summary of a run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub tool: String,
    pub label: String,
    pub input: String,
    pub dataset: Option<DatasetStats>,
    pub sampling: SamplingReport,
    pub monthly_average: BTreeMap<u32, f64>,
    pub monthly_revenue: BTreeMap<u32, f64>,
    pub summer_months: Vec<u32>,
    pub autumn_months: Vec<u32>,
    pub revenue_fractions: RevenueFractions,
    pub dominant_periods: Vec<DominantPeriod>,
    pub overlay: String,
    pub overlay_is_demo: bool,
}

impl RunSummary {
    pub fn new(run: &AnalysisOutput, config: &AnalysisConfig) -> Self {
        Self {
            tool: "paxspec".to_string(),
            label: config.label.clone(),
            input: config.input_path.display().to_string(),
            dataset: run.ingest.stats.clone(),
            sampling: run.sampling.clone(),
            monthly_average: run.monthly_average.clone(),
            monthly_revenue: run.monthly_revenue.clone(),
            summer_months: config.summer_months.months().to_vec(),
            autumn_months: config.autumn_months.months().to_vec(),
            revenue_fractions: run.fractions,
            dominant_periods: run.dominant.clone(),
            overlay: run.overlay.description.clone(),
            overlay_is_demo: run.overlay.is_demo,
        }
    }
}

/// Write `bin,frequency,re,im,power` rows for every spectrum bin.
pub fn write_spectrum_csv(path: &Path, run: &AnalysisOutput) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create spectrum CSV '{}': {e}", path.display())))?;
    let mut out = BufWriter::new(file);
    write_spectrum_rows(&mut out, run)
        .and_then(|_| out.flush())
        .map_err(|e| AppError::new(2, format!("Failed to write spectrum CSV: {e}")))
}

fn write_spectrum_rows<W: Write>(out: &mut W, run: &AnalysisOutput) -> std::io::Result<()> {
    writeln!(out, "bin,frequency,re,im,power")?;
    let rows = run
        .spectrum
        .frequencies
        .iter()
        .zip(&run.spectrum.coefficients)
        .zip(&run.power)
        .enumerate();
    for (bin, ((f, c), p)) in rows {
        writeln!(out, "{bin},{f:.10},{:.6},{:.6},{p:.6}", c.re, c.im)?;
    }
    Ok(())
}

/// Write the run summary as pretty JSON.
pub fn write_summary_json(path: &Path, summary: &RunSummary) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create summary JSON '{}': {e}", path.display())))?;
    let mut out = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut out, summary)
        .map_err(std::io::Error::from)
        .and_then(|_| out.flush())
        .map_err(|e| AppError::new(2, format!("Failed to write summary JSON: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::pipeline::run_analysis_on;
    use crate::io::ingest::load_records_from_reader;

    fn run() -> (AnalysisOutput, AnalysisConfig) {
        let csv = "Date,Number,Price\n2023-06-01,1,2\n2023-06-02,0,2\n2023-06-03,0,2\n2023-06-04,0,2\n";
        let ingest = load_records_from_reader(csv.as_bytes(), b',').unwrap();
        let config = AnalysisConfig::default();
        (run_analysis_on(ingest, &config).unwrap(), config)
    }

    #[test]
    fn spectrum_rows() {
        let (run, _) = run();
        let mut buf = Vec::new();
        write_spectrum_rows(&mut buf, &run).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "bin,frequency,re,im,power");
        let fields: Vec<f64> = lines[3].split(',').map(|s| s.parse().unwrap()).collect();
        assert_eq!(fields[0], 2.0);
        assert_eq!(fields[1], -0.5);
        assert!((fields[2] - 1.0).abs() < 1e-6);
        assert!(fields[3].abs() < 1e-6);
        assert!((fields[4] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn summary_serializes() {
        let (run, config) = run();
        let summary = RunSummary::new(&run, &config);
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["revenue_fractions"]["summer_pct"], 100.0);
        assert_eq!(json["monthly_average"]["6"], 0.25);
        assert_eq!(json["overlay_is_demo"], false);
        assert_eq!(json["summer_months"], serde_json::json!([6, 7, 8]));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn summary_write_failure_is_reported() {
        let (run, config) = run();
        let summary = RunSummary::new(&run, &config);
        let err = write_summary_json(Path::new("/dev/full"), &summary).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
