use std::path::PathBuf;

use pax_spectrum::aggregate::{monthly_average, revenue_fractions};
use pax_spectrum::app::pipeline::{run_analysis, run_analysis_on};
use pax_spectrum::domain::{AnalysisConfig, DailySeries, GapPolicy, SeasonMonths};
use pax_spectrum::error::AnalysisError;
use pax_spectrum::io::ingest::load_records_from_reader;
use pax_spectrum::spectrum::{analyze, ifft};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name)
}

#[test]
fn full_year_pipeline() {
    let config = AnalysisConfig {
        input_path: fixture("airline_2023.csv"),
        gap_policy: GapPolicy::Fail,
        ..AnalysisConfig::default()
    };
    let run = run_analysis(&config).expect("pipeline should succeed");

    assert_eq!(run.ingest.records.len(), 365);
    assert!(run.sampling.is_uniform());
    assert_eq!(run.spectrum.len(), 365);
    assert_eq!(run.power.len(), 365);
    assert!(run.power.iter().all(|&p| p >= 0.0));

    for r in &run.ingest.records {
        assert_eq!(r.revenue, r.number * r.price);
    }

    // The weekly cycle dominates the non-DC spectrum.
    let top = run.dominant.first().expect("at least one period");
    assert!((top.period_days - 7.0).abs() < 0.2, "top period {}", top.period_days);

    assert_eq!(run.monthly_average.len(), 12);
    let f = run.fractions;
    assert!(f.summer_pct > 25.0 && f.summer_pct < 40.0);
    assert!(f.autumn_pct > 15.0 && f.autumn_pct < 30.0);
    assert!(f.summer_pct + f.autumn_pct <= 100.0);

    assert!(!run.overlay.is_demo);
    assert_eq!(run.overlay.overlay.len(), run.overlay.series.len());
}

#[test]
fn four_record_revenue_scenario() {
    let csv = "Date,Number,Price\n2023-01-01,100,2\n2023-06-01,100,2\n2023-07-01,200,3\n2023-10-01,50,4\n";
    let data = load_records_from_reader(csv.as_bytes(), b',').unwrap();
    let f = revenue_fractions(&data.records, &SeasonMonths::summer(), &SeasonMonths::autumn()).unwrap();
    assert!((f.summer_pct - 66.666_666_666).abs() < 1e-6);
    assert!((f.autumn_pct - 16.666_666_666).abs() < 1e-6);

    // Non-contiguous dates still run under the default warn policy.
    let run = run_analysis_on(data, &AnalysisConfig::default()).unwrap();
    assert_eq!(run.sampling.gaps.len(), 3);
    assert_eq!(run.spectrum.len(), 4);
}

#[test]
fn impulse_scenario() {
    let series = DailySeries {
        dates: Vec::new(),
        values: vec![1.0, 0.0, 0.0, 0.0],
    };
    let spectrum = analyze(&series).unwrap();
    assert_eq!(spectrum.frequencies, vec![0.0, 0.25, -0.5, -0.25]);
    for (c, p) in spectrum.coefficients.iter().zip(spectrum.power()) {
        assert!((c.re - 1.0).abs() < 1e-12 && c.im.abs() < 1e-12);
        assert!((p - 1.0).abs() < 1e-12);
    }

    let back = ifft(&spectrum.coefficients).unwrap();
    for (orig, c) in series.values.iter().zip(back) {
        assert!((orig - c.re).abs() < 1e-12);
    }
}

#[test]
fn empty_record_scenario() {
    assert!(matches!(monthly_average(&[]), Err(AnalysisError::EmptyInput(_))));
    assert!(matches!(
        revenue_fractions(&[], &SeasonMonths::summer(), &SeasonMonths::autumn()),
        Err(AnalysisError::DivisionByZero)
    ));
}

#[test]
fn gap_fill_keeps_aggregates_on_raw_records() {
    let csv = "Date,Number,Price\n2023-06-01,10,1\n2023-06-04,40,1\n";
    let data = load_records_from_reader(csv.as_bytes(), b',').unwrap();
    let config = AnalysisConfig {
        gap_policy: GapPolicy::Fill,
        ..AnalysisConfig::default()
    };
    let run = run_analysis_on(data, &config).unwrap();
    assert_eq!(run.series.len(), 4);
    assert_eq!(run.spectrum.len(), 4);
    // Interpolated days do not enter the monthly mean.
    assert_eq!(run.monthly_average[&6], 25.0);
}

#[test]
fn missing_input_file_is_io_error() {
    let config = AnalysisConfig {
        input_path: fixture("does_not_exist.csv"),
        ..AnalysisConfig::default()
    };
    let err = run_analysis(&config).unwrap_err();
    assert_eq!(err.exit_code(), 2);
}
