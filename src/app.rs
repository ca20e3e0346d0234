//! Top-level application orchestration.
//!
//! `src/main.rs` stays tiny; this module is the real entry point that:
//! - loads `.env` and parses CLI arguments
//! - resolves the input table (flag, environment, or interactive picker)
//! - runs the analysis pipeline
//! - prints the summary and terminal charts
//! - writes optional SVG charts and exports

use std::path::PathBuf;

use clap::Parser;
use tracing::{debug, info};

use crate::cli::{AnalyzeArgs, Command, InputArgs, SpectrumArgs};
use crate::domain::AnalysisConfig;
use crate::error::AppError;

pub mod pipeline;

/// Environment variable supplying the default chart label.
pub const ENV_LABEL: &str = "PAXSPEC_LABEL";
/// Environment variable supplying the default input path.
pub const ENV_INPUT: &str = "PAXSPEC_INPUT";

/// Entry point for the `paxspec` binary.
pub fn run() -> Result<(), AppError> {
    // A missing .env file is normal.
    let dotenv = dotenvy::dotenv().ok();

    // `paxspec -f data.csv` behaves like `paxspec analyze -f data.csv`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);
    crate::logging::init(cli.verbose);
    if let Some(path) = dotenv {
        debug!(path = %path.display(), "Loaded environment file");
    }

    match cli.command {
        Command::Analyze(args) => handle_analyze(args),
        Command::Spectrum(args) => handle_spectrum(args),
    }
}

fn handle_analyze(args: AnalyzeArgs) -> Result<(), AppError> {
    let config = analysis_config_from_args(&args)?;
    let run = pipeline::run_analysis(&config)?;

    println!("{}", crate::report::format_run_summary(&run, &config));

    if config.plot {
        let label = config.label.as_str();
        let charts = [
            crate::plot::render_overlay_chart(&run.overlay, label, config.plot_width, config.plot_height),
            crate::plot::render_monthly_chart(&run.monthly_average, label, config.plot_width),
            crate::plot::render_power_chart(
                &run.spectrum.positive_half(),
                label,
                None,
                config.plot_width,
                config.plot_height,
            ),
            crate::plot::render_power_chart(
                &run.spectrum.positive_half(),
                label,
                Some(&run.fractions),
                config.plot_width,
                config.plot_height,
            ),
        ];
        for chart in charts.into_iter().flatten() {
            println!("{chart}");
        }
    }

    if let Some(dir) = &config.svg_dir {
        crate::plot::write_report_charts(dir, &run, &config)?;
    }
    if let Some(path) = &config.export_spectrum {
        crate::io::export::write_spectrum_csv(path, &run)?;
        info!(path = %path.display(), "Exported spectrum");
    }
    if let Some(path) = &config.export_summary {
        let summary = crate::io::export::RunSummary::new(&run, &config);
        crate::io::export::write_summary_json(path, &summary)?;
        info!(path = %path.display(), "Exported summary");
    }

    Ok(())
}

fn handle_spectrum(args: SpectrumArgs) -> Result<(), AppError> {
    let mut config = AnalysisConfig {
        top_periods: args.top,
        plot: false,
        ..AnalysisConfig::default()
    };
    apply_input_args(&mut config, &args.input)?;

    let ingest = crate::io::ingest::load_records(&config.input_path, config.delimiter)?;
    let (series, _) = crate::io::sampling::prepare_daily_series(&ingest.records, config.gap_policy)?;
    let spectrum = crate::spectrum::analyze(&series)?;
    let periods = crate::spectrum::dominant_periods(&spectrum, config.top_periods);

    print!("{}", crate::report::format_dominant_periods(&periods));
    Ok(())
}

pub fn analysis_config_from_args(args: &AnalyzeArgs) -> Result<AnalysisConfig, AppError> {
    let label = args
        .label
        .clone()
        .or_else(|| std::env::var(ENV_LABEL).ok())
        .unwrap_or_default();

    let mut config = AnalysisConfig {
        label,
        summer_months: args.summer.clone(),
        autumn_months: args.autumn.clone(),
        overlay: args.overlay,
        harmonics: args.harmonics,
        seed: args.seed,
        top_periods: args.top,
        plot: !args.no_plot,
        plot_width: args.width,
        plot_height: args.height,
        svg_dir: args.svg_dir.clone(),
        export_spectrum: args.export_spectrum.clone(),
        export_summary: args.export_summary.clone(),
        ..AnalysisConfig::default()
    };
    apply_input_args(&mut config, &args.input)?;
    Ok(config)
}

fn apply_input_args(config: &mut AnalysisConfig, args: &InputArgs) -> Result<(), AppError> {
    config.input_path = resolve_input_path(args.input.clone())?;
    config.delimiter = delimiter_byte(args.delimiter)?;
    config.gap_policy = args.gap_policy;
    Ok(())
}

fn resolve_input_path(flag: Option<PathBuf>) -> Result<PathBuf, AppError> {
    if let Some(path) = flag {
        return Ok(path);
    }
    if let Ok(path) = std::env::var(ENV_INPUT) {
        return Ok(PathBuf::from(path));
    }
    crate::cli::picker::prompt_for_csv_path()
}

fn delimiter_byte(c: char) -> Result<u8, AppError> {
    u8::try_from(c)
        .ok()
        .filter(u8::is_ascii)
        .ok_or_else(|| AppError::new(2, format!("Delimiter must be a single ASCII character, got '{c}'.")))
}

/// Rewrite argv so a bare flag list runs `analyze`.
///
/// Rules:
/// - `paxspec`                       -> `paxspec analyze`
/// - `paxspec -f data.csv ...`       -> `paxspec analyze -f data.csv ...`
/// - `paxspec --help/--version/-h`   -> unchanged
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("analyze".to_string());
        return argv;
    };

    if matches!(arg1.as_str(), "-h" | "--help" | "-V" | "--version" | "help") {
        return argv;
    }
    if matches!(arg1.as_str(), "analyze" | "spectrum") {
        return argv;
    }
    if arg1.starts_with('-') {
        argv.insert(1, "analyze".to_string());
    }
    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn rewrite_defaults_to_analyze() {
        assert_eq!(rewrite_args(argv(&["paxspec"])), argv(&["paxspec", "analyze"]));
        assert_eq!(
            rewrite_args(argv(&["paxspec", "-f", "a.csv"])),
            argv(&["paxspec", "analyze", "-f", "a.csv"])
        );
        assert_eq!(rewrite_args(argv(&["paxspec", "--help"])), argv(&["paxspec", "--help"]));
        assert_eq!(
            rewrite_args(argv(&["paxspec", "spectrum", "-f", "a.csv"])),
            argv(&["paxspec", "spectrum", "-f", "a.csv"])
        );
    }

    #[test]
    fn delimiter_must_be_ascii() {
        assert_eq!(delimiter_byte(';').unwrap(), b';');
        assert_eq!(delimiter_byte('\t').unwrap(), b'\t');
        assert!(delimiter_byte('§').is_err());
    }

    #[test]
    fn config_from_args_uses_flags() {
        let cli = crate::cli::Cli::try_parse_from(argv(&[
            "paxspec", "analyze", "-f", "x.csv", "-l", "24023883", "--no-plot", "--harmonics", "3",
        ]))
        .unwrap();
        let Command::Analyze(args) = cli.command else {
            panic!("expected analyze");
        };
        let config = analysis_config_from_args(&args).unwrap();
        assert_eq!(config.input_path, PathBuf::from("x.csv"));
        assert_eq!(config.label, "24023883");
        assert!(!config.plot);
        assert_eq!(config.harmonics, 3);
        assert_eq!(config.delimiter, b',');
    }
}
