//! Command-line parsing for the passenger spectral report.
//!
//! Argument parsing and command dispatch stay separate from the analysis
//! code; `app` turns these structs into an `AnalysisConfig`.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::{GapPolicy, OverlaySource, SeasonMonths};

pub mod picker;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "paxspec", version, about = "Airline passenger Fourier and seasonal revenue report")]
pub struct Cli {
    /// Log at debug level (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Full report: summary, terminal charts, optional SVG charts and exports.
    Analyze(AnalyzeArgs),
    /// Print the dominant periods only (useful for scripting).
    Spectrum(SpectrumArgs),
}

/// Options shared by every subcommand that reads the passenger table.
#[derive(Debug, Parser, Clone)]
pub struct InputArgs {
    /// Passenger CSV with `Date`, `Number` and `Price` columns.
    ///
    /// Falls back to `PAXSPEC_INPUT`, then to an interactive picker.
    #[arg(short = 'f', long = "input", value_name = "CSV")]
    pub input: Option<PathBuf>,

    /// Field delimiter.
    #[arg(long, default_value_t = ',')]
    pub delimiter: char,

    /// What to do with missing or out-of-order days before the Fourier stage.
    #[arg(long, value_enum, default_value_t = GapPolicy::Warn)]
    pub gap_policy: GapPolicy,
}

/// Options for the full report.
#[derive(Debug, Parser, Clone)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Free-text label stamped on every chart (default: `PAXSPEC_LABEL`).
    #[arg(short, long)]
    pub label: Option<String>,

    /// Summer months, comma-separated.
    #[arg(long, default_value = "6,7,8")]
    pub summer: SeasonMonths,

    /// Autumn months, comma-separated.
    #[arg(long, default_value = "9,10,11")]
    pub autumn: SeasonMonths,

    /// Comparison series drawn over the daily data.
    #[arg(long, value_enum, default_value_t = OverlaySource::Fourier)]
    pub overlay: OverlaySource,

    /// Harmonics kept by the Fourier approximation overlay.
    #[arg(long, default_value_t = 6)]
    pub harmonics: usize,

    /// Seed for the demo overlay noise.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Dominant periods listed in the summary.
    #[arg(long, default_value_t = 5)]
    pub top: usize,

    /// Disable the terminal charts.
    #[arg(long)]
    pub no_plot: bool,

    /// Terminal chart width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Terminal chart height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,

    /// Also write SVG charts into this directory.
    #[arg(long, value_name = "DIR")]
    pub svg_dir: Option<PathBuf>,

    /// Export every spectrum bin to CSV.
    #[arg(long = "export-spectrum", value_name = "CSV")]
    pub export_spectrum: Option<PathBuf>,

    /// Export the run summary to JSON.
    #[arg(long = "export-summary", value_name = "JSON")]
    pub export_summary: Option<PathBuf>,
}

/// Options for the dominant-period listing.
#[derive(Debug, Parser, Clone)]
pub struct SpectrumArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Number of periods to list.
    #[arg(long, default_value_t = 5)]
    pub top: usize,
}
