//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - normalized input rows (`Record`) and the daily series derived from them
//! - analysis outputs (`Spectrum`, `MonthlyAverage`, `RevenueFractions`)
//! - run configuration (`AnalysisConfig`, `GapPolicy`, `OverlaySource`)

pub mod types;

pub use types::*;
