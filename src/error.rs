//! Error types.
//!
//! - `AnalysisError`: typed failures raised by the loader, spectral analyzer
//!   and aggregator. Library callers match on these.
//! - `AppError`: what the binary reports, a message plus a process exit code.

use chrono::NaiveDate;
use thiserror::Error;

/// Failures raised by the analysis stages.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// A required column is missing from the input table.
    #[error("Missing required column: `{0}`")]
    Schema(String),

    /// A field could not be parsed (1-based line number of the CSV row).
    #[error("Line {line}: {message}")]
    Parse { line: usize, message: String },

    /// A mean, transform or sum was requested over zero values.
    #[error("Empty input: {0}")]
    EmptyInput(&'static str),

    /// Total revenue is zero, so revenue shares are undefined.
    #[error("Total revenue is zero; revenue fractions are undefined")]
    DivisionByZero,

    /// The daily series is not uniformly sampled.
    #[error("Daily sampling violated: {0}")]
    Gap(String),

    #[error("Failed to read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl AnalysisError {
    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }

    pub(crate) fn gap_between(prev: NaiveDate, next: NaiveDate) -> Self {
        Self::Gap(format!("dates {prev} -> {next} are not consecutive days"))
    }
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<AnalysisError> for AppError {
    fn from(err: AnalysisError) -> Self {
        let exit_code = match &err {
            AnalysisError::Schema(_)
            | AnalysisError::Parse { .. }
            | AnalysisError::Io { .. }
            | AnalysisError::Csv(_) => 2,
            AnalysisError::EmptyInput(_) | AnalysisError::Gap(_) => 3,
            AnalysisError::DivisionByZero => 4,
        };
        AppError::new(exit_code, err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
