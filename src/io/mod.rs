//! Input/output helpers.
//!
//! - CSV ingest + normalization (`ingest`)
//! - daily sampling checks (`sampling`)
//! - spectrum CSV / summary JSON exports (`export`)

pub mod export;
pub mod ingest;
pub mod sampling;

pub use export::*;
pub use ingest::*;
pub use sampling::*;
