//! `pax-spectrum` library crate.
//!
//! The binary (`paxspec`) is a thin wrapper around this library so that the
//! loader, spectral analyzer and aggregator are testable without spawning
//! processes.
//!
//! Data flows strictly forward:
//! `io::ingest` -> {`spectrum`, `aggregate`} -> `report` / `plot` / `io::export`.

pub mod aggregate;
pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod logging;
pub mod plot;
pub mod report;
pub mod spectrum;
