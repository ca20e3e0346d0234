//! Generated (non-loaded) data sources.

pub mod synthetic;

pub use synthetic::{DemoOverlay, demo_overlay, demo_start};
