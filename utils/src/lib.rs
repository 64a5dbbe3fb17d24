//! Shared utilities for holder-gate.

pub mod logging;

pub use logging::{init_logging, LogFormat};
