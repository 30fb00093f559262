//! Shared utilities for poolscan.

pub mod logging;

pub use logging::{init_logging, LogFormat};
