//! Shared utilities for the vouch trust graph.

pub mod logging;

pub use logging::{init_logging, try_init_logging, LogFormat, LoggingError};
