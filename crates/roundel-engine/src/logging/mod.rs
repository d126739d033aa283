//! Logging utilities.
//!
//! Centralizes logger initialization for binaries. Library code logs through
//! the `log` facade only.

mod init;

pub use init::{init_logging, LoggingConfig, DEFAULT_FILTER};
