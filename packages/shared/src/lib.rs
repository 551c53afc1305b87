//! Shared utilities for Hiroba.
//!
//! Logging setup and time helpers used by the protocol crate and the tap tool.

pub mod logger;
pub mod time;

pub use logger::{LoggerConfig, LoggerError, setup_logger};
