//! Hiroba tap: a command line consumer of the realtime data contract.
//!
//! Validates NDJSON record dumps, prints sample envelopes, and taps a
//! websocket endpoint to decode and print inbound events.

pub mod cli;
pub mod error;
pub mod handler;
pub mod listen;
pub mod render;
mod runner;
pub mod sample;
mod signal;
pub mod validate;

pub use cli::{Cli, Command, Shape};
pub use error::TapError;
pub use handler::{ConsoleHandler, EventHandler, RoomFilter};
pub use listen::{ListenSummary, listen};
pub use runner::run;
