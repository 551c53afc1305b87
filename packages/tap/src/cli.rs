//! Command line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use hiroba_protocol::EventKind;
use hiroba_shared::LoggerConfig;

/// Validate and tap Hiroba realtime events
#[derive(Debug, Parser)]
#[command(name = "hiroba-tap", version, about)]
pub struct Cli {
    /// Log filter used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    /// Also append logs to a per-run file in this directory
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Connect to a websocket endpoint and print decoded events until it closes
    Listen {
        /// WebSocket URL (e.g. ws://127.0.0.1:8080/ws)
        #[arg(long)]
        url: String,

        /// Only print events of this room
        #[arg(long)]
        room: Option<String>,
    },

    /// Validate NDJSON records, one per line
    Validate {
        /// Record shape expected on every line
        #[arg(long, value_enum, default_value_t = Shape::Envelope)]
        shape: Shape,

        /// Input file ("-" reads stdin)
        #[arg(default_value = "-")]
        path: PathBuf,
    },

    /// Print a sample envelope of the given kind
    Sample {
        /// Event type tag (message, user_joined, user_left, typing_start, typing_stop)
        kind: EventKind,

        /// Room id used in the sample
        #[arg(long, default_value = "general")]
        room: String,
    },
}

/// Record shapes accepted by `validate`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Shape {
    Envelope,
    Message,
    Room,
    Presence,
    Typing,
    User,
}

impl Cli {
    pub fn logger_config(&self) -> LoggerConfig {
        let config = LoggerConfig::new(env!("CARGO_PKG_NAME"), self.log_level.clone());
        match &self.log_dir {
            Some(dir) => config.with_log_dir(dir),
            None => config,
        }
    }
}
