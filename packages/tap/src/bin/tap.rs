//! Hiroba tap: validate and tap realtime chat events.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin hiroba-tap -- listen --url ws://127.0.0.1:8080/ws
//! cargo run --bin hiroba-tap -- validate --shape envelope events.ndjson
//! ```

use clap::Parser;
use hiroba_shared::setup_logger;
use hiroba_tap::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing
    if let Err(e) = setup_logger(&cli.logger_config()) {
        eprintln!("Failed to initialize logger: {e}");
        std::process::exit(1);
    }

    if let Err(e) = hiroba_tap::run(cli).await {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}
