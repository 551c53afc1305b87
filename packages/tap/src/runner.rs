//! Subcommand dispatch.

use std::{
    fs::File,
    io::{self, BufReader, Write},
    path::Path,
};

use hiroba_protocol::{EventKind, RoomId};

use crate::{
    cli::{Cli, Command, Shape},
    error::TapError,
    handler::{ConsoleHandler, RoomFilter},
    listen::listen,
    sample::sample_envelope,
    signal::shutdown_signal,
    validate::validate_shape,
};

/// Run the parsed command line
pub async fn run(cli: Cli) -> Result<(), TapError> {
    match cli.command {
        Command::Listen { url, room } => run_listen(&url, room).await,
        Command::Validate { shape, path } => run_validate(shape, &path),
        Command::Sample { kind, room } => run_sample(kind, room),
    }
}

async fn run_listen(url: &str, room: Option<String>) -> Result<(), TapError> {
    let console = ConsoleHandler::new(io::stdout());

    let summary = match room {
        Some(room) => {
            let mut filter = RoomFilter::new(RoomId::new(room)?, console);
            let summary = listen(url, &mut filter, shutdown_signal()).await?;
            tracing::info!("Skipped {} events of other rooms", filter.filtered());
            summary
        }
        None => {
            let mut console = console;
            listen(url, &mut console, shutdown_signal()).await?
        }
    };

    tracing::info!(
        "Read {} frames ({} decoded, {} rejected)",
        summary.frames,
        summary.decoded,
        summary.rejected
    );
    Ok(())
}

fn run_validate(shape: Shape, path: &Path) -> Result<(), TapError> {
    let read_error = |source| TapError::Read {
        path: path.to_path_buf(),
        source,
    };

    let report = if path == Path::new("-") {
        validate_shape(shape, io::stdin().lock()).map_err(read_error)?
    } else {
        let file = File::open(path).map_err(read_error)?;
        validate_shape(shape, BufReader::new(file)).map_err(read_error)?
    };

    let mut out = io::stdout().lock();
    report.write_to(&mut out)?;
    out.flush()?;

    if report.is_ok() {
        Ok(())
    } else {
        Err(TapError::InvalidRecords {
            invalid: report.invalid.len(),
            total: report.total,
        })
    }
}

fn run_sample(kind: EventKind, room: String) -> Result<(), TapError> {
    let envelope = sample_envelope(kind, RoomId::new(room)?)?;
    let mut out = io::stdout().lock();
    writeln!(out, "{}", envelope.encode()?)?;
    Ok(())
}
