//! Errors of the tap tool.

use std::{io, path::PathBuf};

use hiroba_protocol::{ProtocolError, ValueObjectError};
use hiroba_shared::LoggerError;
use thiserror::Error;
use tokio_tungstenite::tungstenite;

#[derive(Debug, Error)]
pub enum TapError {
    #[error("Failed to read input '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write output: {0}")]
    Write(#[from] io::Error),

    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tungstenite::Error),

    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    #[error("Invalid argument: {0}")]
    InvalidArgument(#[from] ValueObjectError),

    #[error(transparent)]
    Logger(#[from] LoggerError),

    #[error("{invalid} of {total} records are invalid")]
    InvalidRecords { invalid: usize, total: usize },
}
