//! Codec errors.

use thiserror::Error;

use super::kind::EventKind;
use crate::domain::{EntityError, ValueObjectError};

/// Errors raised while decoding or encoding wire records
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// Not JSON, or a required field is missing or of the wrong type
    #[error("Malformed record: {0}")]
    Malformed(#[source] serde_json::Error),

    /// Raw bytes are not UTF-8 text
    #[error("Invalid UTF-8 in record: {0}")]
    InvalidUtf8(#[source] std::str::Utf8Error),

    /// The `type` tag is not one of the known event kinds
    #[error("Unknown event type '{0}'")]
    UnknownEventType(String),

    #[error("Invalid envelope timestamp: {0}")]
    InvalidTimestamp(#[source] ValueObjectError),

    /// `data` does not have the shape required by the `type` tag
    #[error("Payload does not match event type '{kind}': {source}")]
    PayloadMismatch {
        kind: EventKind,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Entity(#[from] EntityError),

    #[error(transparent)]
    ValueObject(#[from] ValueObjectError),

    #[error("Failed to encode record: {0}")]
    Encode(#[source] serde_json::Error),
}
