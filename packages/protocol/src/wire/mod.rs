//! Realtime wire contract: event tags, payload records, the envelope and
//! the JSON codec.

pub mod envelope;
pub mod error;
pub mod format;
pub mod kind;
pub mod payload;

pub use envelope::Envelope;
pub use error::ProtocolError;
pub use format::WireFormat;
pub use kind::EventKind;
pub use payload::{
    EventPayload, MessageData, TypingStartData, TypingStopData, UserJoinedData, UserLeftData,
};
