//! Event handlers: where decoded (or rejected) frames go.

use std::io::Write;

use hiroba_protocol::{Envelope, ProtocolError, RoomId};

use crate::render::render_envelope;

/// Longest part of a rejected frame echoed back to the console
const MAX_ECHO_CHARS: usize = 80;

/// Receives every frame read by [`crate::listen`]
#[cfg_attr(test, mockall::automock)]
pub trait EventHandler {
    /// A frame decoded into a valid envelope
    fn on_envelope(&mut self, envelope: &Envelope);

    /// A frame that could not be decoded
    fn on_invalid(&mut self, raw: &str, error: &ProtocolError);
}

/// Writes one rendered line per event
pub struct ConsoleHandler<W: Write> {
    out: W,
}

impl<W: Write> ConsoleHandler<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> EventHandler for ConsoleHandler<W> {
    fn on_envelope(&mut self, envelope: &Envelope) {
        if let Err(e) = writeln!(self.out, "{}", render_envelope(envelope)) {
            tracing::warn!("Failed to write '{}' event: {}", envelope.kind(), e);
        }
    }

    fn on_invalid(&mut self, raw: &str, error: &ProtocolError) {
        if let Err(e) = writeln!(self.out, "! invalid event: {} ({})", error, echo(raw)) {
            tracing::warn!("Failed to write invalid event: {}", e);
        }
    }
}

fn echo(raw: &str) -> String {
    if raw.chars().count() <= MAX_ECHO_CHARS {
        return raw.to_string();
    }
    let head: String = raw.chars().take(MAX_ECHO_CHARS).collect();
    format!("{head}...")
}

/// Forwards only events of one room; invalid frames always pass through
pub struct RoomFilter<H> {
    room_id: RoomId,
    inner: H,
    filtered: usize,
}

impl<H: EventHandler> RoomFilter<H> {
    pub fn new(room_id: RoomId, inner: H) -> Self {
        Self {
            room_id,
            inner,
            filtered: 0,
        }
    }

    /// Number of events dropped because they belong to another room
    pub fn filtered(&self) -> usize {
        self.filtered
    }

    pub fn into_inner(self) -> H {
        self.inner
    }
}

impl<H: EventHandler> EventHandler for RoomFilter<H> {
    fn on_envelope(&mut self, envelope: &Envelope) {
        if envelope.room_id() == &self.room_id {
            self.inner.on_envelope(envelope);
        } else {
            tracing::debug!(
                "Skipping '{}' event of room '{}'",
                envelope.kind(),
                envelope.room_id()
            );
            self.filtered += 1;
        }
    }

    fn on_invalid(&mut self, raw: &str, error: &ProtocolError) {
        self.inner.on_invalid(raw, error);
    }
}
