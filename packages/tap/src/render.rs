//! One-line text rendering of events.

use hiroba_protocol::{Envelope, EventPayload};

/// Render an event as `[HH:MM:SS] #room ...`.
///
/// The clock is shown in the envelope's own offset.
pub fn render_envelope(envelope: &Envelope) -> String {
    let clock = envelope.timestamp.value().format("%H:%M:%S");
    let room = envelope.room_id();

    match &envelope.payload {
        EventPayload::Message(data) => format!(
            "[{clock}] #{room} <{}> {}",
            data.message.author_label(),
            data.message.content
        ),
        EventPayload::UserJoined(data) => {
            format!("[{clock}] #{room} --> {} joined", data.user.username)
        }
        EventPayload::UserLeft(data) => format!("[{clock}] #{room} <-- {} left", data.user.username),
        EventPayload::TypingStart(data) => {
            format!("[{clock}] #{room} ... {} is typing", data.username)
        }
        EventPayload::TypingStop(data) => {
            format!("[{clock}] #{room} ... {} stopped typing", data.username)
        }
    }
}
