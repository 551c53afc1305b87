//! Sample envelopes for each event kind.

use hiroba_protocol::{
    Envelope, EventKind, EventPayload, IdFactory, Message, MessageContent, MessageData,
    ProtocolError, RoomId, Timestamp, TypingIndicator, TypingStartData, TypingStopData, User,
    UserId, UserJoinedData, UserLeftData, Username,
};

use crate::error::TapError;

/// Build a sample envelope of `kind` in `room_id`, stamped now
pub fn sample_envelope(kind: EventKind, room_id: RoomId) -> Result<Envelope, TapError> {
    let user = User::new(UserId::new("u-alice")?, Username::new("alice")?);

    let payload: EventPayload = match kind {
        EventKind::Message => {
            let message = Message::new(
                IdFactory::message_id()?,
                MessageContent::new("Hello from hiroba-tap")?,
                user.id.clone(),
                room_id,
                Timestamp::now(),
            )
            .with_user(user)
            .map_err(ProtocolError::from)?;
            MessageData { message }.into()
        }
        EventKind::UserJoined => UserJoinedData { user, room_id }.into(),
        EventKind::UserLeft => UserLeftData { user, room_id }.into(),
        EventKind::TypingStart => {
            TypingStartData::from(TypingIndicator::new(user.id, user.username, room_id)).into()
        }
        EventKind::TypingStop => {
            TypingStopData::from(TypingIndicator::new(user.id, user.username, room_id)).into()
        }
    };

    Ok(Envelope::now(payload))
}
