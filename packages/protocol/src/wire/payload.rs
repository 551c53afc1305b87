//! Payload records carried in the envelope's `data` field, one per event kind.

use serde::{Deserialize, Serialize};

use super::{error::ProtocolError, kind::EventKind};
use crate::domain::{Message, RoomId, TypingIndicator, User, UserId, Username};

/// Data of a `message` event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageData {
    pub message: Message,
}

/// Data of a `user_joined` event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserJoinedData {
    pub user: User,
    pub room_id: RoomId,
}

/// Data of a `user_left` event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserLeftData {
    pub user: User,
    pub room_id: RoomId,
}

/// Data of a `typing_start` event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypingStartData {
    pub user_id: UserId,
    pub username: Username,
    pub room_id: RoomId,
}

/// Data of a `typing_stop` event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypingStopData {
    pub user_id: UserId,
    pub username: Username,
    pub room_id: RoomId,
}

impl From<TypingIndicator> for TypingStartData {
    fn from(value: TypingIndicator) -> Self {
        Self {
            user_id: value.user_id,
            username: value.username,
            room_id: value.room_id,
        }
    }
}

impl From<TypingIndicator> for TypingStopData {
    fn from(value: TypingIndicator) -> Self {
        Self {
            user_id: value.user_id,
            username: value.username,
            room_id: value.room_id,
        }
    }
}

impl From<TypingStartData> for TypingIndicator {
    fn from(value: TypingStartData) -> Self {
        TypingIndicator::new(value.user_id, value.username, value.room_id)
    }
}

impl From<TypingStopData> for TypingIndicator {
    fn from(value: TypingStopData) -> Self {
        TypingIndicator::new(value.user_id, value.username, value.room_id)
    }
}

/// Payload of an envelope, tagged by its event kind.
///
/// Serializes as the bare payload record; the tag lives on the envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum EventPayload {
    Message(MessageData),
    UserJoined(UserJoinedData),
    UserLeft(UserLeftData),
    TypingStart(TypingStartData),
    TypingStop(TypingStopData),
}

impl EventPayload {
    /// Decode `data` strictly as the payload record for `kind`.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError::PayloadMismatch` if `data` does not have the
    /// shape required by `kind`, or `ProtocolError::Entity` if it breaks a
    /// cross-field rule. A field value rejected by its value object (empty,
    /// too long) is part of the shape and also reports `PayloadMismatch`.
    pub fn decode(kind: EventKind, data: serde_json::Value) -> Result<Self, ProtocolError> {
        let mismatch = |source| ProtocolError::PayloadMismatch { kind, source };

        let payload = match kind {
            EventKind::Message => Self::Message(serde_json::from_value(data).map_err(mismatch)?),
            EventKind::UserJoined => {
                Self::UserJoined(serde_json::from_value(data).map_err(mismatch)?)
            }
            EventKind::UserLeft => Self::UserLeft(serde_json::from_value(data).map_err(mismatch)?),
            EventKind::TypingStart => {
                Self::TypingStart(serde_json::from_value(data).map_err(mismatch)?)
            }
            EventKind::TypingStop => {
                Self::TypingStop(serde_json::from_value(data).map_err(mismatch)?)
            }
        };

        payload.validate()?;
        Ok(payload)
    }

    /// Event kind this payload belongs to
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Message(_) => EventKind::Message,
            Self::UserJoined(_) => EventKind::UserJoined,
            Self::UserLeft(_) => EventKind::UserLeft,
            Self::TypingStart(_) => EventKind::TypingStart,
            Self::TypingStop(_) => EventKind::TypingStop,
        }
    }

    /// Room the event happened in
    pub fn room_id(&self) -> &RoomId {
        match self {
            Self::Message(data) => &data.message.room_id,
            Self::UserJoined(data) => &data.room_id,
            Self::UserLeft(data) => &data.room_id,
            Self::TypingStart(data) => &data.room_id,
            Self::TypingStop(data) => &data.room_id,
        }
    }

    /// Check cross-field rules of the payload
    pub fn validate(&self) -> Result<(), ProtocolError> {
        if let Self::Message(data) = self {
            data.message.validate()?;
        }
        Ok(())
    }
}

impl From<MessageData> for EventPayload {
    fn from(value: MessageData) -> Self {
        Self::Message(value)
    }
}

impl From<UserJoinedData> for EventPayload {
    fn from(value: UserJoinedData) -> Self {
        Self::UserJoined(value)
    }
}

impl From<UserLeftData> for EventPayload {
    fn from(value: UserLeftData) -> Self {
        Self::UserLeft(value)
    }
}

impl From<TypingStartData> for EventPayload {
    fn from(value: TypingStartData) -> Self {
        Self::TypingStart(value)
    }
}

impl From<TypingStopData> for EventPayload {
    fn from(value: TypingStopData) -> Self {
        Self::TypingStop(value)
    }
}
