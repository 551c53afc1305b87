//! Event type tags.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use super::error::ProtocolError;

/// Discriminant of a realtime event (the envelope's `type` field)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Message,
    UserJoined,
    UserLeft,
    TypingStart,
    TypingStop,
}

impl EventKind {
    /// All event kinds, in wire declaration order
    pub const ALL: [EventKind; 5] = [
        EventKind::Message,
        EventKind::UserJoined,
        EventKind::UserLeft,
        EventKind::TypingStart,
        EventKind::TypingStop,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Message => "message",
            Self::UserJoined => "user_joined",
            Self::UserLeft => "user_left",
            Self::TypingStart => "typing_start",
            Self::TypingStop => "typing_stop",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventKind {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ProtocolError::UnknownEventType(s.to_string()))
    }
}
