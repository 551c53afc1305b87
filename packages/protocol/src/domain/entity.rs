//! Core domain models for the chat application.
//!
//! All records use camelCase field names on the wire and omit absent
//! optional fields.

use serde::{Deserialize, Serialize};

use super::{
    error::{EntityError, ValueObjectError},
    value_object::{MessageContent, MessageId, RoomId, RoomName, Timestamp, UserId, Username},
};

/// Maximum length of a room description
pub const MAX_ROOM_DESCRIPTION_CHARS: usize = 1000;

/// A chat user as embedded in messages and join/leave events
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub username: Username,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

impl User {
    pub fn new(id: UserId, username: Username) -> Self {
        Self {
            id,
            username,
            avatar_url: None,
        }
    }

    pub fn with_avatar_url(mut self, url: impl Into<String>) -> Self {
        self.avatar_url = Some(url.into());
        self
    }
}

/// Represents one chat message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: MessageId,
    pub content: MessageContent,
    pub user_id: UserId,
    pub room_id: RoomId,
    pub created_at: Timestamp,
    /// Denormalized author, when the sender joined it in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

impl Message {
    /// Create a new message without an embedded user
    pub fn new(
        id: MessageId,
        content: MessageContent,
        user_id: UserId,
        room_id: RoomId,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            content,
            user_id,
            room_id,
            created_at,
            user: None,
        }
    }

    /// Embed the author of the message
    ///
    /// # Errors
    ///
    /// Returns `EntityError::EmbeddedUserMismatch` if `user.id` differs from `user_id`
    pub fn with_user(mut self, user: User) -> Result<Self, EntityError> {
        self.user = Some(user);
        self.validate()?;
        Ok(self)
    }

    /// Check cross-field rules (embedded user must be the author)
    pub fn validate(&self) -> Result<(), EntityError> {
        match &self.user {
            Some(user) if user.id != self.user_id => Err(EntityError::EmbeddedUserMismatch {
                user_id: self.user_id.to_string(),
                embedded: user.id.to_string(),
            }),
            _ => Ok(()),
        }
    }

    /// Name to show for the author: embedded username, else the user id
    pub fn author_label(&self) -> &str {
        self.user
            .as_ref()
            .map(|u| u.username.as_str())
            .unwrap_or_else(|| self.user_id.as_str())
    }
}

/// Represents a chat room/channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: RoomId,
    pub name: RoomName,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub is_private: bool,
    pub created_at: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<UserId>,
}

impl Room {
    /// Create a new room with the required fields only
    pub fn new(id: RoomId, name: RoomName, is_private: bool, created_at: Timestamp) -> Self {
        Self {
            id,
            name,
            description: None,
            is_private,
            created_at,
            member_count: None,
            created_by: None,
        }
    }

    /// Set the room description
    ///
    /// # Errors
    ///
    /// Returns `ValueObjectError::RoomDescriptionTooLong` if the description exceeds the limit
    pub fn with_description(
        mut self,
        description: impl Into<String>,
    ) -> Result<Self, ValueObjectError> {
        let description = description.into();
        check_description(&description)?;
        self.description = Some(description);
        Ok(self)
    }

    pub fn with_member_count(mut self, count: u32) -> Self {
        self.member_count = Some(count);
        self
    }

    pub fn with_created_by(mut self, user_id: UserId) -> Self {
        self.created_by = Some(user_id);
        self
    }

    /// Check field rules that the wire types cannot express
    pub fn validate(&self) -> Result<(), ValueObjectError> {
        match &self.description {
            Some(description) => check_description(description),
            None => Ok(()),
        }
    }
}

fn check_description(description: &str) -> Result<(), ValueObjectError> {
    let len = description.chars().count();
    if len > MAX_ROOM_DESCRIPTION_CHARS {
        return Err(ValueObjectError::RoomDescriptionTooLong {
            max: MAX_ROOM_DESCRIPTION_CHARS,
            actual: len,
        });
    }
    Ok(())
}

/// Someone is typing in a room. Ephemeral, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypingIndicator {
    pub user_id: UserId,
    pub username: Username,
    pub room_id: RoomId,
}

impl TypingIndicator {
    pub fn new(user_id: UserId, username: Username, room_id: RoomId) -> Self {
        Self {
            user_id,
            username,
            room_id,
        }
    }
}

/// Connectivity status of a user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresenceStatus {
    Online,
    Away,
    Offline,
}

impl PresenceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Online => "online",
            Self::Away => "away",
            Self::Offline => "offline",
        }
    }
}

impl std::fmt::Display for PresenceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Presence state per user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPresence {
    pub user_id: UserId,
    pub username: Username,
    pub status: PresenceStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_seen: Option<Timestamp>,
}

impl UserPresence {
    pub fn new(user_id: UserId, username: Username, status: PresenceStatus) -> Self {
        Self {
            user_id,
            username,
            status,
            last_seen: None,
        }
    }

    pub fn with_last_seen(mut self, at: Timestamp) -> Self {
        self.last_seen = Some(at);
        self
    }

    pub fn is_online(&self) -> bool {
        self.status == PresenceStatus::Online
    }

    /// Mark the user offline, recording when they were last seen
    pub fn went_offline(mut self, at: Timestamp) -> Self {
        self.status = PresenceStatus::Offline;
        self.last_seen = Some(at);
        self
    }
}
