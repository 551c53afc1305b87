//! Domain factories for creating identifiers.

use super::{MessageId, RoomId, error::ValueObjectError};

/// Factory for generating identifiers.
///
/// Generation is kept apart from the validation in the value objects; ids
/// created here are UUID v4 strings.
pub struct IdFactory;

impl IdFactory {
    /// Generate a new MessageId with a random UUID v4.
    ///
    /// # Errors
    ///
    /// This method should not fail in practice, but returns Result for consistency
    /// with the domain error handling pattern.
    pub fn message_id() -> Result<MessageId, ValueObjectError> {
        MessageId::new(uuid::Uuid::new_v4().to_string())
    }

    /// Generate a new RoomId with a random UUID v4.
    ///
    /// # Errors
    ///
    /// See [`IdFactory::message_id`].
    pub fn room_id() -> Result<RoomId, ValueObjectError> {
        RoomId::new(uuid::Uuid::new_v4().to_string())
    }
}
