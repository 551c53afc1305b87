//! Domain layer error definitions.

use thiserror::Error;

/// Errors related to Value Objects validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueObjectError {
    #[error("UserId cannot be empty")]
    UserIdEmpty,

    #[error("UserId cannot exceed {max} characters (got {actual})")]
    UserIdTooLong { max: usize, actual: usize },

    #[error("RoomId cannot be empty")]
    RoomIdEmpty,

    #[error("RoomId cannot exceed {max} characters (got {actual})")]
    RoomIdTooLong { max: usize, actual: usize },

    #[error("MessageId cannot be empty")]
    MessageIdEmpty,

    #[error("MessageId cannot exceed {max} characters (got {actual})")]
    MessageIdTooLong { max: usize, actual: usize },

    #[error("Username cannot be empty")]
    UsernameEmpty,

    #[error("Username cannot exceed {max} characters (got {actual})")]
    UsernameTooLong { max: usize, actual: usize },

    #[error("MessageContent cannot be empty")]
    MessageContentEmpty,

    #[error("MessageContent cannot exceed {max} characters (got {actual})")]
    MessageContentTooLong { max: usize, actual: usize },

    #[error("RoomName cannot be empty")]
    RoomNameEmpty,

    #[error("RoomName cannot exceed {max} characters (got {actual})")]
    RoomNameTooLong { max: usize, actual: usize },

    #[error("Room description cannot exceed {max} characters (got {actual})")]
    RoomDescriptionTooLong { max: usize, actual: usize },

    /// Timestamp is not an RFC 3339 date-time with offset
    #[error("Timestamp must be an RFC 3339 date-time (got: {0})")]
    TimestampInvalidFormat(String),
}

/// Errors related to cross-field rules of entities
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EntityError {
    /// The embedded user of a message is not its author
    #[error("Embedded user '{embedded}' does not match message userId '{user_id}'")]
    EmbeddedUserMismatch { user_id: String, embedded: String },
}
