//! Domain layer for the chat data contract.
//!
//! Records, value objects and their validation rules, independent of the
//! realtime envelope that carries them.

pub mod entity;
pub mod error;
pub mod factory;
pub mod value_object;

pub use entity::{Message, PresenceStatus, Room, TypingIndicator, User, UserPresence};
pub use error::{EntityError, ValueObjectError};
pub use factory::IdFactory;
pub use value_object::{MessageContent, MessageId, RoomId, RoomName, Timestamp, UserId, Username};
