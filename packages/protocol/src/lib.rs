//! Realtime data contract for the Hiroba chat front end.
//!
//! - [`domain`]: messages, rooms, users, presence and typing records with
//!   their validation rules
//! - [`wire`]: the `{ type, data, timestamp }` envelope whose `type` tag
//!   determines the shape of `data`, and the JSON codec enforcing it

pub mod domain;
pub mod wire;

pub use domain::{
    EntityError, IdFactory, Message, MessageContent, MessageId, PresenceStatus, Room, RoomId,
    RoomName, Timestamp, TypingIndicator, User, UserId, UserPresence, Username, ValueObjectError,
};
pub use wire::{
    Envelope, EventKind, EventPayload, MessageData, ProtocolError, TypingStartData,
    TypingStopData, UserJoinedData, UserLeftData, WireFormat,
};
