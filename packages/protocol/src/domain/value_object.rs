//! Value Objects for domain models.
//!
//! Value Objects are immutable objects that represent values in the domain.
//! They are compared by their value, not by identity. On the wire each one is
//! a plain JSON string, and decoding runs the same validation as `new`.

use chrono::{DateTime, FixedOffset, SecondsFormat};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::ValueObjectError;

/// Maximum length of identifiers (user, room, message)
pub const MAX_ID_CHARS: usize = 100;

/// Maximum length of a username
pub const MAX_USERNAME_CHARS: usize = 50;

/// Maximum length of a message body
pub const MAX_MESSAGE_CONTENT_CHARS: usize = 10000;

/// Maximum length of a room name
pub const MAX_ROOM_NAME_CHARS: usize = 100;

/// Defines a validated string value object: non-empty and bounded in
/// characters, serialized as a bare string.
macro_rules! bounded_string {
    (
        $(#[$meta:meta])*
        $name:ident, max = $max:expr, empty = $empty:ident, too_long = $too_long:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Create a new value, validating emptiness and length.
            ///
            /// # Errors
            ///
            /// Returns a `ValueObjectError` if the value is empty or too long
            pub fn new(value: impl Into<String>) -> Result<Self, ValueObjectError> {
                let value = value.into();
                if value.is_empty() {
                    return Err(ValueObjectError::$empty);
                }
                let len = value.chars().count();
                if len > $max {
                    return Err(ValueObjectError::$too_long {
                        max: $max,
                        actual: len,
                    });
                }
                Ok(Self(value))
            }

            /// Get the inner string value.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Convert to owned String.
            pub fn into_string(self) -> String {
                self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = ValueObjectError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = ValueObjectError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

bounded_string! {
    /// User identifier value object.
    UserId, max = MAX_ID_CHARS, empty = UserIdEmpty, too_long = UserIdTooLong
}

bounded_string! {
    /// Room identifier value object.
    RoomId, max = MAX_ID_CHARS, empty = RoomIdEmpty, too_long = RoomIdTooLong
}

bounded_string! {
    /// Message identifier value object.
    MessageId, max = MAX_ID_CHARS, empty = MessageIdEmpty, too_long = MessageIdTooLong
}

bounded_string! {
    /// Display name of a user.
    Username, max = MAX_USERNAME_CHARS, empty = UsernameEmpty, too_long = UsernameTooLong
}

bounded_string! {
    /// Message content value object.
    ///
    /// Represents the body of a chat message with validation.
    MessageContent,
    max = MAX_MESSAGE_CONTENT_CHARS,
    empty = MessageContentEmpty,
    too_long = MessageContentTooLong
}

bounded_string! {
    /// Room name value object.
    RoomName, max = MAX_ROOM_NAME_CHARS, empty = RoomNameEmpty, too_long = RoomNameTooLong
}

/// Timestamp value object.
///
/// An RFC 3339 date-time with offset. Equality and ordering compare the
/// instant, so `09:00+09:00` equals `00:00Z`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Timestamp(DateTime<FixedOffset>);

impl Timestamp {
    /// Create a new Timestamp from a date-time.
    pub fn new(value: DateTime<FixedOffset>) -> Self {
        Self(value)
    }

    /// Parse an RFC 3339 string.
    ///
    /// # Errors
    ///
    /// Returns `ValueObjectError::TimestampInvalidFormat` if the string is not RFC 3339
    pub fn parse(value: &str) -> Result<Self, ValueObjectError> {
        DateTime::parse_from_rfc3339(value)
            .map(Self)
            .map_err(|_| ValueObjectError::TimestampInvalidFormat(value.to_string()))
    }

    /// Current time (JST).
    pub fn now() -> Self {
        Self(hiroba_shared::time::now_jst())
    }

    /// Build from a Unix timestamp in milliseconds (JST).
    pub fn from_unix_millis(millis: i64) -> Option<Self> {
        hiroba_shared::time::timestamp_to_jst(millis).map(Self)
    }

    /// Get the inner date-time value.
    pub fn value(&self) -> DateTime<FixedOffset> {
        self.0
    }

    /// Unix timestamp in milliseconds.
    pub fn unix_millis(&self) -> i64 {
        self.0.timestamp_millis()
    }

    /// Format as RFC 3339.
    ///
    /// The output is normalized: a zero offset prints as `Z`, and sub-second
    /// digits, when present, are padded to 3, 6 or 9 places.
    pub fn to_rfc3339(&self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::AutoSi, true)
    }
}

impl TryFrom<String> for Timestamp {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Timestamp> for String {
    fn from(value: Timestamp) -> Self {
        value.to_rfc3339()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_rfc3339())
    }
}
