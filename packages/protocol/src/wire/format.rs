//! JSON text codec shared by every top-level wire record.

use serde::{Serialize, de::DeserializeOwned};

use super::{envelope::Envelope, error::ProtocolError};
use crate::domain::{Message, Room, TypingIndicator, User, UserPresence};

/// A record that can be exchanged as JSON text.
///
/// `decode` parses and then runs `check`, which holds the cross-field rules
/// serde cannot express.
pub trait WireFormat: Serialize + DeserializeOwned {
    /// Cross-field rules of the record
    fn check(&self) -> Result<(), ProtocolError> {
        Ok(())
    }

    /// Decode a record from JSON text
    fn decode(text: &str) -> Result<Self, ProtocolError> {
        let record: Self = serde_json::from_str(text).map_err(ProtocolError::Malformed)?;
        record.check()?;
        Ok(record)
    }

    /// Encode the record as JSON text
    fn encode(&self) -> Result<String, ProtocolError> {
        serde_json::to_string(self).map_err(ProtocolError::Encode)
    }
}

impl WireFormat for User {}

impl WireFormat for TypingIndicator {}

impl WireFormat for UserPresence {}

impl WireFormat for Message {
    fn check(&self) -> Result<(), ProtocolError> {
        Ok(self.validate()?)
    }
}

impl WireFormat for Room {
    fn check(&self) -> Result<(), ProtocolError> {
        Ok(self.validate()?)
    }
}

impl WireFormat for Envelope {
    fn check(&self) -> Result<(), ProtocolError> {
        self.payload.validate()
    }

    fn decode(text: &str) -> Result<Self, ProtocolError> {
        Envelope::decode(text)
    }

    fn encode(&self) -> Result<String, ProtocolError> {
        Envelope::encode(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire::EventKind;

    fn decode_as<T: WireFormat>(text: &str) -> Result<T, ProtocolError> {
        T::decode(text)
    }

    #[test]
    fn test_decode_message_runs_check() {
        // テスト項目: WireFormat::decode は Message の整合性チェックを実行する
        // given (前提条件):
        let text = r#"{"id":"m-1","content":"hi","userId":"u-1","roomId":"r-1","createdAt":"2024-01-01T00:00:00Z","user":{"id":"u-2","username":"bob"}}"#;

        // when (操作):
        let result = decode_as::<Message>(text);

        // then (期待する結果):
        assert!(matches!(result, Err(ProtocolError::Entity(_))));
    }

    #[test]
    fn test_decode_room_runs_check() {
        // テスト項目: WireFormat::decode は Room の説明文の長さを検証する
        // given (前提条件):
        let text = serde_json::json!({
            "id": "r-1",
            "name": "Random",
            "description": "d".repeat(1001),
            "isPrivate": false,
            "createdAt": "2024-01-01T00:00:00Z"
        })
        .to_string();

        // when (操作):
        let result = decode_as::<Room>(&text);

        // then (期待する結果):
        assert!(matches!(result, Err(ProtocolError::ValueObject(_))));
    }

    #[test]
    fn test_decode_presence_malformed() {
        // テスト項目: 必須フィールドが欠けたプレゼンスは Malformed になる
        // when (操作):
        let result = decode_as::<UserPresence>(r#"{"userId":"u-1","status":"online"}"#);

        // then (期待する結果):
        assert!(matches!(result, Err(ProtocolError::Malformed(_))));
    }

    #[test]
    fn test_envelope_uses_tag_aware_decode() {
        // テスト項目: Envelope の WireFormat 実装はタグを考慮した復元を行う
        // when (操作):
        let result = decode_as::<Envelope>(
            r#"{"type":"user_left","data":{},"timestamp":"2024-01-01T00:00:00Z"}"#,
        );

        // then (期待する結果):
        assert!(matches!(
            result,
            Err(ProtocolError::PayloadMismatch {
                kind: EventKind::UserLeft,
                ..
            })
        ));
    }
}
