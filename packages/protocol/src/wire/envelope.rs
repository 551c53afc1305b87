//! Realtime event envelope: `{ "type", "data", "timestamp" }`.
//!
//! Decoding reads the `type` tag first and then decodes `data` strictly as the
//! payload record for that tag, so a decoded `Envelope` always has a payload
//! matching its kind.

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use super::{error::ProtocolError, kind::EventKind, payload::EventPayload};
use crate::domain::{RoomId, Timestamp};

/// A realtime event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub payload: EventPayload,
    pub timestamp: Timestamp,
}

/// Envelope as it arrives, before the tag is checked against the payload
#[derive(Deserialize)]
struct RawEnvelope {
    #[serde(rename = "type")]
    kind: String,
    data: serde_json::Value,
    timestamp: String,
}

#[derive(Serialize)]
struct EnvelopeRef<'a> {
    #[serde(rename = "type")]
    kind: EventKind,
    data: &'a EventPayload,
    timestamp: &'a Timestamp,
}

impl Envelope {
    pub fn new(payload: impl Into<EventPayload>, timestamp: Timestamp) -> Self {
        Self {
            payload: payload.into(),
            timestamp,
        }
    }

    /// Create an envelope stamped with the current time
    pub fn now(payload: impl Into<EventPayload>) -> Self {
        Self::new(payload, Timestamp::now())
    }

    pub fn kind(&self) -> EventKind {
        self.payload.kind()
    }

    pub fn room_id(&self) -> &RoomId {
        self.payload.room_id()
    }

    /// Decode an envelope from JSON text.
    ///
    /// # Errors
    ///
    /// * `Malformed` - not JSON, or `type`/`data`/`timestamp` missing
    /// * `UnknownEventType` - the tag is not a known event kind
    /// * `InvalidTimestamp` - `timestamp` is not RFC 3339
    /// * `PayloadMismatch` - `data` does not match the tag, including a field
    ///   of the right type whose value fails validation (e.g. empty `content`)
    /// * `Entity` - the payload breaks a cross-field rule
    pub fn decode(text: &str) -> Result<Self, ProtocolError> {
        let raw: RawEnvelope = serde_json::from_str(text).map_err(ProtocolError::Malformed)?;
        Self::from_raw(raw)
    }

    /// Decode an envelope from an already parsed JSON value.
    ///
    /// # Errors
    ///
    /// Same as [`Envelope::decode`].
    pub fn decode_value(value: serde_json::Value) -> Result<Self, ProtocolError> {
        let raw: RawEnvelope = serde_json::from_value(value).map_err(ProtocolError::Malformed)?;
        Self::from_raw(raw)
    }

    /// Encode the envelope as JSON text.
    pub fn encode(&self) -> Result<String, ProtocolError> {
        serde_json::to_string(self).map_err(ProtocolError::Encode)
    }

    fn from_raw(raw: RawEnvelope) -> Result<Self, ProtocolError> {
        let kind: EventKind = raw.kind.parse()?;
        let timestamp = Timestamp::parse(&raw.timestamp).map_err(ProtocolError::InvalidTimestamp)?;
        let payload = EventPayload::decode(kind, raw.data)?;
        Ok(Self { payload, timestamp })
    }
}

impl Serialize for Envelope {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        EnvelopeRef {
            kind: self.kind(),
            data: &self.payload,
            timestamp: &self.timestamp,
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Envelope {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawEnvelope::deserialize(deserializer)?;
        Self::from_raw(raw).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{Message, MessageContent, MessageId, User, UserId, Username},
        wire::payload::{MessageData, TypingStartData, UserLeftData},
    };
    use serde_json::json;

    fn message_json() -> serde_json::Value {
        json!({
            "type": "message",
            "data": {
                "message": {
                    "id": "m-1",
                    "content": "Hello!",
                    "userId": "u-alice",
                    "roomId": "general",
                    "createdAt": "2024-01-01T00:00:00Z",
                    "user": {"id": "u-alice", "username": "alice"}
                }
            },
            "timestamp": "2024-01-01T00:00:01Z"
        })
    }

    #[test]
    fn test_decode_message_envelope() {
        // テスト項目: message イベントを復元でき、ペイロードがタグと一致する
        // given (前提条件):
        let text = message_json().to_string();

        // when (操作):
        let envelope = Envelope::decode(&text).unwrap();

        // then (期待する結果):
        assert_eq!(envelope.kind(), EventKind::Message);
        assert_eq!(envelope.room_id().as_str(), "general");
        assert_eq!(envelope.timestamp.to_rfc3339(), "2024-01-01T00:00:01Z");
        let EventPayload::Message(data) = &envelope.payload else {
            panic!("expected message payload, got {:?}", envelope.payload);
        };
        assert_eq!(data.message.content.as_str(), "Hello!");
        assert_eq!(data.message.author_label(), "alice");
    }

    #[test]
    fn test_decode_unknown_type_fails() {
        // テスト項目: 未知のタグは UnknownEventType になる
        // given (前提条件):
        let mut value = message_json();
        value["type"] = json!("reaction");

        // when (操作):
        let result = Envelope::decode_value(value);

        // then (期待する結果):
        assert!(matches!(
            result,
            Err(ProtocolError::UnknownEventType(ref tag)) if tag == "reaction"
        ));
    }

    #[test]
    fn test_decode_missing_data_is_malformed() {
        // テスト項目: data が無いエンベロープは Malformed になる
        // given (前提条件):
        let text = r#"{"type":"typing_start","timestamp":"2024-01-01T00:00:00Z"}"#;

        // when (操作):
        let result = Envelope::decode(text);

        // then (期待する結果):
        assert!(matches!(result, Err(ProtocolError::Malformed(_))));
    }

    #[test]
    fn test_decode_invalid_timestamp_fails() {
        // テスト項目: RFC 3339 でない timestamp は InvalidTimestamp になる
        // given (前提条件):
        let mut value = message_json();
        value["timestamp"] = json!("yesterday");

        // when (操作):
        let result = Envelope::decode_value(value);

        // then (期待する結果):
        assert!(matches!(result, Err(ProtocolError::InvalidTimestamp(_))));
    }

    #[test]
    fn test_decode_invalid_field_value_is_payload_mismatch() {
        // テスト項目: data 内の値が検証に失敗した場合も PayloadMismatch になる
        // given (前提条件): 空のメッセージ内容
        let mut value = message_json();
        value["data"]["message"]["content"] = json!("");

        // when (操作):
        let result = Envelope::decode_value(value);

        // then (期待する結果):
        match result {
            Err(ProtocolError::PayloadMismatch { kind, source }) => {
                assert_eq!(kind, EventKind::Message);
                assert!(source.to_string().contains("MessageContent cannot be empty"));
            }
            other => panic!("expected PayloadMismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_embedded_user_mismatch_fails() {
        // テスト項目: 埋め込みユーザーが送信者と異なる message は Entity エラーになる
        // given (前提条件):
        let mut value = message_json();
        value["data"]["message"]["user"]["id"] = json!("u-mallory");

        // when (操作):
        let result = Envelope::decode_value(value);

        // then (期待する結果):
        assert!(matches!(result, Err(ProtocolError::Entity(_))));
    }

    #[test]
    fn test_encode_has_type_data_timestamp_only() {
        // テスト項目: エンコード結果は type / data / timestamp の 3 フィールドのみを持つ
        // given (前提条件):
        let envelope = Envelope::new(
            UserLeftData {
                user: User::new(UserId::new("u-bob").unwrap(), Username::new("bob").unwrap()),
                room_id: RoomId::new("general").unwrap(),
            },
            Timestamp::parse("2024-01-01T00:00:00Z").unwrap(),
        );

        // when (操作):
        let value: serde_json::Value = serde_json::from_str(&envelope.encode().unwrap()).unwrap();

        // then (期待する結果):
        assert_eq!(
            value,
            json!({
                "type": "user_left",
                "data": {"user": {"id": "u-bob", "username": "bob"}, "roomId": "general"},
                "timestamp": "2024-01-01T00:00:00Z"
            })
        );
    }

    #[test]
    fn test_encode_then_decode_preserves_envelope() {
        // テスト項目: エンコードしたエンベロープを再度復元すると同じ値になる
        // given (前提条件):
        let message = Message::new(
            MessageId::new("m-9").unwrap(),
            MessageContent::new("こんにちは").unwrap(),
            UserId::new("u-alice").unwrap(),
            RoomId::new("general").unwrap(),
            Timestamp::parse("2024-01-01T09:00:00+09:00").unwrap(),
        );
        let envelope = Envelope::now(MessageData { message });

        // when (操作):
        let decoded = Envelope::decode(&envelope.encode().unwrap()).unwrap();

        // then (期待する結果):
        assert_eq!(decoded, envelope);
    }

    #[test]
    fn test_serde_deserialize_reports_codec_error() {
        // テスト項目: serde 経由の復元でもタグ不一致はエラーになる
        // given (前提条件):
        let text = json!({
            "type": "message",
            "data": {"userId": "u-1", "username": "a", "roomId": "general"},
            "timestamp": "2024-01-01T00:00:00Z"
        })
        .to_string();

        // when (操作):
        let result = serde_json::from_str::<Envelope>(&text);

        // then (期待する結果):
        let err = result.unwrap_err();
        assert!(err.to_string().contains("Payload does not match event type 'message'"));
    }

    #[test]
    fn test_envelope_vec_deserializes() {
        // テスト項目: エンベロープの配列を serde で復元できる
        // given (前提条件):
        let typing = TypingStartData {
            user_id: UserId::new("u-1").unwrap(),
            username: Username::new("alice").unwrap(),
            room_id: RoomId::new("general").unwrap(),
        };
        let envelopes = vec![
            Envelope::new(typing, Timestamp::parse("2024-01-01T00:00:00Z").unwrap()),
        ];
        let text = serde_json::to_string(&envelopes).unwrap();

        // when (操作):
        let decoded: Vec<Envelope> = serde_json::from_str(&text).unwrap();

        // then (期待する結果):
        assert_eq!(decoded, envelopes);
        assert_eq!(decoded[0].kind(), EventKind::TypingStart);
    }
}
