//! Wire contract integration tests.
//!
//! Decodes a recorded event stream and checks the envelope invariants end to end.

use hiroba_protocol::{
    Envelope, EventKind, EventPayload, ProtocolError, TypingIndicator, WireFormat,
};

const EVENTS: &str = include_str!("fixtures/events.ndjson");

fn decode_fixture() -> Vec<Envelope> {
    EVENTS
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| Envelope::decode(line).expect("fixture line should decode"))
        .collect()
}

#[test]
fn test_fixture_stream_decodes_in_order() {
    // テスト項目: 記録されたイベント列が順番通りに全て復元できる
    // when (操作):
    let envelopes = decode_fixture();

    // then (期待する結果):
    let kinds: Vec<EventKind> = envelopes.iter().map(Envelope::kind).collect();
    assert_eq!(
        kinds,
        vec![
            EventKind::UserJoined,
            EventKind::TypingStart,
            EventKind::TypingStop,
            EventKind::Message,
            EventKind::UserLeft,
        ]
    );
    assert!(envelopes.iter().all(|e| e.room_id().as_str() == "general"));
}

#[test]
fn test_fixture_timestamps_are_ordered() {
    // テスト項目: オフセットが異なっても timestamp は瞬間で比較される
    // when (操作):
    let envelopes = decode_fixture();

    // then (期待する結果): 最後のイベント（+09:00 表記）が最も新しい
    assert!(envelopes.windows(2).all(|w| w[0].timestamp < w[1].timestamp));
}

#[test]
fn test_fixture_typing_events_become_indicators() {
    // テスト項目: typing イベントのペイロードから TypingIndicator を作れる
    // when (操作):
    let indicators: Vec<TypingIndicator> = decode_fixture()
        .into_iter()
        .filter_map(|e| match e.payload {
            EventPayload::TypingStart(data) => Some(data.into()),
            EventPayload::TypingStop(data) => Some(data.into()),
            _ => None,
        })
        .collect();

    // then (期待する結果):
    assert_eq!(indicators.len(), 2);
    assert!(indicators.iter().all(|i| i.username.as_str() == "alice"));
}

#[test]
fn test_reencoded_fixture_keeps_wire_shape() {
    // テスト項目: 再エンコードしても元の JSON と同じ構造になる
    for line in EVENTS.lines().filter(|l| !l.trim().is_empty()) {
        // given (前提条件):
        let original: serde_json::Value = serde_json::from_str(line).unwrap();

        // when (操作):
        let encoded = Envelope::decode(line).unwrap().encode().unwrap();
        let reencoded: serde_json::Value = serde_json::from_str(&encoded).unwrap();

        // then (期待する結果):
        assert_eq!(reencoded, original);
    }
}

#[test]
fn test_swapped_payload_is_rejected() {
    // テスト項目: 別のイベントのデータを付け替えると PayloadMismatch になる
    // given (前提条件): user_joined のデータに message のタグ
    let joined: serde_json::Value =
        serde_json::from_str(EVENTS.lines().next().unwrap()).unwrap();
    let mut swapped = joined.clone();
    swapped["type"] = serde_json::json!("message");

    // when (操作):
    let result = <Envelope as WireFormat>::decode(&swapped.to_string());

    // then (期待する結果):
    match result {
        Err(ProtocolError::PayloadMismatch { kind, .. }) => assert_eq!(kind, EventKind::Message),
        other => panic!("expected PayloadMismatch, got {other:?}"),
    }
}

#[test]
fn test_not_json_is_malformed() {
    // テスト項目: JSON でない入力は Malformed になる
    // when (操作):
    let result = Envelope::decode("hello");

    // then (期待する結果):
    assert!(matches!(result, Err(ProtocolError::Malformed(_))));
}
