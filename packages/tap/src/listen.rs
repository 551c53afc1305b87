//! Tap a websocket endpoint and decode every inbound frame as an envelope.
//!
//! Connects once. There is no reconnection: the tap ends when the peer
//! closes the connection or the shutdown future completes.

use std::future::Future;

use futures_util::{SinkExt, StreamExt};
use hiroba_protocol::{Envelope, ProtocolError};
use tokio_tungstenite::{connect_async, tungstenite::Message};

use crate::{error::TapError, handler::EventHandler};

/// Counters of a finished tap
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ListenSummary {
    /// Text and binary frames read
    pub frames: usize,
    /// Frames decoded into envelopes
    pub decoded: usize,
    /// Frames that failed to decode
    pub rejected: usize,
}

/// Connect to `url` and feed every data frame to `handler`.
///
/// # Errors
///
/// Returns `TapError::WebSocket` if the connection cannot be established or
/// breaks without a close handshake. Undecodable frames are not errors; they
/// go to [`EventHandler::on_invalid`].
pub async fn listen<H, F>(url: &str, handler: &mut H, shutdown: F) -> Result<ListenSummary, TapError>
where
    H: EventHandler + ?Sized,
    F: Future<Output = ()>,
{
    let (ws_stream, _response) = connect_async(url).await?;
    tracing::info!("Connected to '{}'", url);

    let (mut sender, mut receiver) = ws_stream.split();
    tokio::pin!(shutdown);

    let mut summary = ListenSummary::default();

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                tracing::info!("Shutdown requested, closing connection to '{}'", url);
                if let Err(e) = sender.send(Message::Close(None)).await {
                    tracing::warn!("Failed to send close frame: {}", e);
                }
                break;
            }
            frame = receiver.next() => {
                let Some(frame) = frame else {
                    tracing::info!("Connection to '{}' ended", url);
                    break;
                };

                match frame? {
                    Message::Text(text) => dispatch(text.as_str(), handler, &mut summary),
                    Message::Binary(bytes) => dispatch_binary(&bytes, handler, &mut summary),
                    Message::Close(frame) => {
                        tracing::info!("Peer closed connection: {:?}", frame);
                        break;
                    }
                    Message::Ping(_) => {
                        tracing::debug!("Received ping");
                        // Pong is sent by the protocol layer
                    }
                    _ => {}
                }
            }
        }
    }

    Ok(summary)
}

/// Decode one frame and hand it to the handler
pub(crate) fn dispatch<H>(text: &str, handler: &mut H, summary: &mut ListenSummary)
where
    H: EventHandler + ?Sized,
{
    summary.frames += 1;

    match Envelope::decode(text) {
        Ok(envelope) => {
            tracing::debug!("Decoded '{}' event", envelope.kind());
            summary.decoded += 1;
            handler.on_envelope(&envelope);
        }
        Err(e) => reject(text, &e, handler, summary),
    }
}

/// Decode a binary frame as UTF-8 JSON; other bytes are rejected
pub(crate) fn dispatch_binary<H>(bytes: &[u8], handler: &mut H, summary: &mut ListenSummary)
where
    H: EventHandler + ?Sized,
{
    match std::str::from_utf8(bytes) {
        Ok(text) => dispatch(text, handler, summary),
        Err(e) => {
            summary.frames += 1;
            let lossy = String::from_utf8_lossy(bytes);
            reject(&lossy, &ProtocolError::InvalidUtf8(e), handler, summary);
        }
    }
}

fn reject<H>(text: &str, error: &ProtocolError, handler: &mut H, summary: &mut ListenSummary)
where
    H: EventHandler + ?Sized,
{
    tracing::warn!("Rejected frame: {}", error);
    summary.rejected += 1;
    handler.on_invalid(text, error);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::MockEventHandler;
    use hiroba_protocol::EventKind;

    #[test]
    fn test_dispatch_valid_frame() {
        // テスト項目: 正しいフレームは on_envelope に渡され、decoded が増える
        // given (前提条件):
        let mut handler = MockEventHandler::new();
        handler
            .expect_on_envelope()
            .withf(|e: &Envelope| e.kind() == EventKind::UserLeft)
            .times(1)
            .return_const(());
        handler.expect_on_invalid().never();
        let mut summary = ListenSummary::default();

        // when (操作):
        dispatch(
            r#"{"type":"user_left","data":{"user":{"id":"u-1","username":"alice"},"roomId":"general"},"timestamp":"2024-01-01T00:00:00Z"}"#,
            &mut handler,
            &mut summary,
        );

        // then (期待する結果):
        assert_eq!(
            summary,
            ListenSummary {
                frames: 1,
                decoded: 1,
                rejected: 0
            }
        );
    }

    #[test]
    fn test_dispatch_mismatched_frame() {
        // テスト項目: タグとデータが一致しないフレームは on_invalid に渡される
        // given (前提条件):
        let mut handler = MockEventHandler::new();
        handler.expect_on_envelope().never();
        handler
            .expect_on_invalid()
            .withf(|_raw: &str, e: &ProtocolError| {
                matches!(
                    e,
                    ProtocolError::PayloadMismatch {
                        kind: EventKind::Message,
                        ..
                    }
                )
            })
            .times(1)
            .return_const(());
        let mut summary = ListenSummary::default();

        // when (操作):
        dispatch(
            r#"{"type":"message","data":{"userId":"u-1"},"timestamp":"2024-01-01T00:00:00Z"}"#,
            &mut handler,
            &mut summary,
        );

        // then (期待する結果):
        assert_eq!(summary.frames, 1);
        assert_eq!(summary.rejected, 1);
        assert_eq!(summary.decoded, 0);
    }

    #[test]
    fn test_dispatch_binary_invalid_utf8() {
        // テスト項目: UTF-8 でないバイナリフレームも数えられ、on_invalid に渡される
        // given (前提条件):
        let mut handler = MockEventHandler::new();
        handler.expect_on_envelope().never();
        handler
            .expect_on_invalid()
            .withf(|raw: &str, e: &ProtocolError| {
                raw == "\u{fffd}\u{fffd}" && matches!(e, ProtocolError::InvalidUtf8(_))
            })
            .times(1)
            .return_const(());
        let mut summary = ListenSummary::default();

        // when (操作):
        dispatch_binary(&[0xff, 0xfe], &mut handler, &mut summary);

        // then (期待する結果):
        assert_eq!(
            summary,
            ListenSummary {
                frames: 1,
                decoded: 0,
                rejected: 1
            }
        );
    }
}
