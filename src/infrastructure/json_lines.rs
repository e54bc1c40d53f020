// SPDX-License-Identifier: MPL-2.0
//! Newline-delimited JSON feed for the message bridge.
//!
//! Each line is an envelope `{"origin": "<origin>", "data": <message>}`.
//! `data` maps onto [`BridgeMessage`]:
//!
//! - strings, numbers, booleans and `null` map directly
//! - objects map field by field, arrays become objects keyed by index
//! - an object with a `"$blob"` key is a blob: the key holds base64 bytes and
//!   an optional `"$type"` declares the MIME type
//!
//! A blob wrapped by a sender therefore reads
//! `{"screenshot": {"$blob": "iVBOR...", "$type": "image/png"}}`.

use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;
use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use super::channel_bridge::{BridgeSender, InboundMessage};
use crate::application::port::{BlobPayload, BridgeMessage};
use crate::domain::attachment::MimeType;
use crate::media::data_uri;

/// Key marking an object as a blob.
pub const BLOB_KEY: &str = "$blob";
/// Optional MIME type of a blob.
pub const BLOB_TYPE_KEY: &str = "$type";

#[derive(Debug, Deserialize)]
struct Envelope {
    origin: String,
    data: Value,
}

/// Errors produced while reading one line of the feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedError {
    /// The line is not a valid envelope.
    Json(String),
    /// A `"$blob"` value is not a base64 string.
    InvalidBlob(String),
}

impl fmt::Display for FeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedError::Json(msg) => write!(f, "invalid bridge envelope: {msg}"),
            FeedError::InvalidBlob(msg) => write!(f, "invalid blob: {msg}"),
        }
    }
}

impl std::error::Error for FeedError {}

/// Parses one feed line into an inbound message.
///
/// # Errors
///
/// Returns a [`FeedError`] for malformed JSON or undecodable blobs.
pub fn parse_line(line: &str) -> Result<InboundMessage, FeedError> {
    let envelope: Envelope =
        serde_json::from_str(line).map_err(|e| FeedError::Json(e.to_string()))?;
    Ok(InboundMessage {
        origin: envelope.origin,
        data: to_bridge_message(envelope.data)?,
    })
}

/// Converts a JSON value into the bridge's message shape.
///
/// # Errors
///
/// Returns [`FeedError::InvalidBlob`] when a nested blob cannot be decoded.
pub fn to_bridge_message(value: Value) -> Result<BridgeMessage, FeedError> {
    Ok(match value {
        Value::Null => BridgeMessage::Null,
        Value::Bool(b) => BridgeMessage::Bool(b),
        Value::Number(n) => n.as_f64().map_or(BridgeMessage::Null, BridgeMessage::Number),
        Value::String(s) => BridgeMessage::Text(s),
        Value::Array(items) => BridgeMessage::Object(
            items
                .into_iter()
                .enumerate()
                .map(|(i, item)| Ok((i.to_string(), to_bridge_message(item)?)))
                .collect::<Result<BTreeMap<_, _>, FeedError>>()?,
        ),
        Value::Object(fields) if fields.contains_key(BLOB_KEY) => {
            let encoded = fields
                .get(BLOB_KEY)
                .and_then(Value::as_str)
                .ok_or_else(|| FeedError::InvalidBlob(format!("{BLOB_KEY} must be a string")))?;
            let bytes = data_uri::decode_base64(encoded)
                .map_err(|e| FeedError::InvalidBlob(e.to_string()))?;
            let mime_type = fields
                .get(BLOB_TYPE_KEY)
                .and_then(Value::as_str)
                .and_then(MimeType::parse);
            BridgeMessage::Blob(BlobPayload::new(bytes, mime_type))
        }
        Value::Object(fields) => BridgeMessage::Object(
            fields
                .into_iter()
                .map(|(key, item)| Ok((key, to_bridge_message(item)?)))
                .collect::<Result<BTreeMap<_, _>, FeedError>>()?,
        ),
    })
}

/// Reads envelopes line by line and posts them on the bridge.
///
/// Blank lines are skipped and bad lines are logged and skipped. Stops at end
/// of input or once the receiving side is gone. Returns how many messages
/// were posted.
pub async fn feed<R>(reader: R, sender: BridgeSender) -> usize
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let mut posted = 0;
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(error) => {
                tracing::warn!(%error, "bridge feed read failed");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }
        match parse_line(&line) {
            Ok(InboundMessage { origin, data }) => {
                if !sender.post(origin, data) {
                    break;
                }
                posted += 1;
            }
            Err(error) => tracing::warn!(%error, "skipping bridge feed line"),
        }
    }
    tracing::debug!(posted, "bridge feed finished");
    posted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ingest::SCREENSHOT_FIELD;
    use crate::infrastructure::channel_bridge::pair;

    const PNG_BYTES: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn text_line_becomes_text_message() {
        let line = r#"{"origin": "http://localhost:5000", "data": "data:image/png;base64,iVBORw0KGgo="}"#;
        let inbound = parse_line(line).unwrap();
        assert_eq!(inbound.origin, "http://localhost:5000");
        assert_eq!(
            inbound.data,
            BridgeMessage::Text("data:image/png;base64,iVBORw0KGgo=".into())
        );
    }

    #[test]
    fn blob_marker_decodes_bytes_and_type() {
        let inbound = parse_line(
            r#"{"origin": "o", "data": {"$blob": "iVBORw0KGgo=", "$type": "image/png"}}"#,
        )
        .unwrap();
        let BridgeMessage::Blob(blob) = inbound.data else {
            panic!("expected a blob");
        };
        assert_eq!(&blob.bytes()[..], PNG_BYTES);
        assert_eq!(blob.mime_type().map(MimeType::as_str), Some("image/png"));
    }

    #[test]
    fn wrapped_blob_keeps_its_field() {
        let inbound =
            parse_line(r#"{"origin": "o", "data": {"screenshot": {"$blob": "iVBORw0KGgo="}}}"#)
                .unwrap();
        let expected = BridgeMessage::object_with(
            SCREENSHOT_FIELD,
            BridgeMessage::Blob(BlobPayload::new(PNG_BYTES.to_vec(), None)),
        );
        assert_eq!(inbound.data, expected);
    }

    #[test]
    fn scalars_and_arrays_map_onto_message_shapes() {
        assert_eq!(to_bridge_message(Value::Null).unwrap(), BridgeMessage::Null);
        assert_eq!(
            to_bridge_message(serde_json::json!(3)).unwrap(),
            BridgeMessage::Number(3.0)
        );
        assert_eq!(
            to_bridge_message(serde_json::json!(["a"])).unwrap(),
            BridgeMessage::object_with("0", BridgeMessage::Text("a".into()))
        );
    }

    #[test]
    fn bad_lines_are_errors() {
        assert!(matches!(parse_line("not json"), Err(FeedError::Json(_))));
        assert!(matches!(
            parse_line(r#"{"data": "x"}"#),
            Err(FeedError::Json(_))
        ));
        assert!(matches!(
            parse_line(r#"{"origin": "o", "data": {"$blob": "***"}}"#),
            Err(FeedError::InvalidBlob(_))
        ));
        assert!(matches!(
            parse_line(r#"{"origin": "o", "data": {"$blob": 7}}"#),
            Err(FeedError::InvalidBlob(_))
        ));
    }

    #[tokio::test]
    async fn feed_posts_good_lines_and_skips_bad_ones() {
        let input: &[u8] = b"{\"origin\": \"o\", \"data\": \"hello\"}\n\
            \n\
            garbage\n\
            {\"origin\": \"o\", \"data\": null}\n";
        let (sender, mut bridge) = pair(vec!["*".to_string()]);

        let posted = feed(input, sender).await;
        assert_eq!(posted, 2);
        assert_eq!(bridge.recv().await, Some(BridgeMessage::Text("hello".into())));
        assert_eq!(bridge.recv().await, Some(BridgeMessage::Null));
        assert_eq!(bridge.recv().await, None);
    }
}
