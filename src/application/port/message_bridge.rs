// SPDX-License-Identifier: MPL-2.0
//! Cross-origin message bridge port definition.
//!
//! The bridge delivers untrusted messages posted by another window. Origin
//! filtering is the adapter's job; shape filtering happens in
//! [`ingest::classify`](crate::application::ingest::classify).

use crate::domain::attachment::MimeType;
use std::collections::BTreeMap;
use std::sync::Arc;

/// A binary payload as posted by the sender (e.g. a canvas export).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlobPayload {
    bytes: Arc<[u8]>,
    mime_type: Option<MimeType>,
}

impl BlobPayload {
    pub fn new(bytes: impl Into<Arc<[u8]>>, mime_type: Option<MimeType>) -> Self {
        Self {
            bytes: bytes.into(),
            mime_type,
        }
    }

    #[must_use]
    pub fn bytes(&self) -> &Arc<[u8]> {
        &self.bytes
    }

    /// The blob's declared type. Empty or missing on many senders.
    #[must_use]
    pub fn mime_type(&self) -> Option<&MimeType> {
        self.mime_type.as_ref()
    }
}

/// Structured clone of a posted message, reduced to the shapes we care about.
#[derive(Debug, Clone, PartialEq)]
pub enum BridgeMessage {
    Text(String),
    Blob(BlobPayload),
    Object(BTreeMap<String, BridgeMessage>),
    Number(f64),
    Bool(bool),
    Null,
}

impl BridgeMessage {
    /// Convenience constructor for an object wrapping a single field.
    pub fn object_with(field: impl Into<String>, value: BridgeMessage) -> Self {
        let mut map = BTreeMap::new();
        map.insert(field.into(), value);
        BridgeMessage::Object(map)
    }
}

/// Port for receiving bridge messages without blocking.
pub trait MessageBridge {
    /// Returns the next queued message, or `None` if nothing is waiting.
    fn poll_message(&mut self) -> Option<BridgeMessage>;
}
