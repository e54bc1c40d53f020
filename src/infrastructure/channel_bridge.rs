// SPDX-License-Identifier: MPL-2.0
//! Channel adapter implementing the [`MessageBridge`] port trait.
//!
//! Messages are posted by embedders together with the origin they came from.
//! Only messages from allowed origins reach the controller; everything else is
//! dropped here with a warning.
//!
//! [`MessageBridge`]: crate::application::port::MessageBridge

use tokio::sync::mpsc;

use crate::application::port::{BridgeMessage, MessageBridge};
use crate::application::ImageAttachmentController;

/// Matches every origin.
const ANY_ORIGIN: &str = "*";

/// A posted message and the origin that sent it.
#[derive(Debug, Clone, PartialEq)]
pub struct InboundMessage {
    pub origin: String,
    pub data: BridgeMessage,
}

/// Posting side of the bridge. Cheap to clone.
#[derive(Debug, Clone)]
pub struct BridgeSender {
    tx: mpsc::UnboundedSender<InboundMessage>,
}

impl BridgeSender {
    /// Posts a message. Returns `false` once the receiving side is gone.
    pub fn post(&self, origin: impl Into<String>, data: BridgeMessage) -> bool {
        self.tx
            .send(InboundMessage {
                origin: origin.into(),
                data,
            })
            .is_ok()
    }
}

/// Receiving side of the bridge, filtering by origin.
#[derive(Debug)]
pub struct ChannelBridge {
    rx: mpsc::UnboundedReceiver<InboundMessage>,
    allowed_origins: Vec<String>,
}

/// Creates a connected sender/bridge pair.
///
/// `"*"` in `allowed_origins` accepts every origin. An empty list accepts none.
pub fn pair(allowed_origins: Vec<String>) -> (BridgeSender, ChannelBridge) {
    let (tx, rx) = mpsc::unbounded_channel();
    let allowed_origins = allowed_origins
        .iter()
        .map(|origin| normalize_origin(origin))
        .collect();
    (
        BridgeSender { tx },
        ChannelBridge {
            rx,
            allowed_origins,
        },
    )
}

impl ChannelBridge {
    /// Returns `true` if messages from `origin` are accepted.
    #[must_use]
    pub fn accepts(&self, origin: &str) -> bool {
        let origin = normalize_origin(origin);
        self.allowed_origins
            .iter()
            .any(|allowed| allowed == ANY_ORIGIN || *allowed == origin)
    }

    /// Waits for the next message from an allowed origin.
    ///
    /// Returns `None` once every sender has been dropped.
    pub async fn recv(&mut self) -> Option<BridgeMessage> {
        while let Some(inbound) = self.rx.recv().await {
            if let Some(data) = self.admit(inbound) {
                return Some(data);
            }
        }
        None
    }

    /// Feeds every admitted message into the controller until all senders are
    /// dropped. Returns how many messages the controller accepted.
    pub async fn pump(&mut self, controller: &mut ImageAttachmentController) -> usize {
        let mut accepted = 0;
        while let Some(message) = self.recv().await {
            if controller.ingest_message(message) {
                accepted += 1;
            }
        }
        accepted
    }

    fn admit(&self, inbound: InboundMessage) -> Option<BridgeMessage> {
        if self.accepts(&inbound.origin) {
            Some(inbound.data)
        } else {
            tracing::warn!(origin = %inbound.origin, "dropping message from unexpected origin");
            None
        }
    }
}

impl MessageBridge for ChannelBridge {
    fn poll_message(&mut self) -> Option<BridgeMessage> {
        while let Ok(inbound) = self.rx.try_recv() {
            if let Some(data) = self.admit(inbound) {
                return Some(data);
            }
        }
        None
    }
}

fn normalize_origin(origin: &str) -> String {
    origin.trim().trim_end_matches('/').to_ascii_lowercase()
}
