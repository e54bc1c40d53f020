// SPDX-License-Identifier: MPL-2.0
//! The image attachment controller.
//!
//! Owns the single live [`Attachment`] and drives it through
//! `Empty -> Pending -> {Valid, Invalid}`. Every ingestion fully replaces the
//! previous attachment; `remove()` returns to `Empty` from any state.
//!
//! Ingestion that involves a slow read is split in two: [`begin`] hands out an
//! [`IngestTicket`] tagged with a monotonically increasing sequence number,
//! and [`complete`] applies the result only if that ticket is still the latest
//! one. A newer ingestion or a removal makes older tickets stale.
//!
//! The controller never talks to the submission backend.
//!
//! [`begin`]: ImageAttachmentController::begin
//! [`complete`]: ImageAttachmentController::complete

use super::ingest::{self, IngestInput};
use super::port::{BlobPayload, BridgeMessage, FileHandle, MessageBridge};
use crate::domain::attachment::{Attachment, AttachmentSource, UploadPolicy, Validity};
use crate::domain::error::AttachmentError;

/// Proof that an ingestion was started. Consumed by [`ImageAttachmentController::complete`].
#[derive(Debug, PartialEq, Eq)]
#[must_use = "an ingestion ticket must be completed"]
pub struct IngestTicket {
    seq: u64,
    source: AttachmentSource,
}

impl IngestTicket {
    #[must_use]
    pub fn seq(&self) -> u64 {
        self.seq
    }

    #[must_use]
    pub fn source(&self) -> AttachmentSource {
        self.source
    }
}

/// What happened to a completed ingestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The result replaced the current attachment.
    Applied(Validity),
    /// A newer ingestion or a removal happened meanwhile; the result was dropped.
    Stale,
}

/// Converts heterogeneous image inputs into one validated, displayable attachment.
#[derive(Debug, Default)]
pub struct ImageAttachmentController {
    policy: UploadPolicy,
    attachment: Option<Attachment>,
    latest_seq: u64,
}

impl ImageAttachmentController {
    #[must_use]
    pub fn new(policy: UploadPolicy) -> Self {
        Self {
            policy,
            attachment: None,
            latest_seq: 0,
        }
    }

    #[must_use]
    pub fn policy(&self) -> &UploadPolicy {
        &self.policy
    }

    // =========================================================================
    // Ingestion
    // =========================================================================

    /// Starts an ingestion: the current attachment becomes `Pending` and any
    /// previous preview disappears.
    pub fn begin(&mut self, source: AttachmentSource) -> IngestTicket {
        self.latest_seq += 1;
        self.attachment = Some(Attachment::pending(source));
        tracing::debug!(seq = self.latest_seq, %source, "attachment ingestion started");
        IngestTicket {
            seq: self.latest_seq,
            source,
        }
    }

    /// Finishes an ingestion started with [`begin`](Self::begin).
    ///
    /// `result` carries the loaded input, or the error that prevented loading
    /// it (which becomes an `Invalid` attachment).
    pub fn complete(
        &mut self,
        ticket: IngestTicket,
        result: Result<IngestInput, AttachmentError>,
    ) -> Completion {
        if ticket.seq != self.latest_seq {
            tracing::debug!(
                seq = ticket.seq,
                latest = self.latest_seq,
                "discarding stale attachment result"
            );
            return Completion::Stale;
        }

        let attachment = match result {
            Ok(input) => ingest::normalize(input, &self.policy),
            // An invalid attachment always carries a reason users can read.
            Err(error) if !error.is_user_visible() => Attachment::invalid(
                ticket.source,
                None,
                None,
                AttachmentError::ConversionFailure(error.to_string()),
            ),
            Err(error) => Attachment::invalid(ticket.source, None, None, error),
        };

        let validity = attachment.validity();
        match attachment.error() {
            Some(error) => tracing::info!(
                seq = ticket.seq,
                source = %ticket.source,
                %error,
                "attachment rejected"
            ),
            None => tracing::info!(
                seq = ticket.seq,
                source = %ticket.source,
                mime = attachment.mime_type().map_or("", |m| m.as_str()),
                "attachment accepted"
            ),
        }
        self.attachment = Some(attachment);
        Completion::Applied(validity)
    }

    /// Ingests an input synchronously.
    pub fn ingest(&mut self, input: IngestInput) -> Validity {
        let ticket = self.begin(input.source());
        match self.complete(ticket, Ok(input)) {
            Completion::Applied(validity) => validity,
            // A fresh ticket is always the latest one.
            Completion::Stale => Validity::Pending,
        }
    }

    /// Ingests a base64 `data:` URI. The URI itself becomes the preview.
    pub fn ingest_data_uri(&mut self, uri: impl Into<String>) -> Validity {
        self.ingest(IngestInput::DataUri(uri.into()))
    }

    /// Ingests a binary blob, encoding it as a `data:` URI for the preview.
    pub fn ingest_blob(&mut self, blob: BlobPayload) -> Validity {
        self.ingest(IngestInput::Blob(blob))
    }

    /// Ingests a file already read by the file picker.
    pub fn ingest_file(&mut self, file: FileHandle) -> Validity {
        self.ingest(IngestInput::File(file))
    }

    /// Ingests a bridge message if it has a known shape.
    ///
    /// Returns `false` (and leaves state untouched) for unknown shapes.
    pub fn ingest_message(&mut self, message: BridgeMessage) -> bool {
        match ingest::classify(message) {
            Ok(input) => {
                self.ingest(input);
                true
            }
            Err(error) => {
                tracing::debug!(%error, "ignoring bridge message");
                false
            }
        }
    }

    /// Ingests every message currently queued on the bridge.
    ///
    /// Returns how many messages were accepted. Only the last one stays visible.
    pub fn drain(&mut self, bridge: &mut impl MessageBridge) -> usize {
        let mut accepted = 0;
        while let Some(message) = bridge.poll_message() {
            if self.ingest_message(message) {
                accepted += 1;
            }
        }
        accepted
    }

    // =========================================================================
    // Removal
    // =========================================================================

    /// Clears the attachment and its preview. No-op when nothing is attached.
    ///
    /// Any ingestion still in flight becomes stale.
    pub fn remove(&mut self) {
        if self.attachment.take().is_some() {
            self.latest_seq += 1;
            tracing::debug!(seq = self.latest_seq, "attachment removed");
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    #[must_use]
    pub fn attachment(&self) -> Option<&Attachment> {
        self.attachment.as_ref()
    }

    /// `None` when no attachment is present.
    #[must_use]
    pub fn validity(&self) -> Option<Validity> {
        self.attachment.as_ref().map(Attachment::validity)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attachment.is_none()
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.validity() == Some(Validity::Pending)
    }

    /// The preview `data:` URI, present only while the attachment is valid.
    #[must_use]
    pub fn current_preview(&self) -> Option<&str> {
        self.attachment.as_ref().and_then(Attachment::preview_uri)
    }

    #[must_use]
    pub fn error(&self) -> Option<&AttachmentError> {
        self.attachment.as_ref().and_then(Attachment::error)
    }

    /// Human-readable rejection reason, present only while invalid.
    #[must_use]
    pub fn error_reason(&self) -> Option<String> {
        self.error()
            .filter(|error| error.is_user_visible())
            .map(ToString::to_string)
    }

    /// Whether the "remove image" affordance should be shown.
    #[must_use]
    pub fn removal_visible(&self) -> bool {
        self.validity() == Some(Validity::Valid)
    }
}
