// SPDX-License-Identifier: MPL-2.0
//! Input normalization for the upload control.
//!
//! Every source (data URI, blob, blob wrapped in an object, picked file) is
//! funnelled through [`normalize`], so identical image bytes always end up as
//! an identical attachment whatever path they took.

use crate::application::port::{BlobPayload, BridgeMessage, FileHandle};
use crate::domain::attachment::{
    validate, Attachment, AttachmentSource, MimeType, RawPayload, UploadPolicy, Verdict,
};
use crate::domain::error::AttachmentError;
use crate::media::data_uri::{self, DataUri};
use crate::media::mime;
use std::sync::Arc;

/// Field under which senders wrap a blob inside an object message.
pub const SCREENSHOT_FIELD: &str = "screenshot";

/// One logical "accept image-like input" capability, three payload shapes.
#[derive(Debug, Clone, PartialEq)]
pub enum IngestInput {
    DataUri(String),
    Blob(BlobPayload),
    File(FileHandle),
}

impl IngestInput {
    #[must_use]
    pub fn source(&self) -> AttachmentSource {
        match self {
            IngestInput::DataUri(_) => AttachmentSource::DataUri,
            IngestInput::Blob(_) => AttachmentSource::Blob,
            IngestInput::File(_) => AttachmentSource::File,
        }
    }
}

/// Maps a bridge message onto an ingestion input.
///
/// Accepted shapes: a data-URI string, a blob, or an object carrying a blob
/// under [`SCREENSHOT_FIELD`]. Only one level of wrapping is unwrapped.
///
/// # Errors
///
/// Returns [`AttachmentError::MalformedPayload`] for every other shape.
pub fn classify(message: BridgeMessage) -> Result<IngestInput, AttachmentError> {
    match message {
        BridgeMessage::Text(text) if data_uri::is_data_uri(&text) => {
            Ok(IngestInput::DataUri(text))
        }
        BridgeMessage::Blob(blob) => Ok(IngestInput::Blob(blob)),
        BridgeMessage::Object(mut fields) => match fields.remove(SCREENSHOT_FIELD) {
            Some(BridgeMessage::Blob(blob)) => Ok(IngestInput::Blob(blob)),
            _ => Err(AttachmentError::MalformedPayload),
        },
        _ => Err(AttachmentError::MalformedPayload),
    }
}

/// Intermediate result shared by all sources before validation.
struct Candidate {
    source: AttachmentSource,
    file_name: Option<String>,
    raw: RawPayload,
    mime_type: Option<MimeType>,
    bytes: Arc<[u8]>,
    /// Canonical form of an incoming `data:` URI, reused as the preview.
    ready_preview: Option<String>,
}

/// Converts any input into a fully validated attachment (`Valid` or `Invalid`).
#[must_use]
pub fn normalize(input: IngestInput, policy: &UploadPolicy) -> Attachment {
    let source = input.source();
    match prepare(input) {
        Ok(candidate) => finish(candidate, policy),
        Err((raw, error)) => Attachment::invalid(source, raw, None, error),
    }
}

type PrepareError = (Option<RawPayload>, AttachmentError);

fn prepare(input: IngestInput) -> Result<Candidate, PrepareError> {
    match input {
        IngestInput::DataUri(uri) => {
            let decoded = DataUri::parse(&uri)
                .and_then(|parsed| parsed.decode().map(|bytes| (parsed, bytes)));
            let (mime_type, bytes, ready_preview) = match decoded {
                // The preview is rebuilt from parsed parts; header parameters never reach it.
                Ok((parsed, bytes)) => (parsed.mime_type().cloned(), bytes, parsed.canonical()),
                Err(e) => return Err(conversion_failure(RawPayload::Text(uri.clone()), &e)),
            };
            Ok(Candidate {
                source: AttachmentSource::DataUri,
                file_name: None,
                raw: RawPayload::Text(uri),
                mime_type,
                bytes: Arc::from(bytes),
                ready_preview,
            })
        }
        IngestInput::Blob(blob) => {
            // Blobs have no name to fall back on; sniff when the declared type is useless.
            let mime_type = reliable(blob.mime_type()).or_else(|| mime::sniff(blob.bytes()));
            Ok(Candidate {
                source: AttachmentSource::Blob,
                file_name: None,
                raw: RawPayload::Binary(Arc::clone(blob.bytes())),
                mime_type,
                bytes: Arc::clone(blob.bytes()),
                ready_preview: None,
            })
        }
        IngestInput::File(file) => {
            let mime_type =
                reliable(file.declared_mime()).or_else(|| mime::from_file_name(file.name()));
            Ok(Candidate {
                source: AttachmentSource::File,
                file_name: Some(file.name().to_string()),
                raw: RawPayload::Binary(Arc::clone(file.contents())),
                mime_type,
                bytes: Arc::clone(file.contents()),
                ready_preview: None,
            })
        }
    }
}

fn finish(candidate: Candidate, policy: &UploadPolicy) -> Attachment {
    let Candidate {
        source,
        file_name,
        raw,
        mime_type,
        bytes,
        ready_preview,
    } = candidate;

    let verdict = validate(mime_type.as_ref(), bytes.len() as u64, policy);
    let attachment = match (verdict, mime_type) {
        (Verdict::Valid, Some(mime_type)) if !bytes.is_empty() => {
            let preview_uri =
                ready_preview.unwrap_or_else(|| data_uri::encode(&mime_type, &bytes));
            Attachment::valid(source, raw, mime_type, preview_uri)
        }
        (Verdict::Valid, mime_type) => Attachment::invalid(
            source,
            Some(raw),
            mime_type,
            AttachmentError::ConversionFailure("empty payload".to_string()),
        ),
        (Verdict::Invalid(error), mime_type) => {
            Attachment::invalid(source, Some(raw), mime_type, error)
        }
    };
    attachment.with_file_name(file_name)
}

/// Drops missing and `application/octet-stream` declarations.
fn reliable(declared: Option<&MimeType>) -> Option<MimeType> {
    declared.filter(|mime| !mime.is_opaque()).cloned()
}

fn conversion_failure(raw: RawPayload, error: &dyn std::fmt::Display) -> PrepareError {
    (
        Some(raw),
        AttachmentError::ConversionFailure(error.to_string()),
    )
}
