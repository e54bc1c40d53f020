// SPDX-License-Identifier: MPL-2.0
//! Core attachment types for the domain layer.
//!
//! These types represent pure data without any presentation dependencies.
//! The invariant "a preview exists if and only if the attachment is valid" is
//! enforced by construction: the preview lives inside the `Valid` status.

use crate::domain::error::AttachmentError;
use std::fmt;
use std::sync::Arc;

/// Where an attachment came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttachmentSource {
    /// A base64 `data:` URI delivered by the message bridge.
    DataUri,
    /// A binary blob delivered by the message bridge (bare or wrapped).
    Blob,
    /// A file selected through the file picker.
    File,
}

impl fmt::Display for AttachmentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttachmentSource::DataUri => write!(f, "data-uri"),
            AttachmentSource::Blob => write!(f, "blob"),
            AttachmentSource::File => write!(f, "file"),
        }
    }
}

/// Validation state of the current attachment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validity {
    /// Ingestion started but has not produced a verdict yet.
    Pending,
    /// The attachment passed validation and has a preview.
    Valid,
    /// The attachment was rejected; an error reason is available.
    Invalid,
}

/// A normalized MIME type (`type/subtype`, lowercase, parameters stripped).
///
/// # Example
///
/// ```
/// use image_attach::domain::attachment::MimeType;
///
/// let mime = MimeType::parse("Image/PNG; charset=binary").unwrap();
/// assert_eq!(mime.as_str(), "image/png");
/// assert!(mime.is_image());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MimeType(String);

impl MimeType {
    /// Parses a MIME type, returning `None` when it is not of the form `type/subtype`.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let essence = raw.split(';').next()?.trim().to_ascii_lowercase();
        let (kind, subtype) = essence.split_once('/')?;
        if !is_restricted_name(kind) || !is_restricted_name(subtype) {
            return None;
        }
        Some(Self(essence))
    }

    /// Returns the MIME type as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` for any `image/*` type.
    #[must_use]
    pub fn is_image(&self) -> bool {
        self.0.starts_with("image/")
    }

    /// Returns `true` for the generic binary type browsers use when they don't know better.
    #[must_use]
    pub fn is_opaque(&self) -> bool {
        self.0 == "application/octet-stream"
    }
}

/// RFC 6838 `restricted-name`: letters, digits and `!#$&-^_.+`.
fn is_restricted_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b"!#$&-^_.+".contains(&b))
}

impl fmt::Display for MimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The payload as it was received, before any re-encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawPayload {
    /// Textual payload (a `data:` URI).
    Text(String),
    /// Binary payload (blob or file contents).
    Binary(Arc<[u8]>),
}

impl RawPayload {
    /// Length of the payload as received, in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            RawPayload::Text(text) => text.len(),
            RawPayload::Binary(bytes) => bytes.len(),
        }
    }

    /// Returns `true` if the payload carries no data.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Status {
    Pending,
    Valid { preview_uri: String },
    Invalid(AttachmentError),
}

/// The single live attachment of an upload control.
#[derive(Debug, Clone, PartialEq)]
pub struct Attachment {
    source: AttachmentSource,
    file_name: Option<String>,
    raw: Option<RawPayload>,
    mime_type: Option<MimeType>,
    status: Status,
}

impl Attachment {
    /// Creates an attachment whose ingestion has started but not finished.
    #[must_use]
    pub fn pending(source: AttachmentSource) -> Self {
        Self {
            source,
            file_name: None,
            raw: None,
            mime_type: None,
            status: Status::Pending,
        }
    }

    /// Creates a validated attachment with its display preview.
    #[must_use]
    pub fn valid(
        source: AttachmentSource,
        raw: RawPayload,
        mime_type: MimeType,
        preview_uri: String,
    ) -> Self {
        Self {
            source,
            file_name: None,
            raw: Some(raw),
            mime_type: Some(mime_type),
            status: Status::Valid { preview_uri },
        }
    }

    /// Creates a rejected attachment. Rejected attachments never carry a preview.
    #[must_use]
    pub fn invalid(
        source: AttachmentSource,
        raw: Option<RawPayload>,
        mime_type: Option<MimeType>,
        error: AttachmentError,
    ) -> Self {
        Self {
            source,
            file_name: None,
            raw,
            mime_type,
            status: Status::Invalid(error),
        }
    }

    /// Attaches the original file name (file picker path only).
    #[must_use]
    pub fn with_file_name(mut self, file_name: Option<String>) -> Self {
        self.file_name = file_name;
        self
    }

    #[must_use]
    pub fn source(&self) -> AttachmentSource {
        self.source
    }

    #[must_use]
    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    #[must_use]
    pub fn raw(&self) -> Option<&RawPayload> {
        self.raw.as_ref()
    }

    #[must_use]
    pub fn mime_type(&self) -> Option<&MimeType> {
        self.mime_type.as_ref()
    }

    /// Returns the validation state.
    #[must_use]
    pub fn validity(&self) -> Validity {
        match self.status {
            Status::Pending => Validity::Pending,
            Status::Valid { .. } => Validity::Valid,
            Status::Invalid(_) => Validity::Invalid,
        }
    }

    /// Returns the `data:` URI preview, present only when valid.
    #[must_use]
    pub fn preview_uri(&self) -> Option<&str> {
        match &self.status {
            Status::Valid { preview_uri } => Some(preview_uri),
            Status::Pending | Status::Invalid(_) => None,
        }
    }

    /// Returns the rejection reason, present only when invalid.
    #[must_use]
    pub fn error(&self) -> Option<&AttachmentError> {
        match &self.status {
            Status::Invalid(error) => Some(error),
            Status::Pending | Status::Valid { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png() -> MimeType {
        MimeType::parse("image/png").unwrap()
    }

    #[test]
    fn mime_type_parse_normalizes_case_and_parameters() {
        let mime = MimeType::parse(" IMAGE/Jpeg ;q=1").unwrap();
        assert_eq!(mime.as_str(), "image/jpeg");
        assert_eq!(mime.to_string(), "image/jpeg");
    }

    #[test]
    fn mime_type_parse_rejects_garbage() {
        assert!(MimeType::parse("").is_none());
        assert!(MimeType::parse("image").is_none());
        assert!(MimeType::parse("image/").is_none());
        assert!(MimeType::parse("/png").is_none());
        assert!(MimeType::parse("a/b/c").is_none());
    }

    #[test]
    fn mime_type_rejects_characters_outside_tokens() {
        assert!(MimeType::parse("image/png\")").is_none());
        assert!(MimeType::parse("image/p ng").is_none());
        assert!(MimeType::parse("image/(png)").is_none());
        assert_eq!(
            MimeType::parse("image/svg+xml").unwrap().as_str(),
            "image/svg+xml"
        );
    }

    #[test]
    fn mime_type_classification() {
        assert!(png().is_image());
        assert!(!MimeType::parse("text/x-python").unwrap().is_image());
        assert!(MimeType::parse("application/octet-stream")
            .unwrap()
            .is_opaque());
    }

    #[test]
    fn valid_attachment_exposes_preview_and_no_error() {
        let attachment = Attachment::valid(
            AttachmentSource::DataUri,
            RawPayload::Text("data:image/png;base64,AAAA".into()),
            png(),
            "data:image/png;base64,AAAA".into(),
        );

        assert_eq!(attachment.validity(), Validity::Valid);
        assert_eq!(attachment.preview_uri(), Some("data:image/png;base64,AAAA"));
        assert!(attachment.error().is_none());
    }

    #[test]
    fn invalid_attachment_has_error_but_no_preview() {
        let attachment = Attachment::invalid(
            AttachmentSource::File,
            None,
            None,
            AttachmentError::MalformedPayload,
        )
        .with_file_name(Some("evil.py".into()));

        assert_eq!(attachment.validity(), Validity::Invalid);
        assert!(attachment.preview_uri().is_none());
        assert_eq!(attachment.error(), Some(&AttachmentError::MalformedPayload));
        assert_eq!(attachment.file_name(), Some("evil.py"));
    }

    #[test]
    fn pending_attachment_has_neither_preview_nor_error() {
        let attachment = Attachment::pending(AttachmentSource::Blob);
        assert_eq!(attachment.validity(), Validity::Pending);
        assert!(attachment.preview_uri().is_none());
        assert!(attachment.error().is_none());
        assert!(attachment.raw().is_none());
    }

    #[test]
    fn raw_payload_length() {
        assert_eq!(RawPayload::Text("abc".into()).len(), 3);
        assert!(RawPayload::Binary(Arc::from(Vec::new())).is_empty());
    }
}
