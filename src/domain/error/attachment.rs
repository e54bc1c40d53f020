// SPDX-License-Identifier: MPL-2.0
//! Attachment ingestion and validation errors.

use std::fmt;

/// Specific error types for image attachments.
/// Used to provide user-friendly, localized error messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttachmentError {
    /// Extension or MIME type is not on the allow-list.
    /// `allowed` is the human-readable enumeration of accepted types.
    UnsupportedType { allowed: String },

    /// Decoded payload exceeds the configured size limit.
    TooLarge { limit_bytes: u64 },

    /// A bridge message did not match any known payload shape.
    /// Never shown to users; the message is dropped.
    MalformedPayload,

    /// The payload could not be turned into a preview.
    /// The detail is kept for logs only.
    ConversionFailure(String),
}

const BYTES_PER_MB: u64 = 1024 * 1024;

impl AttachmentError {
    /// Returns the i18n message key for this error type.
    pub fn i18n_key(&self) -> &'static str {
        match self {
            AttachmentError::UnsupportedType { .. } => "error-upload-unsupported-type",
            AttachmentError::TooLarge { .. } => "error-upload-too-large",
            AttachmentError::MalformedPayload => "error-upload-malformed",
            AttachmentError::ConversionFailure(_) => "error-upload-conversion",
        }
    }

    /// Arguments interpolated into the localized message.
    pub fn i18n_args(&self) -> Vec<(&'static str, String)> {
        match self {
            AttachmentError::UnsupportedType { allowed } => vec![("types", allowed.clone())],
            AttachmentError::TooLarge { limit_bytes } => {
                vec![("limit", format_megabytes(*limit_bytes))]
            }
            AttachmentError::MalformedPayload | AttachmentError::ConversionFailure(_) => {
                Vec::new()
            }
        }
    }

    /// Whether this error surfaces in the upload control.
    pub fn is_user_visible(&self) -> bool {
        !matches!(self, AttachmentError::MalformedPayload)
    }
}

/// Formats a byte count as whole megabytes when exact, one decimal otherwise.
fn format_megabytes(bytes: u64) -> String {
    if bytes % BYTES_PER_MB == 0 {
        (bytes / BYTES_PER_MB).to_string()
    } else {
        #[allow(clippy::cast_precision_loss)]
        let mb = bytes as f64 / BYTES_PER_MB as f64;
        format!("{mb:.1}")
    }
}

impl fmt::Display for AttachmentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttachmentError::UnsupportedType { allowed } => {
                write!(f, "Image must be one of the following: {allowed}.")
            }
            AttachmentError::TooLarge { limit_bytes } => {
                write!(
                    f,
                    "Please choose a smaller image (< {}MB)",
                    format_megabytes(*limit_bytes)
                )
            }
            AttachmentError::MalformedPayload => {
                write!(f, "Message does not carry a recognizable image payload")
            }
            AttachmentError::ConversionFailure(_) => {
                write!(f, "The image could not be read. Please try another file.")
            }
        }
    }
}

impl std::error::Error for AttachmentError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_type_message_enumerates_allowed_types() {
        let err = AttachmentError::UnsupportedType {
            allowed: "jpe, jpg, jpeg, png, gif, or bmp".into(),
        };
        assert_eq!(
            err.to_string(),
            "Image must be one of the following: jpe, jpg, jpeg, png, gif, or bmp."
        );
    }

    #[test]
    fn too_large_message_uses_megabytes() {
        let err = AttachmentError::TooLarge {
            limit_bytes: 4 * 1024 * 1024,
        };
        assert_eq!(err.to_string(), "Please choose a smaller image (< 4MB)");

        let err = AttachmentError::TooLarge {
            limit_bytes: 1536 * 1024,
        };
        assert!(err.to_string().contains("1.5MB"));
    }

    #[test]
    fn conversion_failure_hides_details() {
        let err = AttachmentError::ConversionFailure("invalid byte 0x2a at offset 3".into());
        assert!(!err.to_string().contains("0x2a"));
    }

    #[test]
    fn only_malformed_payload_is_hidden() {
        assert!(!AttachmentError::MalformedPayload.is_user_visible());
        assert!(AttachmentError::ConversionFailure(String::new()).is_user_visible());
        assert!(AttachmentError::TooLarge { limit_bytes: 1 }.is_user_visible());
        assert!(AttachmentError::UnsupportedType {
            allowed: String::new()
        }
        .is_user_visible());
    }

    #[test]
    fn i18n_keys_and_args() {
        let err = AttachmentError::UnsupportedType {
            allowed: "png or gif".into(),
        };
        assert_eq!(err.i18n_key(), "error-upload-unsupported-type");
        assert_eq!(err.i18n_args(), vec![("types", "png or gif".to_string())]);

        let err = AttachmentError::TooLarge {
            limit_bytes: 2 * 1024 * 1024,
        };
        assert_eq!(err.i18n_key(), "error-upload-too-large");
        assert_eq!(err.i18n_args(), vec![("limit", "2".to_string())]);

        assert_eq!(
            AttachmentError::ConversionFailure("x".into()).i18n_key(),
            "error-upload-conversion"
        );
        assert!(AttachmentError::MalformedPayload.i18n_args().is_empty());
    }
}
