// SPDX-License-Identifier: MPL-2.0
//! Validation policy for attachments.
//!
//! Validation is synchronous and pure: it only looks at the MIME type derived
//! during ingestion and the decoded payload size.

use super::types::MimeType;
use crate::domain::error::AttachmentError;

/// Default accepted file extensions, in the order they are shown to users.
pub const DEFAULT_EXTENSIONS: &[&str] = &["jpe", "jpg", "jpeg", "png", "gif", "bmp"];

/// MIME types matching [`DEFAULT_EXTENSIONS`].
pub const DEFAULT_MIME_TYPES: &[&str] = &["image/jpeg", "image/png", "image/gif", "image/bmp"];

/// Default maximum decoded payload size (4 MiB).
pub const DEFAULT_MAX_BYTES: u64 = 4 * 1024 * 1024;

/// The fixed set of accepted image types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowList {
    extensions: Vec<String>,
    mime_types: Vec<MimeType>,
}

impl Default for AllowList {
    fn default() -> Self {
        Self::new(
            DEFAULT_EXTENSIONS.iter().map(|ext| (*ext).to_string()),
            DEFAULT_MIME_TYPES.iter().filter_map(|m| MimeType::parse(m)),
        )
    }
}

impl AllowList {
    /// Creates an allow-list from display extensions and the MIME types they map to.
    pub fn new(
        extensions: impl IntoIterator<Item = String>,
        mime_types: impl IntoIterator<Item = MimeType>,
    ) -> Self {
        let extensions = extensions
            .into_iter()
            .map(|ext| ext.trim_start_matches('.').to_ascii_lowercase())
            .filter(|ext| !ext.is_empty())
            .collect();
        let mut unique: Vec<MimeType> = Vec::new();
        for mime in mime_types {
            if !unique.contains(&mime) {
                unique.push(mime);
            }
        }
        Self {
            extensions,
            mime_types: unique,
        }
    }

    /// Returns `true` if the MIME type is accepted.
    #[must_use]
    pub fn permits(&self, mime: &MimeType) -> bool {
        self.mime_types.contains(mime)
    }

    #[must_use]
    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    #[must_use]
    pub fn mime_types(&self) -> &[MimeType] {
        &self.mime_types
    }

    /// Human-readable enumeration: `jpe, jpg, jpeg, png, gif, or bmp`.
    #[must_use]
    pub fn describe(&self) -> String {
        match self.extensions.as_slice() {
            [] => String::new(),
            [only] => only.clone(),
            [first, second] => format!("{first} or {second}"),
            [init @ .., last] => format!("{}, or {last}", init.join(", ")),
        }
    }
}

/// Everything validation needs to know besides the candidate itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadPolicy {
    pub allow_list: AllowList,
    pub max_bytes: u64,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            allow_list: AllowList::default(),
            max_bytes: DEFAULT_MAX_BYTES,
        }
    }
}

/// Outcome of [`validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Valid,
    Invalid(AttachmentError),
}

impl Verdict {
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Verdict::Valid)
    }
}

/// Checks a derived MIME type and decoded size against the policy.
///
/// The type check runs first so that a non-image file is always reported as
/// an unsupported type, whatever its size.
#[must_use]
pub fn validate(mime_type: Option<&MimeType>, byte_len: u64, policy: &UploadPolicy) -> Verdict {
    let permitted = mime_type.is_some_and(|mime| policy.allow_list.permits(mime));
    if !permitted {
        return Verdict::Invalid(AttachmentError::UnsupportedType {
            allowed: policy.allow_list.describe(),
        });
    }
    if byte_len > policy.max_bytes {
        return Verdict::Invalid(AttachmentError::TooLarge {
            limit_bytes: policy.max_bytes,
        });
    }
    Verdict::Valid
}
