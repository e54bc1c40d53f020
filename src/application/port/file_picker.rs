// SPDX-License-Identifier: MPL-2.0
//! File picker port definition.
//!
//! The picker hands over a locally selected file already read into memory.
//! Reading can be slow, so callers that read asynchronously should bracket
//! the read with `begin`/`complete` on the controller.

use crate::domain::attachment::MimeType;
use crate::domain::error::AttachmentError;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

// =============================================================================
// PickerError
// =============================================================================

/// Errors that can occur while reading a selected file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerError {
    /// The file was not found.
    NotFound,

    /// The file could not be read (I/O error).
    IoError(String),
}

impl fmt::Display for PickerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PickerError::NotFound => write!(f, "File not found"),
            PickerError::IoError(msg) => write!(f, "I/O error: {msg}"),
        }
    }
}

impl std::error::Error for PickerError {}

impl From<std::io::Error> for PickerError {
    fn from(err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            PickerError::NotFound
        } else {
            PickerError::IoError(err.to_string())
        }
    }
}

impl From<PickerError> for AttachmentError {
    fn from(err: PickerError) -> Self {
        AttachmentError::ConversionFailure(err.to_string())
    }
}

// =============================================================================
// FileHandle
// =============================================================================

/// A selected file and its contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHandle {
    name: String,
    declared_mime: Option<MimeType>,
    contents: Arc<[u8]>,
}

impl FileHandle {
    /// Creates a handle for a file whose type is only known through its name.
    pub fn new(name: impl Into<String>, contents: impl Into<Arc<[u8]>>) -> Self {
        Self {
            name: name.into(),
            declared_mime: None,
            contents: contents.into(),
        }
    }

    /// Attaches the MIME type reported by the platform, if any.
    #[must_use]
    pub fn with_declared_mime(mut self, mime: Option<MimeType>) -> Self {
        self.declared_mime = mime;
        self
    }

    /// File name including extension (no directories).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// MIME type reported by the platform. May be missing or unreliable.
    #[must_use]
    pub fn declared_mime(&self) -> Option<&MimeType> {
        self.declared_mime.as_ref()
    }

    #[must_use]
    pub fn contents(&self) -> &Arc<[u8]> {
        &self.contents
    }
}

// =============================================================================
// FilePicker Trait
// =============================================================================

/// Port for reading locally selected files.
pub trait FilePicker: Send + Sync {
    /// Reads the file at `path` into memory.
    ///
    /// # Errors
    ///
    /// Returns a [`PickerError`] if the file cannot be read.
    fn load(&self, path: &Path) -> Result<FileHandle, PickerError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picker_error_display() {
        assert_eq!(PickerError::NotFound.to_string(), "File not found");
        assert!(PickerError::IoError("denied".into())
            .to_string()
            .contains("denied"));
    }

    #[test]
    fn io_not_found_maps_to_not_found() {
        let err: PickerError = std::io::Error::from(std::io::ErrorKind::NotFound).into();
        assert_eq!(err, PickerError::NotFound);

        let err: PickerError = std::io::Error::other("boom").into();
        assert!(matches!(err, PickerError::IoError(msg) if msg.contains("boom")));
    }

    #[test]
    fn picker_error_becomes_conversion_failure() {
        let err: AttachmentError = PickerError::NotFound.into();
        assert!(matches!(err, AttachmentError::ConversionFailure(msg) if msg == "File not found"));
    }

    #[test]
    fn file_handle_accessors() {
        let handle = FileHandle::new("green_square.png", vec![1u8, 2, 3])
            .with_declared_mime(MimeType::parse("image/png"));
        assert_eq!(handle.name(), "green_square.png");
        assert_eq!(handle.declared_mime().map(MimeType::as_str), Some("image/png"));
        assert_eq!(&handle.contents()[..], &[1, 2, 3]);
    }
}
