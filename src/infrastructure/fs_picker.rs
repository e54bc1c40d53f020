// SPDX-License-Identifier: MPL-2.0
//! Filesystem adapter implementing the [`FilePicker`] port trait.
//!
//! The filesystem carries no declared MIME type, so handles produced here
//! are typed by their extension during ingestion.
//!
//! [`FilePicker`]: crate::application::port::FilePicker

use std::path::{Path, PathBuf};

use crate::application::port::{FileHandle, FilePicker, PickerError};

/// Reads picked files from the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsFilePicker;

impl FsFilePicker {
    /// Reads `path` without blocking the async runtime.
    ///
    /// # Errors
    ///
    /// Returns [`PickerError::NotFound`] for missing files and
    /// [`PickerError::IoError`] for everything else.
    pub async fn read(path: PathBuf) -> Result<FileHandle, PickerError> {
        let contents = tokio::fs::read(&path).await?;
        tracing::debug!(path = %path.display(), bytes = contents.len(), "file read");
        Ok(FileHandle::new(display_name(&path), contents))
    }

    /// Synchronous variant of [`FsFilePicker::read`].
    ///
    /// # Errors
    ///
    /// Same as [`FsFilePicker::read`].
    pub fn read_blocking(path: &Path) -> Result<FileHandle, PickerError> {
        let contents = std::fs::read(path)?;
        Ok(FileHandle::new(display_name(path), contents))
    }
}

impl FilePicker for FsFilePicker {
    fn load(&self, path: &Path) -> Result<FileHandle, PickerError> {
        Self::read_blocking(path)
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn read_blocking_keeps_file_name_only() {
        let dir = tempdir().expect("failed to create temp dir");
        let path = dir.path().join("green_square.png");
        std::fs::write(&path, [1u8, 2, 3]).expect("failed to write fixture");

        let handle = FsFilePicker.load(&path).expect("file should load");
        assert_eq!(handle.name(), "green_square.png");
        assert!(handle.declared_mime().is_none());
        assert_eq!(&handle.contents()[..], &[1, 2, 3]);
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempdir().expect("failed to create temp dir");
        let result = FsFilePicker::read_blocking(&dir.path().join("missing.png"));
        assert_eq!(result, Err(PickerError::NotFound));
    }

    #[tokio::test]
    async fn async_read_matches_blocking_read() {
        let dir = tempdir().expect("failed to create temp dir");
        let path = dir.path().join("evil.py");
        std::fs::write(&path, b"import os").expect("failed to write fixture");

        let async_handle = FsFilePicker::read(path.clone()).await.expect("async read");
        let blocking_handle = FsFilePicker::read_blocking(&path).expect("blocking read");
        assert_eq!(async_handle, blocking_handle);
    }
}
