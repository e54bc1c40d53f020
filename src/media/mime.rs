// SPDX-License-Identifier: MPL-2.0
//! MIME type derivation from file names and magic bytes.

use crate::domain::attachment::{AllowList, MimeType};
use image_rs::ImageFormat;
use std::path::Path;

/// Extensions `image`'s format table does not know about.
const EXTRA_MIME_TYPES: &[(&str, &str)] = &[("jpe", "image/jpeg")];

/// Name of the file dialog filter.
pub const PICKER_FILTER_NAME: &str = "Images";

/// Maps a file extension (without the dot) to its image MIME type.
///
/// Returns `None` for anything that is not a known image extension.
#[must_use]
pub fn from_extension(extension: &str) -> Option<MimeType> {
    let extension = extension.trim_start_matches('.').to_ascii_lowercase();
    let raw = EXTRA_MIME_TYPES
        .iter()
        .find(|(ext, _)| *ext == extension)
        .map(|(_, mime)| *mime)
        .or_else(|| ImageFormat::from_extension(&extension).map(|f| f.to_mime_type()))?;
    MimeType::parse(raw)
}

/// Maps a file name or path to its image MIME type using its extension.
#[must_use]
pub fn from_file_name<P: AsRef<Path>>(name: P) -> Option<MimeType> {
    name.as_ref()
        .extension()
        .and_then(|e| e.to_str())
        .and_then(from_extension)
}

/// Guesses an image MIME type from magic bytes.
///
/// Only used for blobs, which carry no file name to fall back on.
#[must_use]
pub fn sniff(bytes: &[u8]) -> Option<MimeType> {
    image_rs::guess_format(bytes)
        .ok()
        .and_then(|format| MimeType::parse(format.to_mime_type()))
}

/// File dialog filter offering exactly the extensions `allow_list` accepts.
#[must_use]
pub fn picker_filter(allow_list: &AllowList) -> (&'static str, Vec<String>) {
    (PICKER_FILTER_NAME, allow_list.extensions().to_vec())
}

/// Builds an allow-list from configured extensions.
///
/// Extensions that don't map to an image MIME type are dropped.
#[must_use]
pub fn allow_list_from_extensions<S: AsRef<str>>(configured: &[S]) -> AllowList {
    let mut extensions = Vec::new();
    let mut mime_types = Vec::new();
    for ext in configured {
        let ext = ext.as_ref().trim_start_matches('.').to_ascii_lowercase();
        if let Some(mime) = from_extension(&ext) {
            extensions.push(ext);
            mime_types.push(mime);
        }
    }
    AllowList::new(extensions, mime_types)
}
