// SPDX-License-Identifier: MPL-2.0
//! Media encoding helpers for attachment previews.
//!
//! This module converts between the payload shapes the upload control
//! receives (data URIs, raw bytes, file names) and the canonical `data:` URI
//! preview it displays.

pub mod data_uri;
pub mod image;
pub mod mime;

// Re-export commonly used types
pub use data_uri::{DataUri, DataUriError};
pub use image::PreviewImage;
