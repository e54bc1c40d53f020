// SPDX-License-Identifier: MPL-2.0
//! Decoding a validated `data:` URI preview into a displayable image handle.

use super::data_uri::DataUri;
use crate::domain::error::AttachmentError;
use iced::widget::image;
use image_rs::ImageReader;
use std::io::Cursor;

/// A preview ready for the rendering surface.
#[derive(Debug, Clone)]
pub struct PreviewImage {
    pub handle: image::Handle,
    pub width: u32,
    pub height: u32,
}

impl PreviewImage {
    /// Builds a preview from a `data:` URI produced by the controller.
    ///
    /// Only the header is decoded to get the dimensions; the encoded bytes are
    /// handed to the renderer as-is.
    ///
    /// # Errors
    ///
    /// Returns [`AttachmentError::ConversionFailure`] if the URI or the image
    /// header cannot be decoded.
    pub fn from_data_uri(uri: &str) -> Result<Self, AttachmentError> {
        let bytes = DataUri::parse(uri)
            .and_then(|parsed| parsed.decode())
            .map_err(|e| AttachmentError::ConversionFailure(e.to_string()))?;
        let (width, height) = dimensions(&bytes)?;
        Ok(Self {
            handle: image::Handle::from_bytes(bytes),
            width,
            height,
        })
    }
}

fn dimensions(bytes: &[u8]) -> Result<(u32, u32), AttachmentError> {
    ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| AttachmentError::ConversionFailure(e.to_string()))?
        .into_dimensions()
        .map_err(|e| AttachmentError::ConversionFailure(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    // 1x1 transparent PNG
    const ONE_PIXEL_PNG: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==";

    #[test]
    fn preview_reads_dimensions() {
        let preview = PreviewImage::from_data_uri(ONE_PIXEL_PNG).expect("decodable preview");
        assert_eq!((preview.width, preview.height), (1, 1));
    }

    #[test]
    fn preview_rejects_non_image_bytes() {
        let result = PreviewImage::from_data_uri("data:image/png;base64,aGVsbG8=");
        assert!(matches!(
            result,
            Err(AttachmentError::ConversionFailure(_))
        ));
    }

    #[test]
    fn preview_rejects_bad_uri() {
        assert!(PreviewImage::from_data_uri("not a uri").is_err());
    }
}
