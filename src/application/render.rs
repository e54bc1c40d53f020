// SPDX-License-Identifier: MPL-2.0
//! What the rendering surface binds to.
//!
//! The upload control shows the preview as a background image, an inline
//! error message, a remove button and an upload label. This module derives
//! all of them from controller state so the view layer holds no logic.

use super::controller::ImageAttachmentController;
use crate::domain::attachment::Validity;
use crate::domain::error::AttachmentError;
use std::fmt::Write;

/// Snapshot of everything the upload control displays.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UploadControlView {
    /// Inline style for the preview container, e.g. `background-image: url("data:...")`.
    pub background_style: Option<String>,
    /// User-visible error, if the current attachment was rejected.
    pub error: Option<AttachmentError>,
    /// The "remove image" button.
    pub remove_visible: bool,
    /// The "attach an image" label; hidden while an error is displayed.
    pub label_visible: bool,
    /// Container carries the validated marker.
    pub validated: bool,
}

impl UploadControlView {
    #[must_use]
    pub fn from_controller(controller: &ImageAttachmentController) -> Self {
        let error = controller
            .error()
            .filter(|error| error.is_user_visible())
            .cloned();
        let validated = controller.validity() == Some(Validity::Valid);

        Self {
            background_style: controller.current_preview().map(background_style),
            label_visible: error.is_none(),
            error,
            remove_visible: controller.removal_visible(),
            validated,
        }
    }

    /// Class list for the preview container.
    #[must_use]
    pub fn container_class(&self) -> &'static str {
        if self.validated {
            "js-image-upload is-validated"
        } else {
            "js-image-upload"
        }
    }
}

fn background_style(preview_uri: &str) -> String {
    format!("background-image: url(\"{}\")", escape_css_string(preview_uri))
}

/// Escapes a value for a double-quoted CSS string inside `url()`.
fn escape_css_string(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '"' | '\\' | '(' | ')' | '\'' => {
                escaped.push('\\');
                escaped.push(c);
            }
            c if c.is_control() => {
                let _ = write!(escaped, "\\{:x} ", u32::from(c));
            }
            c => escaped.push(c),
        }
    }
    escaped
}
