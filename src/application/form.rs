// SPDX-License-Identifier: MPL-2.0
//! The issue form hosting the upload control.
//!
//! Attachment data only leaves the process through [`IssueForm::submit`].
//! When the backend hosts the image, a Markdown screenshot link is appended
//! to the steps-to-reproduce text.

use super::controller::ImageAttachmentController;
use super::port::{FormSubmitter, IssueSubmission, SubmissionReceipt, SubmittedImage};
use crate::domain::attachment::{Attachment, RawPayload, Validity};
use crate::error::{Error, Result};
use crate::media::data_uri::DataUri;
use std::sync::Arc;

/// Alt text of the screenshot link appended after a successful upload.
pub const SCREENSHOT_ALT_TEXT: &str = "Screenshot Description";

/// An issue form: free-text fields plus one image attachment.
#[derive(Debug)]
pub struct IssueForm<S> {
    pub steps_reproduce: String,
    attachment: ImageAttachmentController,
    submitter: S,
}

impl<S: FormSubmitter> IssueForm<S> {
    pub fn new(attachment: ImageAttachmentController, submitter: S) -> Self {
        Self {
            steps_reproduce: String::new(),
            attachment,
            submitter,
        }
    }

    #[must_use]
    pub fn attachment(&self) -> &ImageAttachmentController {
        &self.attachment
    }

    pub fn attachment_mut(&mut self) -> &mut ImageAttachmentController {
        &mut self.attachment
    }

    #[must_use]
    pub fn submitter(&self) -> &S {
        &self.submitter
    }

    /// Whether the form may be submitted in its current state.
    ///
    /// A pending or rejected attachment blocks submission; no attachment is fine.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        matches!(self.attachment.validity(), None | Some(Validity::Valid))
    }

    /// Sends the form through the submission port.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Submission`] when the attachment blocks submission or
    /// the backend fails.
    pub fn submit(&mut self) -> Result<SubmissionReceipt> {
        if !self.can_submit() {
            return Err(Error::Submission(
                "attachment is pending or invalid".to_string(),
            ));
        }

        let image = self
            .attachment
            .attachment()
            .map(submitted_image)
            .transpose()?;
        let submission = IssueSubmission {
            steps_reproduce: self.steps_reproduce.clone(),
            image,
        };

        tracing::info!(
            has_image = submission.image.is_some(),
            "submitting issue form"
        );
        let receipt = self
            .submitter
            .submit(&submission)
            .map_err(|e| Error::Submission(e.to_string()))?;

        if let Some(url) = &receipt.image_url {
            if !self.steps_reproduce.is_empty() {
                self.steps_reproduce.push_str("\n\n");
            }
            self.steps_reproduce.push_str(&screenshot_link(url));
        }
        Ok(receipt)
    }
}

/// `[![Screenshot Description](url)](url)`
#[must_use]
pub fn screenshot_link(url: &str) -> String {
    format!("[![{SCREENSHOT_ALT_TEXT}]({url})]({url})")
}

fn submitted_image(attachment: &Attachment) -> Result<SubmittedImage> {
    let mime_type = attachment
        .mime_type()
        .cloned()
        .ok_or_else(|| Error::Submission("attachment has no type".to_string()))?;
    let bytes: Arc<[u8]> = match attachment.raw() {
        Some(RawPayload::Binary(bytes)) => Arc::clone(bytes),
        Some(RawPayload::Text(uri)) => DataUri::parse(uri)
            .and_then(|parsed| parsed.decode())
            .map(Arc::from)
            .map_err(|e| Error::Submission(e.to_string()))?,
        None => return Err(Error::Submission("attachment has no data".to_string())),
    };
    Ok(SubmittedImage {
        mime_type,
        file_name: attachment.file_name().map(str::to_string),
        bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::port::{FileHandle, SubmissionError};
    use crate::domain::attachment::{AttachmentSource, MimeType};
    use crate::media::data_uri;

    const PNG_BYTES: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 13];

    #[derive(Default)]
    struct RecordingSubmitter {
        calls: Vec<IssueSubmission>,
        fail: bool,
    }

    impl FormSubmitter for RecordingSubmitter {
        fn submit(
            &mut self,
            submission: &IssueSubmission,
        ) -> std::result::Result<SubmissionReceipt, SubmissionError> {
            self.calls.push(submission.clone());
            if self.fail {
                return Err(SubmissionError::Transport("offline".into()));
            }
            Ok(SubmissionReceipt {
                image_url: submission
                    .image
                    .as_ref()
                    .map(|_| "http://localhost:5000/uploads/1.png".to_string()),
            })
        }
    }

    fn form() -> IssueForm<RecordingSubmitter> {
        IssueForm::new(
            ImageAttachmentController::default(),
            RecordingSubmitter::default(),
        )
    }

    #[test]
    fn ingestion_never_submits() {
        let mut form = form();
        let uri = data_uri::encode(&MimeType::parse("image/png").unwrap(), PNG_BYTES);
        form.attachment_mut().ingest_data_uri(uri);
        form.attachment_mut()
            .ingest_file(FileHandle::new("green_square.png", PNG_BYTES.to_vec()));
        form.attachment_mut().remove();

        assert!(form.submitter().calls.is_empty());
        assert!(!form.steps_reproduce.contains(SCREENSHOT_ALT_TEXT));
    }

    #[test]
    fn submit_appends_screenshot_link() {
        let mut form = form();
        form.steps_reproduce = "1. open page".into();
        form.attachment_mut()
            .ingest_file(FileHandle::new("green_square.png", PNG_BYTES.to_vec()));

        form.submit().expect("submission succeeds");
        assert_eq!(
            form.steps_reproduce,
            "1. open page\n\n[![Screenshot Description](http://localhost:5000/uploads/1.png)](http://localhost:5000/uploads/1.png)"
        );
    }

    #[test]
    fn submit_decodes_data_uri_attachment() {
        let mut form = form();
        form.steps_reproduce = "1. open page".into();
        let uri = data_uri::encode(&MimeType::parse("image/png").unwrap(), PNG_BYTES);
        form.attachment_mut().ingest_data_uri(uri);

        let receipt = form.submit().expect("submission succeeds");
        assert!(receipt.image_url.is_some());

        let sent = &form.submitter().calls[0];
        assert_eq!(sent.steps_reproduce, "1. open page");
        let image = sent.image.as_ref().expect("image attached");
        assert_eq!(&image.bytes[..], PNG_BYTES);
        assert_eq!(image.mime_type.as_str(), "image/png");
    }

    #[test]
    fn submit_without_attachment_sends_no_image() {
        let mut form = form();
        form.submit().expect("submission succeeds");
        assert!(form.submitter().calls[0].image.is_none());
    }

    #[test]
    fn invalid_attachment_blocks_submission() {
        let mut form = form();
        form.attachment_mut()
            .ingest_file(FileHandle::new("evil.py", b"import os".to_vec()));

        assert!(!form.can_submit());
        assert!(matches!(form.submit(), Err(Error::Submission(_))));
        assert!(form.submitter().calls.is_empty());
    }

    #[test]
    fn pending_attachment_blocks_submission() {
        let mut form = form();
        let _ticket = form.attachment_mut().begin(AttachmentSource::File);
        assert!(!form.can_submit());
    }

    #[test]
    fn backend_failure_is_reported() {
        let mut form = IssueForm::new(
            ImageAttachmentController::default(),
            RecordingSubmitter {
                fail: true,
                ..RecordingSubmitter::default()
            },
        );
        assert!(matches!(form.submit(), Err(Error::Submission(msg)) if msg.contains("offline")));
    }
}
