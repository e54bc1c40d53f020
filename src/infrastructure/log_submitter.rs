// SPDX-License-Identifier: MPL-2.0
//! Submission adapter that records the form in the application log.
//!
//! The desktop host has no issue tracker behind it; this adapter stands in
//! for the transport and never fails.

use crate::application::port::{
    FormSubmitter, IssueSubmission, SubmissionError, SubmissionReceipt,
};

#[derive(Debug, Clone, Copy, Default)]
pub struct LogSubmitter;

impl FormSubmitter for LogSubmitter {
    fn submit(
        &mut self,
        submission: &IssueSubmission,
    ) -> Result<SubmissionReceipt, SubmissionError> {
        match &submission.image {
            Some(image) => tracing::info!(
                steps = %submission.steps_reproduce,
                mime = %image.mime_type,
                file_name = image.file_name.as_deref().unwrap_or("-"),
                bytes = image.bytes.len(),
                "issue submitted with image"
            ),
            None => tracing::info!(steps = %submission.steps_reproduce, "issue submitted"),
        }
        Ok(SubmissionReceipt { image_url: None })
    }
}
