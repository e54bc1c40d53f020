// SPDX-License-Identifier: MPL-2.0
//! Issue form submission port definition.
//!
//! Submission is the only way attachment data leaves the process. Nothing in
//! the upload control calls this port; [`IssueForm::submit`] does, and only
//! when the user submits.
//!
//! [`IssueForm::submit`]: crate::application::IssueForm::submit

use crate::domain::attachment::MimeType;
use std::fmt;
use std::sync::Arc;

/// Errors reported by a submission backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    /// The backend refused the submission.
    Rejected(String),

    /// The backend could not be reached.
    Transport(String),
}

impl fmt::Display for SubmissionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmissionError::Rejected(msg) => write!(f, "Submission rejected: {msg}"),
            SubmissionError::Transport(msg) => write!(f, "Submission failed: {msg}"),
        }
    }
}

impl std::error::Error for SubmissionError {}

/// The image part of a submission, decoded to raw bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmittedImage {
    pub mime_type: MimeType,
    pub file_name: Option<String>,
    pub bytes: Arc<[u8]>,
}

/// Everything the backend receives when the user submits the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueSubmission {
    pub steps_reproduce: String,
    pub image: Option<SubmittedImage>,
}

/// Backend acknowledgement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionReceipt {
    /// Where the backend stored the image, if one was sent.
    pub image_url: Option<String>,
}

/// Port for sending a completed issue form.
pub trait FormSubmitter {
    /// Sends the form.
    ///
    /// # Errors
    ///
    /// Returns a [`SubmissionError`] if the backend rejects or cannot receive it.
    fn submit(
        &mut self,
        submission: &IssueSubmission,
    ) -> Result<SubmissionReceipt, SubmissionError>;
}
