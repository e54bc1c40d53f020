// SPDX-License-Identifier: MPL-2.0
//! Port definitions (traits) for dependency inversion.
//!
//! This module defines the collaborators the upload control talks to.
//! These traits use only domain types, ensuring the application layer remains
//! independent of concrete implementations.
//!
//! # Available Ports
//!
//! - [`file_picker`]: Native file selection
//! - [`message_bridge`]: Cross-origin message delivery
//! - [`submission`]: Issue form submission
//!
//! # Design Notes
//!
//! - All traits use domain types only (no Iced handles, no Tokio types)
//! - Methods return `Result` with port-specific error types
//! - No `async fn` - async adapters complete through
//!   [`ImageAttachmentController::complete`](crate::application::ImageAttachmentController::complete)
//!
//! # Example
//!
//! ```ignore
//! use image_attach::application::port::FilePicker;
//! use image_attach::application::ImageAttachmentController;
//! use std::path::Path;
//!
//! fn attach(picker: &impl FilePicker, controller: &mut ImageAttachmentController, path: &Path) {
//!     if let Ok(file) = picker.load(path) {
//!         controller.ingest_file(file);
//!     }
//! }
//! ```

pub mod file_picker;
pub mod message_bridge;
pub mod submission;

// Re-export main types for convenience
pub use file_picker::{FileHandle, FilePicker, PickerError};
pub use message_bridge::{BlobPayload, BridgeMessage, MessageBridge};
pub use submission::{
    FormSubmitter, IssueSubmission, SubmissionError, SubmissionReceipt, SubmittedImage,
};
