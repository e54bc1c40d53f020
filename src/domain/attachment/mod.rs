// SPDX-License-Identifier: MPL-2.0
//! Attachment domain types.
//!
//! This module contains the single piece of state owned by the upload control
//! and the pure rules used to accept or reject it.

pub mod policy;
pub mod types;

// Re-export commonly used types
pub use policy::{validate, AllowList, UploadPolicy, Verdict};
pub use types::{Attachment, AttachmentSource, MimeType, RawPayload, Validity};
