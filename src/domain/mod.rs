// SPDX-License-Identifier: MPL-2.0
//! Domain layer - Core attachment rules with ZERO external dependencies.
//!
//! This module contains pure domain types, value objects, and business rules.
//! It has no dependencies on external crates (except `std`) to ensure
//! testability and architectural purity.
//!
//! # Modules
//!
//! - [`attachment`]: Attachment state ([`Attachment`](attachment::Attachment),
//!   [`Validity`](attachment::Validity), [`MimeType`](attachment::MimeType)) and
//!   validation policy ([`AllowList`](attachment::AllowList),
//!   [`UploadPolicy`](attachment::UploadPolicy))
//! - [`error`]: Domain error types ([`AttachmentError`](error::AttachmentError))

pub mod attachment;
pub mod error;
