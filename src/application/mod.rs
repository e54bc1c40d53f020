// SPDX-License-Identifier: MPL-2.0
//! Application layer - Use cases and orchestration.
//!
//! This module contains the application layer of the Clean Architecture:
//!
//! - [`port`]: Trait definitions (interfaces) for the collaborators
//! - [`ingest`]: Input shapes and the single normalization routine
//! - [`controller`]: The attachment state machine
//! - [`form`]: The issue form, the only path to submission
//! - [`render`]: View model for the upload control
//!
//! # Dependency Rule
//!
//! - Application layer depends on domain layer (uses domain types)
//! - Infrastructure layer implements application layer ports
//! - Presentation layer uses application layer services
//!
//! # Example
//!
//! ```
//! use image_attach::application::{ImageAttachmentController, UploadControlView};
//!
//! let mut controller = ImageAttachmentController::default();
//! controller.ingest_data_uri("data:image/png;base64,iVBORw0KGgoAAAAN");
//!
//! let view = UploadControlView::from_controller(&controller);
//! assert!(view.remove_visible);
//! ```

pub mod controller;
pub mod form;
pub mod ingest;
pub mod port;
pub mod render;

pub use controller::{Completion, ImageAttachmentController, IngestTicket};
pub use form::IssueForm;
pub use ingest::{IngestInput, SCREENSHOT_FIELD};
pub use render::UploadControlView;
