// SPDX-License-Identifier: MPL-2.0
//! Infrastructure layer adapters.
//!
//! Concrete implementations of the port traits defined in `application::port`.
//!
//! # Available Adapters
//!
//! - [`fs_picker`]: Reads selected files from disk (implements [`FilePicker`])
//! - [`channel_bridge`]: Origin-filtered inbound message channel (implements [`MessageBridge`])
//! - [`json_lines`]: Newline-delimited JSON feed posting onto the channel bridge
//! - [`log_submitter`]: Logs submitted forms (implements [`FormSubmitter`])
//!
//! [`FilePicker`]: crate::application::port::FilePicker
//! [`MessageBridge`]: crate::application::port::MessageBridge
//! [`FormSubmitter`]: crate::application::port::FormSubmitter

pub mod channel_bridge;
pub mod fs_picker;
pub mod json_lines;
pub mod log_submitter;

pub use channel_bridge::{pair, BridgeSender, ChannelBridge, InboundMessage};
pub use fs_picker::FsFilePicker;
pub use log_submitter::LogSubmitter;
