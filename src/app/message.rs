// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::application::port::{BridgeMessage, FileHandle, PickerError};
use std::path::PathBuf;

/// Top-level messages consumed by `App::update`.
#[derive(Debug, Clone)]
pub enum Message {
    StepsChanged(String),
    /// Open the native image picker.
    PickImage,
    /// Result from the image picker.
    PickImageResult(Option<PathBuf>),
    /// A file was dropped on the window.
    FileDropped(PathBuf),
    /// A picked or dropped file finished reading.
    FileLoaded {
        seq: u64,
        result: Result<FileHandle, PickerError>,
    },
    /// A message arrived over the bridge from an allowed origin.
    Bridge(BridgeMessage),
    RemoveImage,
    Submit,
}

/// Runtime flags passed into the application at startup.
#[derive(Debug, Default)]
pub struct Flags {
    /// Optional language override from `--lang`.
    pub lang: Option<String>,
    /// Optional image to attach on startup.
    pub file_path: Option<String>,
    /// Read bridge messages as JSON lines from stdin (`--stdin-bridge`).
    pub stdin_bridge: bool,
}
