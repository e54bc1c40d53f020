// SPDX-License-Identifier: MPL-2.0
//! Subscriptions feeding the application: window file drops and the message
//! bridge.

use super::Message;
use crate::infrastructure::{channel_bridge, json_lines};
use iced::futures::SinkExt;
use iced::{event, stream, window, Subscription};

/// Only one stdin bridge runs per process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct StdinBridgeId;

/// Files dropped onto the window.
pub fn create_file_drop_subscription() -> Subscription<Message> {
    event::listen_with(|event, _status, _window| match event {
        event::Event::Window(window::Event::FileDropped(path)) => {
            Some(Message::FileDropped(path))
        }
        _ => None,
    })
}

/// Bridge messages read as JSON lines from stdin.
///
/// Messages from origins outside `allowed_origins` are dropped by the bridge
/// before they reach the application.
pub fn create_stdin_bridge_subscription(allowed_origins: Vec<String>) -> Subscription<Message> {
    Subscription::run_with((StdinBridgeId, allowed_origins), |(_, allowed_origins)| {
        let allowed_origins = allowed_origins.clone();
        stream::channel(100, move |mut output: iced::futures::channel::mpsc::Sender<Message>| async move {
            let (sender, mut bridge) = channel_bridge::pair(allowed_origins);
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            tokio::spawn(json_lines::feed(stdin, sender));

            while let Some(message) = bridge.recv().await {
                if output.send(Message::Bridge(message)).await.is_err() {
                    break;
                }
            }
            tracing::debug!("stdin bridge closed");
        })
    })
}
