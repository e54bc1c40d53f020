// SPDX-License-Identifier: MPL-2.0
//! `image_attach` is the image attachment control of an issue form.
//!
//! It accepts an image from three sources (a posted `data:` URI, a posted
//! binary blob, or a picked file), normalizes them into one validated
//! attachment with a displayable preview, and lets the user remove it before
//! the form is submitted. A small Iced window hosts the control.

#![doc(html_root_url = "https://docs.rs/image_attach/0.1.0")]

pub mod app;
pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod i18n;
pub mod infrastructure;
pub mod media;
