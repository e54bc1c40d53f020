// SPDX-License-Identifier: MPL-2.0
//! Internationalization (i18n) support for the application.
//!
//! Translations are Fluent `.ftl` files embedded at build time.
//!
//! # Features
//!
//! - Locale detection from CLI, config, or system settings
//! - Argument interpolation for error messages
//! - Fallback to `en-US` when a key is missing from the active locale

pub mod fluent;

pub use fluent::I18n;
