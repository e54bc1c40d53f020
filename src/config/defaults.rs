// SPDX-License-Identifier: MPL-2.0
//! Default values for the configuration sections.
//!
//! # Categories
//!
//! - **Upload**: Size limit bounds for attachments
//! - **Bridge**: Origins trusted to post messages to the upload control

use crate::domain::attachment::policy::DEFAULT_MAX_BYTES;

// ==========================================================================
// Upload Defaults
// ==========================================================================

/// Default maximum attachment size in megabytes.
pub const DEFAULT_MAX_SIZE_MB: u32 = 4;

/// Smallest accepted `max_size_mb` setting.
pub const MIN_MAX_SIZE_MB: u32 = 1;

/// Largest accepted `max_size_mb` setting.
pub const MAX_MAX_SIZE_MB: u32 = 50;

/// Bytes per configured megabyte.
pub const BYTES_PER_MB: u64 = 1024 * 1024;

// ==========================================================================
// Bridge Defaults
// ==========================================================================

/// Origins accepted by the message bridge when none are configured.
pub const DEFAULT_ALLOWED_ORIGINS: &[&str] = &["http://localhost:5000"];

// ==========================================================================
// Compile-time validation
// ==========================================================================

const _: () = {
    assert!(MIN_MAX_SIZE_MB > 0);
    assert!(MAX_MAX_SIZE_MB >= MIN_MAX_SIZE_MB);
    assert!(DEFAULT_MAX_SIZE_MB >= MIN_MAX_SIZE_MB);
    assert!(DEFAULT_MAX_SIZE_MB <= MAX_MAX_SIZE_MB);
    assert!(DEFAULT_MAX_SIZE_MB as u64 * BYTES_PER_MB == DEFAULT_MAX_BYTES);
    assert!(!DEFAULT_ALLOWED_ORIGINS.is_empty());
};
