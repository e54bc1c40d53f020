// SPDX-License-Identifier: MPL-2.0
//! User preferences stored in a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[general]` - UI language
//! - `[upload]` - Accepted image extensions and the size limit
//! - `[bridge]` - Origins trusted to post images to the upload control
//!
//! # Path Resolution
//!
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. Pass `--config-dir` or set `IMAGE_ATTACH_CONFIG_DIR`
//! 3. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use image_attach::config;
//!
//! let (mut config, _warning) = config::load();
//! config.upload.max_size_mb = Some(8);
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;
pub mod paths;

pub use defaults::*;

use crate::domain::attachment::policy::DEFAULT_EXTENSIONS;
use crate::domain::attachment::UploadPolicy;
use crate::error::{Error, Result};
use crate::media::mime;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";

/// Warning key returned by [`load`] when the file exists but cannot be parsed.
pub const LOAD_ERROR_KEY: &str = "notification-config-load-error";

// =============================================================================
// Section Structs
// =============================================================================

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct GeneralConfig {
    /// UI language code (e.g., "en-US", "fr").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// Attachment validation settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UploadConfig {
    /// Accepted file extensions, without the leading dot.
    #[serde(
        default = "default_allowed_extensions",
        skip_serializing_if = "Option::is_none"
    )]
    pub allowed_extensions: Option<Vec<String>>,

    /// Maximum attachment size in megabytes.
    #[serde(
        default = "default_max_size_mb",
        skip_serializing_if = "Option::is_none"
    )]
    pub max_size_mb: Option<u32>,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            allowed_extensions: default_allowed_extensions(),
            max_size_mb: default_max_size_mb(),
        }
    }
}

/// Message bridge settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BridgeConfig {
    /// Origins whose messages reach the upload control.
    #[serde(
        default = "default_allowed_origins",
        skip_serializing_if = "Option::is_none"
    )]
    pub allowed_origins: Option<Vec<String>>,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            allowed_origins: default_allowed_origins(),
        }
    }
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

/// Application configuration with logical sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub upload: UploadConfig,

    #[serde(default)]
    pub bridge: BridgeConfig,
}

impl Config {
    /// Builds the validation policy from the `[upload]` section.
    ///
    /// Out-of-range sizes are clamped; unknown extensions are dropped. An
    /// extension list with no usable entry falls back to the defaults.
    #[must_use]
    pub fn upload_policy(&self) -> UploadPolicy {
        let max_size_mb = self
            .upload
            .max_size_mb
            .unwrap_or(DEFAULT_MAX_SIZE_MB)
            .clamp(MIN_MAX_SIZE_MB, MAX_MAX_SIZE_MB);

        let mut allow_list = match &self.upload.allowed_extensions {
            Some(extensions) => mime::allow_list_from_extensions(extensions.as_slice()),
            None => mime::allow_list_from_extensions(DEFAULT_EXTENSIONS),
        };
        if allow_list.mime_types().is_empty() {
            tracing::warn!("no usable image extension configured, using defaults");
            allow_list = mime::allow_list_from_extensions(DEFAULT_EXTENSIONS);
        }

        UploadPolicy {
            allow_list,
            max_bytes: u64::from(max_size_mb) * BYTES_PER_MB,
        }
    }

    /// Origins accepted by the message bridge.
    #[must_use]
    pub fn allowed_origins(&self) -> Vec<String> {
        self.bridge
            .allowed_origins
            .clone()
            .unwrap_or_else(|| DEFAULT_ALLOWED_ORIGINS.iter().map(|o| o.to_string()).collect())
    }
}

// =============================================================================
// Default Value Functions
// =============================================================================

fn default_allowed_extensions() -> Option<Vec<String>> {
    Some(DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect())
}

fn default_max_size_mb() -> Option<u32> {
    Some(DEFAULT_MAX_SIZE_MB)
}

fn default_allowed_origins() -> Option<Vec<String>> {
    Some(DEFAULT_ALLOWED_ORIGINS.iter().map(|o| o.to_string()).collect())
}

// =============================================================================
// Config Path Resolution
// =============================================================================

fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load Functions
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with the i18n key of a warning to show the user.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "failed to load config");
                    return (Config::default(), Some(LOAD_ERROR_KEY.to_string()));
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

// =============================================================================
// Save Functions
// =============================================================================

/// Saves the configuration to the default path.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration to a custom directory.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = get_config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Saves configuration to a specific path.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::attachment::MimeType;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip_preserves_settings() {
        let config = Config {
            general: GeneralConfig {
                language: Some("fr".to_string()),
            },
            upload: UploadConfig {
                allowed_extensions: Some(vec!["png".into(), "gif".into()]),
                max_size_mb: Some(8),
            },
            bridge: BridgeConfig {
                allowed_origins: Some(vec!["https://example.org".into()]),
            },
        };
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("settings.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded, config);
    }

    #[test]
    fn load_from_path_invalid_toml_errors() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        assert!(matches!(load_from_path(&config_path), Err(Error::Config(_))));
    }

    #[test]
    fn missing_sections_use_defaults() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "[general]\nlanguage = \"fr\"\n").expect("failed to write");

        let loaded = load_from_path(&config_path).expect("failed to load config");
        assert_eq!(loaded.general.language.as_deref(), Some("fr"));
        assert_eq!(loaded.upload, UploadConfig::default());
        assert_eq!(loaded.bridge, BridgeConfig::default());
    }

    #[test]
    fn load_with_override_reports_broken_file() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        fs::write(temp_dir.path().join(CONFIG_FILE), "[upload\n").expect("failed to write");

        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert_eq!(config, Config::default());
        assert_eq!(warning.as_deref(), Some(LOAD_ERROR_KEY));
    }

    #[test]
    fn load_with_override_without_file_is_silent() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert_eq!(config, Config::default());
        assert!(warning.is_none());
    }

    #[test]
    fn save_with_override_and_load_with_override_round_trip() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let base_dir = temp_dir.path().to_path_buf();
        let config = Config {
            upload: UploadConfig {
                max_size_mb: Some(2),
                ..UploadConfig::default()
            },
            ..Config::default()
        };

        save_with_override(&config, Some(base_dir.clone())).expect("failed to save");
        let (loaded, warning) = load_with_override(Some(base_dir));
        assert!(warning.is_none());
        assert_eq!(loaded.upload.max_size_mb, Some(2));
    }

    #[test]
    fn default_policy_matches_builtin_limits() {
        let policy = Config::default().upload_policy();
        assert_eq!(policy, UploadPolicy::default());
    }

    #[test]
    fn upload_policy_clamps_size() {
        let mut config = Config::default();
        config.upload.max_size_mb = Some(0);
        assert_eq!(config.upload_policy().max_bytes, BYTES_PER_MB);

        config.upload.max_size_mb = Some(10_000);
        assert_eq!(
            config.upload_policy().max_bytes,
            u64::from(MAX_MAX_SIZE_MB) * BYTES_PER_MB
        );
    }

    #[test]
    fn upload_policy_honors_extension_subset() {
        let mut config = Config::default();
        config.upload.allowed_extensions = Some(vec!["png".into()]);
        let policy = config.upload_policy();

        assert!(policy.allow_list.permits(&MimeType::parse("image/png").unwrap()));
        assert!(!policy.allow_list.permits(&MimeType::parse("image/gif").unwrap()));
    }

    #[test]
    fn unusable_extensions_fall_back_to_defaults() {
        let mut config = Config::default();
        config.upload.allowed_extensions = Some(vec!["py".into()]);
        assert_eq!(config.upload_policy(), UploadPolicy::default());
    }

    #[test]
    fn default_origins_come_from_defaults() {
        let mut config = Config::default();
        config.bridge.allowed_origins = None;
        assert_eq!(config.allowed_origins(), vec!["http://localhost:5000".to_string()]);
    }
}
