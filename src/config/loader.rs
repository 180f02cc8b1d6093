//! Configuration file loading with precedence handling.
//!
//! `~/.config/folio/config.toml` carries relay routing and the timing
//! knobs. Every field is optional; anything unset falls back to hardcoded
//! defaults, then environment variables and CLI flags override in turn.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::transport::emailjs::DEFAULT_BASE_URL;
use crate::transport::RelayTarget;

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Config file path contains invalid UTF-8 or cannot be resolved.
    #[error("Invalid config path: {0}")]
    InvalidPath(String),

    /// Failed to read a config file that was explicitly requested.
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are
/// used. Corresponds to `~/.config/folio/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Relay routing section.
    #[serde(default)]
    pub relay: Option<RelaySection>,

    /// Success auto-reset delay in milliseconds.
    #[serde(default)]
    pub reset_delay_ms: Option<u64>,

    /// Carousel visual transition duration in milliseconds.
    #[serde(default)]
    pub transition_ms: Option<u64>,

    /// Directory holding the role resume files.
    #[serde(default)]
    pub resume_dir: Option<PathBuf>,

    /// Directory resume files are delivered into.
    #[serde(default)]
    pub output_dir: Option<PathBuf>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Relay routing section from TOML.
///
/// Structure matches the TOML format:
/// ```toml
/// [relay]
/// service_id = "service_xxxxxxx"
/// template_id = "template_xxxxxxx"
/// public_key = "XXXXXXXXXXXXXXXXX"
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RelaySection {
    /// Relay endpoint base URL (defaults to the public EmailJS endpoint).
    #[serde(default)]
    pub base_url: Option<String>,

    /// Relay service identifier.
    #[serde(default)]
    pub service_id: Option<String>,

    /// Relay template identifier.
    #[serde(default)]
    pub template_id: Option<String>,

    /// Public access key.
    #[serde(default)]
    pub public_key: Option<String>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Relay endpoint base URL.
    pub relay_base_url: String,
    /// Relay service identifier (empty until configured).
    pub service_id: String,
    /// Relay template identifier (empty until configured).
    pub template_id: String,
    /// Public access key (empty until configured).
    pub public_key: String,
    /// Success auto-reset delay in milliseconds.
    pub reset_delay_ms: u64,
    /// Carousel transition duration in milliseconds.
    pub transition_ms: u64,
    /// Directory holding the role resume files.
    pub resume_dir: PathBuf,
    /// Directory resume files are delivered into.
    pub output_dir: PathBuf,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            relay_base_url: DEFAULT_BASE_URL.to_string(),
            service_id: String::new(),
            template_id: String::new(),
            public_key: String::new(),
            reset_delay_ms: 3000,
            transition_ms: 300,
            resume_dir: PathBuf::from("resumes"),
            output_dir: PathBuf::from("."),
            log_file_path: default_log_path(),
        }
    }
}

impl ResolvedConfig {
    /// Relay routing built from the resolved identifiers.
    pub fn relay_target(&self) -> RelayTarget {
        RelayTarget {
            service_id: self.service_id.clone(),
            template_id: self.template_id.clone(),
            public_key: self.public_key.clone(),
        }
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/folio/folio.log` on Unix-like systems, or the
/// platform state directory elsewhere. Falls back to the current directory
/// if no state directory can be determined.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("folio").join("folio.log")
    } else {
        PathBuf::from("folio.log")
    }
}

/// Resolve the default config file path (`~/.config/folio/config.toml`).
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("folio").join("config.toml"))
}

/// Load a configuration file from a specific path.
///
/// Returns `Ok(None)` if the file doesn't exist (not an error - use
/// defaults). Returns `Err` if the file exists but cannot be read or
/// parsed.
pub fn load_config(path: &Path) -> Result<Option<ConfigFile>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
        path: path.to_path_buf(),
        reason: source.to_string(),
    })?;
    let parsed = toml::from_str(&raw).map_err(|source| ConfigError::ParseError {
        path: path.to_path_buf(),
        reason: source.to_string(),
    })?;
    Ok(Some(parsed))
}

/// Load configuration honoring an explicit `--config` path.
///
/// An explicitly requested path must exist; the default path may be
/// silently absent.
pub fn load_config_with_precedence(
    cli_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    match cli_path {
        Some(path) => match load_config(&path)? {
            Some(file) => Ok(Some(file)),
            None => Err(ConfigError::ReadError {
                path,
                reason: "file not found".to_string(),
            }),
        },
        None => match default_config_path() {
            Some(path) => load_config(&path),
            None => Ok(None),
        },
    }
}

/// Merge an optional config file over the hardcoded defaults.
pub fn merge_config(file: Option<ConfigFile>) -> ResolvedConfig {
    let mut resolved = ResolvedConfig::default();
    let Some(file) = file else {
        return resolved;
    };
    if let Some(relay) = file.relay {
        if let Some(base_url) = relay.base_url {
            resolved.relay_base_url = base_url;
        }
        if let Some(service_id) = relay.service_id {
            resolved.service_id = service_id;
        }
        if let Some(template_id) = relay.template_id {
            resolved.template_id = template_id;
        }
        if let Some(public_key) = relay.public_key {
            resolved.public_key = public_key;
        }
    }
    if let Some(reset_delay_ms) = file.reset_delay_ms {
        resolved.reset_delay_ms = reset_delay_ms;
    }
    if let Some(transition_ms) = file.transition_ms {
        resolved.transition_ms = transition_ms;
    }
    if let Some(resume_dir) = file.resume_dir {
        resolved.resume_dir = resume_dir;
    }
    if let Some(output_dir) = file.output_dir {
        resolved.output_dir = output_dir;
    }
    if let Some(log_file_path) = file.log_file_path {
        resolved.log_file_path = log_file_path;
    }
    resolved
}

/// Apply environment variable overrides.
///
/// Recognized: `FOLIO_RELAY_URL`, `FOLIO_SERVICE_ID`, `FOLIO_TEMPLATE_ID`,
/// `FOLIO_PUBLIC_KEY`. Empty values are ignored.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    let overrides: [(&str, &mut String); 4] = [
        ("FOLIO_RELAY_URL", &mut config.relay_base_url),
        ("FOLIO_SERVICE_ID", &mut config.service_id),
        ("FOLIO_TEMPLATE_ID", &mut config.template_id),
        ("FOLIO_PUBLIC_KEY", &mut config.public_key),
    ];
    for (name, slot) in overrides {
        if let Ok(value) = std::env::var(name) {
            if !value.is_empty() {
                *slot = value;
            }
        }
    }
    config
}

/// Apply CLI argument overrides (highest precedence).
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    service_id: Option<String>,
    template_id: Option<String>,
    public_key: Option<String>,
) -> ResolvedConfig {
    if let Some(service_id) = service_id {
        config.service_id = service_id;
    }
    if let Some(template_id) = template_id {
        config.template_id = template_id;
    }
    if let Some(public_key) = public_key {
        config.public_key = public_key;
    }
    config
}

// ===== Tests =====

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
