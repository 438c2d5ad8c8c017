//! Service configuration: TOML file with environment overrides
//!
//! Each section implements `Default`, so an empty or partial file is valid.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

use super::defaults;

// ============================================================================
// Top-Level Config
// ============================================================================

/// Root configuration for a ComplaintOps deployment.
///
/// Load with `AppConfig::load()` which searches:
/// 1. `$COMPLAINT_OPS_CONFIG` env var
/// 2. `./complaint_ops.toml`
/// 3. Built-in defaults
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Remote AI service (the four stages)
    #[serde(default)]
    pub stages: StagesConfig,

    /// Pipeline failure policy
    #[serde(default)]
    pub pipeline: PipelineConfig,

    /// Record store location
    #[serde(default)]
    pub storage: StorageConfig,
}

impl AppConfig {
    /// Load configuration using the standard search order, then apply
    /// environment overrides. Call `validate()` once all overrides are in.
    ///
    /// A config file that is named or present but cannot be read or parsed
    /// is an error, never replaced by defaults.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with(|key| std::env::var(key).ok())
    }

    /// `load` with the environment supplied through `lookup`.
    pub fn load_with<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::load_file_or_default(&lookup)?;
        config.apply_overrides(lookup);
        Ok(config)
    }

    fn load_file_or_default<F>(lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // 1. Explicit path from env var; it must exist
        if let Some(path) = lookup(defaults::CONFIG_PATH_ENV).filter(|v| !v.is_empty()) {
            let p = PathBuf::from(path);
            let config = Self::load_from_file(&p)?;
            info!(path = %p.display(), "Loaded config from {}", defaults::CONFIG_PATH_ENV);
            return Ok(config);
        }

        // 2. Check ./complaint_ops.toml
        let local = PathBuf::from(defaults::LOCAL_CONFIG_FILE);
        if local.exists() {
            let config = Self::load_from_file(&local)?;
            info!("Loaded config from ./{}", defaults::LOCAL_CONFIG_FILE);
            return Ok(config);
        }

        // 3. Defaults
        info!("No {} found, using built-in defaults", defaults::LOCAL_CONFIG_FILE);
        Ok(Self::default())
    }

    /// Parse a specific TOML file. Values are not validated here.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        toml::from_str(&contents).map_err(|e| ConfigError::Parse(path.to_path_buf(), e))
    }

    /// Apply environment overrides through `lookup` (injected for tests).
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(addr) = lookup(defaults::SERVER_ADDR_ENV).filter(|v| !v.is_empty()) {
            self.server.addr = addr;
        }
        if let Some(origins) = lookup(defaults::CORS_ORIGINS_ENV).filter(|v| !v.trim().is_empty()) {
            self.server.cors_origins = origins
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(str::to_string)
                .collect();
        }
        if let Some(url) = lookup(defaults::AI_SERVICE_URL_ENV).filter(|v| !v.is_empty()) {
            self.stages.base_url = url;
        }
    }

    /// Serialize the current config to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// Validate the configuration.
    ///
    /// Rules:
    /// - Bind address must be `HOST:PORT`
    /// - AI service URL must be http(s)
    /// - Stage timeout, when set, must be > 0
    /// - Data directory must be non-empty
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors: Vec<String> = Vec::new();

        match self.server.addr.rsplit_once(':') {
            Some((host, port)) if !host.is_empty() && port.parse::<u16>().is_ok() => {}
            _ => errors.push(format!(
                "server.addr ({}) must be HOST:PORT",
                self.server.addr
            )),
        }

        let url = self.stages.base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            errors.push(format!(
                "stages.base_url ({}) must start with http:// or https://",
                self.stages.base_url
            ));
        }

        if self.stages.request_timeout_secs == Some(0) {
            errors.push("stages.request_timeout_secs must be > 0 when set".to_string());
        }

        if self.storage.data_dir.as_os_str().is_empty() {
            errors.push("storage.data_dir must not be empty".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config I/O error ({}): {}", .0.display(), .1)]
    Io(PathBuf, std::io::Error),
    #[error("Config parse error ({}): {}", .0.display(), .1)]
    Parse(PathBuf, toml::de::Error),
    #[error("Config serialization error: {0}")]
    Serialize(toml::ser::Error),
    #[error("Config validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),
}

// ============================================================================
// Sections
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServerConfig {
    /// HTTP server bind address.
    ///
    /// Can be overridden by `COMPLAINT_OPS_SERVER_ADDR` env var or `--addr` CLI flag.
    #[serde(default = "default_server_addr")]
    pub addr: String,

    /// Allowed CORS origins. Empty means any origin.
    ///
    /// Can be overridden by `COMPLAINT_OPS_CORS_ORIGINS` (comma-separated).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cors_origins: Vec<String>,
}

fn default_server_addr() -> String {
    defaults::SERVER_ADDR.to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: default_server_addr(),
            cors_origins: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StagesConfig {
    /// Base URL of the AI service. Stage paths are appended to it.
    ///
    /// Can be overridden by `AI_SERVICE_URL` env var or `--ai-service-url` CLI flag.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-call timeout. Unset means the HTTP transport default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    defaults::AI_SERVICE_URL.to_string()
}

impl Default for StagesConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: None,
        }
    }
}

/// What to do when the masking stage is unavailable.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum MaskingPolicy {
    /// Continue with the unmasked text. Unmasked PII reaches the downstream
    /// stages and the stored `masked_text`.
    #[default]
    Permissive,
    /// Refuse to analyze the complaint.
    Strict,
}

impl std::fmt::Display for MaskingPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MaskingPolicy::Permissive => write!(f, "permissive"),
            MaskingPolicy::Strict => write!(f, "strict"),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PipelineConfig {
    #[serde(default)]
    pub masking_policy: MaskingPolicy,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StorageConfig {
    /// Directory holding the sled database. `--data-dir` overrides it.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(defaults::DATA_DIR)
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

impl StorageConfig {
    /// Path of the complaints database.
    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(defaults::COMPLAINTS_DB)
    }
}

// ============================================================================
// Tests
// ============================================================================
