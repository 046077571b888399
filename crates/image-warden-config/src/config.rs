// crates/image-warden-config/src/config.rs
// ============================================================================
// Module: Image Warden Configuration
// Description: Configuration loading and validation for Image Warden.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: serde, toml, url
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size and path limits.
//! An explicitly named file must exist; when only the default name is in play
//! and no file is present, built-in defaults apply and live mode will refuse
//! to start for lack of trigger credentials. Invalid configuration fails
//! closed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use thiserror::Error;
use url::Url;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "image-warden.toml";
/// Environment variable used to override the config path.
pub(crate) const CONFIG_ENV_VAR: &str = "IMAGE_WARDEN_CONFIG";
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Maximum length of an API token.
pub(crate) const MAX_TOKEN_LENGTH: usize = 512;
/// Minimum allowed collaborator timeout in milliseconds.
pub(crate) const MIN_TIMEOUT_MS: u64 = 100;
/// Maximum allowed collaborator timeout in milliseconds.
pub(crate) const MAX_TIMEOUT_MS: u64 = 300_000;
/// Default collaborator timeout in milliseconds.
pub(crate) const DEFAULT_TIMEOUT_MS: u64 = 10_000;
/// Default namespace audited deployments live in.
const DEFAULT_NAMESPACE: &str = "default";
/// Default report output directory.
const DEFAULT_OUTPUT_DIR: &str = ".";

// ============================================================================
// SECTION: Configuration Types
// ============================================================================

/// Image Warden configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WardenConfig {
    /// Version authority (image catalog) configuration.
    #[serde(default)]
    pub authority: AuthorityConfig,
    /// Container platform lookup configuration.
    #[serde(default)]
    pub bcp: BcpConfig,
    /// Cloud service lookup configuration.
    #[serde(default)]
    pub aws: AwsConfig,
    /// Remediation trigger configuration.
    #[serde(default)]
    pub trigger: TriggerConfig,
    /// Report output configuration.
    #[serde(default)]
    pub report: ReportConfig,
}

impl WardenConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// An explicit path (argument or environment) must name an existing file.
    /// When only the default filename applies and no such file exists, the
    /// built-in defaults are returned.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (resolved, explicit) = resolve_path(path)?;
        if !explicit && !resolved.exists() {
            let config = Self::default();
            config.validate()?;
            return Ok(config);
        }
        let bytes = fs::read(&resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.authority.validate()?;
        self.bcp.validate()?;
        self.aws.validate()?;
        self.trigger.validate()?;
        self.report.validate()?;
        Ok(())
    }
}

/// Version authority (image catalog) configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthorityConfig {
    /// Catalog API endpoint.
    #[serde(default)]
    pub endpoint: String,
    /// Request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Stream key to catalog image name table.
    #[serde(default)]
    pub streams: BTreeMap<String, String>,
}

impl Default for AuthorityConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            streams: BTreeMap::new(),
        }
    }
}

impl AuthorityConfig {
    /// Validates authority settings.
    fn validate(&self) -> Result<(), ConfigError> {
        validate_endpoint("authority.endpoint", &self.endpoint)?;
        validate_timeout("authority.timeout_ms", self.timeout_ms)?;
        for (stream, image_name) in &self.streams {
            if stream.trim().is_empty() {
                return Err(ConfigError::Invalid(
                    "authority.streams keys must be non-empty".to_string(),
                ));
            }
            if image_name.trim().is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "authority.streams entry for {stream} must be non-empty"
                )));
            }
        }
        Ok(())
    }
}

/// Container platform lookup configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct BcpConfig {
    /// Platform API endpoint.
    #[serde(default)]
    pub endpoint: String,
    /// Bearer token for API access.
    #[serde(default)]
    pub token: String,
    /// Namespace audited deployments live in.
    #[serde(default = "default_namespace")]
    pub namespace: String,
    /// Request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for BcpConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            token: String::new(),
            namespace: DEFAULT_NAMESPACE.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl BcpConfig {
    /// Validates platform lookup settings.
    fn validate(&self) -> Result<(), ConfigError> {
        validate_endpoint("bcp.endpoint", &self.endpoint)?;
        validate_token("bcp.token", &self.token)?;
        validate_timeout("bcp.timeout_ms", self.timeout_ms)?;
        if self.namespace.trim().is_empty() {
            return Err(ConfigError::Invalid("bcp.namespace must be non-empty".to_string()));
        }
        Ok(())
    }
}

/// Cloud service lookup configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AwsConfig {
    /// Service gateway endpoint.
    #[serde(default)]
    pub endpoint: String,
    /// Bearer token for gateway access.
    #[serde(default)]
    pub token: String,
    /// Cluster the audited services run in.
    #[serde(default)]
    pub cluster: String,
    /// Request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for AwsConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            token: String::new(),
            cluster: String::new(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl AwsConfig {
    /// Validates service lookup settings.
    fn validate(&self) -> Result<(), ConfigError> {
        validate_endpoint("aws.endpoint", &self.endpoint)?;
        validate_token("aws.token", &self.token)?;
        validate_timeout("aws.timeout_ms", self.timeout_ms)?;
        if !self.endpoint.is_empty() && self.cluster.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "aws.cluster must be set when aws.endpoint is set".to_string(),
            ));
        }
        Ok(())
    }
}

/// Remediation trigger configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct TriggerConfig {
    /// Pipeline API endpoint.
    #[serde(default)]
    pub endpoint: String,
    /// API token with pipeline-create scope.
    #[serde(default)]
    pub token: String,
    /// Request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for TriggerConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            token: String::new(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl TriggerConfig {
    /// Validates trigger settings.
    fn validate(&self) -> Result<(), ConfigError> {
        validate_endpoint("trigger.endpoint", &self.endpoint)?;
        validate_token("trigger.token", &self.token)?;
        validate_timeout("trigger.timeout_ms", self.timeout_ms)?;
        Ok(())
    }

    /// Returns true when both endpoint and token are configured.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.endpoint.trim().is_empty() && !self.token.trim().is_empty()
    }
}

/// Report output configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    /// Directory batch reports are written into.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}

impl ReportConfig {
    /// Validates report settings.
    fn validate(&self) -> Result<(), ConfigError> {
        let text = self.output_dir.to_string_lossy();
        if text.trim().is_empty() {
            return Err(ConfigError::Invalid("report.output_dir must be non-empty".to_string()));
        }
        if text.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("report.output_dir exceeds max length".to_string()));
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Default collaborator timeout.
const fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

/// Default audited namespace.
fn default_namespace() -> String {
    DEFAULT_NAMESPACE.to_string()
}

/// Default report output directory.
fn default_output_dir() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_DIR)
}

/// Resolves the config path from CLI or environment defaults.
///
/// The second element is true when the path was named explicitly.
fn resolve_path(path: Option<&Path>) -> Result<(PathBuf, bool), ConfigError> {
    if let Some(path) = path {
        return Ok((path.to_path_buf(), true));
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok((PathBuf::from(env_path), true));
    }
    Ok((PathBuf::from(DEFAULT_CONFIG_NAME), false))
}

/// Validates an endpoint string; empty means the collaborator is unset.
fn validate_endpoint(field: &str, value: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Ok(());
    }
    let parsed = Url::parse(value)
        .map_err(|err| ConfigError::Invalid(format!("{field} is not a valid url: {err}")))?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(ConfigError::Invalid(format!("{field} must use http or https")));
    }
    Ok(())
}

/// Validates a token string against the length limit.
fn validate_token(field: &str, value: &str) -> Result<(), ConfigError> {
    if value.len() > MAX_TOKEN_LENGTH {
        return Err(ConfigError::Invalid(format!("{field} exceeds max length")));
    }
    Ok(())
}

/// Validates a collaborator timeout against the allowed bounds.
fn validate_timeout(field: &str, value: u64) -> Result<(), ConfigError> {
    if !(MIN_TIMEOUT_MS..=MAX_TIMEOUT_MS).contains(&value) {
        return Err(ConfigError::Invalid(format!(
            "{field} must be between {MIN_TIMEOUT_MS} and {MAX_TIMEOUT_MS}"
        )));
    }
    Ok(())
}
