//! Configuration loading, validation, and management for r2skill.
//!
//! Loads configuration from `~/.r2skill/config.toml` with environment
//! variable overrides. Validates all settings at startup.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Backends `persistence.backend` may name.
pub const BACKENDS: &[&str] = &["sqlite", "file", "memory"];

/// The root configuration structure.
///
/// Maps directly to `~/.r2skill/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Attribute store configuration
    #[serde(default)]
    pub persistence: PersistenceConfig,

    /// Gateway configuration
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Skill behaviour
    #[serde(default)]
    pub skill: SkillConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistenceConfig {
    /// "sqlite", "file", or "memory"
    #[serde(default = "default_backend")]
    pub backend: String,

    /// Table (SQLite) or file stem (file backend) holding the attributes
    #[serde(default = "default_table_name")]
    pub table_name: String,

    /// Region namespace; selects a subdirectory of the data directory
    #[serde(default = "default_region")]
    pub region: String,

    /// Override the data directory (default: ~/.r2skill/data)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<String>,
}

fn default_backend() -> String {
    "sqlite".into()
}
fn default_table_name() -> String {
    "r2skill_attributes".into()
}
fn default_region() -> String {
    "local".into()
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            table_name: default_table_name(),
            region: default_region(),
            data_dir: None,
        }
    }
}

impl PersistenceConfig {
    /// Resolved data directory, including the region namespace.
    pub fn region_dir(&self) -> PathBuf {
        let base = self
            .data_dir
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| AppConfig::config_dir().join("data"));
        base.join(&self.region)
    }

    /// Path of the store file for the given extension, e.g. `sqlite` or `json`.
    pub fn store_path(&self, extension: &str) -> PathBuf {
        self.region_dir()
            .join(format!("{}.{extension}", self.table_name))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,
}

fn default_port() -> u16 {
    8080
}
fn default_host() -> String {
    "127.0.0.1".into()
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillConfig {
    #[serde(default = "default_locale")]
    pub locale: String,

    /// Sent back as `userAgent` in every response envelope
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Audio clips for the PlayAudio intent. Empty = built-in clips.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub audio_sources: Vec<String>,
}

fn default_locale() -> String {
    "es-ES".into()
}
fn default_user_agent() -> String {
    concat!("r2skill/", env!("CARGO_PKG_VERSION")).into()
}

impl Default for SkillConfig {
    fn default() -> Self {
        Self {
            locale: default_locale(),
            user_agent: default_user_agent(),
            audio_sources: vec![],
        }
    }
}

impl AppConfig {
    /// Load configuration from the default path (~/.r2skill/config.toml).
    ///
    /// Environment overrides (highest priority):
    /// - `R2SKILL_TABLE_NAME`, then `DYNAMODB_PERSISTENCE_TABLE_NAME`
    /// - `R2SKILL_REGION`, then `DYNAMODB_PERSISTENCE_REGION`
    /// - `R2SKILL_BACKEND`
    /// - `R2SKILL_PORT`
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;
        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Apply environment overrides through `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(table) = lookup("R2SKILL_TABLE_NAME")
            .or_else(|| lookup("DYNAMODB_PERSISTENCE_TABLE_NAME"))
        {
            self.persistence.table_name = table;
        }

        if let Some(region) =
            lookup("R2SKILL_REGION").or_else(|| lookup("DYNAMODB_PERSISTENCE_REGION"))
        {
            self.persistence.region = region;
        }

        if let Some(backend) = lookup("R2SKILL_BACKEND") {
            self.persistence.backend = backend;
        }

        if let Some(port) = lookup("R2SKILL_PORT") {
            self.gateway.port = port.parse().map_err(|_| {
                ConfigError::ValidationError(format!("R2SKILL_PORT is not a port number: {port}"))
            })?;
        }

        Ok(())
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".r2skill")
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !BACKENDS.contains(&self.persistence.backend.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "persistence.backend must be one of {}, got '{}'",
                BACKENDS.join(", "),
                self.persistence.backend
            )));
        }

        if !is_identifier(&self.persistence.table_name) {
            return Err(ConfigError::ValidationError(format!(
                "persistence.table_name must match [A-Za-z_][A-Za-z0-9_]*, got '{}'",
                self.persistence.table_name
            )));
        }

        let region = &self.persistence.region;
        if region.is_empty()
            || !region
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(ConfigError::ValidationError(format!(
                "persistence.region must be non-empty and contain only letters, digits, '-' or '_', got '{region}'"
            )));
        }

        if self.gateway.port == 0 {
            return Err(ConfigError::ValidationError(
                "gateway.port must be > 0".into(),
            ));
        }

        if self.skill.audio_sources.iter().any(|s| s.trim().is_empty()) {
            return Err(ConfigError::ValidationError(
                "skill.audio_sources must not contain empty entries".into(),
            ));
        }

        Ok(())
    }

    /// Generate a default config TOML string (for `config init`).
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            persistence: PersistenceConfig::default(),
            gateway: GatewayConfig::default(),
            skill: SkillConfig::default(),
        }
    }
}

/// Whether `name` is safe to use as an SQL table name.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}
