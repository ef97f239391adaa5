//! Configuration file parsing for the server.
//!
//! Loads settings from a TOML file (bind address, database path, webhook
//! secret, snapshot path, extractor tuning), then applies environment
//! overrides.

use axum::http::HeaderName;
use callsheet_extractor::ExtractorConfig;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Server configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Missing required field
    #[error("Missing required configuration field: {0}")]
    MissingField(String),

    /// Field present but unusable
    #[error("Invalid configuration field {field}: {reason}")]
    InvalidField {
        /// Name of the offending field
        field: String,
        /// What is wrong with it
        reason: String,
    },
}

/// Server configuration loaded from TOML
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1")
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Bind port (e.g., 8000)
    #[serde(default = "default_bind_port")]
    pub bind_port: u16,

    /// SQLite database file (":memory:" for a throwaway store)
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Shared secret for webhook signatures; verification is off when unset
    #[serde(default)]
    pub webhook_secret: Option<String>,

    /// Request header carrying the signature
    #[serde(default = "default_signature_header")]
    pub signature_header: String,

    /// Reject unsigned requests when a secret is configured
    #[serde(default)]
    pub require_signature: bool,

    /// File receiving the last webhook payload; empty disables snapshots
    #[serde(default = "default_last_payload_path")]
    pub last_payload_path: String,

    /// Extraction tuning
    #[serde(default)]
    pub extractor: ExtractorConfig,
}

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

fn default_bind_port() -> u16 {
    8000
}

fn default_database_path() -> String {
    "callsheet.db".to_string()
}

fn default_signature_header() -> String {
    "elevenlabs-signature".to_string()
}

fn default_last_payload_path() -> String {
    "last_payload.json".to_string()
}

impl ServerConfig {
    /// Load configuration from a TOML file, apply environment overrides and validate
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config: ServerConfig = toml::from_str(&contents)?;
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults plus environment overrides, for running without a config file
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default_config();
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Built-in defaults
    pub fn default_config() -> Self {
        ServerConfig {
            bind_address: default_bind_address(),
            bind_port: default_bind_port(),
            database_path: default_database_path(),
            webhook_secret: None,
            signature_header: default_signature_header(),
            require_signature: false,
            last_payload_path: default_last_payload_path(),
            extractor: ExtractorConfig::default(),
        }
    }

    /// Apply overrides from `CALLSHEET_DATABASE_PATH`, `WEBHOOK_SECRET`,
    /// `CALLSHEET_BIND_ADDRESS` and `CALLSHEET_BIND_PORT`
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("CALLSHEET_DATABASE_PATH") {
            self.database_path = path;
        }
        if let Some(secret) = lookup("WEBHOOK_SECRET") {
            self.webhook_secret = Some(secret);
        }
        if let Some(address) = lookup("CALLSHEET_BIND_ADDRESS") {
            self.bind_address = address;
        }
        if let Some(port) = lookup("CALLSHEET_BIND_PORT") {
            self.bind_port = port.parse().map_err(|_| ConfigError::InvalidField {
                field: "CALLSHEET_BIND_PORT".to_string(),
                reason: format!("'{}' is not a port number", port),
            })?;
        }
        Ok(())
    }

    /// Check required fields and cross-field constraints
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database_path.is_empty() {
            return Err(ConfigError::MissingField("database_path".to_string()));
        }

        HeaderName::from_bytes(self.signature_header.as_bytes()).map_err(|e| {
            ConfigError::InvalidField {
                field: "signature_header".to_string(),
                reason: e.to_string(),
            }
        })?;

        self.extractor
            .validate()
            .map_err(|e| ConfigError::InvalidField {
                field: "extractor".to_string(),
                reason: e.to_string(),
            })?;

        Ok(())
    }

    /// The configured secret, ignoring an empty string
    pub fn secret(&self) -> Option<&str> {
        self.webhook_secret.as_deref().filter(|s| !s.is_empty())
    }

    /// Get the full bind address (address:port)
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.bind_port)
    }
}
