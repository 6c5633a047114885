//! Configuration schema types
//!
//! This module defines the configuration structure for the bridge.

use crate::adapters::portal::protocol::DEFAULT_CLIENT_VERSION;
use crate::config::{secret_string, secret_string_opt, SecretString};
use crate::domain::{CredentialContext, InMemoryCredentialStore};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Runtime environment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Development environment
    #[default]
    Development,
    /// Staging environment
    Staging,
    /// Production environment
    Production,
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" => Ok(Environment::Development),
            "staging" => Ok(Environment::Staging),
            "production" => Ok(Environment::Production),
            other => Err(format!(
                "Invalid environment '{other}'. Must be one of: development, staging, production"
            )),
        }
    }
}

/// Main bridge configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Runtime environment (development, staging, production)
    #[serde(default)]
    pub environment: Environment,

    /// Portal endpoint settings
    pub portal: PortalConfig,

    /// Per-therapist portal credentials
    #[serde(default)]
    pub credentials: Vec<CredentialEntry>,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl BridgeConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.portal.validate(&self.environment)?;

        let mut seen = HashSet::new();
        for entry in &self.credentials {
            entry.validate()?;
            if !seen.insert(entry.therapist_id.as_str()) {
                return Err(format!(
                    "Duplicate credentials entry for therapist_id '{}'",
                    entry.therapist_id
                ));
            }
        }

        self.logging.validate()?;
        Ok(())
    }

    /// Builds a credential store from the `[[credentials]]` entries
    ///
    /// Entries with empty fields are kept; they surface as
    /// `IncompleteCredentials` when an operation uses them.
    pub fn credential_store(&self) -> InMemoryCredentialStore {
        let mut store = InMemoryCredentialStore::new();
        for entry in &self.credentials {
            store.insert(entry.therapist_id.clone(), entry.to_context());
        }
        store
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Portal endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortalConfig {
    /// Base URL of the portal deployment
    pub base_url: String,

    /// Client version string the portal expects on AJAX calls
    #[serde(default = "default_client_version")]
    pub client_version: String,

    /// Whole-request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// TCP connect timeout in seconds
    #[serde(default = "default_connect_timeout_seconds")]
    pub connect_timeout_seconds: u64,

    /// TLS certificate verification enabled
    ///
    /// **SECURITY WARNING**: disabling this exposes portal credentials to
    /// man-in-the-middle attacks. Validation rejects `false` in production.
    #[serde(default = "default_true")]
    pub tls_verify: bool,

    /// User-Agent header sent on every portal request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl PortalConfig {
    fn validate(&self, environment: &Environment) -> Result<(), String> {
        if self.base_url.is_empty() {
            return Err("portal.base_url cannot be empty".to_string());
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err("portal.base_url must start with http:// or https://".to_string());
        }

        url::Url::parse(&self.base_url)
            .map_err(|e| format!("portal.base_url is not a valid URL: {e}"))?;

        if self.client_version.trim().is_empty() {
            return Err("portal.client_version cannot be empty".to_string());
        }

        if self.timeout_seconds == 0 || self.timeout_seconds > 300 {
            return Err("portal.timeout_seconds must be between 1 and 300".to_string());
        }

        if self.connect_timeout_seconds == 0 {
            return Err("portal.connect_timeout_seconds must be > 0".to_string());
        }

        if *environment == Environment::Production && !self.tls_verify {
            return Err(
                "TLS certificate verification cannot be disabled in production environments. \
                For development/testing against a local portal, set 'environment = \"development\"'."
                    .to_string(),
            );
        }

        Ok(())
    }
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            base_url: "https://localhost".to_string(),
            client_version: default_client_version(),
            timeout_seconds: default_timeout_seconds(),
            connect_timeout_seconds: default_connect_timeout_seconds(),
            tls_verify: true,
            user_agent: default_user_agent(),
        }
    }
}

/// One `[[credentials]]` entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialEntry {
    /// Local therapist identifier the entry belongs to
    pub therapist_id: String,

    /// Portal account (user name)
    #[serde(default)]
    pub account: String,

    /// Portal password; never written back out
    #[serde(default, skip_serializing)]
    pub password: Option<SecretString>,

    /// Practice code selected during login
    #[serde(default)]
    pub practice_code: String,
}

impl CredentialEntry {
    pub fn new(
        therapist_id: impl Into<String>,
        account: impl Into<String>,
        password: Option<String>,
        practice_code: impl Into<String>,
    ) -> Self {
        Self {
            therapist_id: therapist_id.into(),
            account: account.into(),
            password: secret_string_opt(password),
            practice_code: practice_code.into(),
        }
    }

    fn validate(&self) -> Result<(), String> {
        if self.therapist_id.trim().is_empty() {
            return Err("credentials.therapist_id cannot be empty".to_string());
        }
        Ok(())
    }

    /// Fresh credential context for one operation
    pub fn to_context(&self) -> CredentialContext {
        CredentialContext {
            account: self.account.clone(),
            password: match &self.password {
                Some(password) => password.clone(),
                None => secret_string(String::new()),
            },
            practice_code: self.practice_code.clone(),
        }
    }

    pub fn has_password(&self) -> bool {
        self.password
            .as_ref()
            .map(|p| !p.expose_secret().is_empty())
            .unwrap_or(false)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default = "default_true")]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,

    /// Write the file layer as JSON lines
    #[serde(default = "default_true")]
    pub json: bool,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local_enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: true,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
            json: true,
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_client_version() -> String {
    DEFAULT_CLIENT_VERSION.to_string()
}

fn default_true() -> bool {
    true
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_connect_timeout_seconds() -> u64 {
    10
}

fn default_user_agent() -> String {
    format!("practice-bridge/{}", env!("CARGO_PKG_VERSION"))
}

fn default_local_path() -> String {
    "/var/log/practice-bridge".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
