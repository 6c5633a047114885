//! Configuration management for the bridge.
//!
//! This module provides TOML-based configuration loading, parsing, and validation.
//!
//! # Overview
//!
//! The bridge uses a TOML configuration file with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `PRACTICE_BRIDGE_*` environment overrides
//! - Default values for optional settings
//! - Validation on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use practice_bridge::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("practice-bridge.toml")?;
//!
//! println!("Portal URL: {}", config.portal.base_url);
//! println!("Therapists configured: {}", config.credentials.len());
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Application settings (log level)
//! - [`PortalConfig`] - Portal URL, client version, timeouts and TLS
//! - [`CredentialEntry`] - Per-therapist portal credentials
//! - [`LoggingConfig`] - Logging configuration
//!
//! # Example Configuration
//!
//! ```toml
//! environment = "production"
//!
//! [application]
//! log_level = "info"
//!
//! [portal]
//! base_url = "https://portal.example.com"
//! timeout_seconds = 30
//!
//! [[credentials]]
//! therapist_id = "therapist-1"
//! account = "therapist@example.com"
//! password = "${PRACTICE_BRIDGE_THERAPIST_1_PASSWORD}"
//! practice_code = "X1"
//!
//! [logging]
//! local_enabled = true
//! local_path = "/var/log/practice-bridge"
//! local_rotation = "daily"
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::load_config;
pub use schema::{
    ApplicationConfig, BridgeConfig, CredentialEntry, Environment, LoggingConfig, PortalConfig,
};
pub use secret::{secret_string, secret_string_opt, SecretString, SecretValue};
