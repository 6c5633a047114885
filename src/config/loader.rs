//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::BridgeConfig;
use crate::config::secret_string;
use crate::domain::errors::AppError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into BridgeConfig
/// 4. Applies environment variable overrides (PRACTICE_BRIDGE_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns `AppError::Configuration` if:
/// - File cannot be read
/// - TOML parsing fails
/// - A referenced environment variable is not set
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use practice_bridge::config::loader::load_config;
///
/// let config = load_config("practice-bridge.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<BridgeConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(AppError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        AppError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    parse_config(&contents)
}

/// Parses configuration from TOML text; same pipeline as [`load_config`]
pub fn parse_config(contents: &str) -> Result<BridgeConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: BridgeConfig = toml::from_str(&contents)
        .map_err(|e| AppError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        AppError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error naming every referenced variable that is not set
pub fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| AppError::Configuration(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(AppError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using the PRACTICE_BRIDGE_* prefix
///
/// Variables follow the pattern `PRACTICE_BRIDGE_<SECTION>_<KEY>`, for example
/// `PRACTICE_BRIDGE_PORTAL_BASE_URL`. Credentials for a single therapist can be
/// supplied with `PRACTICE_BRIDGE_CREDENTIALS_<THERAPIST_ID>_PASSWORD`, where
/// the therapist id is upper-cased and `-` becomes `_`.
pub fn apply_env_overrides(config: &mut BridgeConfig) -> Result<()> {
    if let Ok(val) = std::env::var("PRACTICE_BRIDGE_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }
    if let Ok(val) = std::env::var("PRACTICE_BRIDGE_ENVIRONMENT") {
        config.environment = val.parse().map_err(AppError::Configuration)?;
    }

    // Portal overrides
    if let Ok(val) = std::env::var("PRACTICE_BRIDGE_PORTAL_BASE_URL") {
        config.portal.base_url = val;
    }
    if let Ok(val) = std::env::var("PRACTICE_BRIDGE_PORTAL_CLIENT_VERSION") {
        config.portal.client_version = val;
    }
    if let Ok(val) = std::env::var("PRACTICE_BRIDGE_PORTAL_TIMEOUT_SECONDS") {
        if let Ok(timeout) = val.parse() {
            config.portal.timeout_seconds = timeout;
        }
    }
    if let Ok(val) = std::env::var("PRACTICE_BRIDGE_PORTAL_CONNECT_TIMEOUT_SECONDS") {
        if let Ok(timeout) = val.parse() {
            config.portal.connect_timeout_seconds = timeout;
        }
    }
    if let Ok(val) = std::env::var("PRACTICE_BRIDGE_PORTAL_TLS_VERIFY") {
        config.portal.tls_verify = val.parse().unwrap_or(true);
    }
    if let Ok(val) = std::env::var("PRACTICE_BRIDGE_PORTAL_USER_AGENT") {
        config.portal.user_agent = val;
    }

    // Credential overrides
    for entry in &mut config.credentials {
        let key = entry.therapist_id.to_uppercase().replace('-', "_");
        if let Ok(val) = std::env::var(format!("PRACTICE_BRIDGE_CREDENTIALS_{key}_ACCOUNT")) {
            entry.account = val;
        }
        if let Ok(val) = std::env::var(format!("PRACTICE_BRIDGE_CREDENTIALS_{key}_PASSWORD")) {
            entry.password = Some(secret_string(val));
        }
        if let Ok(val) = std::env::var(format!("PRACTICE_BRIDGE_CREDENTIALS_{key}_PRACTICE_CODE"))
        {
            entry.practice_code = val;
        }
    }

    // Logging overrides
    if let Ok(val) = std::env::var("PRACTICE_BRIDGE_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(true);
    }
    if let Ok(val) = std::env::var("PRACTICE_BRIDGE_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("PRACTICE_BRIDGE_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }
    if let Ok(val) = std::env::var("PRACTICE_BRIDGE_LOGGING_JSON") {
        config.logging.json = val.parse().unwrap_or(true);
    }

    Ok(())
}
