//! Domain error types
//!
//! This module defines the error hierarchy for the bridge. Every failure that can
//! occur while talking to the portal is converted into one of these types at the
//! component boundary; no HTTP client or parser error type escapes.

use thiserror::Error;

/// Application-level error type
///
/// Used by configuration loading, logging setup and the CLI. Bridge failures are
/// wrapped so callers can still reach the classified taxonomy.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Portal bridge errors
    #[error(transparent)]
    Bridge(#[from] BridgeError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

/// Errors produced by the login handshake
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The handshake completed but the portal did not hand out an access token
    #[error("Login handshake did not return an access token")]
    NoAccessToken,

    /// Credentials were blank, so the handshake was not attempted
    #[error("Portal credentials are incomplete; missing: {}", .0.join(", "))]
    IncompleteCredentials(Vec<&'static str>),

    /// A transport failure aborted the handshake
    #[error("Network failure during login: {0}")]
    NetworkFailure(String),
}

/// Closed taxonomy of bridge failures
///
/// Configuration variants are detected before any network call, protocol variants
/// mean the portal answered in a shape we did not expect, and `NetworkFailure`
/// means the request itself never completed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BridgeError {
    /// No credentials are stored for the therapist
    #[error("No portal credentials configured for {0}")]
    MissingCredentials(String),

    /// Credentials exist but one or more fields are empty
    #[error("Portal credentials are incomplete; missing: {}", .0.join(", "))]
    IncompleteCredentials(Vec<&'static str>),

    /// The local record has not been linked to the portal yet
    #[error("Record is not linked to the portal: {0}")]
    UnsyncedIdentifiers(String),

    /// Handshake finished without an access-token cookie
    #[error("Portal authentication failed: no access token returned")]
    AuthFailure,

    /// Portal payload is missing the expected structure
    #[error("Malformed portal response: {0}")]
    MalformedResponse(String),

    /// Portal answered well-formed but flagged the request as failed
    #[error("Portal reported failure: {0}")]
    ExternalFailureFlag(String),

    /// Transport-level failure
    #[error("Network failure: {0}")]
    NetworkFailure(String),
}

impl From<AuthError> for BridgeError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::NoAccessToken => BridgeError::AuthFailure,
            AuthError::IncompleteCredentials(missing) => {
                BridgeError::IncompleteCredentials(missing)
            }
            AuthError::NetworkFailure(msg) => BridgeError::NetworkFailure(msg),
        }
    }
}

impl BridgeError {
    /// Converts a reqwest error without leaking the client type
    ///
    /// Timeouts raised by the transport are reported as network failures too.
    pub(crate) fn transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            BridgeError::NetworkFailure(format!("request timed out: {err}"))
        } else {
            BridgeError::NetworkFailure(err.to_string())
        }
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        AppError::Configuration(format!("TOML parse error: {err}"))
    }
}
