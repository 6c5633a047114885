//! Error classification
//!
//! Maps every [`BridgeError`] onto the closed taxonomy callers act on: what the
//! user must fix (configuration), what suggests the portal changed behaviour
//! (protocol), what the portal explicitly refused (external), and what may
//! succeed on a later attempt (transport). Nothing here retries.

use crate::domain::BridgeError;
use serde::Serialize;
use std::fmt;

/// Taxonomy entry for a bridge failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    MissingCredentials,
    IncompleteCredentials,
    UnsyncedIdentifiers,
    AuthFailure,
    MalformedResponse,
    ExternalFailureFlag,
    NetworkFailure,
}

/// Who has to act on a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Detected before any network call; the user must configure something
    Configuration,
    /// Handshake or payload shape was not what the protocol expects
    Protocol,
    /// Portal answered well-formed but refused the request
    External,
    /// The request itself did not complete
    Transport,
}

impl ErrorKind {
    pub fn category(self) -> ErrorCategory {
        match self {
            ErrorKind::MissingCredentials
            | ErrorKind::IncompleteCredentials
            | ErrorKind::UnsyncedIdentifiers => ErrorCategory::Configuration,
            ErrorKind::AuthFailure | ErrorKind::MalformedResponse => ErrorCategory::Protocol,
            ErrorKind::ExternalFailureFlag => ErrorCategory::External,
            ErrorKind::NetworkFailure => ErrorCategory::Transport,
        }
    }

    /// HTTP-equivalent status a caller should surface
    pub fn status(self) -> u16 {
        match self {
            ErrorKind::MissingCredentials => 404,
            ErrorKind::IncompleteCredentials | ErrorKind::UnsyncedIdentifiers => 400,
            ErrorKind::AuthFailure => 401,
            ErrorKind::MalformedResponse | ErrorKind::ExternalFailureFlag => 500,
            ErrorKind::NetworkFailure => 502,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::MissingCredentials => "missing_credentials",
            ErrorKind::IncompleteCredentials => "incomplete_credentials",
            ErrorKind::UnsyncedIdentifiers => "unsynced_identifiers",
            ErrorKind::AuthFailure => "auth_failure",
            ErrorKind::MalformedResponse => "malformed_response",
            ErrorKind::ExternalFailureFlag => "external_failure_flag",
            ErrorKind::NetworkFailure => "network_failure",
        };
        f.write_str(name)
    }
}

/// A bridge failure ready to hand to the UI layer
///
/// `message` is the error's display text and is meant to be shown verbatim.
/// It never contains secrets; the account identifier is the only personal
/// data that can appear.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifiedError {
    pub kind: ErrorKind,
    pub category: ErrorCategory,
    pub status: u16,
    pub retryable: bool,
    pub message: String,
}

impl ClassifiedError {
    /// Process exit code used by the CLI for this failure
    pub fn exit_code(&self) -> i32 {
        match self.category {
            ErrorCategory::Configuration => 2,
            ErrorCategory::Protocol | ErrorCategory::External => 3,
            ErrorCategory::Transport => 4,
        }
    }
}

/// Classify a bridge failure
pub fn classify(error: &BridgeError) -> ClassifiedError {
    let kind = match error {
        BridgeError::MissingCredentials(_) => ErrorKind::MissingCredentials,
        BridgeError::IncompleteCredentials(_) => ErrorKind::IncompleteCredentials,
        BridgeError::UnsyncedIdentifiers(_) => ErrorKind::UnsyncedIdentifiers,
        BridgeError::AuthFailure => ErrorKind::AuthFailure,
        BridgeError::MalformedResponse(_) => ErrorKind::MalformedResponse,
        BridgeError::ExternalFailureFlag(_) => ErrorKind::ExternalFailureFlag,
        BridgeError::NetworkFailure(_) => ErrorKind::NetworkFailure,
    };
    let category = kind.category();

    ClassifiedError {
        kind,
        category,
        status: kind.status(),
        retryable: category == ErrorCategory::Transport,
        message: error.to_string(),
    }
}

impl From<&BridgeError> for ClassifiedError {
    fn from(error: &BridgeError) -> Self {
        classify(error)
    }
}
