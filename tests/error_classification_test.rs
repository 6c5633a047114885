//! Table-driven tests for the bridge error taxonomy

use practice_bridge::core::{classify, ErrorCategory, ErrorKind};
use practice_bridge::domain::{AuthError, BridgeError};
use test_case::test_case;

#[test_case(BridgeError::MissingCredentials("t1".into()), ErrorKind::MissingCredentials, ErrorCategory::Configuration, 404 ; "missing credentials")]
#[test_case(BridgeError::IncompleteCredentials(vec!["password"]), ErrorKind::IncompleteCredentials, ErrorCategory::Configuration, 400 ; "incomplete credentials")]
#[test_case(BridgeError::UnsyncedIdentifiers("missing patient id".into()), ErrorKind::UnsyncedIdentifiers, ErrorCategory::Configuration, 400 ; "unsynced identifiers")]
#[test_case(BridgeError::AuthFailure, ErrorKind::AuthFailure, ErrorCategory::Protocol, 401 ; "auth failure")]
#[test_case(BridgeError::MalformedResponse("no Form".into()), ErrorKind::MalformedResponse, ErrorCategory::Protocol, 500 ; "malformed response")]
#[test_case(BridgeError::ExternalFailureFlag("Time slot unavailable".into()), ErrorKind::ExternalFailureFlag, ErrorCategory::External, 500 ; "external failure flag")]
#[test_case(BridgeError::NetworkFailure("connection refused".into()), ErrorKind::NetworkFailure, ErrorCategory::Transport, 502 ; "network failure")]
fn test_classification(error: BridgeError, kind: ErrorKind, category: ErrorCategory, status: u16) {
    let classified = classify(&error);
    assert_eq!(classified.kind, kind);
    assert_eq!(classified.category, category);
    assert_eq!(classified.status, status);
    assert_eq!(classified.retryable, category == ErrorCategory::Transport);
    assert_eq!(classified.message, error.to_string());
}

#[test_case(AuthError::NoAccessToken, ErrorKind::AuthFailure ; "no access token")]
#[test_case(AuthError::NetworkFailure("timeout".into()), ErrorKind::NetworkFailure ; "network")]
#[test_case(AuthError::IncompleteCredentials(vec!["password"]), ErrorKind::IncompleteCredentials ; "blank credentials")]
fn test_auth_errors_map_into_taxonomy(error: AuthError, kind: ErrorKind) {
    assert_eq!(classify(&BridgeError::from(error)).kind, kind);
}

#[test]
fn test_incomplete_credentials_message_names_fields() {
    let classified = classify(&BridgeError::IncompleteCredentials(vec![
        "account",
        "practice_code",
    ]));
    assert!(classified.message.contains("account"));
    assert!(classified.message.contains("practice_code"));
}
