//! Integration tests for configuration loading and validation
//!
//! Tests that modify environment variables hold ENV_MUTEX.

use practice_bridge::config::{load_config, Environment};
use practice_bridge::domain::{BridgeError, CredentialContext, CredentialStore};
use secrecy::ExposeSecret;
use std::io::Write;
use std::sync::Mutex;
use tempfile::NamedTempFile;

static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn cleanup_env_vars() {
    std::env::remove_var("PRACTICE_BRIDGE_APPLICATION_LOG_LEVEL");
    std::env::remove_var("PRACTICE_BRIDGE_ENVIRONMENT");
    std::env::remove_var("PRACTICE_BRIDGE_PORTAL_BASE_URL");
    std::env::remove_var("PRACTICE_BRIDGE_PORTAL_TIMEOUT_SECONDS");
    std::env::remove_var("PRACTICE_BRIDGE_CREDENTIALS_THERAPIST_1_PASSWORD");
    std::env::remove_var("TEST_PORTAL_PASSWORD");
}

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

const COMPLETE: &str = r#"
environment = "staging"

[application]
log_level = "debug"

[portal]
base_url = "https://portal.example.com"
client_version = "2025.2.0.1"
timeout_seconds = 45
connect_timeout_seconds = 5
tls_verify = true
user_agent = "practice-bridge-test"

[[credentials]]
therapist_id = "therapist-1"
account = "t1@example.com"
password = "secret-one"
practice_code = "X1"

[[credentials]]
therapist_id = "therapist-2"
account = "t2@example.com"

[logging]
local_enabled = false
local_rotation = "hourly"
json = false
"#;

#[test]
fn test_load_complete_config() {
    let _guard = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let file = write_config(COMPLETE);
    let config = load_config(file.path()).unwrap();

    assert_eq!(config.environment, Environment::Staging);
    assert_eq!(config.application.log_level, "debug");
    assert_eq!(config.portal.client_version, "2025.2.0.1");
    assert_eq!(config.portal.timeout_seconds, 45);
    assert_eq!(config.portal.connect_timeout_seconds, 5);
    assert_eq!(config.portal.user_agent, "practice-bridge-test");
    assert_eq!(config.credentials.len(), 2);
    assert_eq!(config.logging.local_rotation, "hourly");
    assert!(!config.logging.json);
}

#[tokio::test]
async fn test_config_backed_store_classifies_entries() {
    let config = {
        let _guard = ENV_MUTEX.lock().unwrap();
        cleanup_env_vars();
        let file = write_config(COMPLETE);
        load_config(file.path()).unwrap()
    };
    let store = config.credential_store();

    let complete = store.credentials_for("therapist-1").await;
    assert!(CredentialContext::require(complete, "therapist-1").is_ok());

    let partial = store.credentials_for("therapist-2").await;
    assert_eq!(
        CredentialContext::require(partial, "therapist-2").unwrap_err(),
        BridgeError::IncompleteCredentials(vec!["password", "practice_code"])
    );

    let absent = store.credentials_for("therapist-3").await;
    assert_eq!(
        CredentialContext::require(absent, "therapist-3").unwrap_err(),
        BridgeError::MissingCredentials("therapist-3".into())
    );
}

#[test]
fn test_env_substitution_and_overrides() {
    let _guard = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    std::env::set_var("TEST_PORTAL_PASSWORD", "from-substitution");
    std::env::set_var("PRACTICE_BRIDGE_PORTAL_TIMEOUT_SECONDS", "12");
    std::env::set_var("PRACTICE_BRIDGE_APPLICATION_LOG_LEVEL", "warn");

    let file = write_config(
        r#"
[portal]
base_url = "https://portal.example.com"

[[credentials]]
therapist_id = "therapist-1"
account = "t1@example.com"
password = "${TEST_PORTAL_PASSWORD}"
practice_code = "X1"
"#,
    );
    let config = load_config(file.path()).unwrap();
    assert_eq!(config.portal.timeout_seconds, 12);
    assert_eq!(config.application.log_level, "warn");
    assert_eq!(
        config.credentials[0]
            .password
            .as_ref()
            .unwrap()
            .expose_secret()
            .as_ref(),
        "from-substitution"
    );

    std::env::set_var(
        "PRACTICE_BRIDGE_CREDENTIALS_THERAPIST_1_PASSWORD",
        "from-override",
    );
    let config = load_config(file.path()).unwrap();
    assert_eq!(
        config.credentials[0]
            .password
            .as_ref()
            .unwrap()
            .expose_secret()
            .as_ref(),
        "from-override"
    );

    cleanup_env_vars();
}

#[test]
fn test_missing_substitution_variable_fails() {
    let _guard = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let file = write_config(
        r#"
[portal]
base_url = "https://portal.example.com"

[[credentials]]
therapist_id = "therapist-1"
password = "${TEST_PORTAL_PASSWORD}"
"#,
    );
    let err = load_config(file.path()).unwrap_err();
    assert!(err.to_string().contains("TEST_PORTAL_PASSWORD"));
}

#[test]
fn test_production_rejects_disabled_tls() {
    let _guard = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let file = write_config(
        r#"
environment = "production"

[portal]
base_url = "https://portal.example.com"
tls_verify = false
"#,
    );
    let err = load_config(file.path()).unwrap_err();
    assert!(err
        .to_string()
        .contains("TLS certificate verification cannot be disabled in production"));
}

#[test]
fn test_duplicate_therapist_rejected() {
    let _guard = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let file = write_config(
        r#"
[portal]
base_url = "https://portal.example.com"

[[credentials]]
therapist_id = "therapist-1"

[[credentials]]
therapist_id = "therapist-1"
"#,
    );
    assert!(load_config(file.path()).is_err());
}

#[test]
fn test_missing_portal_section_fails() {
    let _guard = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let file = write_config("[application]\nlog_level = \"info\"\n");
    let err = load_config(file.path()).unwrap_err();
    assert!(err.to_string().contains("Failed to parse TOML"));
}
