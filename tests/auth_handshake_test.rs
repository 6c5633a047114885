//! Integration tests for the two-step portal login handshake

mod common;

use common::*;
use mockito::Matcher;
use practice_bridge::adapters::portal::{Authenticator, PortalClient};
use practice_bridge::config::PortalConfig;
use practice_bridge::domain::{AuthError, BridgeError, CredentialContext};
use std::collections::HashSet;

#[tokio::test]
async fn test_login_returns_session_from_step_two_cookies() {
    let mut server = mockito::Server::new_async().await;
    let (step_one, step_two) = mock_successful_login(&mut server).await;

    let authenticator = Authenticator::new(client_for(&server));
    let session = authenticator.login(&credentials()).await.unwrap();

    assert_eq!(session.access_token(), "TOK123");
    assert_eq!(session.session_id(), "SESS1");
    step_one.assert_async().await;
    step_two.assert_async().await;
}

#[tokio::test]
async fn test_step_one_sends_baseline_cookies_and_correlation_id() {
    let mut server = mockito::Server::new_async().await;
    let step_one = server
        .mock("POST", PRACTICE_SELECTION)
        .match_header(
            "cookie",
            Matcher::AllOf(vec![
                Matcher::Regex("cookiecheck=true".into()),
                Matcher::Regex("timezone-offset=0".into()),
            ]),
        )
        .match_header("referer", Matcher::Regex("/app/login/$".into()))
        .match_body(Matcher::Regex(
            "correlationid=[0-9a-f]{8}-[0-9a-f]{4}-4[0-9a-f]{3}-".into(),
        ))
        .with_status(200)
        .create_async()
        .await;
    server
        .mock("POST", CREDENTIAL_SUBMISSION)
        .with_status(200)
        .with_header("set-cookie", "access-token=T")
        .with_header("set-cookie", "ASP.NET_SessionId=S")
        .create_async()
        .await;

    let authenticator = Authenticator::new(client_for(&server));
    assert!(authenticator.login(&credentials()).await.is_ok());
    step_one.assert_async().await;
}

#[tokio::test]
async fn test_missing_access_token_is_auth_failure() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", PRACTICE_SELECTION)
        .with_status(200)
        .with_header("set-cookie", "s1=abc")
        .create_async()
        .await;
    server
        .mock("POST", CREDENTIAL_SUBMISSION)
        .with_status(200)
        .with_header("set-cookie", "ASP.NET_SessionId=SESS1")
        .with_body("<html>Invalid username or password</html>")
        .create_async()
        .await;

    let authenticator = Authenticator::new(client_for(&server));
    let err = authenticator.login(&credentials()).await.unwrap_err();
    assert_eq!(err, AuthError::NoAccessToken);
}

#[tokio::test]
async fn test_access_token_from_step_one_is_not_accepted() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", PRACTICE_SELECTION)
        .with_status(200)
        .with_header("set-cookie", "access-token=EARLY")
        .with_header("set-cookie", "ASP.NET_SessionId=SESS1")
        .create_async()
        .await;
    server
        .mock("POST", CREDENTIAL_SUBMISSION)
        .with_status(200)
        .create_async()
        .await;

    let authenticator = Authenticator::new(client_for(&server));
    let err = authenticator.login(&credentials()).await.unwrap_err();
    assert_eq!(err, AuthError::NoAccessToken);
}

#[tokio::test]
async fn test_session_id_issued_in_step_one_is_used() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", PRACTICE_SELECTION)
        .with_status(200)
        .with_header("set-cookie", "ASP.NET_SessionId=EARLY-SESSION; path=/")
        .create_async()
        .await;
    server
        .mock("POST", CREDENTIAL_SUBMISSION)
        .match_header("cookie", Matcher::Regex("ASP.NET_SessionId=EARLY-SESSION".into()))
        .with_status(200)
        .with_header("set-cookie", "access-token=TOK123")
        .create_async()
        .await;

    let authenticator = Authenticator::new(client_for(&server));
    let session = authenticator.login(&credentials()).await.unwrap();
    assert_eq!(session.access_token(), "TOK123");
    assert_eq!(session.session_id(), "EARLY-SESSION");
}

#[tokio::test]
async fn test_step_two_replays_each_cookie_name_once() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", PRACTICE_SELECTION)
        .with_status(200)
        .with_header("set-cookie", "cookiecheck=confirmed")
        .with_header("set-cookie", "s1=abc")
        .create_async()
        .await;
    let step_two = server
        .mock("POST", CREDENTIAL_SUBMISSION)
        .match_header("cookie", Matcher::Regex("cookiecheck=confirmed".into()))
        .with_status(200)
        .with_header("set-cookie", "access-token=TOK123")
        .with_header("set-cookie", "ASP.NET_SessionId=SESS1")
        .create_async()
        .await;

    let authenticator = Authenticator::new(client_for(&server));
    let handshake = authenticator.handshake(&credentials()).await.unwrap();

    let names = &handshake.step_two_cookie_names;
    let unique: HashSet<&String> = names.iter().collect();
    assert_eq!(unique.len(), names.len());
    assert!(names.iter().any(|n| n == "cookiecheck"));
    assert!(names.iter().any(|n| n == "timezone-offset"));
    assert!(names.iter().any(|n| n == "s1"));
    step_two.assert_async().await;
}

#[tokio::test]
async fn test_correlation_ids_are_fresh_per_request() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", PRACTICE_SELECTION)
        .with_status(200)
        .expect(2)
        .create_async()
        .await;
    server
        .mock("POST", CREDENTIAL_SUBMISSION)
        .with_status(200)
        .with_header("set-cookie", "access-token=TOK123")
        .with_header("set-cookie", "ASP.NET_SessionId=SESS1")
        .expect(2)
        .create_async()
        .await;

    let authenticator = Authenticator::new(client_for(&server));
    let first = authenticator.handshake(&credentials()).await.unwrap();
    let second = authenticator.handshake(&credentials()).await.unwrap();

    let ids: HashSet<String> = first
        .correlation_ids
        .iter()
        .chain(second.correlation_ids.iter())
        .cloned()
        .collect();
    assert_eq!(ids.len(), 4);
}

#[tokio::test]
async fn test_unreachable_portal_is_network_failure() {
    let config = PortalConfig {
        base_url: "http://127.0.0.1:1".to_string(),
        connect_timeout_seconds: 2,
        ..Default::default()
    };
    let authenticator = Authenticator::new(PortalClient::new(&config).unwrap());

    let err = authenticator.login(&credentials()).await.unwrap_err();
    assert!(matches!(err, AuthError::NetworkFailure(_)));
}

#[tokio::test]
async fn test_password_is_never_sent_in_plaintext() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", PRACTICE_SELECTION)
        .with_status(200)
        .create_async()
        .await;
    let plaintext = server
        .mock("POST", CREDENTIAL_SUBMISSION)
        .match_body(Matcher::UrlEncoded("password".into(), "p".into()))
        .expect(0)
        .create_async()
        .await;
    server
        .mock("POST", CREDENTIAL_SUBMISSION)
        .with_status(200)
        .with_header("set-cookie", "access-token=TOK123")
        .with_header("set-cookie", "ASP.NET_SessionId=SESS1")
        .create_async()
        .await;

    let authenticator = Authenticator::new(client_for(&server));
    authenticator.login(&credentials()).await.unwrap();
    plaintext.assert_async().await;
}

#[tokio::test]
async fn test_blank_credentials_never_reach_the_portal() {
    let mut server = mockito::Server::new_async().await;
    let any = server
        .mock("POST", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let authenticator = Authenticator::new(client_for(&server));
    let err = authenticator
        .login(&CredentialContext::new("", "", ""))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        AuthError::IncompleteCredentials(vec!["account", "password", "practice_code"])
    );
    assert_eq!(
        BridgeError::from(err),
        BridgeError::IncompleteCredentials(vec!["account", "password", "practice_code"])
    );
    any.assert_async().await;
}
