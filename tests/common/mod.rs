//! Shared helpers for portal integration tests

#![allow(dead_code)]

use mockito::{Matcher, Mock, ServerGuard};
use practice_bridge::adapters::portal::{hash_password, PortalClient};
use practice_bridge::config::PortalConfig;
use practice_bridge::domain::CredentialContext;

pub const PRACTICE_SELECTION: &str = "/app/identity/practicecode";
pub const CREDENTIAL_SUBMISSION: &str = "/app/identity/login";
pub const NOTE_FETCH: &str = "/app/notes/api/getnote";
pub const APPOINTMENT_WRITE: &str = "/app/scheduling/api/saveappointment";
pub const NOTE_WRITE: &str = "/app/notes/api/savenote";

pub fn credentials() -> CredentialContext {
    CredentialContext::new("a", "p", "X1")
}

pub fn client_for(server: &ServerGuard) -> PortalClient {
    let config = PortalConfig {
        base_url: server.url(),
        ..Default::default()
    };
    PortalClient::new(&config).unwrap()
}

/// Step 1 sets `s1=abc`; step 2 sets `access-token=TOK123` and `ASP.NET_SessionId=SESS1`
pub async fn mock_successful_login(server: &mut ServerGuard) -> (Mock, Mock) {
    let step_one = server
        .mock("POST", PRACTICE_SELECTION)
        .match_body(Matcher::UrlEncoded("practicecode".into(), "X1".into()))
        .with_status(200)
        .with_header("set-cookie", "s1=abc; path=/; HttpOnly")
        .create_async()
        .await;

    let step_two = server
        .mock("POST", CREDENTIAL_SUBMISSION)
        .match_header("cookie", Matcher::Regex("s1=abc".into()))
        .match_body(Matcher::AllOf(vec![
            Matcher::UrlEncoded("username".into(), "a".into()),
            Matcher::UrlEncoded("password".into(), hash_password("p")),
            Matcher::UrlEncoded("e-username".into(), "WDE=".into()),
        ]))
        .with_status(302)
        .with_header("location", "/app/home")
        .with_header("set-cookie", "access-token=TOK123; path=/; secure")
        .with_header("set-cookie", "ASP.NET_SessionId=SESS1; path=/")
        .create_async()
        .await;

    (step_one, step_two)
}

/// Matches a request that carries the session from [`mock_successful_login`]
pub fn session_cookies() -> Matcher {
    Matcher::AllOf(vec![
        Matcher::Regex("access-token=TOK123".into()),
        Matcher::Regex("ASP.NET_SessionId=SESS1".into()),
    ])
}
