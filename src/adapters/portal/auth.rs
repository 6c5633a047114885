//! Two-step portal login handshake
//!
//! 1. **Practice selection**: post the practice code with a fresh correlation id
//!    and capture every cookie the portal sets.
//! 2. **Credential submission**: replay baseline + step-1 cookies, post the
//!    account and the SHA-512 password digest with a second correlation id.
//!
//! The portal signals a failed login by omission: if no access-token cookie
//! comes back from step 2 the handshake failed, whatever the HTTP status.

use super::client::PortalClient;
use super::cookies::CookieJar;
use crate::domain::{AuthError, CredentialContext, SessionHandle};
use base64::{engine::general_purpose, Engine as _};
use sha2::{Digest, Sha512};
use uuid::Uuid;

/// SHA-512 digest of the UTF-8 password, upper-case hex (128 characters)
pub fn hash_password(password: &str) -> String {
    let digest = Sha512::digest(password.as_bytes());
    format!("{digest:X}")
}

/// Base64 echo of the practice code sent alongside the account name
pub fn encode_practice_code(practice_code: &str) -> String {
    general_purpose::STANDARD.encode(practice_code.as_bytes())
}

/// Fresh correlation id; one per request, never reused
pub fn new_correlation_id() -> String {
    Uuid::new_v4().to_string()
}

/// Record of a completed handshake
///
/// Returned by [`Authenticator::handshake`] so callers and tests can inspect
/// what was exchanged without seeing any secret.
#[derive(Debug)]
pub struct Handshake {
    pub session: SessionHandle,
    /// Correlation ids used by step 1 and step 2, in that order
    pub correlation_ids: [String; 2],
    /// Names of the cookies replayed in step 2
    pub step_two_cookie_names: Vec<String>,
}

/// Runs the login handshake against one portal
#[derive(Clone)]
pub struct Authenticator {
    client: PortalClient,
}

impl Authenticator {
    pub fn new(client: PortalClient) -> Self {
        Self { client }
    }

    /// Log in and return a session for exactly one follow-up operation
    ///
    /// # Errors
    ///
    /// - `AuthError::IncompleteCredentials` if any field is blank; no request
    ///   is made
    /// - `AuthError::NetworkFailure` if either step fails at transport level
    /// - `AuthError::NoAccessToken` if step 2 yields no access token or no
    ///   session id
    pub async fn login(&self, credentials: &CredentialContext) -> Result<SessionHandle, AuthError> {
        self.handshake(credentials).await.map(|h| h.session)
    }

    /// Same as [`login`](Self::login) but keeps the handshake record
    pub async fn handshake(&self, credentials: &CredentialContext) -> Result<Handshake, AuthError> {
        let missing = credentials.missing_fields();
        if !missing.is_empty() {
            tracing::warn!(missing = ?missing, "Refusing to log in with incomplete credentials");
            return Err(AuthError::IncompleteCredentials(missing));
        }

        let protocol = self.client.protocol();
        let baseline = protocol.baseline_cookies();

        // Step 1: practice selection
        let step_one_id = new_correlation_id();
        let fields = protocol.practice_selection_form(&credentials.practice_code, &step_one_id);
        let response = self
            .client
            .post_handshake_form(protocol.practice_selection_path(), &fields, &baseline)
            .await
            .map_err(|e| {
                tracing::warn!(step = 1, correlation_id = %step_one_id, error = %e, "Practice selection request failed");
                AuthError::NetworkFailure(e.to_string())
            })?;

        let mut step_one_cookies = CookieJar::new();
        let captured = step_one_cookies.absorb_set_cookie_headers(response.headers());
        tracing::debug!(
            step = 1,
            correlation_id = %step_one_id,
            status = response.status().as_u16(),
            cookie_count = captured,
            "Practice selection completed"
        );

        // Step 2: credential submission
        let mut replayed = baseline;
        replayed.merge(&step_one_cookies);

        let step_two_id = new_correlation_id();
        let fields = protocol.credential_submission_form(credentials, &step_two_id);
        let response = self
            .client
            .post_handshake_form(protocol.credential_submission_path(), &fields, &replayed)
            .await
            .map_err(|e| {
                tracing::warn!(step = 2, correlation_id = %step_two_id, error = %e, "Credential submission request failed");
                AuthError::NetworkFailure(e.to_string())
            })?;

        let mut step_two_cookies = CookieJar::new();
        let captured = step_two_cookies.absorb_set_cookie_headers(response.headers());
        tracing::debug!(
            step = 2,
            correlation_id = %step_two_id,
            status = response.status().as_u16(),
            cookie_count = captured,
            "Credential submission completed"
        );

        let Some(access_token) =
            step_two_cookies.find_value(|name| protocol.is_access_token_cookie(name))
        else {
            tracing::warn!(
                account = %credentials.account,
                "Portal login returned no access-token cookie"
            );
            return Err(AuthError::NoAccessToken);
        };

        // The session id may have been issued during step 1
        let session_id = step_two_cookies
            .find_value(|name| protocol.is_session_id_cookie(name))
            .or_else(|| replayed.find_value(|name| protocol.is_session_id_cookie(name)));
        let Some(session_id) = session_id else {
            tracing::warn!(
                account = %credentials.account,
                "Portal login returned an access token but no session id"
            );
            return Err(AuthError::NoAccessToken);
        };

        let session =
            SessionHandle::new(access_token, session_id).ok_or(AuthError::NoAccessToken)?;

        tracing::info!(account = %credentials.account, "Portal login succeeded");

        Ok(Handshake {
            session,
            correlation_ids: [step_one_id, step_two_id],
            step_two_cookie_names: replayed.names().map(str::to_string).collect(),
        })
    }
}
