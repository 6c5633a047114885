//! Portal HTTP client factory
//!
//! Builds the HTTP client every bridge shares and provides the two request
//! shapes the portal understands: anonymous handshake posts and authenticated
//! AJAX posts. Redirects are never followed and the client keeps no cookie
//! store; cookies are replayed explicitly from a [`CookieJar`].

use super::cookies::CookieJar;
use super::protocol::{FormFields, PortalProtocol, PortalProtocolV1};
use crate::config::PortalConfig;
use crate::domain::{AppError, BridgeError, BridgeResult, Result, SessionHandle};
use reqwest::header::{COOKIE, REFERER, USER_AGENT};
use reqwest::{redirect, Client, ClientBuilder, Response, StatusCode};
use std::sync::Arc;
use std::time::Duration;

/// Handle to one portal deployment
///
/// Cloning is cheap. The client carries no session state, so concurrent
/// operations for different therapists can share it.
#[derive(Clone)]
pub struct PortalClient {
    base_url: String,
    http: Client,
    protocol: Arc<dyn PortalProtocol>,
    user_agent: String,
}

impl PortalClient {
    /// Create a client from configuration using the V1 protocol mapping
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the HTTP client cannot be built.
    pub fn new(config: &PortalConfig) -> Result<Self> {
        let protocol = Arc::new(PortalProtocolV1::new(config.client_version.clone()));
        Self::with_protocol(config, protocol)
    }

    /// Create a client with an explicit protocol implementation
    pub fn with_protocol(config: &PortalConfig, protocol: Arc<dyn PortalProtocol>) -> Result<Self> {
        let mut builder = ClientBuilder::new()
            .redirect(redirect::Policy::none())
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds));

        if !config.tls_verify {
            tracing::warn!(
                base_url = %config.base_url,
                "TLS certificate verification is DISABLED for the portal; use only against test servers"
            );
            builder = builder.danger_accept_invalid_certs(true);
        }

        let http = builder.build().map_err(|e| {
            AppError::Configuration(format!("Failed to build portal HTTP client: {e}"))
        })?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http,
            protocol,
            user_agent: config.user_agent.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn protocol(&self) -> &dyn PortalProtocol {
        self.protocol.as_ref()
    }

    /// Absolute URL for a protocol path
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Posts a handshake form with explicit cookies and the login page as referer
    pub(crate) async fn post_handshake_form(
        &self,
        path: &str,
        fields: &FormFields,
        cookies: &CookieJar,
    ) -> std::result::Result<Response, reqwest::Error> {
        let mut request = self
            .http
            .post(self.url(path))
            .header(USER_AGENT, &self.user_agent)
            .header(REFERER, self.url(self.protocol.login_page_path()))
            .form(fields);

        if !cookies.is_empty() {
            request = request.header(COOKIE, cookies.header_value());
        }

        request.send().await
    }

    /// Posts an AJAX form carrying the session cookies and returns the body
    ///
    /// # Errors
    ///
    /// - `NetworkFailure` if the request or body read fails
    /// - `AuthFailure` if the portal rejects the session (401/403) or
    ///   redirects, which it does when a session has expired
    /// - `ExternalFailureFlag` for any other non-success status
    pub(crate) async fn post_authenticated(
        &self,
        path: &str,
        fields: &FormFields,
        session: &SessionHandle,
    ) -> BridgeResult<String> {
        let mut cookies = self.protocol.baseline_cookies();
        cookies.insert(
            self.protocol.access_token_cookie_name(),
            session.access_token(),
        );
        cookies.insert(self.protocol.session_id_cookie_name(), session.session_id());

        let response = self
            .http
            .post(self.url(path))
            .header(USER_AGENT, &self.user_agent)
            .header(COOKIE, cookies.header_value())
            .header("X-Requested-With", "XMLHttpRequest")
            .form(fields)
            .send()
            .await
            .map_err(BridgeError::transport)?;

        read_body(response).await
    }
}

/// Reads a response body, classifying the HTTP status first
async fn read_body(response: Response) -> BridgeResult<String> {
    let status = response.status();
    tracing::debug!(status = status.as_u16(), "Portal responded");

    match status {
        s if s.is_success() => response.text().await.map_err(BridgeError::transport),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(BridgeError::AuthFailure),
        // Redirects are not followed; an expired session is bounced to the login page
        s if s.is_redirection() => Err(BridgeError::AuthFailure),
        s => Err(BridgeError::ExternalFailureFlag(format!(
            "portal returned HTTP {}",
            s.as_u16()
        ))),
    }
}
