//! Ephemeral portal session
//!
//! A [`SessionHandle`] is created only by a successful login and is threaded
//! explicitly into the single call that follows. It has no `Serialize` impl on
//! purpose: it must never reach durable storage.

use crate::config::{secret_string, SecretString};
use secrecy::ExposeSecret;

/// Access token and session id returned by the login handshake
#[derive(Debug, Clone)]
pub struct SessionHandle {
    access_token: SecretString,
    session_id: SecretString,
}

impl SessionHandle {
    /// Builds a handle, rejecting blank values
    pub fn new(access_token: impl Into<String>, session_id: impl Into<String>) -> Option<Self> {
        let access_token = access_token.into();
        let session_id = session_id.into();
        if access_token.is_empty() || session_id.is_empty() {
            return None;
        }
        Some(Self {
            access_token: secret_string(access_token),
            session_id: secret_string(session_id),
        })
    }

    pub fn access_token(&self) -> &str {
        self.access_token.expose_secret().as_ref()
    }

    pub fn session_id(&self) -> &str {
        self.session_id.expose_secret().as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_handle_requires_both_values() {
        assert!(SessionHandle::new("TOK", "").is_none());
        assert!(SessionHandle::new("", "SESS").is_none());

        let handle = SessionHandle::new("TOK", "SESS").unwrap();
        assert_eq!(handle.access_token(), "TOK");
        assert_eq!(handle.session_id(), "SESS");
    }

    #[test]
    fn test_session_handle_debug_is_redacted() {
        let handle = SessionHandle::new("TOK123", "SESS1").unwrap();
        let debug = format!("{handle:?}");
        assert!(!debug.contains("TOK123"));
        assert!(!debug.contains("SESS1"));
    }
}
