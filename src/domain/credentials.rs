//! Portal credentials and the store that supplies them
//!
//! A [`CredentialContext`] lives for exactly one logical operation: the caller
//! looks it up, hands it to the bridge by value, and it is dropped (and its
//! password zeroized) when the operation returns.

use crate::config::{secret_string, SecretString};
use crate::domain::errors::BridgeError;
use async_trait::async_trait;
use secrecy::ExposeSecret;
use std::collections::HashMap;

/// The three secrets needed to log in to the portal
///
/// `Debug` output redacts the password.
#[derive(Debug, Clone)]
pub struct CredentialContext {
    /// Portal account (user name)
    pub account: String,

    /// Plaintext password; only ever hashed for transmission
    pub password: SecretString,

    /// Tenant identifier selected before the account login
    pub practice_code: String,
}

impl CredentialContext {
    pub fn new(
        account: impl Into<String>,
        password: impl Into<String>,
        practice_code: impl Into<String>,
    ) -> Self {
        Self {
            account: account.into(),
            password: secret_string(password.into()),
            practice_code: practice_code.into(),
        }
    }

    /// Names of the fields that are empty, in declaration order
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.account.trim().is_empty() {
            missing.push("account");
        }
        if self.password.expose_secret().is_empty() {
            missing.push("password");
        }
        if self.practice_code.trim().is_empty() {
            missing.push("practice_code");
        }
        missing
    }

    /// Checks that every field is non-empty
    ///
    /// # Errors
    ///
    /// Returns `BridgeError::IncompleteCredentials` listing the empty fields.
    pub fn validate(&self) -> Result<(), BridgeError> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(BridgeError::IncompleteCredentials(missing))
        }
    }

    /// Turns a store lookup into validated credentials
    ///
    /// Absence and partial presence are reported as different errors so the
    /// caller can tell "never configured" from "configured wrong".
    pub fn require(found: Option<Self>, therapist_id: &str) -> Result<Self, BridgeError> {
        let credentials =
            found.ok_or_else(|| BridgeError::MissingCredentials(therapist_id.to_string()))?;
        credentials.validate()?;
        Ok(credentials)
    }
}

/// Source of per-therapist portal credentials
///
/// Implementations must return a fresh value on every call; the bridge never
/// caches what it receives.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn credentials_for(&self, therapist_id: &str) -> Option<CredentialContext>;
}

/// Credential store backed by a map, typically built from the config file
#[derive(Debug, Default, Clone)]
pub struct InMemoryCredentialStore {
    entries: HashMap<String, CredentialContext>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the credentials for a therapist
    pub fn insert(&mut self, therapist_id: impl Into<String>, credentials: CredentialContext) {
        self.entries.insert(therapist_id.into(), credentials);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn credentials_for(&self, therapist_id: &str) -> Option<CredentialContext> {
        self.entries.get(therapist_id).cloned()
    }
}
