//! Therapist-facing facade over the portal bridges
//!
//! [`PracticeBridge`] resolves a therapist's credentials from a
//! [`CredentialStore`], runs one fresh login per operation, and walks each
//! operation through [`OperationState`]. Credentials are looked up per call and
//! dropped when the call returns; nothing is cached between operations.

use super::classify::classify;
use super::operation::{OperationState, OperationTracker};
use crate::adapters::portal::{Authenticator, NoteBridge, PortalClient, SyncBridge};
use crate::config::BridgeConfig;
use crate::domain::{
    BridgeError, BridgeResult, CredentialContext, CredentialStore, ExternalIdentifierPair,
    LocalNote, LocalSession, NoteFragment, Result, SessionHandle, SyncOutcome,
};
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

/// Entry point for therapist-scoped portal operations
#[derive(Clone)]
pub struct PracticeBridge {
    authenticator: Authenticator,
    notes: NoteBridge,
    sync: SyncBridge,
    store: Arc<dyn CredentialStore>,
}

impl PracticeBridge {
    pub fn new(client: PortalClient, store: Arc<dyn CredentialStore>) -> Self {
        Self {
            authenticator: Authenticator::new(client.clone()),
            notes: NoteBridge::new(client.clone()),
            sync: SyncBridge::new(client),
            store,
        }
    }

    /// Builds the portal client and a config-backed credential store
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the HTTP client cannot be built.
    pub fn from_config(config: &BridgeConfig) -> Result<Self> {
        let client = PortalClient::new(&config.portal)?;
        Ok(Self::new(client, Arc::new(config.credential_store())))
    }

    /// Logs in and discards the session
    ///
    /// Used to check a therapist's stored credentials without touching data.
    pub async fn check_login_for(&self, therapist_id: &str) -> BridgeResult<()> {
        let credentials = self.resolve("check_login", therapist_id).await?;
        self.run("check_login", therapist_id, credentials, |_session| async {
            Ok(())
        })
        .await
    }

    /// Fetches the portal note for a linked calendar entry
    ///
    /// Either identifier may be absent; that is reported as
    /// `UnsyncedIdentifiers` before any network call.
    pub async fn fetch_note_for(
        &self,
        therapist_id: &str,
        calendar_entry_id: Option<String>,
        patient_id: Option<String>,
    ) -> BridgeResult<NoteFragment> {
        let credentials = self.resolve("fetch_note", therapist_id).await?;
        let pair = ExternalIdentifierPair::from_parts(calendar_entry_id, patient_id)
            .map_err(|e| self.fail_early("fetch_note", e))?;

        let notes = &self.notes;
        self.run("fetch_note", therapist_id, credentials, |session| async move {
            notes.fetch_note(&pair, &session).await
        })
        .await
    }

    /// Pushes a local session to the portal as a new appointment
    pub async fn sync_session_for(
        &self,
        therapist_id: &str,
        session: &LocalSession,
    ) -> BridgeResult<SyncOutcome> {
        let credentials = self.resolve("sync_session", therapist_id).await?;
        let sync = &self.sync;
        self.run("sync_session", therapist_id, credentials, |handle| async move {
            sync.push_session(session, &handle).await
        })
        .await
    }

    /// Pushes a local note to the portal
    pub async fn sync_note_for(
        &self,
        therapist_id: &str,
        note: &LocalNote,
    ) -> BridgeResult<SyncOutcome> {
        let credentials = self.resolve("sync_note", therapist_id).await?;
        let sync = &self.sync;
        self.run("sync_note", therapist_id, credentials, |handle| async move {
            sync.push_note(note, &handle).await
        })
        .await
    }

    async fn resolve(
        &self,
        operation: &'static str,
        therapist_id: &str,
    ) -> BridgeResult<CredentialContext> {
        let found = self.store.credentials_for(therapist_id).await;
        CredentialContext::require(found, therapist_id).map_err(|e| self.fail_early(operation, e))
    }

    fn fail_early(&self, operation: &'static str, error: BridgeError) -> BridgeError {
        crate::log_classified_error!(&classify(&error), operation);
        error
    }

    async fn run<T, F, Fut>(
        &self,
        operation: &'static str,
        therapist_id: &str,
        credentials: CredentialContext,
        op: F,
    ) -> BridgeResult<T>
    where
        F: FnOnce(SessionHandle) -> Fut,
        Fut: Future<Output = BridgeResult<T>>,
    {
        let started = Instant::now();
        let mut tracker = OperationTracker::new(operation);
        crate::log_operation_start!(operation, therapist_id);

        tracker.advance(OperationState::Authenticating);
        let login = self.authenticator.login(&credentials).await;
        drop(credentials);

        let session = match login {
            Ok(session) => session,
            Err(e) => {
                tracker.advance(OperationState::AuthFailed);
                let error = BridgeError::from(e);
                crate::log_classified_error!(&classify(&error), operation);
                return Err(error);
            }
        };
        tracker.advance(OperationState::Authenticated);

        tracker.advance(OperationState::Operating);
        match op(session).await {
            Ok(value) => {
                tracker.advance(OperationState::Succeeded);
                crate::log_operation_complete!(operation, started.elapsed());
                Ok(value)
            }
            Err(error) => {
                tracker.advance(OperationState::Failed);
                crate::log_classified_error!(&classify(&error), operation);
                Err(error)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PortalConfig;
    use crate::domain::InMemoryCredentialStore;

    fn bridge_with(store: InMemoryCredentialStore) -> PracticeBridge {
        // Nothing listens here; these tests must fail before any request.
        let config = PortalConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            ..Default::default()
        };
        PracticeBridge::new(PortalClient::new(&config).unwrap(), Arc::new(store))
    }

    #[tokio::test]
    async fn test_unknown_therapist_is_missing_credentials() {
        let bridge = bridge_with(InMemoryCredentialStore::new());
        let err = bridge.check_login_for("nobody").await.unwrap_err();
        assert_eq!(err, BridgeError::MissingCredentials("nobody".into()));
    }

    #[tokio::test]
    async fn test_partial_credentials_fail_before_network() {
        let mut store = InMemoryCredentialStore::new();
        store.insert("t1", CredentialContext::new("a", "", "X1"));
        let bridge = bridge_with(store);

        let err = bridge
            .fetch_note_for("t1", Some("c".into()), Some("p".into()))
            .await
            .unwrap_err();
        assert_eq!(err, BridgeError::IncompleteCredentials(vec!["password"]));
    }

    #[tokio::test]
    async fn test_unlinked_note_fails_before_network() {
        let mut store = InMemoryCredentialStore::new();
        store.insert("t1", CredentialContext::new("a", "p", "X1"));
        let bridge = bridge_with(store);

        let err = bridge
            .fetch_note_for("t1", Some("enc-cal".into()), None)
            .await
            .unwrap_err();
        assert!(matches!(err, BridgeError::UnsyncedIdentifiers(_)));
    }
}
