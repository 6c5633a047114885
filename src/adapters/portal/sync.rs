//! Pushing local sessions and notes to the portal
//!
//! Every push runs its own login handshake; no session is reused between
//! calls. The portal's answer must carry a success flag or an assigned
//! identifier, because a 200 response can still wrap an embedded failure.

use super::auth::Authenticator;
use super::client::PortalClient;
use crate::domain::{
    BridgeResult, CredentialContext, LocalNote, LocalSession, SessionHandle, SyncOutcome,
};

/// Writes appointments and note revisions to the portal
#[derive(Clone)]
pub struct SyncBridge {
    client: PortalClient,
    authenticator: Authenticator,
}

impl SyncBridge {
    pub fn new(client: PortalClient) -> Self {
        Self {
            authenticator: Authenticator::new(client.clone()),
            client,
        }
    }

    /// Push a local session as a new portal appointment
    ///
    /// # Errors
    ///
    /// - `IncompleteCredentials` before any network call
    /// - `AuthFailure` / `NetworkFailure` from the handshake
    /// - `ExternalFailureFlag` if the portal answers `success: false`
    /// - `MalformedResponse` if the answer has neither flag nor identifier
    pub async fn sync_session(
        &self,
        session: &LocalSession,
        credentials: &CredentialContext,
    ) -> BridgeResult<SyncOutcome> {
        credentials.validate()?;
        let handle = self.authenticator.login(credentials).await?;
        self.push_session(session, &handle).await
    }

    /// Push a local note as a new portal note revision
    ///
    /// Same failure semantics as [`sync_session`](Self::sync_session).
    pub async fn sync_note(
        &self,
        note: &LocalNote,
        credentials: &CredentialContext,
    ) -> BridgeResult<SyncOutcome> {
        credentials.validate()?;
        let handle = self.authenticator.login(credentials).await?;
        self.push_note(note, &handle).await
    }

    /// Write step of [`sync_session`](Self::sync_session) with an existing handle
    pub async fn push_session(
        &self,
        session: &LocalSession,
        handle: &SessionHandle,
    ) -> BridgeResult<SyncOutcome> {
        let protocol = self.client.protocol();
        let fields = protocol.session_write_form(session);
        let body = self
            .client
            .post_authenticated(protocol.appointment_write_path(), &fields, handle)
            .await?;

        let outcome = protocol.interpret_sync_response(&body)?;
        tracing::info!(
            date = %session.date,
            external_id = outcome.external_appointment_id.as_ref().map(|id| id.as_str()),
            "Session synced to portal"
        );
        Ok(outcome)
    }

    /// Write step of [`sync_note`](Self::sync_note) with an existing handle
    pub async fn push_note(
        &self,
        note: &LocalNote,
        handle: &SessionHandle,
    ) -> BridgeResult<SyncOutcome> {
        let protocol = self.client.protocol();
        let fields = protocol.note_write_form(note);
        let body = self
            .client
            .post_authenticated(protocol.note_write_path(), &fields, handle)
            .await?;

        let outcome = protocol.interpret_sync_response(&body)?;
        tracing::info!(
            note_id = %note.note_id,
            external_id = outcome.external_appointment_id.as_ref().map(|id| id.as_str()),
            "Note synced to portal"
        );
        Ok(outcome)
    }
}
