//! Note retrieval from the portal

use super::client::PortalClient;
use crate::domain::{BridgeResult, ExternalIdentifierPair, NoteFragment, SessionHandle};

/// Fetches clinical notes for an already-authenticated session
#[derive(Clone)]
pub struct NoteBridge {
    client: PortalClient,
}

impl NoteBridge {
    pub fn new(client: PortalClient) -> Self {
        Self { client }
    }

    /// Fetch the note attached to a synced calendar entry
    ///
    /// Sends one authenticated request and parses the portal's form payload.
    /// Diagnosis and objective form elements that are absent yield empty lists.
    ///
    /// # Errors
    ///
    /// - `MalformedResponse` if the body is not JSON or has no `Form` wrapper
    /// - `AuthFailure` if the portal rejects the session
    /// - `ExternalFailureFlag` for other non-success statuses
    /// - `NetworkFailure` on transport failure or timeout
    pub async fn fetch_note(
        &self,
        identifiers: &ExternalIdentifierPair,
        session: &SessionHandle,
    ) -> BridgeResult<NoteFragment> {
        let protocol = self.client.protocol();
        let fields = protocol.note_fetch_form(identifiers)?;

        let body = self
            .client
            .post_authenticated(protocol.note_fetch_path(), &fields, session)
            .await?;

        let fragment = protocol.parse_note(&body)?;
        tracing::debug!(
            diagnoses = fragment.diagnoses.len(),
            objectives = fragment.objectives.len(),
            "Parsed portal note"
        );
        Ok(fragment)
    }
}
