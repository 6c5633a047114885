//! Versioned portal protocol adapter
//!
//! The portal has no public API. Everything known about its login handshake,
//! AJAX endpoints and payload shapes is reverse-engineered and pinned to one
//! client version. [`PortalProtocol`] confines those details to a single type so
//! a change on the portal side means a new implementation, not edits scattered
//! through the bridges.

use super::auth::{encode_practice_code, hash_password};
use super::cookies::CookieJar;
use crate::domain::ids::ExternalAppointmentId;
use crate::domain::{
    BridgeError, BridgeResult, CredentialContext, Diagnosis, ExternalIdentifierPair, LocalNote,
    LocalSession, NoteFragment, SyncOutcome,
};
use secrecy::ExposeSecret;
use serde::Serialize;
use serde_json::{Map, Value};

/// Form fields in submission order
pub type FormFields = Vec<(&'static str, String)>;

/// Client version string the V1 mapping was captured against
pub const DEFAULT_CLIENT_VERSION: &str = "2024.11.3.1";

/// Form element carrying the note's diagnosis list
pub const DIAGNOSES_FORM_ELEMENT_ID: i64 = 13009;

/// Form element carrying the note's objective / progress entries
pub const OBJECTIVES_FORM_ELEMENT_ID: i64 = 13010;

/// Wire mapping between bridge types and one version of the portal
///
/// Implementations are pure: they build request fields and interpret response
/// bodies but never perform I/O.
pub trait PortalProtocol: Send + Sync {
    /// Pinned client version string
    fn client_version(&self) -> &str;

    /// Page sent as `Referer` during the handshake
    fn login_page_path(&self) -> &str;

    /// Step 1 endpoint (practice selection)
    fn practice_selection_path(&self) -> &str;

    /// Step 2 endpoint (credential submission)
    fn credential_submission_path(&self) -> &str;

    fn note_fetch_path(&self) -> &str;

    fn appointment_write_path(&self) -> &str;

    fn note_write_path(&self) -> &str;

    /// Static cookies every handshake starts from
    fn baseline_cookies(&self) -> CookieJar;

    fn is_access_token_cookie(&self, name: &str) -> bool;

    fn is_session_id_cookie(&self, name: &str) -> bool;

    /// Cookie name under which the access token is replayed on later calls
    fn access_token_cookie_name(&self) -> &str;

    /// Cookie name under which the session id is replayed on later calls
    fn session_id_cookie_name(&self) -> &str;

    fn practice_selection_form(&self, practice_code: &str, correlation_id: &str) -> FormFields;

    fn credential_submission_form(
        &self,
        credentials: &CredentialContext,
        correlation_id: &str,
    ) -> FormFields;

    fn note_fetch_form(&self, identifiers: &ExternalIdentifierPair) -> BridgeResult<FormFields>;

    fn session_write_form(&self, session: &LocalSession) -> FormFields;

    fn note_write_form(&self, note: &LocalNote) -> FormFields;

    /// Extracts a note fragment from a note-fetch response body
    fn parse_note(&self, body: &str) -> BridgeResult<NoteFragment>;

    /// Interprets a write response body as success or classified failure
    fn interpret_sync_response(&self, body: &str) -> BridgeResult<SyncOutcome>;
}

/// First known version of the portal protocol
#[derive(Debug, Clone)]
pub struct PortalProtocolV1 {
    client_version: String,
}

impl PortalProtocolV1 {
    pub fn new(client_version: impl Into<String>) -> Self {
        Self {
            client_version: client_version.into(),
        }
    }
}

impl Default for PortalProtocolV1 {
    fn default() -> Self {
        Self::new(DEFAULT_CLIENT_VERSION)
    }
}

/// Note lookup key the portal expects JSON-encoded inside a form field
///
/// Field order and explicit nulls are part of the contract.
#[derive(Serialize)]
struct EncryptedNoteValues<'a> {
    #[serde(rename = "NoteId")]
    note_id: Option<&'a str>,
    #[serde(rename = "NoteRevision")]
    note_revision: Option<&'a str>,
    #[serde(rename = "CalendarEntryId")]
    calendar_entry_id: &'a str,
    #[serde(rename = "PatientId")]
    patient_id: &'a str,
    #[serde(rename = "CustomFormId")]
    custom_form_id: Option<&'a str>,
}

impl PortalProtocol for PortalProtocolV1 {
    fn client_version(&self) -> &str {
        &self.client_version
    }

    fn login_page_path(&self) -> &str {
        "/app/login/"
    }

    fn practice_selection_path(&self) -> &str {
        "/app/identity/practicecode"
    }

    fn credential_submission_path(&self) -> &str {
        "/app/identity/login"
    }

    fn note_fetch_path(&self) -> &str {
        "/app/notes/api/getnote"
    }

    fn appointment_write_path(&self) -> &str {
        "/app/scheduling/api/saveappointment"
    }

    fn note_write_path(&self) -> &str {
        "/app/notes/api/savenote"
    }

    fn baseline_cookies(&self) -> CookieJar {
        CookieJar::from_pairs([("cookiecheck", "true"), ("timezone-offset", "0")])
    }

    fn is_access_token_cookie(&self, name: &str) -> bool {
        name.to_ascii_lowercase().contains("access-token")
    }

    fn is_session_id_cookie(&self, name: &str) -> bool {
        name.to_ascii_lowercase().contains("sessionid")
    }

    fn access_token_cookie_name(&self) -> &str {
        "access-token"
    }

    fn session_id_cookie_name(&self) -> &str {
        "ASP.NET_SessionId"
    }

    fn practice_selection_form(&self, practice_code: &str, correlation_id: &str) -> FormFields {
        vec![
            ("practicecode", practice_code.to_string()),
            ("docookiecheck", "true".to_string()),
            ("correlationid", correlation_id.to_string()),
        ]
    }

    fn credential_submission_form(
        &self,
        credentials: &CredentialContext,
        correlation_id: &str,
    ) -> FormFields {
        vec![
            ("msg", "4".to_string()),
            ("password", hash_password(credentials.password.expose_secret().as_ref())),
            ("agreetos", "false".to_string()),
            ("docookiecheck", "true".to_string()),
            ("username", credentials.account.clone()),
            ("e-username", encode_practice_code(&credentials.practice_code)),
            ("twofactorreentryskipfornow", "false".to_string()),
            ("correlationid", correlation_id.to_string()),
        ]
    }

    fn note_fetch_form(&self, identifiers: &ExternalIdentifierPair) -> BridgeResult<FormFields> {
        let values = EncryptedNoteValues {
            note_id: None,
            note_revision: None,
            calendar_entry_id: identifiers.calendar_entry_id.as_str(),
            patient_id: identifiers.patient_id.as_str(),
            custom_form_id: None,
        };
        let encoded = serde_json::to_string(&values).map_err(|e| {
            BridgeError::MalformedResponse(format!("failed to encode note lookup key: {e}"))
        })?;

        Ok(vec![
            ("msg", "3".to_string()),
            ("encryptednotevalues", encoded),
            ("clientversion", self.client_version.clone()),
        ])
    }

    fn session_write_form(&self, session: &LocalSession) -> FormFields {
        let mut fields = vec![
            ("msg", "1".to_string()),
            ("ClientName", session.client_name.clone()),
            ("Date", session.date.format("%m/%d/%Y").to_string()),
            ("StartTime", session.start_time.format("%-I:%M %p").to_string()),
            ("EndTime", session.end_time.format("%-I:%M %p").to_string()),
            ("Duration", session.duration_minutes().to_string()),
        ];
        if let Some(patient_id) = &session.patient_id {
            fields.push(("PatientId", patient_id.to_string()));
        }
        fields.push(("clientversion", self.client_version.clone()));
        fields
    }

    fn note_write_form(&self, note: &LocalNote) -> FormFields {
        let mut fields = vec![
            ("msg", "2".to_string()),
            ("NoteId", note.note_id.clone()),
            ("Content", note.content.clone()),
        ];
        if let Some(identifiers) = &note.identifiers {
            fields.push(("CalendarEntryId", identifiers.calendar_entry_id.to_string()));
            fields.push(("PatientId", identifiers.patient_id.to_string()));
        }
        fields.push(("clientversion", self.client_version.clone()));
        fields
    }

    fn parse_note(&self, body: &str) -> BridgeResult<NoteFragment> {
        let root: Value = serde_json::from_str(body).map_err(|e| {
            BridgeError::MalformedResponse(format!("note response is not valid JSON: {e}"))
        })?;

        let form = root
            .get("Form")
            .and_then(Value::as_object)
            .ok_or_else(|| {
                BridgeError::MalformedResponse("note response has no Form object".to_string())
            })?;

        let elements = match form.get("Data").filter(|d| !d.is_null()) {
            None => return Ok(NoteFragment::default()),
            Some(Value::Object(data)) => match data.get("FormElementValues") {
                None | Some(Value::Null) => return Ok(NoteFragment::default()),
                Some(Value::Array(elements)) => elements,
                Some(_) => {
                    return Err(BridgeError::MalformedResponse(
                        "Form.Data.FormElementValues is not a list".to_string(),
                    ))
                }
            },
            Some(_) => {
                return Err(BridgeError::MalformedResponse(
                    "Form.Data is not an object".to_string(),
                ))
            }
        };

        let mut fragment = NoteFragment::default();
        if let Some(value) = find_form_element(elements, DIAGNOSES_FORM_ELEMENT_ID) {
            fragment.diagnoses = parse_diagnoses(&value);
        }
        if let Some(value) = find_form_element(elements, OBJECTIVES_FORM_ELEMENT_ID) {
            fragment.objectives = parse_objectives(&value);
        }

        Ok(fragment)
    }

    fn interpret_sync_response(&self, body: &str) -> BridgeResult<SyncOutcome> {
        let root: Value = serde_json::from_str(body).map_err(|e| {
            BridgeError::MalformedResponse(format!("sync response is not valid JSON: {e}"))
        })?;
        let envelope = root.as_object().ok_or_else(|| {
            BridgeError::MalformedResponse("sync response is not a JSON object".to_string())
        })?;

        let success = first_field(envelope, &["success", "Success"]).and_then(as_flag);
        if success == Some(false) {
            let message = first_field(envelope, &["message", "Message", "error", "Error"])
                .and_then(Value::as_str)
                .filter(|m| !m.trim().is_empty())
                .unwrap_or("portal returned success=false");
            return Err(BridgeError::ExternalFailureFlag(message.to_string()));
        }

        let external_id = first_field(envelope, &["appointmentId", "AppointmentId", "ID", "Id"])
            .and_then(scalar_to_string)
            .and_then(|id| ExternalAppointmentId::new(id).ok());

        match (external_id, success) {
            (Some(id), _) => Ok(SyncOutcome::succeeded(Some(id))),
            (None, Some(true)) => Ok(SyncOutcome::succeeded(None)),
            (None, _) => Err(BridgeError::MalformedResponse(
                "sync response carries neither a success flag nor an identifier".to_string(),
            )),
        }
    }
}

/// Value of the form element with the given id, unwrapping JSON-in-a-string
fn find_form_element(elements: &[Value], id: i64) -> Option<Value> {
    let element = elements.iter().find(|e| {
        match e.get("FormElementId") {
            Some(Value::Number(n)) => n.as_i64() == Some(id),
            Some(Value::String(s)) => s.trim().parse::<i64>().ok() == Some(id),
            _ => false,
        }
    })?;

    match element.get("Value") {
        Some(Value::String(raw)) => serde_json::from_str(raw).ok(),
        Some(value) => Some(value.clone()),
        None => None,
    }
}

/// List carried by a form element: either the value itself or its named array
fn element_list<'a>(value: &'a Value, key: &str) -> &'a [Value] {
    match value {
        Value::Array(items) => items.as_slice(),
        Value::Object(map) => map
            .get(key)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[]),
        _ => &[],
    }
}

fn parse_diagnoses(value: &Value) -> Vec<Diagnosis> {
    element_list(value, "NoteDiagnoses")
        .iter()
        .filter_map(|entry| {
            let entry = entry.as_object()?;
            Some(Diagnosis::new(
                text_field(entry, &["Code", "code"]),
                text_field(entry, &["Description", "description"]),
            ))
        })
        .collect()
}

fn parse_objectives(value: &Value) -> Vec<String> {
    element_list(value, "NoteObjectives")
        .iter()
        .filter_map(|entry| match entry {
            Value::String(text) => Some(text.clone()),
            Value::Object(map) => {
                let text = text_field(map, &["Description", "Text", "Objective"]);
                if text.is_empty() {
                    Some(Value::Object(map.clone()).to_string())
                } else {
                    Some(text)
                }
            }
            Value::Null => None,
            other => Some(other.to_string()),
        })
        .collect()
}

fn first_field<'a>(map: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|k| map.get(*k)).filter(|v| !v.is_null())
}

fn text_field(map: &Map<String, Value>, keys: &[&str]) -> String {
    first_field(map, keys)
        .and_then(scalar_to_string)
        .unwrap_or_default()
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn as_flag(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) if s.eq_ignore_ascii_case("true") => Some(true),
        Value::String(s) if s.eq_ignore_ascii_case("false") => Some(false),
        _ => None,
    }
}
