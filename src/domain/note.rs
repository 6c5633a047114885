//! Clinical note models
//!
//! [`NoteFragment`] is what the bridge extracts from the portal; [`LocalNote`]
//! is what the caller pushes back. Clinical content is carried, never checked.

use super::ids::ExternalIdentifierPair;
use serde::{Deserialize, Serialize};

/// Diagnosis entry as listed on a portal note
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnosis {
    pub code: String,
    pub description: String,
}

impl Diagnosis {
    pub fn new(code: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            description: description.into(),
        }
    }
}

/// Normalized note payload extracted from a portal response
///
/// Missing form elements produce empty lists, not errors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteFragment {
    pub diagnoses: Vec<Diagnosis>,
    /// Free-text objective / progress entries in portal order
    pub objectives: Vec<String>,
}

impl NoteFragment {
    pub fn is_empty(&self) -> bool {
        self.diagnoses.is_empty() && self.objectives.is_empty()
    }

    /// Diagnosis codes in portal order, for callers that only merge codes
    pub fn diagnosis_codes(&self) -> Vec<&str> {
        self.diagnoses.iter().map(|d| d.code.as_str()).collect()
    }
}

/// Local note revision to push to the portal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalNote {
    /// Caller's note identifier
    pub note_id: String,

    pub content: String,

    /// Portal linkage of the session the note belongs to, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifiers: Option<ExternalIdentifierPair>,
}

impl LocalNote {
    pub fn new(note_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            note_id: note_id.into(),
            content: content.into(),
            identifiers: None,
        }
    }

    pub fn with_identifiers(mut self, identifiers: ExternalIdentifierPair) -> Self {
        self.identifiers = Some(identifiers);
        self
    }
}
