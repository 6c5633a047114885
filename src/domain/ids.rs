//! Domain identifier types with validation
//!
//! Newtype wrappers for the identifiers that link local records to the portal.
//! The portal's identifiers are opaque encrypted strings: the bridge never
//! decodes, constructs or rewrites them, it only checks they are present.

use super::errors::BridgeError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! opaque_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String")]
        pub struct $name(String);

        impl $name {
            #[doc = concat!("Creates a new ", $label, "; blank input is rejected")]
            pub fn new(id: impl Into<String>) -> Result<Self, String> {
                let id = id.into();
                if id.trim().is_empty() {
                    return Err(format!("{} cannot be empty", $label));
                }
                Ok(Self(id))
            }

            /// Returns the identifier as a string slice
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consumes self and returns the inner String
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl TryFrom<String> for $name {
            type Error = String;

            fn try_from(id: String) -> Result<Self, Self::Error> {
                Self::new(id)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

opaque_id!(
    /// Therapist identity used to key the credential store
    TherapistId,
    "Therapist ID"
);

opaque_id!(
    /// Portal-owned encrypted identifier of a calendar entry
    ///
    /// # Examples
    ///
    /// ```
    /// use practice_bridge::domain::ids::CalendarEntryId;
    ///
    /// let id: CalendarEntryId = "q9Zk2+Xw==".parse().unwrap();
    /// assert_eq!(id.as_str(), "q9Zk2+Xw==");
    /// ```
    CalendarEntryId,
    "Calendar entry ID"
);

opaque_id!(
    /// Portal-owned encrypted identifier of a patient
    PatientId,
    "Patient ID"
);

opaque_id!(
    /// Identifier the portal assigns to an appointment or note revision on write
    ExternalAppointmentId,
    "External appointment ID"
);

/// Pair of portal identifiers stored alongside a local session
///
/// Produced by an earlier sync and owned by the caller's store. Both halves must
/// be present before a note can be fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalIdentifierPair {
    pub calendar_entry_id: CalendarEntryId,
    pub patient_id: PatientId,
}

impl ExternalIdentifierPair {
    pub fn new(calendar_entry_id: CalendarEntryId, patient_id: PatientId) -> Self {
        Self {
            calendar_entry_id,
            patient_id,
        }
    }

    /// Builds a pair from the optional columns of a local record
    ///
    /// # Errors
    ///
    /// Returns `BridgeError::UnsyncedIdentifiers` naming every missing half.
    pub fn from_parts(
        calendar_entry_id: Option<String>,
        patient_id: Option<String>,
    ) -> Result<Self, BridgeError> {
        let calendar_entry_id = calendar_entry_id.and_then(|id| CalendarEntryId::new(id).ok());
        let patient_id = patient_id.and_then(|id| PatientId::new(id).ok());

        match (calendar_entry_id, patient_id) {
            (Some(calendar_entry_id), Some(patient_id)) => {
                Ok(Self::new(calendar_entry_id, patient_id))
            }
            (calendar_entry_id, patient_id) => {
                let mut missing = Vec::new();
                if calendar_entry_id.is_none() {
                    missing.push("calendar entry id");
                }
                if patient_id.is_none() {
                    missing.push("patient id");
                }
                Err(BridgeError::UnsyncedIdentifiers(format!(
                    "missing {}",
                    missing.join(" and ")
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calendar_entry_id_creation() {
        let id = CalendarEntryId::new("enc-cal-1").unwrap();
        assert_eq!(id.as_str(), "enc-cal-1");
        assert_eq!(format!("{id}"), "enc-cal-1");
    }

    #[test]
    fn test_ids_reject_blank() {
        assert!(PatientId::new("").is_err());
        assert!(PatientId::new("   ").is_err());
        assert!(TherapistId::new("").is_err());
    }

    #[test]
    fn test_id_serialization_is_transparent() {
        let id = PatientId::new("enc-pat").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"enc-pat\"");
        let back: PatientId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_blank_ids_fail_to_deserialize() {
        assert!(serde_json::from_str::<CalendarEntryId>("\"\"").is_err());
        assert!(serde_json::from_str::<TherapistId>("\"   \"").is_err());

        let stored = r#"{"calendar_entry_id":"","patient_id":"  "}"#;
        assert!(serde_json::from_str::<ExternalIdentifierPair>(stored).is_err());

        let stored = r#"{"calendar_entry_id":"enc-cal","patient_id":"enc-pat"}"#;
        let pair: ExternalIdentifierPair = serde_json::from_str(stored).unwrap();
        assert_eq!(pair.patient_id.as_str(), "enc-pat");
    }

    #[test]
    fn test_pair_from_parts_complete() {
        let pair =
            ExternalIdentifierPair::from_parts(Some("cal".to_string()), Some("pat".to_string()))
                .unwrap();
        assert_eq!(pair.calendar_entry_id.as_str(), "cal");
        assert_eq!(pair.patient_id.as_str(), "pat");
    }

    #[test]
    fn test_pair_from_parts_missing_patient() {
        let err = ExternalIdentifierPair::from_parts(Some("cal".to_string()), None).unwrap_err();
        assert_eq!(
            err,
            BridgeError::UnsyncedIdentifiers("missing patient id".to_string())
        );
    }

    #[test]
    fn test_pair_from_parts_blank_counts_as_missing() {
        let err =
            ExternalIdentifierPair::from_parts(Some(" ".to_string()), None).unwrap_err();
        assert_eq!(
            err,
            BridgeError::UnsyncedIdentifiers(
                "missing calendar entry id and patient id".to_string()
            )
        );
    }
}
