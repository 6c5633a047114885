//! Appointment sync models

use super::errors::BridgeError;
use super::ids::{ExternalAppointmentId, PatientId};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Local therapy session to push to the portal as an appointment
///
/// Recurrence and scheduling rules live with the caller; this is a plain record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalSession {
    pub client_name: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,

    /// Portal patient linkage, sent when the client was synced before
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_id: Option<PatientId>,
}

impl LocalSession {
    pub fn new(
        client_name: impl Into<String>,
        date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
    ) -> Self {
        Self {
            client_name: client_name.into(),
            date,
            start_time,
            end_time,
            patient_id: None,
        }
    }

    pub fn with_patient_id(mut self, patient_id: PatientId) -> Self {
        self.patient_id = Some(patient_id);
        self
    }

    /// Session length in whole minutes; zero when the end is not after the start
    pub fn duration_minutes(&self) -> i64 {
        (self.end_time - self.start_time).num_minutes().max(0)
    }
}

/// Result of a push to the portal, in the shape callers persist
///
/// On success the caller stores `external_appointment_id` and its own synced
/// flag; the bridge keeps no ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncOutcome {
    pub success: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_appointment_id: Option<ExternalAppointmentId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SyncOutcome {
    pub fn succeeded(external_appointment_id: Option<ExternalAppointmentId>) -> Self {
        Self {
            success: true,
            external_appointment_id,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            external_appointment_id: None,
            error: Some(error.into()),
        }
    }

    /// Flattens a bridge result into the record shape
    pub fn from_result(result: Result<SyncOutcome, BridgeError>) -> Self {
        result.unwrap_or_else(|e| Self::failed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> LocalSession {
        LocalSession::new(
            "Jane Roe",
            NaiveDate::from_ymd_opt(2026, 3, 4).unwrap(),
            NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(9, 50, 0).unwrap(),
        )
    }

    #[test]
    fn test_duration_minutes() {
        assert_eq!(session().duration_minutes(), 50);
    }

    #[test]
    fn test_duration_never_negative() {
        let mut s = session();
        s.end_time = NaiveTime::from_hms_opt(8, 0, 0).unwrap();
        assert_eq!(s.duration_minutes(), 0);
    }

    #[test]
    fn test_outcome_from_error_result() {
        let outcome = SyncOutcome::from_result(Err(BridgeError::ExternalFailureFlag(
            "overlapping appointment".to_string(),
        )));
        assert!(!outcome.success);
        assert_eq!(
            outcome.error.as_deref(),
            Some("Portal reported failure: overlapping appointment")
        );
        assert!(outcome.external_appointment_id.is_none());
    }

    #[test]
    fn test_outcome_serialization_omits_empty_fields() {
        let outcome =
            SyncOutcome::succeeded(Some(ExternalAppointmentId::new("A-991").unwrap()));
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["external_appointment_id"], "A-991");
        assert!(json.get("error").is_none());
    }
}
