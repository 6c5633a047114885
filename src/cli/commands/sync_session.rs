//! Sync-session command implementation

use super::{open_bridge, parse_time, report_failure};
use crate::domain::{LocalSession, PatientId, TherapistId};
use chrono::{NaiveDate, NaiveTime};
use clap::Args;

/// Arguments for the sync-session command
#[derive(Args, Debug)]
pub struct SyncSessionArgs {
    /// Therapist whose credentials to use
    #[arg(long)]
    pub therapist: TherapistId,

    /// Client display name
    #[arg(long)]
    pub client_name: String,

    /// Session date (YYYY-MM-DD)
    #[arg(long)]
    pub date: NaiveDate,

    /// Start time (HH:MM, 24-hour)
    #[arg(long, value_parser = parse_time)]
    pub start: NaiveTime,

    /// End time (HH:MM, 24-hour)
    #[arg(long, value_parser = parse_time)]
    pub end: NaiveTime,

    /// Portal patient id, if the client was synced before
    #[arg(long)]
    pub patient_id: Option<String>,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

impl SyncSessionArgs {
    /// Execute the sync-session command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(therapist_id = %self.therapist, date = %self.date, "Syncing session");

        let mut session =
            LocalSession::new(self.client_name.clone(), self.date, self.start, self.end);
        if let Some(raw) = &self.patient_id {
            match PatientId::new(raw.clone()) {
                Ok(id) => session = session.with_patient_id(id),
                Err(e) => {
                    println!("❌ Invalid --patient-id: {e}");
                    return Ok(2);
                }
            }
        }

        let bridge = match open_bridge(config_path) {
            Ok(b) => b,
            Err(code) => return Ok(code),
        };

        match bridge.sync_session_for(self.therapist.as_str(), &session).await {
            Ok(outcome) if self.json => {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
                Ok(0)
            }
            Ok(outcome) => {
                match &outcome.external_appointment_id {
                    Some(id) => println!("✅ Session synced as portal appointment {id}"),
                    None => println!("✅ Session synced"),
                }
                Ok(0)
            }
            Err(e) => report_failure(&e, self.json),
        }
    }
}
