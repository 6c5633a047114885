//! Fetch-note command implementation

use super::{open_bridge, report_failure};
use crate::domain::{NoteFragment, TherapistId};
use clap::Args;

/// Arguments for the fetch-note command
#[derive(Args, Debug)]
pub struct FetchNoteArgs {
    /// Therapist whose credentials to use
    #[arg(long)]
    pub therapist: TherapistId,

    /// Opaque portal calendar entry id stored with the local session
    #[arg(long)]
    pub calendar_entry_id: Option<String>,

    /// Opaque portal patient id stored with the local client
    #[arg(long)]
    pub patient_id: Option<String>,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

impl FetchNoteArgs {
    /// Execute the fetch-note command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(therapist_id = %self.therapist, "Fetching portal note");

        let bridge = match open_bridge(config_path) {
            Ok(b) => b,
            Err(code) => return Ok(code),
        };

        let result = bridge
            .fetch_note_for(
                self.therapist.as_str(),
                self.calendar_entry_id.clone(),
                self.patient_id.clone(),
            )
            .await;

        match result {
            Ok(note) if self.json => {
                println!("{}", serde_json::to_string_pretty(&note)?);
                Ok(0)
            }
            Ok(note) => {
                print_note(&note);
                Ok(0)
            }
            Err(e) => report_failure(&e, self.json),
        }
    }
}

fn print_note(note: &NoteFragment) {
    if note.is_empty() {
        println!("ℹ️  The portal note has no diagnoses or objectives");
        return;
    }

    println!("Diagnoses:");
    for diagnosis in &note.diagnoses {
        println!("  {} - {}", diagnosis.code, diagnosis.description);
    }
    println!("Objectives:");
    for objective in &note.objectives {
        println!("  - {objective}");
    }
}
