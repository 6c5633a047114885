//! Sync-note command implementation

use super::{open_bridge, report_failure};
use crate::domain::{ExternalIdentifierPair, LocalNote, TherapistId};
use clap::Args;

/// Arguments for the sync-note command
#[derive(Args, Debug)]
pub struct SyncNoteArgs {
    /// Therapist whose credentials to use
    #[arg(long)]
    pub therapist: TherapistId,

    /// Local note identifier
    #[arg(long)]
    pub note_id: String,

    /// Note text
    #[arg(long)]
    pub content: String,

    /// Portal calendar entry id the note belongs to
    #[arg(long)]
    pub calendar_entry_id: Option<String>,

    /// Portal patient id the note belongs to
    #[arg(long)]
    pub patient_id: Option<String>,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

impl SyncNoteArgs {
    /// Execute the sync-note command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(therapist_id = %self.therapist, note_id = %self.note_id, "Syncing note");

        let mut note = LocalNote::new(self.note_id.clone(), self.content.clone());
        if self.calendar_entry_id.is_some() || self.patient_id.is_some() {
            match ExternalIdentifierPair::from_parts(
                self.calendar_entry_id.clone(),
                self.patient_id.clone(),
            ) {
                Ok(pair) => note = note.with_identifiers(pair),
                Err(e) => return report_failure(&e, self.json),
            }
        }

        let bridge = match open_bridge(config_path) {
            Ok(b) => b,
            Err(code) => return Ok(code),
        };

        match bridge.sync_note_for(self.therapist.as_str(), &note).await {
            Ok(outcome) if self.json => {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
                Ok(0)
            }
            Ok(_) => {
                println!("✅ Note {} synced", self.note_id);
                Ok(0)
            }
            Err(e) => report_failure(&e, self.json),
        }
    }
}
