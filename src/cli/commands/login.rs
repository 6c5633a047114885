//! Login command implementation
//!
//! Runs the portal login handshake for one therapist and reports whether it
//! produced a session. No data is read or written.

use super::{open_bridge, report_failure};
use crate::domain::TherapistId;
use clap::Args;

/// Arguments for the login command
#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Therapist whose stored credentials to check
    #[arg(long)]
    pub therapist: TherapistId,
}

impl LoginArgs {
    /// Execute the login command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(therapist_id = %self.therapist, "Checking portal login");

        let bridge = match open_bridge(config_path) {
            Ok(b) => b,
            Err(code) => return Ok(code),
        };

        match bridge.check_login_for(self.therapist.as_str()).await {
            Ok(()) => {
                println!("✅ Portal login succeeded for {}", self.therapist);
                Ok(0)
            }
            Err(e) => report_failure(&e, false),
        }
    }
}
