//! CLI command implementations
//!
//! Every command returns a process exit code: 0 success, 2 configuration
//! error, 3 protocol or portal-reported error, 4 transport error, 5 fatal.

pub mod fetch_note;
pub mod init;
pub mod login;
pub mod sync_note;
pub mod sync_session;
pub mod validate;

use crate::config::load_config;
use crate::core::{classify, PracticeBridge};
use crate::domain::BridgeError;
use chrono::NaiveTime;

/// Loads configuration and builds the bridge, printing the failure if any
///
/// On failure the error carries the exit code to return.
pub(crate) fn open_bridge(config_path: &str) -> Result<PracticeBridge, i32> {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            println!("❌ Failed to load configuration file");
            println!("   Error: {e}");
            return Err(2);
        }
    };

    PracticeBridge::from_config(&config).map_err(|e| {
        println!("❌ Failed to create portal client");
        println!("   Error: {e}");
        2
    })
}

/// Prints a classified bridge failure and returns its exit code
pub(crate) fn report_failure(error: &BridgeError, json: bool) -> anyhow::Result<i32> {
    let classified = classify(error);
    if json {
        println!("{}", serde_json::to_string_pretty(&classified)?);
    } else {
        println!("❌ {}", classified.message);
        if classified.retryable {
            println!("   The portal could not be reached; try again later.");
        }
    }
    Ok(classified.exit_code())
}

/// Parses `HH:MM` or `HH:MM:SS`
pub(crate) fn parse_time(value: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .map_err(|_| format!("invalid time '{value}', expected HH:MM"))
}
