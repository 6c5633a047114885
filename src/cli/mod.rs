//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for the bridge using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Practice Bridge - practice-management portal bridge
#[derive(Parser, Debug)]
#[command(name = "practice-bridge")]
#[command(version, about, long_about = None)]
#[command(author = "Practice Bridge Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(
        short,
        long,
        default_value = "practice-bridge.toml",
        env = "PRACTICE_BRIDGE_CONFIG"
    )]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "PRACTICE_BRIDGE_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),

    /// Check that a therapist's stored credentials can log in
    Login(commands::login::LoginArgs),

    /// Fetch diagnoses and objectives for a linked calendar entry
    FetchNote(commands::fetch_note::FetchNoteArgs),

    /// Push a local session to the portal as an appointment
    SyncSession(commands::sync_session::SyncSessionArgs),

    /// Push a local note to the portal
    SyncNote(commands::sync_note::SyncNoteArgs),
}
