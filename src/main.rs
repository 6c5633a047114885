// Practice Bridge - Practice-Management Portal Bridge
// Copyright (c) 2025 Practice Bridge Contributors
// Licensed under the MIT License

use clap::Parser;
use practice_bridge::cli::{Cli, Commands};
use practice_bridge::config::LoggingConfig;
use practice_bridge::logging::init_logging;
use std::process;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Console-only logging for the CLI
    let log_level = cli.log_level.as_deref().unwrap_or("info");
    let logging_config = LoggingConfig {
        local_enabled: false,
        ..Default::default()
    };
    if let Err(e) = init_logging(log_level, &logging_config) {
        eprintln!("Failed to initialize logging: {e}");
        process::exit(5);
    }

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "Practice Bridge - practice-management portal bridge"
    );

    let exit_code = match execute_command(&cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            5
        }
    };

    process::exit(exit_code);
}

/// Execute the CLI command
async fn execute_command(cli: &Cli) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::ValidateConfig(args) => args.execute(&cli.config).await,
        Commands::Init(args) => args.execute().await,
        Commands::Login(args) => args.execute(&cli.config).await,
        Commands::FetchNote(args) => args.execute(&cli.config).await,
        Commands::SyncSession(args) => args.execute(&cli.config).await,
        Commands::SyncNote(args) => args.execute(&cli.config).await,
    }
}
