//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the bridge configuration file.

use crate::config::{load_config, BridgeConfig};
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // load_config already validates; a failure here covers both cases
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration validation failed");
                println!("   Error: {e}");
                println!();
                return Ok(2);
            }
        };

        println!("✅ Configuration is valid");
        println!();
        print_summary(&config);
        println!();
        Ok(0)
    }
}

fn print_summary(config: &BridgeConfig) {
    println!("Configuration Summary:");
    println!("  Environment: {:?}", config.environment);
    println!("  Log Level: {}", config.application.log_level);
    println!("  Portal URL: {}", config.portal.base_url);
    println!("  Client Version: {}", config.portal.client_version);
    println!("  Timeout: {}s", config.portal.timeout_seconds);
    println!("  TLS Verify: {}", config.portal.tls_verify);
    println!("  Therapists: {}", config.credentials.len());

    for entry in &config.credentials {
        let mut missing = Vec::new();
        if entry.account.trim().is_empty() {
            missing.push("account");
        }
        if !entry.has_password() {
            missing.push("password");
        }
        if entry.practice_code.trim().is_empty() {
            missing.push("practice_code");
        }

        if missing.is_empty() {
            println!("    {} - complete", entry.therapist_id);
        } else {
            println!(
                "    {} - ⚠️  missing: {}",
                entry.therapist_id,
                missing.join(", ")
            );
        }
    }
}
