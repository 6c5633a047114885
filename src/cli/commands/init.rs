//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "practice-bridge.toml")]
    pub output: String,

    /// Include example values and comments
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing Practice Bridge configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2);
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your portal URL", self.output);
                println!("  2. Add a [[credentials]] entry per therapist");
                println!("  3. Put passwords in a .env file, e.g.");
                println!("     PRACTICE_BRIDGE_THERAPIST_1_PASSWORD=...");
                println!("  4. Validate configuration: practice-bridge validate-config");
                println!("  5. Check a login: practice-bridge login --therapist therapist-1");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(5)
            }
        }
    }

    /// Generate minimal configuration
    fn generate_minimal_config() -> String {
        r#"# Practice Bridge Configuration File

environment = "development"

[application]
log_level = "info"

[portal]
base_url = "https://portal.example.com"

[[credentials]]
therapist_id = "therapist-1"
account = "therapist@example.com"
password = "${PRACTICE_BRIDGE_THERAPIST_1_PASSWORD}"
practice_code = "X1"

[logging]
local_enabled = true
local_path = "./logs"
local_rotation = "daily"
"#
        .to_string()
    }

    /// Generate configuration with examples and comments
    fn generate_config_with_examples() -> String {
        r#"# Practice Bridge Configuration File
#
# Values of the form ${VAR} are read from the environment (or a .env file).
# Any setting can also be overridden with PRACTICE_BRIDGE_<SECTION>_<KEY>.

# development | staging | production
# TLS verification cannot be disabled in production.
environment = "development"

[application]
# trace | debug | info | warn | error
log_level = "info"

[portal]
# Base URL of the practice-management portal
base_url = "https://portal.example.com"

# Client version sent on AJAX calls; change only when the portal requires it
# client_version = "2024.11.3.1"

# Request timeouts in seconds
timeout_seconds = 30
connect_timeout_seconds = 10

# Verify TLS certificates (must stay true in production)
tls_verify = true

# One entry per therapist. Entries may be left incomplete; operations for
# that therapist then fail with an "incomplete credentials" error.
[[credentials]]
therapist_id = "therapist-1"
account = "therapist@example.com"
password = "${PRACTICE_BRIDGE_THERAPIST_1_PASSWORD}"
practice_code = "X1"

# [[credentials]]
# therapist_id = "therapist-2"
# account = "colleague@example.com"
# password = "${PRACTICE_BRIDGE_THERAPIST_2_PASSWORD}"
# practice_code = "X1"

[logging]
local_enabled = true
local_path = "./logs"
# daily | hourly | never
local_rotation = "daily"
# JSON lines in the log file
json = true
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_generate_minimal_config() {
        let config = InitArgs::generate_minimal_config();
        assert!(config.contains("[application]"));
        assert!(config.contains("[portal]"));
        assert!(config.contains("[[credentials]]"));
    }

    #[test]
    fn test_generated_configs_parse() {
        std::env::set_var("PRACTICE_BRIDGE_THERAPIST_1_PASSWORD", "pw");
        for content in [
            InitArgs::generate_minimal_config(),
            InitArgs::generate_config_with_examples(),
        ] {
            let config = crate::config::loader::parse_config(&content).unwrap();
            assert_eq!(config.credentials.len(), 1);
        }
    }

    #[tokio::test]
    async fn test_init_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("practice-bridge.toml");
        fs::write(&path, "existing").unwrap();

        let args = InitArgs {
            output: path.to_string_lossy().to_string(),
            with_examples: false,
            force: false,
        };
        assert_eq!(args.execute().await.unwrap(), 2);
        assert_eq!(fs::read_to_string(&path).unwrap(), "existing");

        let forced = InitArgs { force: true, ..args };
        assert_eq!(forced.execute().await.unwrap(), 0);
        assert!(fs::read_to_string(&path).unwrap().contains("[portal]"));
    }
}
