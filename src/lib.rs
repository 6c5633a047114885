// Practice Bridge - Practice-Management Portal Bridge
// Copyright (c) 2025 Practice Bridge Contributors
// Licensed under the MIT License

//! # Practice Bridge
//!
//! Practice Bridge connects a therapist's local records to a third-party
//! practice-management portal that offers no public API. It reproduces the
//! portal's browser login, makes one authenticated call per operation, and
//! maps the portal's payloads to and from plain domain types.
//!
//! ## Overview
//!
//! This library provides:
//! - **Authenticating** with the portal's two-step, cookie-based handshake
//! - **Fetching** a session note's diagnoses and objectives
//! - **Syncing** local sessions and notes to the portal
//! - **Classifying** every failure so the UI can tell the user what to do
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Therapist-scoped facade, operation states, error taxonomy
//! - [`adapters`] - Portal integration (handshake, cookies, wire mapping)
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use practice_bridge::config::load_config;
//! use practice_bridge::core::PracticeBridge;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("practice-bridge.toml")?;
//!     let bridge = PracticeBridge::from_config(&config)?;
//!
//!     let note = bridge
//!         .fetch_note_for("therapist-1", Some("enc-cal".into()), Some("enc-pat".into()))
//!         .await?;
//!
//!     for diagnosis in &note.diagnoses {
//!         println!("{} {}", diagnosis.code, diagnosis.description);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Portal operations return [`domain::BridgeError`]; everything else uses
//! [`domain::AppError`]. [`core::classify`] turns a `BridgeError` into a
//! user-facing message, an HTTP-equivalent status and a retryable flag:
//!
//! ```rust
//! use practice_bridge::core::{classify, ErrorCategory};
//! use practice_bridge::domain::BridgeError;
//!
//! let classified = classify(&BridgeError::NetworkFailure("connection reset".into()));
//! assert_eq!(classified.category, ErrorCategory::Transport);
//! assert_eq!(classified.status, 502);
//! assert!(classified.retryable);
//! ```
//!
//! ## Security
//!
//! Passwords and session tokens are held in zeroizing secrets with redacted
//! `Debug` output. They are never logged and never persisted; each operation
//! logs in afresh and drops its session when it returns.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
