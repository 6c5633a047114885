//! Core orchestration for the bridge.
//!
//! - [`bridge`] - [`PracticeBridge`], the therapist-scoped facade
//! - [`operation`] - per-operation state machine
//! - [`classify`](mod@classify) - error taxonomy for the UI layer
//!
//! # Operation Workflow
//!
//! 1. **Resolve**: look up the therapist's credentials and validate them
//! 2. **Authenticate**: run the two-step portal login
//! 3. **Operate**: make exactly one authenticated call
//! 4. **Classify**: map any failure to an [`ErrorKind`] and category
//!
//! # Example
//!
//! ```rust,no_run
//! use practice_bridge::config::load_config;
//! use practice_bridge::core::{classify, PracticeBridge};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("practice-bridge.toml")?;
//! let bridge = PracticeBridge::from_config(&config)?;
//!
//! match bridge
//!     .fetch_note_for("therapist-1", Some("enc-cal".into()), Some("enc-pat".into()))
//!     .await
//! {
//!     Ok(note) => println!("{} objectives", note.objectives.len()),
//!     Err(e) => println!("{}", classify(&e).message),
//! }
//! # Ok(())
//! # }
//! ```

pub mod bridge;
pub mod classify;
pub mod operation;

pub use bridge::PracticeBridge;
pub use classify::{classify, ClassifiedError, ErrorCategory, ErrorKind};
pub use operation::{OperationState, OperationTracker};
