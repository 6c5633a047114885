//! Domain models and types for the bridge.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`CalendarEntryId`], [`PatientId`], [`ExternalAppointmentId`])
//! - **Secret-bearing inputs** ([`CredentialContext`], [`SessionHandle`])
//! - **Payload models** ([`NoteFragment`], [`LocalNote`], [`LocalSession`], [`SyncOutcome`])
//! - **Error types** ([`AppError`], [`AuthError`], [`BridgeError`])
//!
//! # Ownership
//!
//! Credentials and identifier pairs belong to the caller's store. They are passed
//! by value into one operation and are never mutated or retained by the bridge:
//!
//! ```rust
//! use practice_bridge::domain::{CredentialContext, ExternalIdentifierPair};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let credentials = CredentialContext::new("therapist@example.com", "s3cret", "X1");
//! credentials.validate()?;
//!
//! let pair = ExternalIdentifierPair::from_parts(
//!     Some("enc-calendar".to_string()),
//!     Some("enc-patient".to_string()),
//! )?;
//! # let _ = pair;
//! # Ok(())
//! # }
//! ```

pub mod appointment;
pub mod credentials;
pub mod errors;
pub mod ids;
pub mod note;
pub mod result;
pub mod session;

// Re-export commonly used types for convenience
pub use appointment::{LocalSession, SyncOutcome};
pub use credentials::{CredentialContext, CredentialStore, InMemoryCredentialStore};
pub use errors::{AppError, AuthError, BridgeError};
pub use ids::{CalendarEntryId, ExternalAppointmentId, ExternalIdentifierPair, PatientId, TherapistId};
pub use note::{Diagnosis, LocalNote, NoteFragment};
pub use result::{BridgeResult, Result};
pub use session::SessionHandle;
