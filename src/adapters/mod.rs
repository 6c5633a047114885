//! External system integrations.
//!
//! - [`portal`] - practice-management portal (login handshake, note fetch, sync)
//!
//! # Design Pattern
//!
//! Adapters follow the **Adapter Pattern** to isolate the external system. All
//! wire details sit behind the [`portal::PortalProtocol`] trait, so the bridges
//! can be exercised against a mock server and a portal change is contained in
//! one implementation.
//!
//! ```rust,no_run
//! use practice_bridge::adapters::portal::{Authenticator, NoteBridge, PortalClient};
//! use practice_bridge::config::PortalConfig;
//! use practice_bridge::domain::{CredentialContext, ExternalIdentifierPair};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = PortalConfig {
//!     base_url: "https://portal.example.com".to_string(),
//!     ..Default::default()
//! };
//! let client = PortalClient::new(&config)?;
//!
//! let credentials = CredentialContext::new("therapist@example.com", "s3cret", "X1");
//! let session = Authenticator::new(client.clone()).login(&credentials).await?;
//!
//! let pair = ExternalIdentifierPair::from_parts(
//!     Some("enc-calendar".to_string()),
//!     Some("enc-patient".to_string()),
//! )?;
//! let note = NoteBridge::new(client).fetch_note(&pair, &session).await?;
//! println!("{} diagnoses", note.diagnoses.len());
//! # Ok(())
//! # }
//! ```

pub mod portal;
