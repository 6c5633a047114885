//! Practice-management portal adapter
//!
//! The portal exposes only a form-based login and undocumented AJAX endpoints.
//! This module reproduces the login handshake, threads the resulting session
//! into a single follow-up call, and maps payloads to and from domain types.
//!
//! - [`protocol`] - versioned wire mapping ([`PortalProtocol`], [`PortalProtocolV1`])
//! - [`cookies`] - explicit `Set-Cookie` capture and replay
//! - [`auth`] - the two-step [`Authenticator`]
//! - [`notes`] - [`NoteBridge`] note retrieval
//! - [`sync`] - [`SyncBridge`] appointment and note pushes
//! - [`client`] - [`PortalClient`] HTTP client factory

pub mod auth;
pub mod client;
pub mod cookies;
pub mod notes;
pub mod protocol;
pub mod sync;

pub use auth::{encode_practice_code, hash_password, new_correlation_id, Authenticator, Handshake};
pub use client::PortalClient;
pub use cookies::CookieJar;
pub use notes::NoteBridge;
pub use protocol::{FormFields, PortalProtocol, PortalProtocolV1};
pub use sync::SyncBridge;
