//! Blocking Rust client for the Everest logistics HTTP API.
//!
//! The crate is split the usual way: a domain layer of strong types (the
//! [`ApiResponse`] wrapper, credentials, webhook payloads), a transport layer
//! for wire-format quirks and the HTTP seam, and a small client layer
//! orchestrating requests.
//!
//! ```rust,no_run
//! use everest_api::{EverestClient, EverestError};
//! use serde_json::json;
//!
//! fn main() -> Result<(), EverestError> {
//!     let mut client = EverestClient::new("https://example.everst.io/api", "id", "secret")?;
//!
//!     let auth = client.auth()?;
//!     if !auth.is_success() {
//!         eprintln!("authentication failed: {:?}", auth.error_message());
//!         return Ok(());
//!     }
//!
//!     let mission = client.post("/missions/get", &json!({"ref": "EV-2025-0042"}))?;
//!     if mission.has_error() {
//!         eprintln!("lookup failed: {:?}", mission.error_message());
//!     }
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
pub mod transport;

pub use client::{AUTH_ENDPOINT, DEBUG_TARGET, EverestClient, EverestClientBuilder, EverestError};
pub use domain::{
    ApiResponse, BaseUrl, ClientId, ClientSecret, Headers, MISSION_STATUS_COMPLETED,
    MissionStatusEvent, StructuredResponse, UnixTimestamp, ValidationError, try_parse,
};
pub use transport::{HttpTransport, ReqwestTransport};
