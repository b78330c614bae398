//! Gala Client - HTTP client for the seating API
//!
//! Implements [`gala_core::api::SeatingApi`] over reqwest and normalizes the
//! API's wire quirks at this boundary.

mod client;
mod config;
mod wire;

pub use client::ApiClient;
pub use config::{ClientConfig, DEFAULT_API_URL};
pub use wire::decode_body;
