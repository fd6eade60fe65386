//! Lyra Azure Provider
//!
//! Implements the core [`lyra_core::client::MediaServicesApi`] seam over the
//! Azure Resource Manager REST API, with an explicit token-credential seam
//! and caller-driven cancellation.

pub mod auth;
pub mod client;
pub mod wire;

pub use auth::{AccessToken, ClientSecretCredential, StaticTokenCredential, TokenCredential};
pub use client::{API_VERSION, ArmClientConfig, ArmMediaServicesClient, DEFAULT_ENDPOINT};
