//! Lyra Core
//!
//! Core library for reconciling Azure Media Services accounts against a
//! remote management API. The network client lives behind the
//! [`client::MediaServicesApi`] seam; this crate owns the typed model,
//! validation, resource-ID parsing, and the reconciler itself.

pub mod account;
pub mod client;
pub mod error;
pub mod location;
pub mod reconciler;
pub mod resource_id;
pub mod validation;
