//! # Order Services
//!
//! This crate provides the HTTP client for the external order-creation
//! service. At checkout, cart line items are forwarded verbatim to this
//! service, which performs the authoritative write-time conflict check and
//! creates the underlying reservation records.

/// Client for the order-creation API
mod order_client;
pub use order_client::*;
