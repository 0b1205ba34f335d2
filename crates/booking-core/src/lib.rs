//! # Booking Core
//!
//! This crate provides the campsite availability and pricing engine for the
//! event booking application. It computes per-night occupancy from existing
//! reservations, classifies sites for the shopper-facing map, resolves which
//! sites can be booked for a candidate stay window, and prices a prospective
//! booking under the nightly and full-event pricing models.
//!
//! Everything here is pure, synchronous, request-scoped computation over a
//! snapshot passed in by the caller. The engine offers availability at read
//! time, not a reservation guarantee; the authoritative conflict check lives
//! in the external order service at write time.

/// Types for campsites, reservations, stay requests and booking errors
mod types;
pub use types::*;

/// Half-open night interval model
mod night;
pub use night::*;

/// Per-night occupancy aggregation and site status classification
mod occupancy;
pub use occupancy::*;

/// Binary availability filter for a candidate stay window
mod availability;
pub use availability::*;

/// Pricing calculator for nightly and full-event modes
mod pricing;
pub use pricing::*;

/// Cart line items and the order-creation hand-off contract
mod cart;
pub use cart::*;
