//! # Web Handlers for the Event Booking Application
//!
//! This crate provides the web handlers for the campsite availability and
//! pricing API.

/// Storage service loading campground snapshots for the engine
mod booking_store;
pub use booking_store::*;

/// Shopper-facing availability map and occupancy report handlers
mod availability_handlers;
pub use availability_handlers::*;

/// Stay pricing handlers
mod pricing_handlers;
pub use pricing_handlers::*;

/// Cart and checkout handlers
mod cart_handlers;
pub use cart_handlers::*;
