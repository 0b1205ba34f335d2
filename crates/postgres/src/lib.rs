//! # Postgres
//!
//! This crate provides the PostgreSQL connection pool for the event booking
//! application.

/// Connection pool creation and connectivity checks
pub mod database;
