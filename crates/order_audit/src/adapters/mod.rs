// Rust guideline compliant 2026-10-16

//! Adapters (secondary ports) for the order audit binaries.
//!
//! Each sub-module implements one hexagonal port trait defined in the
//! `domain` crate. The SQLite source is loaded only by the
//! `order_audit_sqlite` entry point.

pub mod demo_orders;
pub mod env_settings;
pub mod log_sink;
