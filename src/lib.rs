//! Work-attendance reconciliation engine.
//!
//! Merges punches from the external workforce ledger and the mobile capture
//! channel, resolves each employee's schedule through the override precedence
//! chain, segments raw timestamps into shifts (overnight shifts included),
//! and converts worked against planned minutes into categorized buckets:
//! normal time, two overtime tiers, and undertime.

pub mod config;
pub mod engine;
pub mod error;
pub mod model;
pub mod store;

pub use config::{EngineConfig, RestUndertimePolicy, UnplannedWorkPolicy};
pub use engine::ReconcileEngine;
pub use error::EngineError;
