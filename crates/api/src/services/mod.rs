//! I/O-coordinating services.

pub mod conventions;

pub use conventions::{set_convention_status, upsert_convention, UpsertOutcome};
