//! Database entity definitions.
//!
//! Entities are direct mappings to database rows.

pub mod convention;

pub use convention::ConventionEntity;
