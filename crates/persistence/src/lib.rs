//! Persistence layer for the tariff convention engine.
//!
//! This crate contains:
//! - Database connection management
//! - Entity definitions (database row mappings)
//! - The convention repository (the Convention Store)

pub mod db;
pub mod entities;
pub mod metrics;
pub mod repositories;
