//! Repository implementations for database operations.

pub mod convention;

pub use convention::ConventionRepository;
