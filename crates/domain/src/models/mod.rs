//! Domain models for the tariff convention engine.

pub mod convention;

pub use convention::{Convention, MonthlyPrices, UpsertConventionRequest};
