//! Business logic services.

pub mod overlap;
pub mod price_resolution;
