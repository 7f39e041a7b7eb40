//! Price resolution for a client, category and stay date.
//!
//! Resolution order inside the winning convention: flat monthly rate if set,
//! else the consulted month's override, else the default price. The resolver
//! returns the undiscounted base figure; `discount_percent` is informational
//! and applying it stays with the caller (see [`final_price`]).

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::warn;

use crate::models::Convention;

/// Which rule produced a resolved price.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PriceSource {
    FlatMonthlyRate,
    MonthlyOverride,
    DefaultPrice,
}

impl PriceSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            PriceSource::FlatMonthlyRate => "flat_monthly_rate",
            PriceSource::MonthlyOverride => "monthly_override",
            PriceSource::DefaultPrice => "default_price",
        }
    }
}

/// A resolved base price with its provenance.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceQuote {
    pub amount: Decimal,
    pub convention_id: i64,
    pub source: PriceSource,
}

/// Resolves the applicable base price among the given conventions.
///
/// `target_date` drives validity-window containment. The monthly slot that is
/// consulted normally follows from `target_date`, but `explicit_month`
/// (1-12) overrides it so callers can ask "what would January's rate be" as
/// of an arbitrary date.
///
/// Returns `None` when no active convention covers the date; callers fall
/// back to the standard (non-convention) rate. Should more than one active
/// convention cover the date the overlap invariant has been violated out of
/// band; the most recently created record (highest id) wins and a warning is
/// logged.
pub fn resolve_price(
    conventions: &[Convention],
    target_date: NaiveDate,
    explicit_month: Option<u32>,
) -> Option<PriceQuote> {
    let month = explicit_month.unwrap_or_else(|| target_date.month());

    let matching: Vec<&Convention> = conventions
        .iter()
        .filter(|c| c.active && c.covers(target_date))
        .collect();

    let convention = matching.iter().copied().max_by_key(|c| c.id)?;

    if matching.len() > 1 {
        warn!(
            client_id = convention.client_id,
            category_id = convention.category_id,
            date = %target_date,
            matches = matching.len(),
            selected_id = convention.id,
            "overlap invariant violated: multiple active conventions cover the date"
        );
    }

    if let Some(flat) = convention.flat_monthly_rate {
        return Some(PriceQuote {
            amount: flat,
            convention_id: convention.id,
            source: PriceSource::FlatMonthlyRate,
        });
    }

    if let Some(override_price) = convention.monthly_prices.for_month(month) {
        return Some(PriceQuote {
            amount: override_price,
            convention_id: convention.id,
            source: PriceSource::MonthlyOverride,
        });
    }

    Some(PriceQuote {
        amount: convention.default_price,
        convention_id: convention.id,
        source: PriceSource::DefaultPrice,
    })
}

/// Applies the informational discount to a resolved base price.
///
/// Billing callers that honor `discount_percent` share this one
/// implementation; the resolver itself never calls it.
pub fn final_price(base: Decimal, discount_percent: Option<Decimal>) -> Decimal {
    match discount_percent {
        Some(percent) => base * (Decimal::ONE - percent / Decimal::ONE_HUNDRED),
        None => base,
    }
}
