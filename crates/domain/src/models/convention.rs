//! Convention domain model.
//!
//! A convention is a negotiated pricing agreement between a client and the
//! residence for one room category, valid over a date window. Two pricing
//! modes exist: per-night (default price with optional per-month overrides)
//! and flat monthly package (a single rate that supersedes everything else).

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A negotiated client-specific pricing agreement for one room category.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Convention {
    pub id: i64,
    pub client_id: i64,
    pub category_id: i64,
    /// Establishment the agreement was negotiated for. Reporting only; the
    /// overlap scope is (client_id, category_id).
    pub hotel_id: Option<i64>,
    pub validity_start: NaiveDate,
    /// Absent means open-ended.
    pub validity_end: Option<NaiveDate>,
    pub default_price: Decimal,
    pub monthly_prices: MonthlyPrices,
    /// Informational. Resolution returns the undiscounted base price; callers
    /// that honor the discount apply it themselves.
    pub discount_percent: Option<Decimal>,
    /// Flat package rate. When set it is the sole authority for price inside
    /// the validity window.
    pub flat_monthly_rate: Option<Decimal>,
    pub notes: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Convention {
    /// True when `date` falls inside the validity window. Both ends are
    /// inclusive; an absent end means the window never closes.
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.validity_start <= date && self.validity_end.map_or(true, |end| date <= end)
    }
}

/// Sparse per-month price overrides for per-night pricing mode.
///
/// A month left unset falls back to the convention's default price. Stored
/// as twelve discrete nullable columns; an update replaces all twelve.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MonthlyPrices {
    pub january: Option<Decimal>,
    pub february: Option<Decimal>,
    pub march: Option<Decimal>,
    pub april: Option<Decimal>,
    pub may: Option<Decimal>,
    pub june: Option<Decimal>,
    pub july: Option<Decimal>,
    pub august: Option<Decimal>,
    pub september: Option<Decimal>,
    pub october: Option<Decimal>,
    pub november: Option<Decimal>,
    pub december: Option<Decimal>,
}

/// English month names, indexed by month-of-year minus one.
pub const MONTH_NAMES: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

impl MonthlyPrices {
    /// Override for a month-of-year (1-12). Returns `None` for unset months
    /// and for out-of-range input.
    pub fn for_month(&self, month: u32) -> Option<Decimal> {
        match month {
            1 => self.january,
            2 => self.february,
            3 => self.march,
            4 => self.april,
            5 => self.may,
            6 => self.june,
            7 => self.july,
            8 => self.august,
            9 => self.september,
            10 => self.october,
            11 => self.november,
            12 => self.december,
            _ => None,
        }
    }

    /// All twelve slots in calendar order, unset months included.
    pub fn as_slots(&self) -> [Option<Decimal>; 12] {
        [
            self.january,
            self.february,
            self.march,
            self.april,
            self.may,
            self.june,
            self.july,
            self.august,
            self.september,
            self.october,
            self.november,
            self.december,
        ]
    }

    /// `(month_name, value)` pairs for the months that carry an override.
    pub fn set_entries(&self) -> Vec<(&'static str, Decimal)> {
        self.as_slots()
            .iter()
            .enumerate()
            .filter_map(|(idx, slot)| slot.map(|value| (MONTH_NAMES[idx], value)))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.as_slots().iter().all(Option::is_none)
    }
}

fn default_active() -> bool {
    true
}

/// Payload for creating or updating a convention.
///
/// `id` absent means create; present means a full replace of the stored
/// record's mutable fields. The monthly map is replaced wholesale: months not
/// supplied here are cleared on the stored record, never merged.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpsertConventionRequest {
    pub id: Option<i64>,

    pub client_id: i64,

    pub category_id: i64,

    pub hotel_id: Option<i64>,

    pub validity_start: NaiveDate,

    pub validity_end: Option<NaiveDate>,

    pub default_price: Decimal,

    #[serde(default)]
    pub monthly_prices: MonthlyPrices,

    #[validate(custom(function = "crate::validation::validate_discount_percent"))]
    pub discount_percent: Option<Decimal>,

    #[validate(custom(function = "crate::validation::validate_positive_price"))]
    pub flat_monthly_rate: Option<Decimal>,

    #[validate(length(max = 2000, message = "Notes must be at most 2000 characters"))]
    pub notes: Option<String>,

    #[serde(default = "default_active")]
    pub active: bool,
}

impl UpsertConventionRequest {
    pub fn is_update(&self) -> bool {
        self.id.is_some()
    }
}

/// Response payload for a single convention.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConventionResponse {
    pub id: i64,
    pub client_id: i64,
    pub category_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hotel_id: Option<i64>,
    pub validity_start: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validity_end: Option<NaiveDate>,
    pub default_price: Decimal,
    pub monthly_prices: MonthlyPrices,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_percent: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flat_monthly_rate: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Convention> for ConventionResponse {
    fn from(c: Convention) -> Self {
        Self {
            id: c.id,
            client_id: c.client_id,
            category_id: c.category_id,
            hotel_id: c.hotel_id,
            validity_start: c.validity_start,
            validity_end: c.validity_end,
            default_price: c.default_price,
            monthly_prices: c.monthly_prices,
            discount_percent: c.discount_percent,
            flat_monthly_rate: c.flat_monthly_rate,
            notes: c.notes,
            active: c.active,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

/// Response for the upsert operation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertConventionResponse {
    pub id: i64,
    /// True when a new record was inserted, false on update.
    pub created: bool,
}

/// Response for listing conventions.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListConventionsResponse {
    pub conventions: Vec<ConventionResponse>,
    pub total: usize,
}

/// Query parameters for listing a client's conventions.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListConventionsQuery {
    pub client_id: i64,
    #[serde(default)]
    pub active_only: bool,
}

/// Query parameters for the period listing.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodQuery {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub hotel_id: Option<i64>,
    pub category_id: Option<i64>,
}

/// Request payload for activating or deactivating a convention.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdateRequest {
    pub active: bool,
}
