//! Price resolution endpoint handlers.

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::NaiveDate;
use persistence::repositories::ConventionRepository;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::app::AppState;
use crate::error::ApiError;
use domain::models::Convention;
use domain::services::price_resolution::{self, PriceSource};

/// Query parameters for convention price resolution.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConventionPriceQuery {
    pub client_id: i64,
    pub category_id: i64,
    /// Stay date; drives validity-window containment.
    pub date: NaiveDate,
    /// Optional month-of-year (1-12) overriding which monthly slot is
    /// consulted, independent of `date`.
    pub month: Option<u32>,
}

/// Resolved price response. A null price means no convention applies and the
/// caller falls back to the standard rate.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConventionPriceResponse {
    pub price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub convention_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<PriceSource>,
}

/// Resolve the applicable base price for a client, category and date.
///
/// GET /api/v1/pricing/convention?clientId=..&categoryId=..&date=..[&month=..]
///
/// Returns the undiscounted figure; `discountPercent` on the convention is
/// informational and applying it stays with the caller.
pub async fn get_convention_price(
    State(state): State<AppState>,
    Query(query): Query<ConventionPriceQuery>,
) -> Result<Json<ConventionPriceResponse>, ApiError> {
    if let Some(month) = query.month {
        if !(1..=12).contains(&month) {
            return Err(ApiError::Validation(
                "month must be between 1 and 12".to_string(),
            ));
        }
    }

    let repository = ConventionRepository::new(state.pool.clone());
    let conventions: Vec<Convention> = repository
        .find_active_containing(query.client_id, query.category_id, query.date)
        .await?
        .into_iter()
        .map(Convention::from)
        .collect();

    let response = match price_resolution::resolve_price(&conventions, query.date, query.month) {
        Some(quote) => ConventionPriceResponse {
            price: Some(quote.amount),
            convention_id: Some(quote.convention_id),
            source: Some(quote.source),
        },
        // Not an error: "no convention applies" is a valid answer.
        None => ConventionPriceResponse {
            price: None,
            convention_id: None,
            source: None,
        },
    };

    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_price_query_deserialization() {
        let query: ConventionPriceQuery = serde_json::from_str(
            r#"{"clientId": 11, "categoryId": 1, "date": "2024-07-15", "month": 1}"#,
        )
        .unwrap();
        assert_eq!(query.client_id, 11);
        assert_eq!(query.date, NaiveDate::from_ymd_opt(2024, 7, 15).unwrap());
        assert_eq!(query.month, Some(1));
    }

    #[test]
    fn test_price_response_with_quote() {
        let response = ConventionPriceResponse {
            price: Some(dec!(130)),
            convention_id: Some(42),
            source: Some(PriceSource::MonthlyOverride),
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["conventionId"], 42);
        assert_eq!(json["source"], "monthly_override");
        assert!(!json["price"].is_null());
    }

    #[test]
    fn test_price_response_not_found_is_null_not_error() {
        let response = ConventionPriceResponse {
            price: None,
            convention_id: None,
            source: None,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert!(json["price"].is_null());
        assert!(json.get("conventionId").is_none());
        assert!(json.get("source").is_none());
    }
}
