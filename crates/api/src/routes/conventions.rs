//! Convention endpoint handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use persistence::repositories::ConventionRepository;
use tracing::info;

use crate::app::AppState;
use crate::error::ApiError;
use crate::services;
use domain::models::convention::{
    ConventionResponse, ListConventionsQuery, ListConventionsResponse, PeriodQuery,
    StatusUpdateRequest, UpsertConventionRequest, UpsertConventionResponse,
};
use domain::models::Convention;

/// Create or fully replace a convention.
///
/// POST /api/v1/conventions
///
/// A body without `id` creates; with `id` it replaces the stored record's
/// mutable fields, monthly map included (full replace, never merged).
pub async fn upsert_convention(
    State(state): State<AppState>,
    Json(request): Json<UpsertConventionRequest>,
) -> Result<(StatusCode, Json<UpsertConventionResponse>), ApiError> {
    let repository = ConventionRepository::new(state.pool.clone());
    let outcome = services::upsert_convention(&repository, request).await?;

    let status = if outcome.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    Ok((
        status,
        Json(UpsertConventionResponse {
            id: outcome.convention.id,
            created: outcome.created,
        }),
    ))
}

/// List a client's conventions, newest validity window first.
///
/// GET /api/v1/conventions?clientId=<id>[&activeOnly=true]
pub async fn list_conventions(
    State(state): State<AppState>,
    Query(query): Query<ListConventionsQuery>,
) -> Result<Json<ListConventionsResponse>, ApiError> {
    let repository = ConventionRepository::new(state.pool.clone());
    let entities = repository
        .find_by_client_id(query.client_id, query.active_only)
        .await?;

    let conventions: Vec<ConventionResponse> = entities
        .into_iter()
        .map(|e| {
            let c: Convention = e.into();
            c.into()
        })
        .collect();

    let total = conventions.len();

    Ok(Json(ListConventionsResponse { conventions, total }))
}

/// List active conventions whose validity window intersects a period.
///
/// GET /api/v1/conventions/period?start=<date>&end=<date>[&hotelId=..][&categoryId=..]
pub async fn list_conventions_in_period(
    State(state): State<AppState>,
    Query(query): Query<PeriodQuery>,
) -> Result<Json<ListConventionsResponse>, ApiError> {
    if query.start > query.end {
        return Err(ApiError::Validation(
            "start must not be after end".to_string(),
        ));
    }

    let repository = ConventionRepository::new(state.pool.clone());
    let entities = repository
        .find_active_in_period(query.start, query.end, query.hotel_id, query.category_id)
        .await?;

    let conventions: Vec<ConventionResponse> = entities
        .into_iter()
        .map(|e| {
            let c: Convention = e.into();
            c.into()
        })
        .collect();

    let total = conventions.len();

    Ok(Json(ListConventionsResponse { conventions, total }))
}

/// Get a single convention by id.
///
/// GET /api/v1/conventions/:id
pub async fn get_convention(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ConventionResponse>, ApiError> {
    let repository = ConventionRepository::new(state.pool.clone());
    let entity = repository
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Convention not found".to_string()))?;

    let convention: Convention = entity.into();
    Ok(Json(convention.into()))
}

/// Activate or deactivate a convention.
///
/// PATCH /api/v1/conventions/:id/status
///
/// Reactivation re-runs the overlap check; a record whose window has been
/// covered since it was deactivated stays inactive and the call returns the
/// overlap conflict.
pub async fn update_convention_status(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<StatusUpdateRequest>,
) -> Result<Json<ConventionResponse>, ApiError> {
    let repository = ConventionRepository::new(state.pool.clone());
    let convention = services::set_convention_status(&repository, id, request.active).await?;

    Ok(Json(convention.into()))
}

/// Delete a convention.
///
/// DELETE /api/v1/conventions/:id
pub async fn delete_convention(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let repository = ConventionRepository::new(state.pool.clone());
    let rows_affected = repository.delete(id).await?;

    if rows_affected == 0 {
        return Err(ApiError::NotFound("Convention not found".to_string()));
    }

    info!(convention_id = id, "Convention deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_upsert_request_create_shape() {
        let json = r#"{
            "clientId": 11,
            "categoryId": 1,
            "validityStart": "2024-01-01",
            "validityEnd": "2024-12-31",
            "defaultPrice": 100,
            "monthlyPrices": {"july": 130}
        }"#;

        let request: UpsertConventionRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.id, None);
        assert_eq!(request.monthly_prices.july, Some(dec!(130)));
        assert!(request.active);
    }

    #[test]
    fn test_upsert_response_serialization() {
        let response = UpsertConventionResponse {
            id: 42,
            created: true,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["id"], 42);
        assert_eq!(json["created"], true);
    }

    #[test]
    fn test_period_query_deserialization() {
        let query: PeriodQuery =
            serde_json::from_str(r#"{"start": "2024-01-01", "end": "2024-12-31", "hotelId": 2}"#)
                .unwrap();
        assert_eq!(query.hotel_id, Some(2));
        assert_eq!(query.category_id, None);
    }
}
