use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use domain::errors::UpsertError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Overlap conflict: {0}")]
    OverlapConflict(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match &self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone()),
            // Distinct code so admin UIs can render a "dates already covered"
            // message instead of a generic conflict.
            ApiError::OverlapConflict(msg) => {
                (StatusCode::CONFLICT, "overlap_conflict", msg.clone())
            }
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg.clone()),
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, "validation_error", msg.clone()),
            ApiError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".into(),
                )
            }
            ApiError::ServiceUnavailable(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "service_unavailable",
                msg.clone(),
            ),
        };

        let body = ErrorBody {
            error: error_code.into(),
            message,
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => ApiError::NotFound("Resource not found".into()),
            sqlx::Error::Database(db_err) => {
                if let Some(code) = db_err.code() {
                    match code.as_ref() {
                        "23505" => ApiError::Conflict("Resource already exists".into()),
                        "23514" => {
                            ApiError::Validation(format!("Constraint violated: {}", db_err))
                        }
                        _ => ApiError::Internal(format!("Database error: {}", db_err)),
                    }
                } else {
                    ApiError::Internal(format!("Database error: {}", db_err))
                }
            }
            _ => ApiError::Internal(format!("Database error: {}", err)),
        }
    }
}

impl From<UpsertError> for ApiError {
    fn from(err: UpsertError) -> Self {
        match err {
            UpsertError::Validation(msg) => ApiError::Validation(msg),
            UpsertError::OverlapConflict { .. } => ApiError::OverlapConflict(err.to_string()),
            UpsertError::NotFound(id) => ApiError::NotFound(format!("Convention {} not found", id)),
            UpsertError::Storage(source) => source.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_api_error_not_found() {
        let error = ApiError::NotFound("convention not found".to_string());
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_api_error_overlap_conflict() {
        let error = ApiError::OverlapConflict("dates already covered".to_string());
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_api_error_validation() {
        let error = ApiError::Validation("invalid input".to_string());
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_api_error_internal() {
        let error = ApiError::Internal("database connection failed".to_string());
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_api_error_display() {
        assert_eq!(
            format!("{}", ApiError::NotFound("test".to_string())),
            "Not found: test"
        );
        assert_eq!(
            format!("{}", ApiError::OverlapConflict("test".to_string())),
            "Overlap conflict: test"
        );
        assert_eq!(
            format!("{}", ApiError::Validation("test".to_string())),
            "Validation error: test"
        );
    }

    #[test]
    fn test_from_sqlx_row_not_found() {
        let error: ApiError = sqlx::Error::RowNotFound.into();
        match error {
            ApiError::NotFound(msg) => assert_eq!(msg, "Resource not found"),
            _ => panic!("Expected NotFound error"),
        }
    }

    #[test]
    fn test_from_upsert_validation() {
        let error: ApiError = UpsertError::Validation("defaultPrice: bad".to_string()).into();
        assert!(matches!(error, ApiError::Validation(_)));
    }

    #[test]
    fn test_from_upsert_overlap_conflict() {
        let error: ApiError = UpsertError::OverlapConflict {
            client_id: 11,
            category_id: 1,
            conflicting_id: 42,
        }
        .into();
        match error {
            ApiError::OverlapConflict(msg) => assert!(msg.contains("42")),
            _ => panic!("Expected OverlapConflict error"),
        }
    }

    #[test]
    fn test_from_upsert_not_found() {
        let error: ApiError = UpsertError::NotFound(7).into();
        match error {
            ApiError::NotFound(msg) => assert!(msg.contains('7')),
            _ => panic!("Expected NotFound error"),
        }
    }

    #[test]
    fn test_from_upsert_storage_passes_through() {
        let error: ApiError = UpsertError::Storage(sqlx::Error::PoolTimedOut).into();
        assert!(matches!(error, ApiError::Internal(_)));
    }
}
