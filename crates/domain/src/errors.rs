//! Domain error types for the convention write path.

use thiserror::Error;

/// Errors produced by the convention upsert and status operations.
///
/// The first two variants guarantee nothing was written; storage failures are
/// surfaced unmodified and never retried here.
#[derive(Debug, Error)]
pub enum UpsertError {
    /// Caller-fixable bad input.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The candidate validity window intersects an active convention for the
    /// same (client, category) scope.
    #[error(
        "validity window overlaps active convention {conflicting_id} for client {client_id}, category {category_id}"
    )]
    OverlapConflict {
        client_id: i64,
        category_id: i64,
        conflicting_id: i64,
    },

    /// An update targeted an id that does not exist.
    #[error("convention {0} not found")]
    NotFound(i64),

    /// Infrastructure failure from the storage layer.
    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_display() {
        let err = UpsertError::Validation("defaultPrice: must be greater than zero".to_string());
        assert!(err.to_string().contains("defaultPrice"));
    }

    #[test]
    fn test_overlap_conflict_display() {
        let err = UpsertError::OverlapConflict {
            client_id: 11,
            category_id: 1,
            conflicting_id: 42,
        };
        let message = err.to_string();
        assert!(message.contains("42"));
        assert!(message.contains("client 11"));
    }

    #[test]
    fn test_not_found_display() {
        let err = UpsertError::NotFound(7);
        assert_eq!(err.to_string(), "convention 7 not found");
    }

    #[test]
    fn test_storage_from_sqlx() {
        let err: UpsertError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, UpsertError::Storage(_)));
    }
}
