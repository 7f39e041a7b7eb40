//! Convention write orchestration.
//!
//! The only write path into the convention store. Validation, overlap
//! detection and the insert/replace commit as one atomic unit: the sequence
//! runs inside a transaction holding the per-scope advisory lock, so two
//! concurrent writers touching the same (client, category) scope serialize
//! and the second one sees the first one's committed row before deciding.

use tracing::info;

use domain::errors::UpsertError;
use domain::models::{Convention, UpsertConventionRequest};
use domain::services::overlap;
use domain::validation;
use persistence::repositories::ConventionRepository;

/// Result of a successful upsert.
#[derive(Debug, Clone)]
pub struct UpsertOutcome {
    pub convention: Convention,
    /// True when a new record was inserted, false on update.
    pub created: bool,
}

/// Creates or fully replaces a convention.
///
/// Order of operations, per the engine contract:
/// 1. Validate the payload; no store access on failure.
/// 2. Lock the (client, category) scope and re-read its active conventions
///    inside the transaction.
/// 3. Abort with an overlap conflict if the candidate window intersects any
///    of them (only when the candidate itself is active; an inactive draft
///    may sleep over a covered window).
/// 4. Insert, or fully replace the stored record's mutable fields.
pub async fn upsert_convention(
    repository: &ConventionRepository,
    input: UpsertConventionRequest,
) -> Result<UpsertOutcome, UpsertError> {
    validation::check_upsert_rules(&input)?;

    let mut tx = repository.begin().await?;
    repository
        .lock_scope(&mut tx, input.client_id, input.category_id)
        .await?;

    if input.active {
        let existing: Vec<Convention> = repository
            .find_active_by_scope_tx(&mut tx, input.client_id, input.category_id)
            .await?
            .into_iter()
            .map(Convention::from)
            .collect();

        if let Some(conflict) = overlap::find_conflict(
            &existing,
            input.validity_start,
            input.validity_end,
            input.id,
        ) {
            // Dropping the transaction rolls it back; nothing was written.
            return Err(UpsertError::OverlapConflict {
                client_id: input.client_id,
                category_id: input.category_id,
                conflicting_id: conflict.id,
            });
        }
    }

    let (entity, created) = match input.id {
        None => (repository.insert(&mut tx, &input).await?, true),
        Some(id) => {
            let updated = repository
                .update(&mut tx, id, &input)
                .await?
                .ok_or(UpsertError::NotFound(id))?;
            (updated, false)
        }
    };

    tx.commit().await?;

    let convention: Convention = entity.into();
    info!(
        convention_id = convention.id,
        client_id = convention.client_id,
        category_id = convention.category_id,
        created,
        "Convention upserted"
    );

    Ok(UpsertOutcome { convention, created })
}

/// Activates or deactivates a convention.
///
/// Deactivation is unconditional. Reactivation re-runs the overlap check
/// under the scope lock, because the record was invisible to every check
/// performed while it was inactive.
pub async fn set_convention_status(
    repository: &ConventionRepository,
    id: i64,
    active: bool,
) -> Result<Convention, UpsertError> {
    let mut tx = repository.begin().await?;

    let current = repository
        .find_by_id_tx(&mut tx, id)
        .await?
        .ok_or(UpsertError::NotFound(id))?;

    if active && !current.active {
        repository
            .lock_scope(&mut tx, current.client_id, current.category_id)
            .await?;

        let existing: Vec<Convention> = repository
            .find_active_by_scope_tx(&mut tx, current.client_id, current.category_id)
            .await?
            .into_iter()
            .map(Convention::from)
            .collect();

        if let Some(conflict) = overlap::find_conflict(
            &existing,
            current.validity_start,
            current.validity_end,
            Some(id),
        ) {
            return Err(UpsertError::OverlapConflict {
                client_id: current.client_id,
                category_id: current.category_id,
                conflicting_id: conflict.id,
            });
        }
    }

    let updated = repository
        .set_active(&mut tx, id, active)
        .await?
        .ok_or(UpsertError::NotFound(id))?;

    tx.commit().await?;

    info!(convention_id = id, active, "Convention status changed");

    Ok(updated.into())
}
