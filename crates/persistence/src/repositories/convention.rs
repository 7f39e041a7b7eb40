//! Convention repository for database operations.
//!
//! Persistence boundary only: no business validation happens here. Write
//! helpers take an open transaction so the orchestrator can bracket them with
//! the per-scope advisory lock.

use chrono::NaiveDate;
use sqlx::{PgPool, Postgres, Transaction};

use crate::entities::ConventionEntity;
use crate::metrics::timed;
use domain::models::UpsertConventionRequest;

/// Repository for convention-related database operations.
#[derive(Clone)]
pub struct ConventionRepository {
    pool: PgPool,
}

impl ConventionRepository {
    /// Creates a new ConventionRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a transaction on the underlying pool.
    pub async fn begin(&self) -> Result<Transaction<'static, Postgres>, sqlx::Error> {
        self.pool.begin().await
    }

    /// Find a convention by id.
    pub async fn find_by_id(&self, id: i64) -> Result<Option<ConventionEntity>, sqlx::Error> {
        timed("find_convention_by_id", async {
            sqlx::query_as::<_, ConventionEntity>(
                r#"
                SELECT * FROM conventions WHERE id = $1
                "#,
            )
            .bind(id)
            .fetch_optional(&self.pool)
            .await
        })
        .await
    }

    /// All conventions for a client, newest validity window first.
    pub async fn find_by_client_id(
        &self,
        client_id: i64,
        active_only: bool,
    ) -> Result<Vec<ConventionEntity>, sqlx::Error> {
        timed("find_conventions_by_client", async {
            sqlx::query_as::<_, ConventionEntity>(
                r#"
                SELECT * FROM conventions
                WHERE client_id = $1 AND ($2 = false OR active = true)
                ORDER BY validity_start DESC, id DESC
                "#,
            )
            .bind(client_id)
            .bind(active_only)
            .fetch_all(&self.pool)
            .await
        })
        .await
    }

    /// Active conventions for a scope key whose validity window contains
    /// `date`. Newest first so the defensive tie-break needs no extra sort.
    pub async fn find_active_containing(
        &self,
        client_id: i64,
        category_id: i64,
        date: NaiveDate,
    ) -> Result<Vec<ConventionEntity>, sqlx::Error> {
        timed("find_active_conventions_containing", async {
            sqlx::query_as::<_, ConventionEntity>(
                r#"
                SELECT * FROM conventions
                WHERE client_id = $1
                  AND category_id = $2
                  AND active = true
                  AND validity_start <= $3
                  AND (validity_end IS NULL OR validity_end >= $3)
                ORDER BY id DESC
                "#,
            )
            .bind(client_id)
            .bind(category_id)
            .bind(date)
            .fetch_all(&self.pool)
            .await
        })
        .await
    }

    /// Active conventions whose validity window intersects [start, end],
    /// optionally narrowed to one hotel and/or category.
    pub async fn find_active_in_period(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        hotel_id: Option<i64>,
        category_id: Option<i64>,
    ) -> Result<Vec<ConventionEntity>, sqlx::Error> {
        timed("find_active_conventions_in_period", async {
            sqlx::query_as::<_, ConventionEntity>(
                r#"
                SELECT * FROM conventions
                WHERE active = true
                  AND validity_start <= $2
                  AND (validity_end IS NULL OR validity_end >= $1)
                  AND ($3::BIGINT IS NULL OR hotel_id = $3)
                  AND ($4::BIGINT IS NULL OR category_id = $4)
                ORDER BY client_id, validity_start
                "#,
            )
            .bind(start)
            .bind(end)
            .bind(hotel_id)
            .bind(category_id)
            .fetch_all(&self.pool)
            .await
        })
        .await
    }

    /// Delete a convention. Returns the number of rows deleted (0 or 1).
    pub async fn delete(&self, id: i64) -> Result<u64, sqlx::Error> {
        timed("delete_convention", async {
            let result = sqlx::query(
                r#"
                DELETE FROM conventions WHERE id = $1
                "#,
            )
            .bind(id)
            .execute(&self.pool)
            .await?;
            Ok(result.rows_affected())
        })
        .await
    }

    /// Takes the transaction-scoped advisory lock for a (client, category)
    /// scope key. Held until the transaction commits or rolls back, it
    /// serializes every check-then-write sequence touching the same scope
    /// across all service instances sharing the database.
    pub async fn lock_scope(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        client_id: i64,
        category_id: i64,
    ) -> Result<(), sqlx::Error> {
        timed("lock_convention_scope", async {
            sqlx::query("SELECT pg_advisory_xact_lock(hashtextextended($1, 0))")
                .bind(format!("conventions:{}:{}", client_id, category_id))
                .execute(&mut **tx)
                .await?;
            Ok(())
        })
        .await
    }

    /// Find a convention by id inside an open transaction.
    pub async fn find_by_id_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id: i64,
    ) -> Result<Option<ConventionEntity>, sqlx::Error> {
        timed("find_convention_by_id_tx", async {
            sqlx::query_as::<_, ConventionEntity>(
                r#"
                SELECT * FROM conventions WHERE id = $1
                "#,
            )
            .bind(id)
            .fetch_optional(&mut **tx)
            .await
        })
        .await
    }

    /// Active conventions for a scope key, read inside an open transaction
    /// (after [`Self::lock_scope`]) so the overlap decision and the write
    /// observe the same state.
    pub async fn find_active_by_scope_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        client_id: i64,
        category_id: i64,
    ) -> Result<Vec<ConventionEntity>, sqlx::Error> {
        timed("find_active_conventions_by_scope_tx", async {
            sqlx::query_as::<_, ConventionEntity>(
                r#"
                SELECT * FROM conventions
                WHERE client_id = $1 AND category_id = $2 AND active = true
                ORDER BY validity_start
                "#,
            )
            .bind(client_id)
            .bind(category_id)
            .fetch_all(&mut **tx)
            .await
        })
        .await
    }

    /// Insert a new convention. All twelve monthly slots are written, unset
    /// ones as NULL.
    pub async fn insert(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        input: &UpsertConventionRequest,
    ) -> Result<ConventionEntity, sqlx::Error> {
        let months = input.monthly_prices.as_slots();
        timed("insert_convention", async {
            let mut query = sqlx::query_as::<_, ConventionEntity>(
                r#"
                INSERT INTO conventions (
                    client_id, category_id, hotel_id,
                    validity_start, validity_end, default_price,
                    price_january, price_february, price_march, price_april,
                    price_may, price_june, price_july, price_august,
                    price_september, price_october, price_november, price_december,
                    discount_percent, flat_monthly_rate, notes, active
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12,
                        $13, $14, $15, $16, $17, $18, $19, $20, $21, $22)
                RETURNING *
                "#,
            )
            .bind(input.client_id)
            .bind(input.category_id)
            .bind(input.hotel_id)
            .bind(input.validity_start)
            .bind(input.validity_end)
            .bind(input.default_price);
            for slot in months {
                query = query.bind(slot);
            }
            query
                .bind(input.discount_percent)
                .bind(input.flat_monthly_rate)
                .bind(input.notes.as_deref())
                .bind(input.active)
                .fetch_one(&mut **tx)
                .await
        })
        .await
    }

    /// Full replace of a convention's mutable fields. The twelve monthly
    /// columns are overwritten from the input, never merged with the stored
    /// values. Returns None when the id does not exist.
    pub async fn update(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id: i64,
        input: &UpsertConventionRequest,
    ) -> Result<Option<ConventionEntity>, sqlx::Error> {
        let months = input.monthly_prices.as_slots();
        timed("update_convention", async {
            let mut query = sqlx::query_as::<_, ConventionEntity>(
                r#"
                UPDATE conventions SET
                    client_id = $2,
                    category_id = $3,
                    hotel_id = $4,
                    validity_start = $5,
                    validity_end = $6,
                    default_price = $7,
                    price_january = $8,
                    price_february = $9,
                    price_march = $10,
                    price_april = $11,
                    price_may = $12,
                    price_june = $13,
                    price_july = $14,
                    price_august = $15,
                    price_september = $16,
                    price_october = $17,
                    price_november = $18,
                    price_december = $19,
                    discount_percent = $20,
                    flat_monthly_rate = $21,
                    notes = $22,
                    active = $23,
                    updated_at = NOW()
                WHERE id = $1
                RETURNING *
                "#,
            )
            .bind(id)
            .bind(input.client_id)
            .bind(input.category_id)
            .bind(input.hotel_id)
            .bind(input.validity_start)
            .bind(input.validity_end)
            .bind(input.default_price);
            for slot in months {
                query = query.bind(slot);
            }
            query
                .bind(input.discount_percent)
                .bind(input.flat_monthly_rate)
                .bind(input.notes.as_deref())
                .bind(input.active)
                .fetch_optional(&mut **tx)
                .await
        })
        .await
    }

    /// Flip the active flag. Returns None when the id does not exist.
    pub async fn set_active(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id: i64,
        active: bool,
    ) -> Result<Option<ConventionEntity>, sqlx::Error> {
        timed("set_convention_active", async {
            sqlx::query_as::<_, ConventionEntity>(
                r#"
                UPDATE conventions
                SET active = $2, updated_at = NOW()
                WHERE id = $1
                RETURNING *
                "#,
            )
            .bind(id)
            .bind(active)
            .fetch_optional(&mut **tx)
            .await
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_repository_creation() {
        // The ConventionRepository is a thin wrapper over a PgPool; behavior
        // is covered by the integration tests in crates/api/tests.
    }
}
