//! Repository for the `lluvias` table.

use agronexo_core::types::DbId;
use sqlx::PgPool;

use crate::models::lluvia::{CreateLluvia, Lluvia, UpdateLluvia};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, lote_id, milimetros, fecha";

/// Provides CRUD operations for rainfall records.
pub struct LluviaRepo;

impl LluviaRepo {
    /// Insert a new rainfall record, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateLluvia) -> Result<Lluvia, sqlx::Error> {
        let query = format!(
            "INSERT INTO lluvias (lote_id, milimetros, fecha) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Lluvia>(&query)
            .bind(input.lote_id)
            .bind(input.milimetros)
            .bind(input.fecha)
            .fetch_one(pool)
            .await
    }

    /// List every rainfall record, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Lluvia>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM lluvias ORDER BY fecha DESC, id DESC");
        sqlx::query_as::<_, Lluvia>(&query).fetch_all(pool).await
    }

    /// Correct a rainfall record. Only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateLluvia,
    ) -> Result<Option<Lluvia>, sqlx::Error> {
        let query = format!(
            "UPDATE lluvias SET \
                milimetros = COALESCE($2, milimetros), \
                fecha = COALESCE($3, fecha) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Lluvia>(&query)
            .bind(id)
            .bind(input.milimetros)
            .bind(input.fecha)
            .fetch_optional(pool)
            .await
    }

    /// Delete a rainfall record. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM lluvias WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
