//! Repository for the `gastos` table, including the bulk split.

use agronexo_core::fanout::split_evenly;
use agronexo_core::types::DbId;
use sqlx::PgPool;

use crate::error::RepoResult;
use crate::models::gasto::{BulkGasto, BulkGastoResult, CreateGasto, Gasto, UpdateGasto};
use crate::repositories::AnimalRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, concepto, monto, categoria, lote_id, animal_id, fecha";

/// Provides CRUD operations for expenses.
pub struct GastoRepo;

impl GastoRepo {
    /// Insert a new expense, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateGasto) -> Result<Gasto, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let gasto = Self::insert_in_tx(&mut tx, input).await?;
        tx.commit().await?;
        Ok(gasto)
    }

    /// Split `monto_total` evenly across the active animals matched by the
    /// selector, one expense row per animal.
    ///
    /// Fails without writing anything when the amount is not positive or
    /// the selector matches no animal.
    pub async fn create_bulk(pool: &PgPool, input: &BulkGasto) -> RepoResult<BulkGastoResult> {
        let mut tx = pool.begin().await?;
        let animals = AnimalRepo::resolve_selector_in_tx(&mut tx, &input.objetivo).await?;
        let share = split_evenly(input.monto_total, animals.len())?;

        let mut animal_ids = Vec::with_capacity(animals.len());
        for animal in &animals {
            let gasto = CreateGasto {
                concepto: input.concepto.clone(),
                monto: share,
                categoria: input.categoria.clone(),
                lote_id: None,
                animal_id: Some(animal.id),
                fecha: input.fecha,
            };
            Self::insert_in_tx(&mut tx, &gasto).await?;
            animal_ids.push(animal.id);
        }

        tx.commit().await?;
        Ok(BulkGastoResult {
            gastos_creados: animal_ids.len(),
            monto_por_animal: share,
            animal_ids,
        })
    }

    /// Find an expense by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Gasto>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM gastos WHERE id = $1");
        sqlx::query_as::<_, Gasto>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List every expense, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Gasto>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM gastos ORDER BY fecha DESC, id DESC");
        sqlx::query_as::<_, Gasto>(&query).fetch_all(pool).await
    }

    /// Expenses booked against one animal, oldest first.
    pub async fn list_for_animal(
        pool: &PgPool,
        animal_id: DbId,
    ) -> Result<Vec<Gasto>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM gastos WHERE animal_id = $1 ORDER BY fecha, id");
        sqlx::query_as::<_, Gasto>(&query)
            .bind(animal_id)
            .fetch_all(pool)
            .await
    }

    /// Update an expense. Only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateGasto,
    ) -> Result<Option<Gasto>, sqlx::Error> {
        let query = format!(
            "UPDATE gastos SET \
                concepto = COALESCE($2, concepto), \
                monto = COALESCE($3, monto), \
                categoria = COALESCE($4, categoria), \
                fecha = COALESCE($5, fecha), \
                lote_id = CASE WHEN $6 THEN $7 ELSE lote_id END, \
                animal_id = CASE WHEN $8 THEN $9 ELSE animal_id END \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Gasto>(&query)
            .bind(id)
            .bind(&input.concepto)
            .bind(input.monto)
            .bind(&input.categoria)
            .bind(input.fecha)
            .bind(input.lote_id.is_some())
            .bind(input.lote_id.flatten())
            .bind(input.animal_id.is_some())
            .bind(input.animal_id.flatten())
            .fetch_optional(pool)
            .await
    }

    /// Delete an expense. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM gastos WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Transaction helpers
    // -----------------------------------------------------------------------

    pub(crate) async fn insert_in_tx(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        input: &CreateGasto,
    ) -> Result<Gasto, sqlx::Error> {
        let query = format!(
            "INSERT INTO gastos (concepto, monto, categoria, lote_id, animal_id, fecha) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Gasto>(&query)
            .bind(&input.concepto)
            .bind(input.monto)
            .bind(&input.categoria)
            .bind(input.lote_id)
            .bind(input.animal_id)
            .bind(input.fecha)
            .fetch_one(&mut **tx)
            .await
    }
}
