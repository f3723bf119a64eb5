//! Repository for the reproduction catalogs (`protocolos`,
//! `insumos_geneticos`). Both share one shape; every method takes the
//! [`CatalogTable`] to address.

use agronexo_core::error::CoreError;
use agronexo_core::types::DbId;
use sqlx::PgPool;

use crate::error::RepoResult;
use crate::models::catalog::{CatalogItem, CatalogTable, CreateCatalogItem, UpdateCatalogItem};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, nombre, costo, created_at";

/// Provides CRUD operations for the costing catalogs.
pub struct CatalogRepo;

impl CatalogRepo {
    /// Insert a catalog entry, returning the created row.
    pub async fn create(
        pool: &PgPool,
        table: CatalogTable,
        input: &CreateCatalogItem,
    ) -> Result<CatalogItem, sqlx::Error> {
        let query = format!(
            "INSERT INTO {} (nombre, costo) VALUES ($1, $2) RETURNING {COLUMNS}",
            table.table_name()
        );
        sqlx::query_as::<_, CatalogItem>(&query)
            .bind(&input.nombre)
            .bind(input.costo)
            .fetch_one(pool)
            .await
    }

    /// Find a catalog entry by its internal ID.
    pub async fn find_by_id(
        pool: &PgPool,
        table: CatalogTable,
        id: DbId,
    ) -> Result<Option<CatalogItem>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM {} WHERE id = $1", table.table_name());
        sqlx::query_as::<_, CatalogItem>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a catalog ordered by name.
    pub async fn list(pool: &PgPool, table: CatalogTable) -> Result<Vec<CatalogItem>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM {} ORDER BY nombre, id", table.table_name());
        sqlx::query_as::<_, CatalogItem>(&query).fetch_all(pool).await
    }

    /// Update a catalog entry. Only non-`None` fields are applied. Costs
    /// already booked on past events are not recomputed.
    pub async fn update(
        pool: &PgPool,
        table: CatalogTable,
        id: DbId,
        input: &UpdateCatalogItem,
    ) -> Result<Option<CatalogItem>, sqlx::Error> {
        let query = format!(
            "UPDATE {} SET nombre = COALESCE($2, nombre), costo = COALESCE($3, costo) \
             WHERE id = $1 RETURNING {COLUMNS}",
            table.table_name()
        );
        sqlx::query_as::<_, CatalogItem>(&query)
            .bind(id)
            .bind(&input.nombre)
            .bind(input.costo)
            .fetch_optional(pool)
            .await
    }

    /// Delete a catalog entry. Events that used it keep their booked cost
    /// with the reference cleared.
    pub async fn delete(pool: &PgPool, table: CatalogTable, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let clear = format!(
            "UPDATE eventos_reproductivos SET {col} = NULL WHERE {col} = $1",
            col = table.event_column()
        );
        sqlx::query(&clear).bind(id).execute(&mut *tx).await?;
        let delete = format!("DELETE FROM {} WHERE id = $1", table.table_name());
        let result = sqlx::query(&delete).bind(id).execute(&mut *tx).await?;
        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Transaction helpers
    // -----------------------------------------------------------------------

    /// Cost of an optional catalog reference; zero when absent.
    pub(crate) async fn cost_in_tx(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        table: CatalogTable,
        id: Option<DbId>,
    ) -> RepoResult<f64> {
        let Some(id) = id else {
            return Ok(0.0);
        };
        let query = format!("SELECT costo FROM {} WHERE id = $1", table.table_name());
        let costo: Option<f64> = sqlx::query_scalar(&query)
            .bind(id)
            .fetch_optional(&mut **tx)
            .await?;
        Ok(costo.ok_or(CoreError::NotFound {
            entity: table.entity_name(),
            id,
        })?)
    }
}
