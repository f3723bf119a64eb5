//! Repository for the `insumos` table.

use agronexo_core::types::DbId;
use sqlx::PgPool;

use crate::models::insumo::{CreateInsumo, Insumo, UpdateInsumo};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, nombre, stock, unidad, punto_reposicion, created_at, updated_at";

/// Provides CRUD operations for the supply inventory.
pub struct InsumoRepo;

impl InsumoRepo {
    /// Insert a supply item, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateInsumo) -> Result<Insumo, sqlx::Error> {
        let query = format!(
            "INSERT INTO insumos (nombre, stock, unidad, punto_reposicion) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Insumo>(&query)
            .bind(&input.nombre)
            .bind(input.stock)
            .bind(&input.unidad)
            .bind(input.punto_reposicion)
            .fetch_one(pool)
            .await
    }

    /// Find a supply item by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Insumo>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM insumos WHERE id = $1");
        sqlx::query_as::<_, Insumo>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List every supply item ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Insumo>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM insumos ORDER BY nombre, id");
        sqlx::query_as::<_, Insumo>(&query).fetch_all(pool).await
    }

    /// Items whose stock has fallen to or below their reorder point.
    pub async fn list_below_reorder(pool: &PgPool) -> Result<Vec<Insumo>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM insumos WHERE stock <= punto_reposicion ORDER BY nombre, id"
        );
        sqlx::query_as::<_, Insumo>(&query).fetch_all(pool).await
    }

    /// Update a supply item. Only non-`None` fields are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateInsumo,
    ) -> Result<Option<Insumo>, sqlx::Error> {
        let query = format!(
            "UPDATE insumos SET \
                nombre = COALESCE($2, nombre), \
                stock = COALESCE($3, stock), \
                unidad = COALESCE($4, unidad), \
                punto_reposicion = COALESCE($5, punto_reposicion) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Insumo>(&query)
            .bind(id)
            .bind(&input.nombre)
            .bind(input.stock)
            .bind(&input.unidad)
            .bind(input.punto_reposicion)
            .fetch_optional(pool)
            .await
    }

    /// Delete a supply item. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM insumos WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
