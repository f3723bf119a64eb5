//! Repository for the `silos` table.

use agronexo_core::grain::check_capacity;
use agronexo_core::types::DbId;
use sqlx::PgPool;

use crate::error::RepoResult;
use crate::models::silo::{CreateSilo, Silo, UpdateSilo};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, nombre, tipo, cultivo, capacidad_kilos, kilos_actuales, created_at";

/// Provides CRUD operations for grain storage.
pub struct SiloRepo;

impl SiloRepo {
    /// Insert a new silo, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateSilo) -> Result<Silo, sqlx::Error> {
        let query = format!(
            "INSERT INTO silos (nombre, tipo, cultivo, capacidad_kilos, kilos_actuales) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Silo>(&query)
            .bind(&input.nombre)
            .bind(&input.tipo)
            .bind(&input.cultivo)
            .bind(input.capacidad_kilos)
            .bind(input.kilos_actuales)
            .fetch_one(pool)
            .await
    }

    /// Find a silo by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Silo>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM silos WHERE id = $1");
        sqlx::query_as::<_, Silo>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all silos ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Silo>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM silos ORDER BY nombre, id");
        sqlx::query_as::<_, Silo>(&query).fetch_all(pool).await
    }

    /// Update a silo. Only non-`None` fields are applied.
    ///
    /// A new capacity may not fall below the kilos currently stored, unless
    /// it is 0 (no limit).
    pub async fn update(pool: &PgPool, id: DbId, input: &UpdateSilo) -> RepoResult<Option<Silo>> {
        let mut tx = pool.begin().await?;
        let Some(current) = Self::lock_in_tx(&mut tx, id).await? else {
            return Ok(None);
        };
        if let Some(capacidad) = input.capacidad_kilos {
            check_capacity(capacidad, current.kilos_actuales)?;
        }

        let query = format!(
            "UPDATE silos SET \
                nombre = COALESCE($2, nombre), \
                tipo = COALESCE($3, tipo), \
                cultivo = COALESCE($4, cultivo), \
                capacidad_kilos = COALESCE($5, capacidad_kilos) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let silo = sqlx::query_as::<_, Silo>(&query)
            .bind(id)
            .bind(&input.nombre)
            .bind(&input.tipo)
            .bind(&input.cultivo)
            .bind(input.capacidad_kilos)
            .fetch_optional(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(silo)
    }

    /// Delete a silo. Harvests and grain sales that referenced it keep
    /// their rows with the reference cleared.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;
        for table in ["cosechas", "ventas_grano"] {
            let query = format!("UPDATE {table} SET silo_id = NULL WHERE silo_id = $1");
            sqlx::query(&query).bind(id).execute(&mut *tx).await?;
        }
        let result = sqlx::query("DELETE FROM silos WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Transaction helpers
    // -----------------------------------------------------------------------

    /// Lock and return a silo for the rest of the transaction.
    pub(crate) async fn lock_in_tx(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        id: DbId,
    ) -> Result<Option<Silo>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM silos WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Silo>(&query)
            .bind(id)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn set_stock_in_tx(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        id: DbId,
        kilos: f64,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE silos SET kilos_actuales = $2 WHERE id = $1")
            .bind(id)
            .bind(kilos)
            .execute(&mut **tx)
            .await?;
        Ok(())
    }
}
