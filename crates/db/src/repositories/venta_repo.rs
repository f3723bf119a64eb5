//! Repository for the `ventas` table (livestock sales).

use agronexo_core::error::CoreError;
use agronexo_core::livestock::in_withdrawal_period;
use agronexo_core::types::DbId;
use sqlx::PgPool;

use crate::error::RepoResult;
use crate::models::venta::{CreateVenta, Venta};
use crate::repositories::AnimalRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, animal_id, comprador, kilos_vendidos, precio_total, costo_historico, fecha";

/// Provides the livestock sales ledger.
pub struct VentaRepo;

impl VentaRepo {
    /// Register the sale of an animal.
    ///
    /// Snapshots the animal's accumulated expenses as `costo_historico`,
    /// deactivates it and takes it out of its parcel. The animal row and its
    /// weighings and expenses are kept. Fails with `Conflict` if the animal
    /// is no longer active or is still inside its withdrawal period.
    pub async fn register(pool: &PgPool, input: &CreateVenta) -> RepoResult<Venta> {
        let mut tx = pool.begin().await?;

        let animal = AnimalRepo::lock_in_tx(&mut tx, input.animal_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Animal",
                id: input.animal_id,
            })?;
        if !animal.activo {
            return Err(CoreError::Conflict(format!(
                "Animal {} is not active and cannot be sold",
                animal.caravana
            ))
            .into());
        }
        if in_withdrawal_period(animal.fecha_carencia, input.fecha) {
            return Err(CoreError::Conflict(format!(
                "Animal {} is in its withdrawal period and cannot be sold",
                animal.caravana
            ))
            .into());
        }

        let costo_historico: f64 = sqlx::query_scalar(
            "SELECT COALESCE(SUM(monto), 0)::float8 FROM gastos WHERE animal_id = $1",
        )
        .bind(animal.id)
        .fetch_one(&mut *tx)
        .await?;

        let query = format!(
            "INSERT INTO ventas \
                (animal_id, comprador, kilos_vendidos, precio_total, costo_historico, fecha) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        let venta = sqlx::query_as::<_, Venta>(&query)
            .bind(animal.id)
            .bind(&input.comprador)
            .bind(input.kilos_vendidos.unwrap_or(animal.peso_actual))
            .bind(input.precio_total)
            .bind(costo_historico)
            .bind(input.fecha)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query("UPDATE animales SET activo = false, lote_actual_id = NULL WHERE id = $1")
            .bind(animal.id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(venta)
    }

    /// List every sale, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Venta>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM ventas ORDER BY fecha DESC, id DESC");
        sqlx::query_as::<_, Venta>(&query).fetch_all(pool).await
    }

    /// The sale of an animal, if it was sold.
    pub async fn find_by_animal(
        pool: &PgPool,
        animal_id: DbId,
    ) -> Result<Option<Venta>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM ventas WHERE animal_id = $1");
        sqlx::query_as::<_, Venta>(&query)
            .bind(animal_id)
            .fetch_optional(pool)
            .await
    }
}
