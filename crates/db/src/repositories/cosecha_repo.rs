//! Repository for the `cosechas` table.

use agronexo_core::error::CoreError;
use agronexo_core::grain::{stock_after_deposit, HarvestDestination};
use agronexo_core::types::DbId;
use sqlx::PgPool;

use crate::error::RepoResult;
use crate::models::cosecha::{Cosecha, CreateCosecha};
use crate::repositories::SiloRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, lote_id, kilos_totales, destino, silo_id, fecha";

/// Provides the harvest log.
pub struct CosechaRepo;

impl CosechaRepo {
    /// Record a harvest. A harvest stored in a silo raises its stock in the
    /// same transaction and is rejected if the silo would overflow.
    pub async fn record(pool: &PgPool, input: &CreateCosecha) -> RepoResult<Cosecha> {
        let mut tx = pool.begin().await?;

        let silo_id = match input.destino {
            HarvestDestination::Venta => None,
            HarvestDestination::Silo => {
                let silo_id = input.silo_id.ok_or_else(|| {
                    CoreError::Validation("silo_id is required when destino is SILO".to_string())
                })?;
                let silo = SiloRepo::lock_in_tx(&mut tx, silo_id)
                    .await?
                    .ok_or(CoreError::NotFound {
                        entity: "Silo",
                        id: silo_id,
                    })?;
                let stock = stock_after_deposit(
                    silo.kilos_actuales,
                    silo.capacidad_kilos,
                    input.kilos_totales,
                )?;
                SiloRepo::set_stock_in_tx(&mut tx, silo.id, stock).await?;
                Some(silo.id)
            }
        };

        let query = format!(
            "INSERT INTO cosechas (lote_id, kilos_totales, destino, silo_id, fecha) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        let cosecha = sqlx::query_as::<_, Cosecha>(&query)
            .bind(input.lote_id)
            .bind(input.kilos_totales)
            .bind(input.destino.as_str())
            .bind(silo_id)
            .bind(input.fecha)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(cosecha)
    }

    /// List every harvest, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Cosecha>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM cosechas ORDER BY fecha DESC, id DESC");
        sqlx::query_as::<_, Cosecha>(&query).fetch_all(pool).await
    }

    /// Harvests of one parcel, oldest first.
    pub async fn list_for_lote(pool: &PgPool, lote_id: DbId) -> Result<Vec<Cosecha>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM cosechas WHERE lote_id = $1 ORDER BY fecha, id");
        sqlx::query_as::<_, Cosecha>(&query)
            .bind(lote_id)
            .fetch_all(pool)
            .await
    }
}
