//! Repository for the `ventas_grano` table.

use agronexo_core::error::CoreError;
use agronexo_core::grain::{stock_after_withdrawal, GrainOrigin};
use sqlx::PgPool;

use crate::error::RepoResult;
use crate::models::venta_grano::{CreateVentaGrano, VentaGrano};
use crate::repositories::SiloRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, comprador, tipo_grano, kilos, precio_total, origen, silo_id, fecha";

/// Provides the grain sales ledger.
pub struct VentaGranoRepo;

impl VentaGranoRepo {
    /// Record a grain sale. A sale out of a silo lowers its stock in the
    /// same transaction and is rejected when the stock does not cover it.
    pub async fn record(pool: &PgPool, input: &CreateVentaGrano) -> RepoResult<VentaGrano> {
        let mut tx = pool.begin().await?;

        let silo_id = match input.origen {
            GrainOrigin::Directo => None,
            GrainOrigin::Silo => {
                let silo_id = input.silo_id.ok_or_else(|| {
                    CoreError::Validation("silo_id is required when origen is SILO".to_string())
                })?;
                let silo = SiloRepo::lock_in_tx(&mut tx, silo_id)
                    .await?
                    .ok_or(CoreError::NotFound {
                        entity: "Silo",
                        id: silo_id,
                    })?;
                let stock = stock_after_withdrawal(silo.kilos_actuales, input.kilos)?;
                SiloRepo::set_stock_in_tx(&mut tx, silo.id, stock).await?;
                Some(silo.id)
            }
        };

        let query = format!(
            "INSERT INTO ventas_grano \
                (comprador, tipo_grano, kilos, precio_total, origen, silo_id, fecha) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {COLUMNS}"
        );
        let venta = sqlx::query_as::<_, VentaGrano>(&query)
            .bind(&input.comprador)
            .bind(&input.tipo_grano)
            .bind(input.kilos)
            .bind(input.precio_total)
            .bind(input.origen.as_str())
            .bind(silo_id)
            .bind(input.fecha)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(venta)
    }

    /// List every grain sale, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<VentaGrano>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM ventas_grano ORDER BY fecha DESC, id DESC");
        sqlx::query_as::<_, VentaGrano>(&query).fetch_all(pool).await
    }
}
