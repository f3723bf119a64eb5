//! Repository for the `contratos_campo` table.

use agronexo_core::types::DbId;
use sqlx::PgPool;

use crate::models::contrato::{ContractTerms, ContratoCampo};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, lote_id, propietario, tipo, porcentaje_dueno, created_at";

/// Provides access to field contracts. At most one contract per parcel.
pub struct ContratoRepo;

impl ContratoRepo {
    /// Insert a contract for a parcel.
    ///
    /// Fails with a unique violation (`uq_contratos_campo_lote`) when the
    /// parcel already has one.
    pub async fn create(
        pool: &PgPool,
        lote_id: DbId,
        terms: &ContractTerms,
    ) -> Result<ContratoCampo, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let contrato = Self::insert_in_tx(&mut tx, lote_id, terms).await?;
        tx.commit().await?;
        Ok(contrato)
    }

    /// Find the contract attached to a parcel, if any.
    pub async fn find_by_lote(
        pool: &PgPool,
        lote_id: DbId,
    ) -> Result<Option<ContratoCampo>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM contratos_campo WHERE lote_id = $1");
        sqlx::query_as::<_, ContratoCampo>(&query)
            .bind(lote_id)
            .fetch_optional(pool)
            .await
    }

    /// List every contract, oldest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<ContratoCampo>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM contratos_campo ORDER BY id");
        sqlx::query_as::<_, ContratoCampo>(&query).fetch_all(pool).await
    }

    // -----------------------------------------------------------------------
    // Transaction helpers
    // -----------------------------------------------------------------------

    pub(crate) async fn insert_in_tx(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        lote_id: DbId,
        terms: &ContractTerms,
    ) -> Result<ContratoCampo, sqlx::Error> {
        let query = format!(
            "INSERT INTO contratos_campo (lote_id, propietario, tipo, porcentaje_dueno) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ContratoCampo>(&query)
            .bind(lote_id)
            .bind(&terms.propietario)
            .bind(terms.tipo.as_str())
            .bind(terms.porcentaje_dueno)
            .fetch_one(&mut **tx)
            .await
    }

    /// Create or overwrite the contract of a parcel.
    pub(crate) async fn upsert_in_tx(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        lote_id: DbId,
        terms: &ContractTerms,
    ) -> Result<ContratoCampo, sqlx::Error> {
        let query = format!(
            "INSERT INTO contratos_campo (lote_id, propietario, tipo, porcentaje_dueno) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT (lote_id) DO UPDATE \
             SET propietario = EXCLUDED.propietario, \
                 tipo = EXCLUDED.tipo, \
                 porcentaje_dueno = EXCLUDED.porcentaje_dueno \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ContratoCampo>(&query)
            .bind(lote_id)
            .bind(&terms.propietario)
            .bind(terms.tipo.as_str())
            .bind(terms.porcentaje_dueno)
            .fetch_one(&mut **tx)
            .await
    }
}
