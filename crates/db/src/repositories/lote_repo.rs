//! Repository for the `lotes` table, including the parcel/contract pair
//! operations and the cascading delete.

use agronexo_core::types::DbId;
use sqlx::PgPool;

use crate::models::contrato::{ContractTerms, ContratoCampo};
use crate::models::lote::{CreateLote, Lote, UpdateLote};
use crate::repositories::ContratoRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, nombre, cultivo, hectareas, latitud, longitud, created_at, updated_at";

/// Tables whose rows belong to a parcel and are removed with it.
const DEPENDENT_TABLES: &[&str] = &["contratos_campo", "cosechas", "lluvias", "gastos"];

/// Provides CRUD operations for land parcels.
pub struct LoteRepo;

impl LoteRepo {
    /// Insert a new parcel, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateLote) -> Result<Lote, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let lote = Self::insert_in_tx(&mut tx, input).await?;
        tx.commit().await?;
        Ok(lote)
    }

    /// Insert a parcel together with its contract in one transaction.
    pub async fn create_with_contract(
        pool: &PgPool,
        input: &CreateLote,
        terms: &ContractTerms,
    ) -> Result<(Lote, ContratoCampo), sqlx::Error> {
        let mut tx = pool.begin().await?;
        let lote = Self::insert_in_tx(&mut tx, input).await?;
        let contrato = ContratoRepo::insert_in_tx(&mut tx, lote.id, terms).await?;
        tx.commit().await?;
        Ok((lote, contrato))
    }

    /// Find a parcel by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Lote>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM lotes WHERE id = $1");
        sqlx::query_as::<_, Lote>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all parcels ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Lote>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM lotes ORDER BY nombre, id");
        sqlx::query_as::<_, Lote>(&query).fetch_all(pool).await
    }

    /// Update a parcel. Only non-`None` fields are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateLote,
    ) -> Result<Option<Lote>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let lote = Self::update_in_tx(&mut tx, id, input).await?;
        tx.commit().await?;
        Ok(lote)
    }

    /// Update a parcel and, when `terms` is given, create or overwrite its
    /// contract. Both writes share one transaction.
    pub async fn update_with_contract(
        pool: &PgPool,
        id: DbId,
        input: &UpdateLote,
        terms: Option<&ContractTerms>,
    ) -> Result<Option<(Lote, Option<ContratoCampo>)>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let Some(lote) = Self::update_in_tx(&mut tx, id, input).await? else {
            return Ok(None);
        };
        let contrato = match terms {
            Some(terms) => Some(ContratoRepo::upsert_in_tx(&mut tx, id, terms).await?),
            None => None,
        };
        tx.commit().await?;
        Ok(Some((lote, contrato)))
    }

    /// Delete a parcel and everything that belongs to it.
    ///
    /// Contract, harvests, rainfall and expenses of the parcel are deleted;
    /// animals located in it are left without a parcel. Returns `false` if
    /// the parcel does not exist, in which case nothing is touched.
    pub async fn delete_cascade(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let exists: Option<DbId> =
            sqlx::query_scalar("SELECT id FROM lotes WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        if exists.is_none() {
            return Ok(false);
        }

        let unassigned =
            sqlx::query("UPDATE animales SET lote_actual_id = NULL WHERE lote_actual_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?
                .rows_affected();

        for table in DEPENDENT_TABLES {
            let query = format!("DELETE FROM {table} WHERE lote_id = $1");
            sqlx::query(&query).bind(id).execute(&mut *tx).await?;
        }

        sqlx::query("DELETE FROM lotes WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        tracing::info!(
            lote_id = id,
            animals_unassigned = unassigned,
            "Parcel deleted with dependents"
        );
        Ok(true)
    }

    // -----------------------------------------------------------------------
    // Transaction helpers
    // -----------------------------------------------------------------------

    async fn insert_in_tx(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        input: &CreateLote,
    ) -> Result<Lote, sqlx::Error> {
        let query = format!(
            "INSERT INTO lotes (nombre, cultivo, hectareas, latitud, longitud) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Lote>(&query)
            .bind(&input.nombre)
            .bind(&input.cultivo)
            .bind(input.hectareas)
            .bind(input.latitud)
            .bind(input.longitud)
            .fetch_one(&mut **tx)
            .await
    }

    async fn update_in_tx(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        id: DbId,
        input: &UpdateLote,
    ) -> Result<Option<Lote>, sqlx::Error> {
        let query = format!(
            "UPDATE lotes SET \
                nombre = COALESCE($2, nombre), \
                cultivo = COALESCE($3, cultivo), \
                hectareas = COALESCE($4, hectareas), \
                latitud = COALESCE($5, latitud), \
                longitud = COALESCE($6, longitud) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Lote>(&query)
            .bind(id)
            .bind(&input.nombre)
            .bind(&input.cultivo)
            .bind(input.hectareas)
            .bind(input.latitud)
            .bind(input.longitud)
            .fetch_optional(&mut **tx)
            .await
    }
}
