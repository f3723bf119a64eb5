//! Repository for the `pesajes` table (append-only weighing log).

use agronexo_core::error::CoreError;
use agronexo_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::error::RepoResult;
use crate::models::pesaje::{CreatePesaje, Pesaje};
use crate::repositories::AnimalRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, animal_id, kilos, fecha";

/// Provides the weighing log.
pub struct PesajeRepo;

impl PesajeRepo {
    /// Record a weighing. The animal's current weight follows it unless a
    /// later weighing already exists.
    pub async fn create(pool: &PgPool, input: &CreatePesaje) -> RepoResult<Pesaje> {
        let mut tx = pool.begin().await?;
        if AnimalRepo::lock_in_tx(&mut tx, input.animal_id).await?.is_none() {
            return Err(CoreError::NotFound {
                entity: "Animal",
                id: input.animal_id,
            }
            .into());
        }
        let pesaje = Self::insert_in_tx(&mut tx, input.animal_id, input.kilos, input.fecha).await?;
        tx.commit().await?;
        Ok(pesaje)
    }

    /// List every weighing, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Pesaje>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM pesajes ORDER BY fecha DESC, id DESC");
        sqlx::query_as::<_, Pesaje>(&query).fetch_all(pool).await
    }

    /// Weighings of one animal, oldest first.
    pub async fn list_for_animal(
        pool: &PgPool,
        animal_id: DbId,
    ) -> Result<Vec<Pesaje>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM pesajes WHERE animal_id = $1 ORDER BY fecha, id");
        sqlx::query_as::<_, Pesaje>(&query)
            .bind(animal_id)
            .fetch_all(pool)
            .await
    }

    // -----------------------------------------------------------------------
    // Transaction helpers
    // -----------------------------------------------------------------------

    /// Insert a weighing and bring `peso_actual` up to date when it is the
    /// most recent one.
    pub(crate) async fn insert_in_tx(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        animal_id: DbId,
        kilos: f64,
        fecha: Timestamp,
    ) -> Result<Pesaje, sqlx::Error> {
        let query = format!(
            "INSERT INTO pesajes (animal_id, kilos, fecha) VALUES ($1, $2, $3) RETURNING {COLUMNS}"
        );
        let pesaje = sqlx::query_as::<_, Pesaje>(&query)
            .bind(animal_id)
            .bind(kilos)
            .bind(fecha)
            .fetch_one(&mut **tx)
            .await?;

        sqlx::query(
            "UPDATE animales SET peso_actual = $2 \
             WHERE id = $1 \
               AND NOT EXISTS ( \
                   SELECT 1 FROM pesajes WHERE animal_id = $1 AND fecha > $3 \
               )",
        )
        .bind(animal_id)
        .bind(kilos)
        .bind(fecha)
        .execute(&mut **tx)
        .await?;

        Ok(pesaje)
    }
}
