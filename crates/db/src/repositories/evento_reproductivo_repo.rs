//! Repository for the `eventos_reproductivos` table.
//!
//! Recording an event updates the animal's reproductive status through
//! the table in [`agronexo_core::reproduction`], books the event cost as an
//! expense, and for a birth registers the calf. All of it happens in the
//! caller's transaction.

use agronexo_core::error::CoreError;
use agronexo_core::livestock::{calf_tag, CALF_CATEGORY};
use agronexo_core::reproduction::{
    is_expected_transition, resulting_status, spawns_calf, ReproductiveStatus, DEFAULT_STATUS,
    EXPENSE_CATEGORY,
};
use agronexo_core::types::DbId;
use sqlx::PgPool;

use crate::error::RepoResult;
use crate::models::animal::{Animal, CreateAnimal};
use crate::models::catalog::CatalogTable;
use crate::models::evento_reproductivo::{
    BulkEventoReproductivo, CreateEventoReproductivo, EventDetails, EventoReproductivo,
    RecordedEvent,
};
use crate::models::gasto::CreateGasto;
use crate::repositories::{AnimalRepo, CatalogRepo, GastoRepo};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, animal_id, tipo, detalle, protocolo_id, insumo_genetico_id, \
    costo, cria_id, fecha";

/// Provides the reproductive event log.
pub struct ReproductiveEventRepo;

impl ReproductiveEventRepo {
    /// Record an event on one active animal.
    pub async fn record(
        pool: &PgPool,
        input: &CreateEventoReproductivo,
    ) -> RepoResult<RecordedEvent> {
        let mut tx = pool.begin().await?;
        let animal = AnimalRepo::lock_in_tx(&mut tx, input.animal_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Animal",
                id: input.animal_id,
            })?;
        if !animal.activo {
            return Err(CoreError::Conflict(format!(
                "Animal {} is not active",
                animal.caravana
            ))
            .into());
        }
        let recorded = Self::record_in_tx(&mut tx, animal, &input.details).await?;
        tx.commit().await?;
        Ok(recorded)
    }

    /// Apply the same event to every active animal matched by the selector.
    ///
    /// Fails without writing anything when the selector matches no animal.
    pub async fn record_bulk(
        pool: &PgPool,
        input: &BulkEventoReproductivo,
    ) -> RepoResult<Vec<RecordedEvent>> {
        let mut tx = pool.begin().await?;
        let animals = AnimalRepo::resolve_selector_in_tx(&mut tx, &input.objetivo).await?;
        if animals.is_empty() {
            return Err(
                CoreError::Validation("No animals match the selected target".to_string()).into(),
            );
        }
        let mut recorded = Vec::with_capacity(animals.len());
        for animal in animals {
            recorded.push(Self::record_in_tx(&mut tx, animal, &input.details).await?);
        }
        tx.commit().await?;
        Ok(recorded)
    }

    /// List every event, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<EventoReproductivo>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM eventos_reproductivos ORDER BY fecha DESC, id DESC");
        sqlx::query_as::<_, EventoReproductivo>(&query)
            .fetch_all(pool)
            .await
    }

    /// Events of one animal, oldest first.
    pub async fn list_for_animal(
        pool: &PgPool,
        animal_id: DbId,
    ) -> Result<Vec<EventoReproductivo>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM eventos_reproductivos WHERE animal_id = $1 ORDER BY fecha, id"
        );
        sqlx::query_as::<_, EventoReproductivo>(&query)
            .bind(animal_id)
            .fetch_all(pool)
            .await
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    async fn record_in_tx(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        animal: Animal,
        details: &EventDetails,
    ) -> RepoResult<RecordedEvent> {
        let protocolo =
            CatalogRepo::cost_in_tx(tx, CatalogTable::Protocolos, details.protocolo_id).await?;
        let genetica = CatalogRepo::cost_in_tx(
            tx,
            CatalogTable::InsumosGeneticos,
            details.insumo_genetico_id,
        )
        .await?;
        let costo = protocolo + genetica;

        let current = animal
            .estado_reproductivo
            .parse::<ReproductiveStatus>()
            .unwrap_or(DEFAULT_STATUS);
        if !is_expected_transition(current, details.tipo) {
            tracing::warn!(
                animal_id = animal.id,
                estado = %current,
                evento = %details.tipo,
                "Unusual reproductive sequence recorded",
            );
        }
        let next = resulting_status(details.tipo, &details.detalle);

        let cria = if spawns_calf(details.tipo) && details.crear_cria {
            let tag = calf_tag(&animal.caravana, &uuid::Uuid::new_v4().simple().to_string());
            let calf = CreateAnimal {
                caravana: tag,
                categoria: CALF_CATEGORY.to_string(),
                raza: animal.raza.clone(),
                lote_actual_id: animal.lote_actual_id,
                madre_id: Some(animal.id),
                estado_reproductivo: DEFAULT_STATUS,
                fecha_ingreso: details.fecha,
                fecha_carencia: None,
                peso_inicial: None,
            };
            Some(AnimalRepo::insert_in_tx(tx, &calf).await?)
        } else {
            None
        };

        let query = format!(
            "INSERT INTO eventos_reproductivos \
                (animal_id, tipo, detalle, protocolo_id, insumo_genetico_id, \
                 costo, cria_id, fecha) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {COLUMNS}"
        );
        let evento = sqlx::query_as::<_, EventoReproductivo>(&query)
            .bind(animal.id)
            .bind(details.tipo.as_str())
            .bind(&details.detalle)
            .bind(details.protocolo_id)
            .bind(details.insumo_genetico_id)
            .bind(costo)
            .bind(cria.as_ref().map(|c| c.id))
            .bind(details.fecha)
            .fetch_one(&mut **tx)
            .await?;

        if costo > 0.0 {
            let gasto = CreateGasto {
                concepto: format!("{} {}", details.tipo, animal.caravana),
                monto: costo,
                categoria: EXPENSE_CATEGORY.to_string(),
                lote_id: None,
                animal_id: Some(animal.id),
                fecha: details.fecha,
            };
            GastoRepo::insert_in_tx(tx, &gasto).await?;
        }

        let animal = AnimalRepo::set_status_in_tx(tx, animal.id, next).await?;

        Ok(RecordedEvent {
            evento,
            animal,
            cria,
        })
    }
}
