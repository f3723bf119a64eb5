//! Reproductive event (`eventos_reproductivos`) model and DTOs.

use agronexo_core::fanout::AnimalSelector;
use agronexo_core::reproduction::ReproductiveEventKind;
use agronexo_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

use crate::models::animal::Animal;

/// A row from the `eventos_reproductivos` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EventoReproductivo {
    pub id: DbId,
    pub animal_id: DbId,
    pub tipo: String,
    pub detalle: String,
    pub protocolo_id: Option<DbId>,
    pub insumo_genetico_id: Option<DbId>,
    /// Protocol plus genetics cost at the time of the event.
    pub costo: f64,
    /// Calf created by a PARTO event.
    pub cria_id: Option<DbId>,
    pub fecha: Timestamp,
}

/// Event payload shared by the single and bulk variants.
#[derive(Debug, Clone)]
pub struct EventDetails {
    pub tipo: ReproductiveEventKind,
    pub detalle: String,
    pub protocolo_id: Option<DbId>,
    pub insumo_genetico_id: Option<DbId>,
    /// Whether a PARTO creates a calf record.
    pub crear_cria: bool,
    pub fecha: Timestamp,
}

/// DTO for recording an event on one animal.
#[derive(Debug, Clone)]
pub struct CreateEventoReproductivo {
    pub animal_id: DbId,
    pub details: EventDetails,
}

/// DTO for applying the same event to a selection of animals.
#[derive(Debug, Clone)]
pub struct BulkEventoReproductivo {
    pub objetivo: AnimalSelector,
    pub details: EventDetails,
}

/// Outcome of recording one event.
#[derive(Debug, Clone, Serialize)]
pub struct RecordedEvent {
    pub evento: EventoReproductivo,
    /// Animal row after the status update.
    pub animal: Animal,
    pub cria: Option<Animal>,
}
