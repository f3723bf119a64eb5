//! Harvest (`cosechas`) model and DTO.

use agronexo_core::grain::HarvestDestination;
use agronexo_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `cosechas` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Cosecha {
    pub id: DbId,
    pub lote_id: DbId,
    pub kilos_totales: f64,
    pub destino: String,
    pub silo_id: Option<DbId>,
    pub fecha: Timestamp,
}

/// DTO for recording a harvest.
#[derive(Debug, Clone)]
pub struct CreateCosecha {
    pub lote_id: DbId,
    pub kilos_totales: f64,
    pub destino: HarvestDestination,
    pub silo_id: Option<DbId>,
    pub fecha: Timestamp,
}
