//! Rainfall log (`lluvias`) model and DTO.

use agronexo_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `lluvias` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Lluvia {
    pub id: DbId,
    pub lote_id: DbId,
    pub milimetros: f64,
    pub fecha: Timestamp,
}

/// DTO for recording rainfall on a parcel.
#[derive(Debug, Clone)]
pub struct CreateLluvia {
    pub lote_id: DbId,
    pub milimetros: f64,
    pub fecha: Timestamp,
}

/// DTO for correcting a rainfall record.
#[derive(Debug, Clone, Default)]
pub struct UpdateLluvia {
    pub milimetros: Option<f64>,
    pub fecha: Option<Timestamp>,
}
