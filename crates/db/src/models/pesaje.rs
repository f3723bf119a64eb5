//! Weighing log (`pesajes`) model and DTO.

use agronexo_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `pesajes` table. Append-only.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Pesaje {
    pub id: DbId,
    pub animal_id: DbId,
    pub kilos: f64,
    pub fecha: Timestamp,
}

/// DTO for recording a weighing.
#[derive(Debug, Clone)]
pub struct CreatePesaje {
    pub animal_id: DbId,
    pub kilos: f64,
    pub fecha: Timestamp,
}
