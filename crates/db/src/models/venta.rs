//! Livestock sale (`ventas`) model and DTO.

use agronexo_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `ventas` table. Terminal event for an animal.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Venta {
    pub id: DbId,
    pub animal_id: DbId,
    pub comprador: String,
    pub kilos_vendidos: f64,
    pub precio_total: f64,
    /// Accumulated expenses of the animal at the moment of sale.
    pub costo_historico: f64,
    pub fecha: Timestamp,
}

/// DTO for registering a sale.
#[derive(Debug, Clone)]
pub struct CreateVenta {
    pub animal_id: DbId,
    pub comprador: String,
    /// Defaults to the animal's current weight.
    pub kilos_vendidos: Option<f64>,
    pub precio_total: f64,
    pub fecha: Timestamp,
}
