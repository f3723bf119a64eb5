//! Grain sale (`ventas_grano`) model and DTO.

use agronexo_core::grain::GrainOrigin;
use agronexo_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `ventas_grano` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct VentaGrano {
    pub id: DbId,
    pub comprador: String,
    pub tipo_grano: String,
    pub kilos: f64,
    pub precio_total: f64,
    pub origen: String,
    pub silo_id: Option<DbId>,
    pub fecha: Timestamp,
}

/// DTO for recording a grain sale.
#[derive(Debug, Clone)]
pub struct CreateVentaGrano {
    pub comprador: String,
    pub tipo_grano: String,
    pub kilos: f64,
    pub precio_total: f64,
    pub origen: GrainOrigin,
    pub silo_id: Option<DbId>,
    pub fecha: Timestamp,
}
