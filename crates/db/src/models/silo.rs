//! Grain storage (`silos`) model and DTOs.

use agronexo_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `silos` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Silo {
    pub id: DbId,
    pub nombre: String,
    pub tipo: String,
    pub cultivo: Option<String>,
    /// Zero means no declared capacity.
    pub capacidad_kilos: f64,
    pub kilos_actuales: f64,
    pub created_at: Timestamp,
}

/// DTO for creating a silo.
#[derive(Debug, Clone)]
pub struct CreateSilo {
    pub nombre: String,
    pub tipo: String,
    pub cultivo: Option<String>,
    pub capacidad_kilos: f64,
    pub kilos_actuales: f64,
}

/// DTO for editing a silo. Stock is only changed through harvests and sales.
#[derive(Debug, Clone, Default)]
pub struct UpdateSilo {
    pub nombre: Option<String>,
    pub tipo: Option<String>,
    pub cultivo: Option<String>,
    pub capacidad_kilos: Option<f64>,
}
