//! Land parcel (`lotes`) model and DTOs.

use agronexo_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `lotes` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Lote {
    pub id: DbId,
    pub nombre: String,
    pub cultivo: Option<String>,
    pub hectareas: f64,
    pub latitud: Option<f64>,
    pub longitud: Option<f64>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a parcel.
#[derive(Debug, Clone)]
pub struct CreateLote {
    pub nombre: String,
    pub cultivo: Option<String>,
    pub hectareas: f64,
    pub latitud: Option<f64>,
    pub longitud: Option<f64>,
}

/// DTO for editing a parcel. `None` leaves the column untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateLote {
    pub nombre: Option<String>,
    pub cultivo: Option<String>,
    pub hectareas: Option<f64>,
    pub latitud: Option<f64>,
    pub longitud: Option<f64>,
}
