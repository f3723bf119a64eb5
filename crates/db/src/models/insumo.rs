//! Supply inventory (`insumos`) model and DTOs.

use agronexo_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `insumos` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Insumo {
    pub id: DbId,
    pub nombre: String,
    pub stock: f64,
    pub unidad: String,
    /// Stock level at or below which the item is reported for reordering.
    pub punto_reposicion: f64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for adding a supply item.
#[derive(Debug, Clone)]
pub struct CreateInsumo {
    pub nombre: String,
    pub stock: f64,
    pub unidad: String,
    pub punto_reposicion: f64,
}

/// DTO for editing a supply item. `None` leaves the column untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateInsumo {
    pub nombre: Option<String>,
    pub stock: Option<f64>,
    pub unidad: Option<String>,
    pub punto_reposicion: Option<f64>,
}
