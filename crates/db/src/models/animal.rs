//! Livestock (`animales`) model and DTOs.

use agronexo_core::reproduction::ReproductiveStatus;
use agronexo_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `animales` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Animal {
    pub id: DbId,
    pub caravana: String,
    pub categoria: String,
    pub raza: String,
    pub peso_actual: f64,
    pub estado_reproductivo: String,
    pub lote_actual_id: Option<DbId>,
    pub madre_id: Option<DbId>,
    /// End of the withdrawal period after a veterinary treatment.
    pub fecha_carencia: Option<Timestamp>,
    /// General status flag: false once sold or deactivated.
    pub activo: bool,
    pub fecha_ingreso: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for registering an animal.
#[derive(Debug, Clone)]
pub struct CreateAnimal {
    pub caravana: String,
    pub categoria: String,
    pub raza: String,
    pub lote_actual_id: Option<DbId>,
    pub madre_id: Option<DbId>,
    pub estado_reproductivo: ReproductiveStatus,
    pub fecha_ingreso: Timestamp,
    pub fecha_carencia: Option<Timestamp>,
    /// When present, also recorded as the first weighing.
    pub peso_inicial: Option<f64>,
}

/// DTO for editing an animal. `None` leaves the column untouched.
///
/// `lote_actual_id` and `fecha_carencia` are doubly optional: `Some(None)`
/// clears the column.
#[derive(Debug, Clone, Default)]
pub struct UpdateAnimal {
    pub caravana: Option<String>,
    pub categoria: Option<String>,
    pub raza: Option<String>,
    pub lote_actual_id: Option<Option<DbId>>,
    pub estado_reproductivo: Option<ReproductiveStatus>,
    pub fecha_carencia: Option<Option<Timestamp>>,
}

/// One row of the herd listing, enriched with weight and cost figures.
#[derive(Debug, Clone, Serialize)]
pub struct AnimalOverview {
    pub id: DbId,
    pub caravana: String,
    pub categoria: String,
    pub raza: String,
    pub estado_reproductivo: String,
    pub lote_actual_id: Option<DbId>,
    pub lote_nombre: Option<String>,
    pub activo: bool,
    pub fecha_carencia: Option<Timestamp>,
    pub peso_actual: f64,
    /// Average daily gain in kg/day between the last two weighings.
    pub gdp: f64,
    pub ultimo_pesaje: Option<Timestamp>,
    pub costo_acumulado: f64,
}

/// Raw row backing [`AnimalOverview`].
#[derive(Debug, Clone, FromRow)]
pub struct AnimalOverviewRow {
    pub id: DbId,
    pub caravana: String,
    pub categoria: String,
    pub raza: String,
    pub estado_reproductivo: String,
    pub lote_actual_id: Option<DbId>,
    pub lote_nombre: Option<String>,
    pub activo: bool,
    pub fecha_carencia: Option<Timestamp>,
    pub peso_actual: f64,
    pub costo_acumulado: f64,
}
