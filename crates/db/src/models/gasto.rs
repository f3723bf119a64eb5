//! Expense (`gastos`) model and DTOs.

use agronexo_core::fanout::AnimalSelector;
use agronexo_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `gastos` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Gasto {
    pub id: DbId,
    pub concepto: String,
    pub monto: f64,
    pub categoria: String,
    pub lote_id: Option<DbId>,
    pub animal_id: Option<DbId>,
    pub fecha: Timestamp,
}

/// DTO for recording an expense.
#[derive(Debug, Clone)]
pub struct CreateGasto {
    pub concepto: String,
    pub monto: f64,
    pub categoria: String,
    pub lote_id: Option<DbId>,
    pub animal_id: Option<DbId>,
    pub fecha: Timestamp,
}

/// DTO for editing an expense.
///
/// `lote_id` and `animal_id` are doubly optional: `None` leaves the link
/// untouched, `Some(None)` detaches the expense.
#[derive(Debug, Clone, Default)]
pub struct UpdateGasto {
    pub concepto: Option<String>,
    pub monto: Option<f64>,
    pub categoria: Option<String>,
    pub lote_id: Option<Option<DbId>>,
    pub animal_id: Option<Option<DbId>>,
    pub fecha: Option<Timestamp>,
}

/// DTO for splitting one expense across a selection of animals.
#[derive(Debug, Clone)]
pub struct BulkGasto {
    pub objetivo: AnimalSelector,
    pub concepto: String,
    pub monto_total: f64,
    pub categoria: String,
    pub fecha: Timestamp,
}

/// Outcome of a bulk expense.
#[derive(Debug, Clone, Serialize)]
pub struct BulkGastoResult {
    pub gastos_creados: usize,
    pub monto_por_animal: f64,
    pub animal_ids: Vec<DbId>,
}
