//! Field contract (`contratos_campo`) model and DTOs.

use agronexo_core::liquidation::ContractType;
use agronexo_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `contratos_campo` table. At most one per parcel.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ContratoCampo {
    pub id: DbId,
    pub lote_id: DbId,
    pub propietario: String,
    pub tipo: String,
    pub porcentaje_dueno: f64,
    pub created_at: Timestamp,
}

/// Contract terms, used for both insert and overwrite.
#[derive(Debug, Clone)]
pub struct ContractTerms {
    pub propietario: String,
    pub tipo: ContractType,
    pub porcentaje_dueno: f64,
}
