//! Reproduction costing catalogs: `protocolos` and `insumos_geneticos`.
//!
//! Both tables share one shape, so a single model serves both; the
//! [`CatalogTable`] selects which one a query targets.

use agronexo_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Which catalog table to address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogTable {
    Protocolos,
    InsumosGeneticos,
}

impl CatalogTable {
    pub fn table_name(self) -> &'static str {
        match self {
            CatalogTable::Protocolos => "protocolos",
            CatalogTable::InsumosGeneticos => "insumos_geneticos",
        }
    }

    /// Column in `eventos_reproductivos` that references this catalog.
    pub fn event_column(self) -> &'static str {
        match self {
            CatalogTable::Protocolos => "protocolo_id",
            CatalogTable::InsumosGeneticos => "insumo_genetico_id",
        }
    }

    pub fn entity_name(self) -> &'static str {
        match self {
            CatalogTable::Protocolos => "Protocolo",
            CatalogTable::InsumosGeneticos => "InsumoGenetico",
        }
    }
}

/// A row from either catalog table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CatalogItem {
    pub id: DbId,
    pub nombre: String,
    pub costo: f64,
    pub created_at: Timestamp,
}

/// DTO for creating a catalog entry.
#[derive(Debug, Clone)]
pub struct CreateCatalogItem {
    pub nombre: String,
    pub costo: f64,
}

/// DTO for editing a catalog entry.
#[derive(Debug, Clone, Default)]
pub struct UpdateCatalogItem {
    pub nombre: Option<String>,
    pub costo: Option<f64>,
}
