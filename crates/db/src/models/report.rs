//! Read-only report rows assembled from several tables.

use agronexo_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

use crate::models::animal::{Animal, AnimalOverview};
use crate::models::evento_reproductivo::EventoReproductivo;
use crate::models::gasto::Gasto;
use crate::models::pesaje::Pesaje;
use crate::models::venta::Venta;

/// Dashboard figures. Every field defaults to zero when its query fails.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DashboardSummary {
    pub animales_activos: i64,
    pub animales_vendidos_mes: i64,
    pub lotes_count: i64,
    pub hectareas_totales: f64,
    pub stock_granos_kilos: f64,
    pub gastos_mes: f64,
    pub margen_mes: f64,
    pub lluvia_promedio_mes: f64,
    /// Supply items at or below their reorder point.
    pub alertas_stock: i64,
    /// All-time cash position: livestock and grain sales minus expenses.
    pub caja: f64,
}

/// Per-parcel aggregate row, before contract math is applied.
#[derive(Debug, Clone, FromRow)]
pub struct ParcelAggregateRow {
    pub lote_id: DbId,
    pub lote: String,
    pub cultivo: Option<String>,
    pub hectareas: f64,
    pub latitud: Option<f64>,
    pub longitud: Option<f64>,
    pub contrato_id: Option<DbId>,
    pub propietario: Option<String>,
    pub tipo: Option<String>,
    pub porcentaje_dueno: Option<f64>,
    pub total_cosechado: f64,
    pub total_gastos: f64,
    pub lluvia_mes: f64,
    pub animales_count: i64,
}

/// One row of the liquidation view.
#[derive(Debug, Clone, Serialize)]
pub struct Liquidacion {
    pub lote_id: DbId,
    pub lote: String,
    pub cultivo: Option<String>,
    pub hectareas: f64,
    pub contrato_id: Option<DbId>,
    pub propietario: String,
    pub tipo: String,
    pub porcentaje: f64,
    pub total_cosechado: f64,
    pub kilos_dueno: f64,
    pub kilos_propios: f64,
    pub total_gastos: f64,
    pub lluvia_mes: f64,
    pub animales_count: i64,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

/// A geolocated parcel for the map view.
#[derive(Debug, Clone, Serialize)]
pub struct MapaLote {
    pub id: DbId,
    pub nombre: String,
    pub cultivo: Option<String>,
    pub hectareas: f64,
    pub lat: f64,
    pub lng: f64,
    pub animales_count: i64,
    pub lluvia_mes: f64,
}

/// Full history of one animal.
#[derive(Debug, Clone, Serialize)]
pub struct AnimalDetail {
    pub animal: Animal,
    pub resumen: AnimalOverview,
    pub pesajes: Vec<Pesaje>,
    pub gastos: Vec<Gasto>,
    pub eventos: Vec<EventoReproductivo>,
    pub venta: Option<Venta>,
    pub crias: Vec<Animal>,
}

/// Rainfall export row.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LluviaExportRow {
    pub fecha: Timestamp,
    pub lote: String,
    pub milimetros: f64,
}

/// Expense export row.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct GastoExportRow {
    pub fecha: Timestamp,
    pub concepto: String,
    pub categoria: String,
    pub monto: f64,
    pub lote: Option<String>,
    pub caravana: Option<String>,
}
