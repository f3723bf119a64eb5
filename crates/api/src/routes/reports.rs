//! Route definitions for read-only reports.

use axum::routing::get;
use axum::Router;

use crate::handlers::{animal, dashboard, export, insumo};
use crate::state::AppState;

/// Report routes, merged into `/api`.
///
/// ```text
/// GET /resumen                 -> dashboard summary
/// GET /resumen_general         -> dashboard summary
/// GET /liquidaciones           -> per-parcel liquidation
/// GET /mapa                    -> geolocated parcels
/// GET /exportar_excel          -> CSV export (?hoja=)
/// GET /detalle_animal/{id}     -> animal history
/// GET /alertas_stock           -> supplies at or below reorder point
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/resumen", get(dashboard::summary))
        .route("/resumen_general", get(dashboard::summary))
        .route("/liquidaciones", get(dashboard::liquidations))
        .route("/mapa", get(dashboard::map))
        .route("/exportar_excel", get(export::export_sheet))
        .route("/detalle_animal/{id}", get(animal::detail))
        .route("/alertas_stock", get(insumo::alerts))
}
