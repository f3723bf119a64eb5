//! Route definitions for parcels, expenses, rainfall and grain.

use axum::routing::{delete, post, put};
use axum::Router;

use crate::handlers::{gasto, grain, lluvia, lote};
use crate::state::AppState;

/// Agriculture routes, merged into `/api`.
///
/// ```text
/// POST   /nuevo_contrato          -> create parcel with contract
/// PUT    /editar_lote/{id}        -> edit parcel, upsert contract
/// DELETE /eliminar_lote/{id}      -> delete parcel with dependents
/// POST   /nuevo_gasto             -> record expense
/// POST   /gasto_masivo            -> split expense across animals
/// POST   /registrar_lluvia        -> record rainfall
/// POST   /nueva_cosecha           -> record harvest
/// POST   /venta_grano             -> record grain sale
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/nuevo_contrato", post(lote::create_with_contract))
        .route("/editar_lote/{id}", put(lote::update))
        .route("/eliminar_lote/{id}", delete(lote::delete))
        .route("/nuevo_gasto", post(gasto::create))
        .route("/gasto_masivo", post(gasto::create_bulk))
        .route("/registrar_lluvia", post(lluvia::create))
        .route("/nueva_cosecha", post(grain::create_harvest))
        .route("/venta_grano", post(grain::create_grain_sale))
}
