//! Route definitions for livestock actions.

use axum::routing::post;
use axum::Router;

use crate::handlers::{animal, reproduction, venta};
use crate::state::AppState;

/// Livestock routes, merged into `/api`.
///
/// ```text
/// POST /nuevo_animal                  -> register animal
/// POST /nuevo_pesaje                  -> record weighing
/// POST /mover_hacienda                -> move animals between parcels
/// POST /registrar_venta               -> sell animal
/// POST /nuevo_evento_reproductivo     -> record event on one animal
/// POST /evento_reproductivo_masivo    -> record event on a selection
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/nuevo_animal", post(animal::create))
        .route("/nuevo_pesaje", post(animal::weigh))
        .route("/mover_hacienda", post(animal::move_livestock))
        .route("/registrar_venta", post(venta::create))
        .route("/nuevo_evento_reproductivo", post(reproduction::create))
        .route("/evento_reproductivo_masivo", post(reproduction::create_bulk))
}
