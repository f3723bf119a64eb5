pub mod agriculture;
pub mod health;
pub mod livestock;
pub mod modules;
pub mod reports;
pub mod reset;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Named routes take precedence over the generic `/{modulo}` routes, so
/// `/resumen` never reaches the dispatcher.
///
/// ```text
/// /resumen, /resumen_general, /liquidaciones, /mapa     reports
/// /exportar_excel, /detalle_animal/{id}                 reports
///
/// /nuevo_animal, /nuevo_pesaje, /mover_hacienda         livestock
/// /registrar_venta                                      livestock
/// /nuevo_evento_reproductivo                            reproduction
/// /evento_reproductivo_masivo                           reproduction
///
/// /nuevo_contrato, /editar_lote/{id}                    parcels
/// /eliminar_lote/{id}                                   parcels
/// /nuevo_gasto, /gasto_masivo, /registrar_lluvia        expenses, rainfall
/// /nueva_cosecha, /venta_grano                          grain
///
/// /reset_tablas, /reset_fabrica                         reset (ALLOW_RESET)
///
/// /{modulo}                                             list, create
/// /{modulo}/{id}                                        update, delete
/// ```
///
/// Module names: animales (ganaderia), lotes (agricultura), contratos,
/// pesajes, gastos, ventas, lluvias (lluvia), silos, cosechas, ventas_grano,
/// eventos_reproductivos, protocolos, insumos_geneticos.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(reports::router())
        .merge(livestock::router())
        .merge(agriculture::router())
        .merge(reset::router())
        .merge(modules::router())
}
