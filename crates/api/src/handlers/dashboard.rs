//! Read-only report handlers: dashboard, liquidations and map.

use agronexo_db::repositories::ReportRepo;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/resumen
/// GET /api/resumen_general
///
/// Herd, land, stock and this month's money figures. Never fails: a
/// sub-query that errors contributes zero.
pub async fn summary(State(state): State<AppState>) -> impl IntoResponse {
    let summary = ReportRepo::dashboard(&state.pool).await;
    Json(DataResponse { data: summary })
}

/// GET /api/liquidaciones
///
/// One row per parcel, including parcels without a contract.
pub async fn liquidations(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let rows = ReportRepo::liquidations(&state.pool).await?;
    Ok(Json(DataResponse { data: rows }))
}

/// GET /api/mapa
pub async fn map(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let parcels = ReportRepo::map(&state.pool).await?;
    Ok(Json(DataResponse { data: parcels }))
}
