//! Generic `/{modulo}` handlers dispatching through the module registry.

use agronexo_core::types::DbId;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::error::AppResult;
use crate::query::IncludeInactiveParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/{modulo}?include_inactive=false
pub async fn list(
    State(state): State<AppState>,
    Path(modulo): Path<String>,
    Query(params): Query<IncludeInactiveParams>,
) -> AppResult<impl IntoResponse> {
    let handler = state.registry.resolve(&modulo)?;
    let rows = handler.list(&state.pool, params.include_inactive).await?;
    Ok(Json(DataResponse { data: rows }))
}

/// POST /api/{modulo}
pub async fn create(
    State(state): State<AppState>,
    Path(modulo): Path<String>,
    Json(body): Json<serde_json::Value>,
) -> AppResult<impl IntoResponse> {
    let handler = state.registry.resolve(&modulo)?;
    let created = handler.create(&state.pool, body).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

/// PUT /api/{modulo}/{id}
pub async fn update(
    State(state): State<AppState>,
    Path((modulo, id)): Path<(String, DbId)>,
    Json(body): Json<serde_json::Value>,
) -> AppResult<impl IntoResponse> {
    let handler = state.registry.resolve(&modulo)?;
    let updated = handler.update(&state.pool, id, body).await?;
    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /api/{modulo}/{id}
///
/// Animals are deactivated; every other mutable module is hard-deleted.
pub async fn delete(
    State(state): State<AppState>,
    Path((modulo, id)): Path<(String, DbId)>,
) -> AppResult<StatusCode> {
    let handler = state.registry.resolve(&modulo)?;
    handler.delete(&state.pool, id).await?;
    tracing::info!(modulo = %handler.kind(), id, "Record deleted");
    Ok(StatusCode::NO_CONTENT)
}
