//! Handlers for expenses, including the even split across a herd selection.

use agronexo_core::error::CoreError;
use agronexo_core::types::DbId;
use agronexo_db::models::gasto::Gasto;
use agronexo_db::repositories::GastoRepo;
use agronexo_db::DbPool;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::error::{AppError, AppResult};
use crate::request::{parse_body, BulkGastoBody, GastoBody};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

pub async fn create_gasto(pool: &DbPool, body: serde_json::Value) -> AppResult<Gasto> {
    let input = parse_body::<GastoBody>(body)?.into_create()?;
    let gasto = GastoRepo::create(pool, &input).await?;
    tracing::info!(
        gasto_id = gasto.id,
        monto = gasto.monto,
        lote_id = ?gasto.lote_id,
        animal_id = ?gasto.animal_id,
        "Expense recorded"
    );
    Ok(gasto)
}

pub async fn update_gasto(pool: &DbPool, id: DbId, body: serde_json::Value) -> AppResult<Gasto> {
    let input = parse_body::<GastoBody>(body)?.into_update()?;
    GastoRepo::update(pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Gasto",
            id,
        }))
}

pub async fn delete_gasto(pool: &DbPool, id: DbId) -> AppResult<()> {
    if !GastoRepo::delete(pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Gasto",
            id,
        }));
    }
    tracing::info!(gasto_id = id, "Expense deleted");
    Ok(())
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/nuevo_gasto
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<serde_json::Value>,
) -> AppResult<impl IntoResponse> {
    let gasto = create_gasto(&state.pool, body).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: gasto })))
}

/// POST /api/gasto_masivo
///
/// Split `monto` evenly across the active animals matched by `objetivo`
/// (`TODOS`, `SIN_LOTE` or `LOTE` with `lote_id`), one expense per animal.
pub async fn create_bulk(
    State(state): State<AppState>,
    Json(body): Json<serde_json::Value>,
) -> AppResult<impl IntoResponse> {
    let input = parse_body::<BulkGastoBody>(body)?.into_bulk()?;
    let result = GastoRepo::create_bulk(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: result })))
}
