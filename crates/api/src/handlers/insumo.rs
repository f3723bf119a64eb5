//! Operations on the supply inventory.
//!
//! Reached through the generic module routes, plus a reorder listing.

use agronexo_core::error::CoreError;
use agronexo_core::types::DbId;
use agronexo_db::models::insumo::Insumo;
use agronexo_db::repositories::InsumoRepo;
use agronexo_db::DbPool;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use crate::error::{AppError, AppResult};
use crate::request::{parse_body, InsumoBody};
use crate::response::DataResponse;
use crate::state::AppState;

pub async fn create_insumo(pool: &DbPool, body: serde_json::Value) -> AppResult<Insumo> {
    let input = parse_body::<InsumoBody>(body)?.into_create()?;
    let insumo = InsumoRepo::create(pool, &input).await?;
    tracing::info!(id = insumo.id, stock = insumo.stock, "Supply item created");
    Ok(insumo)
}

pub async fn update_insumo(pool: &DbPool, id: DbId, body: serde_json::Value) -> AppResult<Insumo> {
    let input = parse_body::<InsumoBody>(body)?.into_update()?;
    let insumo = InsumoRepo::update(pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Insumo",
            id,
        }))?;
    if insumo.stock <= insumo.punto_reposicion {
        tracing::warn!(
            id = insumo.id,
            stock = insumo.stock,
            punto_reposicion = insumo.punto_reposicion,
            "Supply item at or below its reorder point"
        );
    }
    Ok(insumo)
}

pub async fn delete_insumo(pool: &DbPool, id: DbId) -> AppResult<()> {
    if !InsumoRepo::delete(pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Insumo",
            id,
        }));
    }
    Ok(())
}

/// GET /api/alertas_stock
pub async fn alerts(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let insumos = InsumoRepo::list_below_reorder(&state.pool).await?;
    Ok(Json(DataResponse { data: insumos }))
}
