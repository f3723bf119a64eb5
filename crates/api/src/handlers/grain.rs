//! Handlers for grain: silos, harvests and grain sales.
//!
//! Harvests into a silo and sales out of one move its stock inside the same
//! transaction as the record itself.

use agronexo_core::error::CoreError;
use agronexo_core::grain::check_capacity;
use agronexo_core::types::DbId;
use agronexo_db::models::cosecha::Cosecha;
use agronexo_db::models::silo::Silo;
use agronexo_db::models::venta_grano::VentaGrano;
use agronexo_db::repositories::{CosechaRepo, SiloRepo, VentaGranoRepo};
use agronexo_db::DbPool;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::error::{AppError, AppResult};
use crate::request::{parse_body, CosechaBody, SiloBody, VentaGranoBody};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Silos
// ---------------------------------------------------------------------------

pub async fn create_silo(pool: &DbPool, body: serde_json::Value) -> AppResult<Silo> {
    let input = parse_body::<SiloBody>(body)?.into_create()?;
    check_capacity(input.capacidad_kilos, input.kilos_actuales)?;
    let silo = SiloRepo::create(pool, &input).await?;
    tracing::info!(silo_id = silo.id, nombre = %silo.nombre, "Silo created");
    Ok(silo)
}

pub async fn update_silo(pool: &DbPool, id: DbId, body: serde_json::Value) -> AppResult<Silo> {
    let input = parse_body::<SiloBody>(body)?.into_update()?;
    SiloRepo::update(pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Silo", id }))
}

pub async fn delete_silo(pool: &DbPool, id: DbId) -> AppResult<()> {
    if !SiloRepo::delete(pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound { entity: "Silo", id }));
    }
    tracing::info!(silo_id = id, "Silo deleted");
    Ok(())
}

// ---------------------------------------------------------------------------
// Harvests and sales
// ---------------------------------------------------------------------------

pub async fn record_harvest(pool: &DbPool, body: serde_json::Value) -> AppResult<Cosecha> {
    let input = parse_body::<CosechaBody>(body)?.into_create()?;
    let cosecha = CosechaRepo::record(pool, &input).await?;
    tracing::info!(
        cosecha_id = cosecha.id,
        lote_id = cosecha.lote_id,
        kilos = cosecha.kilos_totales,
        destino = %cosecha.destino,
        "Harvest recorded"
    );
    Ok(cosecha)
}

pub async fn record_grain_sale(pool: &DbPool, body: serde_json::Value) -> AppResult<VentaGrano> {
    let input = parse_body::<VentaGranoBody>(body)?.into_create()?;
    let venta = VentaGranoRepo::record(pool, &input).await?;
    tracing::info!(
        venta_grano_id = venta.id,
        kilos = venta.kilos,
        origen = %venta.origen,
        silo_id = ?venta.silo_id,
        "Grain sale recorded"
    );
    Ok(venta)
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/nueva_cosecha
pub async fn create_harvest(
    State(state): State<AppState>,
    Json(body): Json<serde_json::Value>,
) -> AppResult<impl IntoResponse> {
    let cosecha = record_harvest(&state.pool, body).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: cosecha })))
}

/// POST /api/venta_grano
pub async fn create_grain_sale(
    State(state): State<AppState>,
    Json(body): Json<serde_json::Value>,
) -> AppResult<impl IntoResponse> {
    let venta = record_grain_sale(&state.pool, body).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: venta })))
}
