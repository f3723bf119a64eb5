//! Handlers for livestock: registration, edits, weighings and moves.
//!
//! The plain functions (`create_animal`, `update_animal`, ...) hold the
//! operation itself and are shared with the generic module registry; the
//! axum handlers below wrap them with extraction and status codes.

use agronexo_core::error::CoreError;
use agronexo_core::types::DbId;
use agronexo_db::models::animal::Animal;
use agronexo_db::models::pesaje::Pesaje;
use agronexo_db::repositories::{AnimalRepo, PesajeRepo};
use agronexo_db::DbPool;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::request::{parse_body, AnimalBody, MoverBody, PesajeBody};
use crate::response::DataResponse;
use crate::state::AppState;

/// Outcome of a bulk move.
#[derive(Debug, Serialize)]
pub struct MoveResult {
    pub movidos: u64,
    pub lote_id: Option<DbId>,
}

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

pub async fn create_animal(pool: &DbPool, body: serde_json::Value) -> AppResult<Animal> {
    let input = parse_body::<AnimalBody>(body)?.into_create()?;
    let animal = AnimalRepo::create(pool, &input).await?;
    tracing::info!(animal_id = animal.id, caravana = %animal.caravana, "Animal registered");
    Ok(animal)
}

pub async fn update_animal(pool: &DbPool, id: DbId, body: serde_json::Value) -> AppResult<Animal> {
    let input = parse_body::<AnimalBody>(body)?.into_update()?;
    let animal = AnimalRepo::update(pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Animal",
            id,
        }))?;
    tracing::info!(animal_id = id, "Animal updated");
    Ok(animal)
}

/// Soft delete: the animal leaves the active herd, its history stays.
pub async fn deactivate_animal(pool: &DbPool, id: DbId) -> AppResult<()> {
    if AnimalRepo::deactivate(pool, id).await? {
        tracing::info!(animal_id = id, "Animal deactivated");
        return Ok(());
    }
    match AnimalRepo::find_by_id(pool, id).await? {
        Some(_) => Err(AppError::Core(CoreError::Conflict(format!(
            "Animal {id} is already inactive"
        )))),
        None => Err(AppError::Core(CoreError::NotFound {
            entity: "Animal",
            id,
        })),
    }
}

pub async fn record_weighing(pool: &DbPool, body: serde_json::Value) -> AppResult<Pesaje> {
    let input = parse_body::<PesajeBody>(body)?.into_create()?;
    let pesaje = PesajeRepo::create(pool, &input).await?;
    tracing::info!(animal_id = pesaje.animal_id, kilos = pesaje.kilos, "Weighing recorded");
    Ok(pesaje)
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/nuevo_animal
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<serde_json::Value>,
) -> AppResult<impl IntoResponse> {
    let animal = create_animal(&state.pool, body).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: animal })))
}

/// GET /api/detalle_animal/{id}
///
/// Animal with its weighings, expenses, reproductive events, sale and calves.
pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let detail = AnimalRepo::detail(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Animal",
            id,
        }))?;
    Ok(Json(DataResponse { data: detail }))
}

/// POST /api/nuevo_pesaje
pub async fn weigh(
    State(state): State<AppState>,
    Json(body): Json<serde_json::Value>,
) -> AppResult<impl IntoResponse> {
    let pesaje = record_weighing(&state.pool, body).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: pesaje })))
}

/// POST /api/mover_hacienda
///
/// Move a set of animals into a parcel, or out of any parcel when
/// `lote_id` is null. Sold animals are skipped.
pub async fn move_livestock(
    State(state): State<AppState>,
    Json(body): Json<serde_json::Value>,
) -> AppResult<impl IntoResponse> {
    let (animal_ids, lote_id) = parse_body::<MoverBody>(body)?.into_parts()?;
    let movidos = AnimalRepo::move_to_lote(&state.pool, &animal_ids, lote_id).await?;
    tracing::info!(requested = animal_ids.len(), movidos, ?lote_id, "Livestock moved");
    Ok(Json(DataResponse {
        data: MoveResult { movidos, lote_id },
    }))
}
