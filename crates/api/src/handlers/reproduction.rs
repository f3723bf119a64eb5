//! Handlers for reproductive events, single and bulk.

use agronexo_db::models::evento_reproductivo::RecordedEvent;
use agronexo_db::repositories::ReproductiveEventRepo;
use agronexo_db::DbPool;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::error::AppResult;
use crate::request::{parse_body, BulkEventoBody, EventoBody};
use crate::response::DataResponse;
use crate::state::AppState;

pub async fn record_event(pool: &DbPool, body: serde_json::Value) -> AppResult<RecordedEvent> {
    let input = parse_body::<EventoBody>(body)?.into_create()?;
    Ok(ReproductiveEventRepo::record(pool, &input).await?)
}

/// POST /api/nuevo_evento_reproductivo
///
/// Records the event, moves the animal's reproductive status, books the
/// protocol/genetics cost as an expense and, for a birth, registers the calf.
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<serde_json::Value>,
) -> AppResult<impl IntoResponse> {
    let recorded = record_event(&state.pool, body).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: recorded })))
}

/// POST /api/evento_reproductivo_masivo
///
/// Applies one event to every active animal matched by `objetivo`.
pub async fn create_bulk(
    State(state): State<AppState>,
    Json(body): Json<serde_json::Value>,
) -> AppResult<impl IntoResponse> {
    let input = parse_body::<BulkEventoBody>(body)?.into_bulk()?;
    let recorded = ReproductiveEventRepo::record_bulk(&state.pool, &input).await?;
    tracing::info!(
        eventos = recorded.len(),
        tipo = input.details.tipo.as_str(),
        "Bulk reproductive event recorded"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: recorded })))
}
