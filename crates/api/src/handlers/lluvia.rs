//! Handlers for the rainfall log.

use agronexo_core::error::CoreError;
use agronexo_core::types::DbId;
use agronexo_db::models::lluvia::Lluvia;
use agronexo_db::repositories::LluviaRepo;
use agronexo_db::DbPool;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::error::{AppError, AppResult};
use crate::request::{parse_body, LluviaBody};
use crate::response::DataResponse;
use crate::state::AppState;

pub async fn create_lluvia(pool: &DbPool, body: serde_json::Value) -> AppResult<Lluvia> {
    let input = parse_body::<LluviaBody>(body)?.into_create()?;
    let lluvia = LluviaRepo::create(pool, &input).await?;
    tracing::info!(lote_id = lluvia.lote_id, milimetros = lluvia.milimetros, "Rainfall recorded");
    Ok(lluvia)
}

pub async fn update_lluvia(pool: &DbPool, id: DbId, body: serde_json::Value) -> AppResult<Lluvia> {
    let input = parse_body::<LluviaBody>(body)?.into_update()?;
    LluviaRepo::update(pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Lluvia",
            id,
        }))
}

pub async fn delete_lluvia(pool: &DbPool, id: DbId) -> AppResult<()> {
    if !LluviaRepo::delete(pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Lluvia",
            id,
        }));
    }
    Ok(())
}

/// POST /api/registrar_lluvia
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<serde_json::Value>,
) -> AppResult<impl IntoResponse> {
    let lluvia = create_lluvia(&state.pool, body).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: lluvia })))
}
