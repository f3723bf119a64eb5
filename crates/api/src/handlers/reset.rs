//! Database reset endpoints. Disabled unless `ALLOW_RESET` is set.

use agronexo_core::error::CoreError;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ResetResult {
    pub tablas: usize,
    pub demo: bool,
}

fn ensure_allowed(state: &AppState) -> AppResult<()> {
    if state.config.allow_reset {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::Conflict(
            "Reset is disabled on this server (set ALLOW_RESET=true)".to_string(),
        )))
    }
}

/// POST /api/reset_tablas
///
/// Empty every table.
pub async fn reset_tables(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    ensure_allowed(&state)?;
    agronexo_db::reset_tables(&state.pool).await?;
    Ok(Json(DataResponse {
        data: ResetResult {
            tablas: agronexo_db::ALL_TABLES.len(),
            demo: false,
        },
    }))
}

/// POST /api/reset_fabrica
/// GET /reset
///
/// Empty every table and load the demo rows.
pub async fn factory_reset(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    ensure_allowed(&state)?;
    agronexo_db::reset_tables(&state.pool).await?;
    agronexo_db::seed::seed_demo(&state.pool).await?;
    tracing::info!("Demo data loaded");
    Ok(Json(DataResponse {
        data: ResetResult {
            tablas: agronexo_db::ALL_TABLES.len(),
            demo: true,
        },
    }))
}
