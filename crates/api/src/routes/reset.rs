//! Route definitions for the database reset endpoints.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::reset;
use crate::state::AppState;

/// Reset routes, merged into `/api`.
///
/// ```text
/// POST /reset_tablas     -> empty all tables
/// POST /reset_fabrica    -> empty all tables and load demo rows
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/reset_tablas", post(reset::reset_tables))
        .route("/reset_fabrica", post(reset::factory_reset))
}

/// Root-level `GET /reset`, equivalent to `/api/reset_fabrica`.
pub fn root_router() -> Router<AppState> {
    Router::new().route("/reset", get(reset::factory_reset))
}
