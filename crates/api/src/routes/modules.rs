//! Route definitions for the generic module dispatcher.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::modules;
use crate::state::AppState;

/// Generic routes, merged into `/api` after every named route.
///
/// ```text
/// GET    /{modulo}         -> list
/// POST   /{modulo}         -> create
/// PUT    /{modulo}/{id}    -> update
/// DELETE /{modulo}/{id}    -> delete (animals: deactivate)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{modulo}", get(modules::list).post(modules::create))
        .route("/{modulo}/{id}", put(modules::update).delete(modules::delete))
}
