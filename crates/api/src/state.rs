use std::sync::Arc;

use crate::config::ServerConfig;
use crate::registry::ModuleRegistry;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
/// Each request checks its own connection out of `pool` and returns it
/// when the handler completes.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: agronexo_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Handlers behind the generic `/{modulo}` routes, built once at startup.
    pub registry: Arc<ModuleRegistry>,
}

impl AppState {
    pub fn new(pool: agronexo_db::DbPool, config: ServerConfig) -> Self {
        Self {
            pool,
            config: Arc::new(config),
            registry: Arc::new(ModuleRegistry::new()),
        }
    }
}
