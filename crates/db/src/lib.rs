//! Persistence layer for the AgroNexo farm ledger.
//!
//! Exposes the pool constructor, migrations, the factory reset, and the
//! model/repository modules used by the API crate.

pub mod error;
pub mod models;
pub mod repositories;
pub mod seed;

use sqlx::postgres::PgPoolOptions;

pub type DbPool = sqlx::PgPool;

/// Every application table, children before parents.
pub const ALL_TABLES: &[&str] = &[
    "eventos_reproductivos",
    "ventas_grano",
    "cosechas",
    "lluvias",
    "ventas",
    "gastos",
    "pesajes",
    "contratos_campo",
    "animales",
    "silos",
    "protocolos",
    "insumos_geneticos",
    "insumos",
    "lotes",
];

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// Verify the database answers a trivial query.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply the embedded migrations in `crates/db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Empty every application table and restart id sequences.
///
/// The schema itself is left in place; migrations stay applied.
pub async fn reset_tables(pool: &DbPool) -> Result<(), sqlx::Error> {
    let query = format!(
        "TRUNCATE TABLE {} RESTART IDENTITY CASCADE",
        ALL_TABLES.join(", ")
    );
    sqlx::query(&query).execute(pool).await?;
    tracing::warn!(tables = ALL_TABLES.len(), "All farm ledger tables truncated");
    Ok(())
}
