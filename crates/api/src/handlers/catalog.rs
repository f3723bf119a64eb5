//! Operations on the protocol and genetics catalogs.
//!
//! Both catalogs are reached only through the generic module routes, so
//! there are no axum handlers here.

use agronexo_core::error::CoreError;
use agronexo_core::types::DbId;
use agronexo_db::models::catalog::{CatalogItem, CatalogTable};
use agronexo_db::repositories::CatalogRepo;
use agronexo_db::DbPool;

use crate::error::{AppError, AppResult};
use crate::request::{parse_body, CatalogBody};

pub async fn create_item(
    pool: &DbPool,
    table: CatalogTable,
    body: serde_json::Value,
) -> AppResult<CatalogItem> {
    let input = parse_body::<CatalogBody>(body)?.into_create()?;
    let item = CatalogRepo::create(pool, table, &input).await?;
    tracing::info!(
        catalog = table.table_name(),
        id = item.id,
        costo = item.costo,
        "Catalog entry created"
    );
    Ok(item)
}

pub async fn update_item(
    pool: &DbPool,
    table: CatalogTable,
    id: DbId,
    body: serde_json::Value,
) -> AppResult<CatalogItem> {
    let input = parse_body::<CatalogBody>(body)?.into_update()?;
    CatalogRepo::update(pool, table, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: table.entity_name(),
            id,
        }))
}

pub async fn delete_item(pool: &DbPool, table: CatalogTable, id: DbId) -> AppResult<()> {
    if !CatalogRepo::delete(pool, table, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: table.entity_name(),
            id,
        }));
    }
    tracing::info!(catalog = table.table_name(), id, "Catalog entry deleted");
    Ok(())
}
