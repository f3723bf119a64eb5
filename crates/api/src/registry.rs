//! Typed registry behind the generic `/{modulo}` routes.
//!
//! Each [`EntityKind`] maps to one [`ModuleHandler`] trait object. The map is
//! built once at startup; a request only parses the module name into an
//! `EntityKind` and looks it up. Handlers serialize their rows to JSON so
//! the dispatcher can return any module through one response type.
//!
//! Append-only logs (weighings, sales, harvests, grain sales, reproductive
//! events, contracts) keep the default `update`/`delete`, which reject the
//! request.

use std::collections::HashMap;
use std::sync::Arc;

use agronexo_core::entity::EntityKind;
use agronexo_core::types::DbId;
use agronexo_db::models::catalog::CatalogTable;
use agronexo_db::repositories::{
    AnimalRepo, CatalogRepo, ContratoRepo, CosechaRepo, GastoRepo, InsumoRepo, LluviaRepo,
    LoteRepo, PesajeRepo, ReproductiveEventRepo, SiloRepo, VentaGranoRepo, VentaRepo,
};
use agronexo_db::DbPool;
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::handlers::{
    animal, catalog, gasto, grain, insumo, lluvia, lote, reproduction, venta,
};

/// CRUD surface of one entity module.
#[async_trait]
pub trait ModuleHandler: Send + Sync {
    fn kind(&self) -> EntityKind;

    async fn list(&self, pool: &DbPool, include_inactive: bool) -> AppResult<Value>;

    async fn create(&self, pool: &DbPool, body: Value) -> AppResult<Value>;

    async fn update(&self, _pool: &DbPool, _id: DbId, _body: Value) -> AppResult<Value> {
        Err(append_only(self.kind()))
    }

    async fn delete(&self, _pool: &DbPool, _id: DbId) -> AppResult<()> {
        Err(append_only(self.kind()))
    }
}

fn append_only(kind: EntityKind) -> AppError {
    AppError::BadRequest(format!(
        "Module '{kind}' is append-only; records cannot be edited or deleted"
    ))
}

fn to_json<T: Serialize>(value: T) -> AppResult<Value> {
    serde_json::to_value(value)
        .map_err(|e| AppError::InternalError(format!("Failed to serialize response: {e}")))
}

/// Lookup table from entity kind to handler.
pub struct ModuleRegistry {
    handlers: HashMap<EntityKind, Arc<dyn ModuleHandler>>,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        let modules: Vec<Arc<dyn ModuleHandler>> = vec![
            Arc::new(AnimalModule),
            Arc::new(LoteModule),
            Arc::new(ContratoModule),
            Arc::new(PesajeModule),
            Arc::new(GastoModule),
            Arc::new(VentaModule),
            Arc::new(LluviaModule),
            Arc::new(SiloModule),
            Arc::new(CosechaModule),
            Arc::new(VentaGranoModule),
            Arc::new(EventoModule),
            Arc::new(CatalogModule(CatalogTable::Protocolos)),
            Arc::new(CatalogModule(CatalogTable::InsumosGeneticos)),
            Arc::new(InsumoModule),
        ];
        let handlers = modules
            .into_iter()
            .map(|handler| (handler.kind(), handler))
            .collect();
        Self { handlers }
    }

    /// Handler for `kind`. Every kind is registered in [`ModuleRegistry::new`].
    pub fn get(&self, kind: EntityKind) -> AppResult<Arc<dyn ModuleHandler>> {
        self.handlers.get(&kind).cloned().ok_or_else(|| {
            AppError::InternalError(format!("No handler registered for module '{kind}'"))
        })
    }

    /// Resolve a module name from the URL.
    pub fn resolve(&self, modulo: &str) -> AppResult<Arc<dyn ModuleHandler>> {
        let kind: EntityKind = modulo.parse()?;
        self.get(kind)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl Default for ModuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Mutable modules
// ---------------------------------------------------------------------------

struct AnimalModule;

#[async_trait]
impl ModuleHandler for AnimalModule {
    fn kind(&self) -> EntityKind {
        EntityKind::Animales
    }

    async fn list(&self, pool: &DbPool, include_inactive: bool) -> AppResult<Value> {
        to_json(AnimalRepo::list_overview(pool, include_inactive).await?)
    }

    async fn create(&self, pool: &DbPool, body: Value) -> AppResult<Value> {
        to_json(animal::create_animal(pool, body).await?)
    }

    async fn update(&self, pool: &DbPool, id: DbId, body: Value) -> AppResult<Value> {
        to_json(animal::update_animal(pool, id, body).await?)
    }

    async fn delete(&self, pool: &DbPool, id: DbId) -> AppResult<()> {
        animal::deactivate_animal(pool, id).await
    }
}

struct LoteModule;

#[async_trait]
impl ModuleHandler for LoteModule {
    fn kind(&self) -> EntityKind {
        EntityKind::Lotes
    }

    async fn list(&self, pool: &DbPool, _include_inactive: bool) -> AppResult<Value> {
        to_json(LoteRepo::list(pool).await?)
    }

    async fn create(&self, pool: &DbPool, body: Value) -> AppResult<Value> {
        to_json(lote::create_lote(pool, body).await?)
    }

    async fn update(&self, pool: &DbPool, id: DbId, body: Value) -> AppResult<Value> {
        to_json(lote::update_lote(pool, id, body).await?)
    }

    async fn delete(&self, pool: &DbPool, id: DbId) -> AppResult<()> {
        lote::delete_lote(pool, id).await
    }
}

struct GastoModule;

#[async_trait]
impl ModuleHandler for GastoModule {
    fn kind(&self) -> EntityKind {
        EntityKind::Gastos
    }

    async fn list(&self, pool: &DbPool, _include_inactive: bool) -> AppResult<Value> {
        to_json(GastoRepo::list(pool).await?)
    }

    async fn create(&self, pool: &DbPool, body: Value) -> AppResult<Value> {
        to_json(gasto::create_gasto(pool, body).await?)
    }

    async fn update(&self, pool: &DbPool, id: DbId, body: Value) -> AppResult<Value> {
        to_json(gasto::update_gasto(pool, id, body).await?)
    }

    async fn delete(&self, pool: &DbPool, id: DbId) -> AppResult<()> {
        gasto::delete_gasto(pool, id).await
    }
}

struct LluviaModule;

#[async_trait]
impl ModuleHandler for LluviaModule {
    fn kind(&self) -> EntityKind {
        EntityKind::Lluvias
    }

    async fn list(&self, pool: &DbPool, _include_inactive: bool) -> AppResult<Value> {
        to_json(LluviaRepo::list(pool).await?)
    }

    async fn create(&self, pool: &DbPool, body: Value) -> AppResult<Value> {
        to_json(lluvia::create_lluvia(pool, body).await?)
    }

    async fn update(&self, pool: &DbPool, id: DbId, body: Value) -> AppResult<Value> {
        to_json(lluvia::update_lluvia(pool, id, body).await?)
    }

    async fn delete(&self, pool: &DbPool, id: DbId) -> AppResult<()> {
        lluvia::delete_lluvia(pool, id).await
    }
}

struct SiloModule;

#[async_trait]
impl ModuleHandler for SiloModule {
    fn kind(&self) -> EntityKind {
        EntityKind::Silos
    }

    async fn list(&self, pool: &DbPool, _include_inactive: bool) -> AppResult<Value> {
        to_json(SiloRepo::list(pool).await?)
    }

    async fn create(&self, pool: &DbPool, body: Value) -> AppResult<Value> {
        to_json(grain::create_silo(pool, body).await?)
    }

    async fn update(&self, pool: &DbPool, id: DbId, body: Value) -> AppResult<Value> {
        to_json(grain::update_silo(pool, id, body).await?)
    }

    async fn delete(&self, pool: &DbPool, id: DbId) -> AppResult<()> {
        grain::delete_silo(pool, id).await
    }
}

struct InsumoModule;

#[async_trait]
impl ModuleHandler for InsumoModule {
    fn kind(&self) -> EntityKind {
        EntityKind::Insumos
    }

    async fn list(&self, pool: &DbPool, _include_inactive: bool) -> AppResult<Value> {
        to_json(InsumoRepo::list(pool).await?)
    }

    async fn create(&self, pool: &DbPool, body: Value) -> AppResult<Value> {
        to_json(insumo::create_insumo(pool, body).await?)
    }

    async fn update(&self, pool: &DbPool, id: DbId, body: Value) -> AppResult<Value> {
        to_json(insumo::update_insumo(pool, id, body).await?)
    }

    async fn delete(&self, pool: &DbPool, id: DbId) -> AppResult<()> {
        insumo::delete_insumo(pool, id).await
    }
}

/// Protocols and genetic inputs share one shape and one handler type.
struct CatalogModule(CatalogTable);

#[async_trait]
impl ModuleHandler for CatalogModule {
    fn kind(&self) -> EntityKind {
        match self.0 {
            CatalogTable::Protocolos => EntityKind::Protocolos,
            CatalogTable::InsumosGeneticos => EntityKind::InsumosGeneticos,
        }
    }

    async fn list(&self, pool: &DbPool, _include_inactive: bool) -> AppResult<Value> {
        to_json(CatalogRepo::list(pool, self.0).await?)
    }

    async fn create(&self, pool: &DbPool, body: Value) -> AppResult<Value> {
        to_json(catalog::create_item(pool, self.0, body).await?)
    }

    async fn update(&self, pool: &DbPool, id: DbId, body: Value) -> AppResult<Value> {
        to_json(catalog::update_item(pool, self.0, id, body).await?)
    }

    async fn delete(&self, pool: &DbPool, id: DbId) -> AppResult<()> {
        catalog::delete_item(pool, self.0, id).await
    }
}

// ---------------------------------------------------------------------------
// Append-only modules
// ---------------------------------------------------------------------------

struct ContratoModule;

#[async_trait]
impl ModuleHandler for ContratoModule {
    fn kind(&self) -> EntityKind {
        EntityKind::Contratos
    }

    async fn list(&self, pool: &DbPool, _include_inactive: bool) -> AppResult<Value> {
        to_json(ContratoRepo::list(pool).await?)
    }

    async fn create(&self, pool: &DbPool, body: Value) -> AppResult<Value> {
        to_json(lote::create_contract(pool, body).await?)
    }
}

struct PesajeModule;

#[async_trait]
impl ModuleHandler for PesajeModule {
    fn kind(&self) -> EntityKind {
        EntityKind::Pesajes
    }

    async fn list(&self, pool: &DbPool, _include_inactive: bool) -> AppResult<Value> {
        to_json(PesajeRepo::list(pool).await?)
    }

    async fn create(&self, pool: &DbPool, body: Value) -> AppResult<Value> {
        to_json(animal::record_weighing(pool, body).await?)
    }
}

struct VentaModule;

#[async_trait]
impl ModuleHandler for VentaModule {
    fn kind(&self) -> EntityKind {
        EntityKind::Ventas
    }

    async fn list(&self, pool: &DbPool, _include_inactive: bool) -> AppResult<Value> {
        to_json(VentaRepo::list(pool).await?)
    }

    async fn create(&self, pool: &DbPool, body: Value) -> AppResult<Value> {
        to_json(venta::register_sale(pool, body).await?)
    }
}

struct CosechaModule;

#[async_trait]
impl ModuleHandler for CosechaModule {
    fn kind(&self) -> EntityKind {
        EntityKind::Cosechas
    }

    async fn list(&self, pool: &DbPool, _include_inactive: bool) -> AppResult<Value> {
        to_json(CosechaRepo::list(pool).await?)
    }

    async fn create(&self, pool: &DbPool, body: Value) -> AppResult<Value> {
        to_json(grain::record_harvest(pool, body).await?)
    }
}

struct VentaGranoModule;

#[async_trait]
impl ModuleHandler for VentaGranoModule {
    fn kind(&self) -> EntityKind {
        EntityKind::VentasGrano
    }

    async fn list(&self, pool: &DbPool, _include_inactive: bool) -> AppResult<Value> {
        to_json(VentaGranoRepo::list(pool).await?)
    }

    async fn create(&self, pool: &DbPool, body: Value) -> AppResult<Value> {
        to_json(grain::record_grain_sale(pool, body).await?)
    }
}

struct EventoModule;

#[async_trait]
impl ModuleHandler for EventoModule {
    fn kind(&self) -> EntityKind {
        EntityKind::EventosReproductivos
    }

    async fn list(&self, pool: &DbPool, _include_inactive: bool) -> AppResult<Value> {
        to_json(ReproductiveEventRepo::list(pool).await?)
    }

    async fn create(&self, pool: &DbPool, body: Value) -> AppResult<Value> {
        to_json(reproduction::record_event(pool, body).await?)
    }
}
