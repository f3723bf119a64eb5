//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument. Operations touching more than
//! one table run inside a single transaction.

pub mod animal_repo;
pub mod catalog_repo;
pub mod contrato_repo;
pub mod cosecha_repo;
pub mod evento_reproductivo_repo;
pub mod gasto_repo;
pub mod insumo_repo;
pub mod lluvia_repo;
pub mod lote_repo;
pub mod pesaje_repo;
pub mod report_repo;
pub mod silo_repo;
pub mod venta_grano_repo;
pub mod venta_repo;

pub use animal_repo::AnimalRepo;
pub use catalog_repo::CatalogRepo;
pub use contrato_repo::ContratoRepo;
pub use cosecha_repo::CosechaRepo;
pub use evento_reproductivo_repo::ReproductiveEventRepo;
pub use gasto_repo::GastoRepo;
pub use insumo_repo::InsumoRepo;
pub use lluvia_repo::LluviaRepo;
pub use lote_repo::LoteRepo;
pub use pesaje_repo::PesajeRepo;
pub use report_repo::ReportRepo;
pub use silo_repo::SiloRepo;
pub use venta_grano_repo::VentaGranoRepo;
pub use venta_repo::VentaRepo;
